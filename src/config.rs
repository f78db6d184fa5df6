use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub serial: SerialConfig,

    #[serde(default)]
    pub cycle: CycleConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Serial device the sensor is attached to
    pub port: String,
    pub baud_rate: u32,
    /// Read timeout in milliseconds; bounds how long a partial line may stall
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    /// rpm / speed_divisor = km/h (fitted against the stock meter)
    pub speed_divisor: f64,
    /// Number of ticks averaged into the smoothed speed (at least 1)
    pub speed_smoothing: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// "white-on-black" or "orange"
    pub theme: String,
    /// Sampling / redraw interval in milliseconds
    pub tick_ms: u64,
    /// strftime pattern for the ride time panel
    pub time_format: String,
    /// Number of speed samples kept in the graph
    pub graph_samples: usize,
    /// Speed mapped to the top of the graph
    pub graph_max_speed: f64,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for SerialConfig {
    fn default() -> Self {
        Self { port: "/dev/ttyACM0".into(), baud_rate: 9600, timeout_ms: 100 }
    }
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self { speed_divisor: 3.5, speed_smoothing: 2 }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme:           "white-on-black".into(),
            tick_ms:         1000,
            time_format:     "%M:%S".into(),
            graph_samples:   100,
            graph_max_speed: 30.0,
        }
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    pub fn load() -> Self {
        match try_load() {
            Ok(c)  => c,
            Err(e) => {
                tracing::info!(error = %e, "using default config");
                // Write defaults on first run (best-effort)
                if let Err(e) = try_write_defaults() {
                    tracing::debug!(error = %e, "could not write default config");
                }
                Config::default()
            }
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ridetop").join("ridetop.toml"))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

fn try_load() -> Result<Config> {
    let path = Config::config_path().ok_or_else(|| anyhow::anyhow!("no config dir"))?;
    let text = fs::read_to_string(&path)?;
    let cfg = Config::from_toml(&text)?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(cfg)
}

fn try_write_defaults() -> Result<()> {
    let path = Config::config_path().ok_or_else(|| anyhow::anyhow!("no config dir"))?;
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(path, format!("# ridetop configuration\n# Generated on first run, edit freely\n\n{}", text))?;
    Ok(())
}
