mod app;
mod collectors;
mod config;
mod input;
mod models;
mod ui;
mod util;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use collectors::{reader::ReaderSource, serial, simulate::Simulator, TelemetrySource};
use config::Config;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, File};
use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ridetop", about = "LCD-style dashboard for a stationary bicycle sensor", version)]
struct Cli {
    /// Serial port the sensor is attached to (overrides config)
    #[arg(short, long)]
    port: Option<String>,

    /// Serial baud rate (overrides config)
    #[arg(short, long)]
    baud: Option<u32>,

    /// Sampling / redraw interval in milliseconds (overrides config)
    #[arg(short, long)]
    interval: Option<u64>,

    /// Color theme: white-on-black, orange
    #[arg(short = 't', long)]
    theme: Option<String>,

    /// Replay a recorded telemetry log instead of the serial port ("-" for stdin)
    #[arg(long, value_name = "FILE", conflicts_with = "simulate")]
    replay: Option<PathBuf>,

    /// Generate synthetic telemetry instead of reading the serial port
    #[arg(long)]
    simulate: bool,

    /// Headless: print one JSON line of metrics per tick instead of the TUI
    #[arg(long)]
    json: bool,

    /// Print config file path and current values, then exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.json);

    let mut cfg = Config::load();
    apply_overrides(&mut cfg, &cli);

    if cli.print_config {
        print_config(&cfg);
        return Ok(());
    }

    let source = open_source(&cli, &cfg)?;
    let mut app = App::new(cfg, source)?;

    if cli.json {
        return run_json(&mut app);
    }

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let result = run(&mut app);
    finish(result, restore_terminal)
}

/// Restore the terminal after the TUI exits. A failed restore is logged and
/// only surfaces when the run itself succeeded.
fn finish(result: Result<()>, restore: impl FnOnce() -> Result<()>) -> Result<()> {
    match (result, restore()) {
        (Err(e), Err(restore_err)) => {
            tracing::warn!(error = %restore_err, "could not restore terminal");
            Err(e)
        }
        (Err(e), Ok(()))     => Err(e),
        (Ok(()), restored)   => restored,
    }
}

/// Headless mode logs to stderr; the TUI owns the terminal, so it logs to a file.
fn init_logging(headless: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if headless {
        builder.with_writer(io::stderr).init();
        return;
    }
    match log_file() {
        Some(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).init(),
        None       => builder.with_writer(io::sink).init(),
    }
}

fn log_file() -> Option<File> {
    let dir = dirs::cache_dir()?.join("ridetop");
    fs::create_dir_all(&dir).ok()?;
    File::options().create(true).append(true).open(dir.join("ridetop.log")).ok()
}

fn apply_overrides(cfg: &mut Config, cli: &Cli) {
    if let Some(p) = &cli.port     { cfg.serial.port = p.clone(); }
    if let Some(b) = cli.baud      { cfg.serial.baud_rate = b; }
    if let Some(i) = cli.interval  { cfg.display.tick_ms = i; }
    if let Some(t) = &cli.theme    { cfg.display.theme = t.clone(); }
}

fn open_source(cli: &Cli, cfg: &Config) -> Result<Box<dyn TelemetrySource>> {
    if cli.simulate {
        tracing::info!("using simulated telemetry");
        return Ok(Box::new(Simulator::new()));
    }
    if let Some(path) = &cli.replay {
        if path.as_os_str() == "-" {
            tracing::info!("replaying telemetry from stdin");
            return Ok(Box::new(ReaderSource::spawn_paced("stdin", io::stdin())));
        }
        let file = File::open(path)
            .with_context(|| format!("cannot open replay log {}", path.display()))?;
        tracing::info!(path = %path.display(), "replaying telemetry log");
        return Ok(Box::new(ReaderSource::spawn_paced(&path.to_string_lossy(), file)));
    }
    Ok(Box::new(serial::open(&cfg.serial)?))
}

fn print_config(cfg: &Config) {
    let path = Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    println!("Config: {}", path);
    println!();
    println!("[serial]");
    println!("  port            = {}", cfg.serial.port);
    println!("  baud_rate       = {}", cfg.serial.baud_rate);
    println!("  timeout_ms      = {}", cfg.serial.timeout_ms);
    println!();
    println!("[cycle]");
    println!("  speed_divisor   = {}", cfg.cycle.speed_divisor);
    println!("  speed_smoothing = {}", cfg.cycle.speed_smoothing);
    println!();
    println!("[display]");
    println!("  theme           = {}", cfg.display.theme);
    println!("  tick_ms         = {}", cfg.display.tick_ms);
    println!("  time_format     = {}", cfg.display.time_format);
    println!("  graph_samples   = {}", cfg.display.graph_samples);
    println!("  graph_max_speed = {}", cfg.display.graph_max_speed);
}

fn run_json(app: &mut App) -> Result<()> {
    tracing::info!(interval_ms = app.tick_interval().as_millis() as u64, "headless mode");
    loop {
        let line = serde_json::to_string(app.tick())?;
        println!("{}", line);
        if app.source_exhausted() {
            return Ok(());
        }
        std::thread::sleep(app.tick_interval());
    }
}

fn run(app: &mut App) -> Result<()> {
    enable_raw_mode().context("cannot enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut term = Terminal::new(backend)?;

    app.run(&mut term)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_config() {
        let cli = Cli::parse_from(["ridetop", "--port", "/dev/ttyUSB0", "-b", "115200", "-i", "250", "-t", "orange"]);
        let mut cfg = Config::default();
        apply_overrides(&mut cfg, &cli);
        assert_eq!(cfg.serial.port, "/dev/ttyUSB0");
        assert_eq!(cfg.serial.baud_rate, 115200);
        assert_eq!(cfg.display.tick_ms, 250);
        assert_eq!(cfg.display.theme, "orange");
    }

    #[test]
    fn replay_and_simulate_are_exclusive() {
        assert!(Cli::try_parse_from(["ridetop", "--simulate", "--replay", "ride.log"]).is_err());
    }

    #[test]
    fn restore_failure_does_not_hide_the_run_error() {
        let err = finish(Err(anyhow::anyhow!("raw mode unsupported")), || Err(anyhow::anyhow!("not a tty")))
            .unwrap_err();
        assert_eq!(err.to_string(), "raw mode unsupported");

        let err = finish(Ok(()), || Err(anyhow::anyhow!("not a tty"))).unwrap_err();
        assert_eq!(err.to_string(), "not a tty");

        assert!(finish(Ok(()), || Ok(())).is_ok());
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
