use super::reader::ReaderSource;
use crate::config::SerialConfig;
use anyhow::{Context, Result};
use std::time::Duration;

/// Open the sensor's serial port and start reading telemetry from it.
pub fn open(cfg: &SerialConfig) -> Result<ReaderSource> {
    let mut port = serialport::new(&cfg.port, cfg.baud_rate)
        .timeout(Duration::from_millis(cfg.timeout_ms.max(1)))
        .open()
        .with_context(|| format!("sensor not connected on {} ({} baud)", cfg.port, cfg.baud_rate))?;

    // Leonardo-style boards only start talking once DTR is asserted.
    port.write_data_terminal_ready(true)
        .with_context(|| format!("could not assert DTR on {}", cfg.port))?;

    tracing::info!(port = %cfg.port, baud = cfg.baud_rate, "serial connection open");
    Ok(ReaderSource::spawn(&cfg.port, port))
}
