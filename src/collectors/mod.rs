pub mod protocol;
pub mod reader;
pub mod serial;
pub mod simulate;

use protocol::Update;

/// Anything that can be polled for fresh telemetry once per tick.
pub trait TelemetrySource {
    /// Every update received since the last poll. Never blocks.
    fn poll(&mut self) -> Vec<Update>;

    /// True when no further updates will ever arrive.
    fn exhausted(&self) -> bool { false }
}
