/// One decoded `key=value` telemetry line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    /// Active ride time in milliseconds (`t=`)
    RideTime(u64),
    /// Total number of crank revolutions (`v=`)
    Revolutions(u64),
    /// Duration of the most recent revolution in milliseconds (`d=`)
    Delta(u64),
}

/// Parse one line of the sensor protocol.
/// Returns None for malformed lines, unknown keys, and non-integer values.
pub fn parse_line(line: &str) -> Option<Update> {
    let mut parts = line.trim().split('=');
    let key   = parts.next()?.trim();
    let value = parts.next()?.trim();
    if parts.next().is_some() {
        return None;
    }

    let make: fn(u64) -> Update = match key {
        "t" | "ridetime"    => Update::RideTime,
        "v" | "revolutions" => Update::Revolutions,
        "d" | "delta"       => Update::Delta,
        _                   => return None,
    };

    match value.parse::<u64>() {
        Ok(n)  => Some(make(n)),
        Err(e) => {
            tracing::debug!(line = line.trim(), error = %e, "skipping telemetry line");
            None
        }
    }
}
