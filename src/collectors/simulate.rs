use super::protocol::Update;
use super::TelemetrySource;
use std::time::Instant;

const MIN_RPM:   f64 = 50.0;
const MAX_RPM:   f64 = 90.0;
const PERIOD_S:  f64 = 40.0;   // one full cadence swing

/// Synthetic rider for running without hardware.
pub struct Simulator {
    started:     Instant,
    revolutions: f64,
    last_ms:     u64,
}

impl Simulator {
    pub fn new() -> Self {
        Self { started: Instant::now(), revolutions: 0.0, last_ms: 0 }
    }

    /// Updates for a ride that has been going for `elapsed_ms`.
    pub fn step(&mut self, elapsed_ms: u64) -> Vec<Update> {
        let dt_min = elapsed_ms.saturating_sub(self.last_ms) as f64 / 60_000.0;
        self.last_ms = elapsed_ms.max(self.last_ms);

        let rpm = cadence(self.last_ms);
        self.revolutions += rpm * dt_min;

        vec![
            Update::RideTime(self.last_ms),
            Update::Revolutions(self.revolutions as u64),
            Update::Delta((60_000.0 / rpm).round() as u64),
        ]
    }
}

impl Default for Simulator {
    fn default() -> Self { Self::new() }
}

impl TelemetrySource for Simulator {
    fn poll(&mut self) -> Vec<Update> {
        let ms = self.started.elapsed().as_millis() as u64;
        self.step(ms)
    }
}

fn cadence(ms: u64) -> f64 {
    let phase = (ms as f64 / 1000.0) / PERIOD_S * std::f64::consts::TAU;
    let mid = (MIN_RPM + MAX_RPM) / 2.0;
    mid + (MAX_RPM - mid) * phase.sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revs(updates: &[Update]) -> u64 {
        updates.iter().find_map(|u| match u { Update::Revolutions(n) => Some(*n), _ => None }).unwrap()
    }

    #[test]
    fn cadence_stays_in_range() {
        for s in 0..200 {
            let rpm = cadence(s * 500);
            assert!((MIN_RPM..=MAX_RPM).contains(&rpm), "rpm {rpm} out of range");
        }
    }

    #[test]
    fn revolutions_never_decrease() {
        let mut sim = Simulator::new();
        let mut prev = 0;
        for s in 0..120 {
            let r = revs(&sim.step(s * 1000));
            assert!(r >= prev);
            prev = r;
        }
        // ~70 rpm average over two minutes
        assert!((100..=180).contains(&prev), "unexpected total {prev}");
    }

    #[test]
    fn delta_matches_cadence() {
        let mut sim = Simulator::new();
        let updates = sim.step(10_000);
        assert!(updates.contains(&Update::RideTime(10_000)));
        let delta = updates.iter().find_map(|u| match u { Update::Delta(d) => Some(*d), _ => None }).unwrap();
        assert!((666..=1200).contains(&delta));
    }
}
