use crate::collectors::protocol::Update;
use crate::config::CycleConfig;
use crate::util::history::{History, HistoryError};
use chrono::NaiveTime;
use serde::Serialize;

/// Latest state reported by the bicycle sensor plus derived metrics.
#[derive(Debug, Clone)]
pub struct Cycle {
    pub ride_time_ms: u64,
    pub revolutions:  u64,
    pub delta_ms:     u64,   // duration of the last revolution
    speed_divisor:    f64,
    speed_history:    History,
}

/// One tick's worth of derived numbers, ready for display or JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub ride_time_ms:   u64,
    pub ride_time:      String,
    pub speed:          f64,
    pub smoothed_speed: f64,
    pub rpm:            f64,
    pub revolutions:    u64,
}

impl Cycle {
    pub fn new(cfg: &CycleConfig) -> Result<Self, HistoryError> {
        Ok(Self {
            ride_time_ms:  0,
            revolutions:   0,
            delta_ms:      0,
            speed_divisor: cfg.speed_divisor,
            speed_history: History::new(cfg.speed_smoothing)?,
        })
    }

    pub fn apply(&mut self, update: Update) {
        match update {
            Update::RideTime(ms)   => self.ride_time_ms = ms,
            Update::Revolutions(n) => self.revolutions  = n,
            Update::Delta(ms)      => self.delta_ms     = ms,
        }
    }

    pub fn apply_all(&mut self, updates: impl IntoIterator<Item = Update>) {
        for u in updates {
            self.apply(u);
        }
    }

    pub fn rpm(&self) -> f64 {
        if self.delta_ms == 0 { 0.0 } else { 60_000.0 / self.delta_ms as f64 }
    }

    /// Speed in km/h; the divisor was fitted against the stock meter.
    pub fn speed(&self) -> f64 {
        self.rpm() / self.speed_divisor
    }

    pub fn ride_time(&self) -> NaiveTime {
        let secs  = (self.ride_time_ms / 1000) % 86_400;
        let nanos = (self.ride_time_ms % 1000) * 1_000_000;
        NaiveTime::from_num_seconds_from_midnight_opt(secs as u32, nanos as u32)
            .unwrap_or(NaiveTime::MIN)
    }

    pub fn smoothed_speed(&self) -> f64 {
        self.speed_history.mean()
    }

    /// Record the current speed and snapshot everything for this tick.
    pub fn sample(&mut self, time_format: &str) -> Metrics {
        self.speed_history.add(self.speed());
        self.metrics(time_format)
    }

    /// Current numbers without recording a smoothing sample.
    pub fn metrics(&self, time_format: &str) -> Metrics {
        Metrics {
            ride_time_ms:   self.ride_time_ms,
            ride_time:      self.ride_time().format(time_format).to_string(),
            speed:          self.speed(),
            smoothed_speed: self.smoothed_speed(),
            rpm:            self.rpm(),
            revolutions:    self.revolutions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle() -> Cycle {
        Cycle::new(&CycleConfig::default()).unwrap()
    }

    #[test]
    fn idle_cycle_reports_zero() {
        let c = cycle();
        assert_eq!(c.rpm(), 0.0);
        assert_eq!(c.speed(), 0.0);
        assert_eq!(c.ride_time(), NaiveTime::MIN);
    }

    #[test]
    fn rpm_and_speed_from_delta() {
        let mut c = cycle();
        c.apply(Update::Delta(800));
        assert_eq!(c.rpm(), 75.0);
        assert!((c.speed() - 75.0 / 3.5).abs() < 1e-9);
    }

    #[test]
    fn updates_replace_previous_values() {
        let mut c = cycle();
        c.apply_all([Update::Revolutions(3), Update::RideTime(61_500), Update::Revolutions(4)]);
        assert_eq!(c.revolutions, 4);
        assert_eq!(c.ride_time().format("%M:%S").to_string(), "01:01");
    }

    #[test]
    fn ride_time_wraps_at_a_day() {
        let mut c = cycle();
        c.apply(Update::RideTime(86_400_000 + 5_000));
        assert_eq!(c.ride_time().format("%H:%M:%S").to_string(), "00:00:05");
    }

    #[test]
    fn sample_smooths_over_configured_window() {
        let mut c = cycle();   // default window of 2
        c.apply(Update::Delta(1000));   // 60 rpm
        let first = c.sample("%M:%S");
        assert_eq!(first.smoothed_speed, first.speed);

        c.apply(Update::Delta(500));    // 120 rpm
        let second = c.sample("%M:%S");
        assert_eq!(second.rpm, 120.0);
        assert!((second.smoothed_speed - (90.0 / 3.5)).abs() < 1e-9);

        c.apply(Update::Delta(0));
        assert_eq!(c.metrics("%M:%S").smoothed_speed, second.smoothed_speed);
        let third = c.sample("%M:%S");
        assert_eq!(third.speed, 0.0);
        assert!((third.smoothed_speed - (60.0 / 3.5)).abs() < 1e-9);
    }

    #[test]
    fn zero_smoothing_window_is_an_error() {
        let cfg = CycleConfig { speed_smoothing: 0, ..CycleConfig::default() };
        assert!(Cycle::new(&cfg).is_err());
    }
}
