use chrono::NaiveTime;

/// Speed with one decimal: "21.4"
pub fn fmt_speed(speed: f64) -> String {
    format!("{:.1}", if speed > 0.0 { speed } else { 0.0 })
}

/// Whole revolutions per minute, truncated: "75"
pub fn fmt_rpm(rpm: f64) -> String {
    format!("{}", rpm as u64)
}

/// Revolution counter: "1234"
pub fn fmt_revs(revs: u64) -> String {
    format!("{}", revs)
}

/// Ride time through a strftime pattern. With `colon` off every ':' is
/// blanked so the display can blink it once per tick.
pub fn fmt_clock(time: NaiveTime, pattern: &str, colon: bool) -> String {
    if colon {
        time.format(pattern).to_string()
    } else {
        time.format(&pattern.replace(':', " ")).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers() {
        assert_eq!(fmt_speed(21.43), "21.4");
        assert_eq!(fmt_speed(-2.0), "0.0");
        assert_eq!(fmt_rpm(75.9), "75");
        assert_eq!(fmt_revs(1234), "1234");
    }

    #[test]
    fn clock_blinks_colon() {
        let t = NaiveTime::from_hms_opt(0, 3, 7).unwrap();
        assert_eq!(fmt_clock(t, "%M:%S", true), "03:07");
        assert_eq!(fmt_clock(t, "%M:%S", false), "03 07");
    }
}
