//! Wall-clock timestamp helper
//!
//! Readings are stamped with the local time of day as a fractional minute
//! count. The count resets to zero at midnight; downstream plotting
//! tooling expects that and stitches days together by filename.

use chrono::{Local, NaiveTime, Timelike};

/// Convert a time of day to fractional minutes: `H*60 + M + S/60`.
pub fn minutes_since_midnight(time: NaiveTime) -> f64 {
    f64::from(time.hour()) * 60.0 + f64::from(time.minute()) + f64::from(time.second()) / 60.0
}

/// Fractional minutes since local midnight, right now.
pub fn now_minutes() -> f64 {
    minutes_since_midnight(Local::now().time())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_known_values() {
        assert_eq!(minutes_since_midnight(at(0, 0, 0)), 0.0);
        assert_eq!(minutes_since_midnight(at(1, 0, 0)), 60.0);
        assert_eq!(minutes_since_midnight(at(0, 30, 30)), 30.5);
        assert!((minutes_since_midnight(at(23, 59, 59)) - 1439.983_333).abs() < 1e-6);
    }

    #[test]
    fn test_monotone_within_a_day() {
        let mut previous = -1.0;
        for h in 0..24 {
            for m in (0..60).step_by(7) {
                for s in (0..60).step_by(13) {
                    let minutes = minutes_since_midnight(at(h, m, s));
                    assert!(
                        minutes >= previous,
                        "went backwards at {h:02}:{m:02}:{s:02}"
                    );
                    previous = minutes;
                }
            }
        }
    }

    #[test]
    fn test_now_minutes_in_range() {
        let minutes = now_minutes();
        assert!((0.0..1440.0).contains(&minutes));
    }
}
