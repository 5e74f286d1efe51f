//! Data Logging
//!
//! Append-only CSV log files named after the calendar date. Multiple
//! runs on the same day append to the same file; there is no rotation,
//! locking, or dedup.

mod writer;

pub use writer::LogWriter;

use chrono::NaiveDate;

/// Daily log filename used by monitor runs: `DD_MM_YY.txt`
pub fn daily_log_name(date: NaiveDate) -> String {
    date.format("%d_%m_%y.txt").to_string()
}

/// Sweep log filename: the daily name prefixed with `results`
pub fn sweep_log_name(date: NaiveDate) -> String {
    date.format("results%d_%m_%y.txt").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_names() {
        let date = NaiveDate::from_ymd_opt(2020, 5, 3).unwrap();
        assert_eq!(daily_log_name(date), "03_05_20.txt");
        assert_eq!(sweep_log_name(date), "results03_05_20.txt");
    }
}
