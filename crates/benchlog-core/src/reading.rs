//! Readings and field parsing
//!
//! A reading is an ordered tuple of floating-point fields destined for
//! the log file; field order is fixed and positional. Telemetry lines are
//! whitespace-split with a per-field zero-fallback, so a garbled field
//! never changes the record's shape.

/// Parse the first `count` whitespace-separated fields of a telemetry line.
///
/// Missing or non-numeric fields become `0.0`; fields beyond `count` are
/// ignored. The result always has exactly `count` entries.
pub fn parse_fields(line: &str, count: usize) -> Vec<f64> {
    let mut tokens = line.split_whitespace();
    (0..count)
        .map(|_| {
            tokens
                .next()
                .and_then(|t| t.parse::<f64>().ok())
                .unwrap_or(0.0)
        })
        .collect()
}

/// One timestamped record destined for the log file
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    fields: Vec<f64>,
}

impl Reading {
    /// Build a reading from the elapsed-minutes timestamp and the
    /// remaining fields in their positional order.
    pub fn new(elapsed_minutes: f64, rest: impl IntoIterator<Item = f64>) -> Self {
        let mut fields = vec![elapsed_minutes];
        fields.extend(rest);
        Self { fields }
    }

    /// All fields, timestamp first.
    pub fn fields(&self) -> &[f64] {
        &self.fields
    }

    /// Format as one CSV line, each field with exactly two decimals.
    /// No trailing newline.
    pub fn to_csv(&self) -> String {
        self.fields
            .iter()
            .map(|v| format!("{v:.2}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_valid_line() {
        assert_eq!(parse_fields("1.5 2.5 3.5 4.5", 4), vec![1.5, 2.5, 3.5, 4.5]);
    }

    #[test]
    fn test_parse_ignores_extra_tokens() {
        assert_eq!(parse_fields("1 2 3 4 5 6 7", 4), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_parse_missing_fields_become_zero() {
        assert_eq!(parse_fields("1.5 2.5", 4), vec![1.5, 2.5, 0.0, 0.0]);
        assert_eq!(parse_fields("", 4), vec![0.0; 4]);
    }

    #[test]
    fn test_parse_garbled_field_becomes_zero() {
        assert_eq!(parse_fields("1.5 xx 3.5 4.5", 4), vec![1.5, 0.0, 3.5, 4.5]);
        // Malformed fields never change the record shape
        assert_eq!(parse_fields("nan? -- !", 4).len(), 4);
    }

    #[test]
    fn test_parse_handles_crlf_tails() {
        assert_eq!(parse_fields("1.5 2.5\r", 2), vec![1.5, 2.5]);
    }

    #[test]
    fn test_csv_two_decimals() {
        let reading = Reading::new(62.5, vec![0.0, 1.234, 5.678]);
        assert_eq!(reading.to_csv(), "62.50,0.00,1.23,5.68");
    }

    #[test]
    fn test_csv_round_trip_within_tolerance() {
        let reading = Reading::new(1234.5678, vec![1.111, 2.222, 3.333, 4.444, 5.555]);
        let reparsed: Vec<f64> = reading
            .to_csv()
            .split(',')
            .map(|f| f.parse().unwrap())
            .collect();
        assert_eq!(reparsed.len(), reading.fields().len());
        for (orig, round) in reading.fields().iter().zip(&reparsed) {
            assert!((orig - round).abs() < 0.005, "{orig} vs {round}");
        }
    }
}
