//! Decoding statistics and result structures
//!
//! Malformed rows are dropped rather than failing an import; these types keep
//! track of what was dropped so callers can report it.

use crate::app::models::Record;

/// Decoded records with the header they were keyed by
#[derive(Debug, Clone)]
pub struct DecodeResult {
    /// Header names in document order
    pub headers: Vec<String>,

    /// Successfully decoded rows
    pub records: Vec<Record>,

    /// Row-level statistics
    pub stats: DecodeStats,
}

/// Row-level decoding statistics
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct DecodeStats {
    /// Non-empty data lines encountered
    pub total_rows: usize,

    /// Rows turned into records
    pub records_decoded: usize,

    /// Rows dropped because their field count did not match the header
    pub rows_skipped: usize,

    /// Empty lines ignored
    pub blank_lines: usize,

    /// One message per skipped row
    pub errors: Vec<String>,
}

impl DecodeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a dropped row with its diagnostic
    pub fn skip(&mut self, message: String) {
        self.rows_skipped += 1;
        self.errors.push(message);
    }

    /// Share of non-empty rows that decoded, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            (self.records_decoded as f64 / self.total_rows as f64) * 100.0
        }
    }

    pub fn has_skipped_rows(&self) -> bool {
        self.rows_skipped > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_rate() {
        let mut stats = DecodeStats::new();
        assert_eq!(stats.success_rate(), 0.0);

        stats.total_rows = 4;
        stats.records_decoded = 3;
        stats.skip("Line 3 has 2 values but header has 3 columns".to_string());

        assert_eq!(stats.success_rate(), 75.0);
        assert!(stats.has_skipped_rows());
        assert_eq!(stats.errors.len(), 1);
    }
}
