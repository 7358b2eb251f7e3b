use crate::extraction::ExtractionCounters;
use std::fmt;

/// End-of-run summary printed to standard output
pub struct ExtractionReport {
    counters: ExtractionCounters,
    selected_records: usize,
    per_class_quota: usize,
}

impl ExtractionReport {
    pub fn new(
        counters: ExtractionCounters,
        selected_records: usize,
        per_class_quota: usize,
    ) -> Self {
        Self {
            counters,
            selected_records,
            per_class_quota,
        }
    }
}

impl fmt::Display for ExtractionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Balanced Extraction")?;
        writeln!(f, "===================")?;
        writeln!(f, "Records selected: {}", self.selected_records)?;
        writeln!(
            f,
            "Positive slices:  {} / {}",
            self.counters.positive, self.per_class_quota
        )?;
        write!(
            f,
            "Negative slices:  {} / {}",
            self.counters.negative, self.per_class_quota
        )
    }
}
