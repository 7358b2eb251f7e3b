//! Slice labeling and balanced extraction
//!
//! The single ordered pass over the filtered mapping records: label each
//! slice against its volume's annotation box and convert it until both class
//! quotas are filled.

mod extractor;

pub use extractor::{BalancedExtractor, ConvertOutcome, ConvertSlice, ExtractionCounters};
