//! Core type definitions for balanced slice extraction
//!
//! This module provides the fundamental types used throughout the mribal library:
//! - [`SliceLabel`]: Binary class of a kept slice (positive / negative)
//! - [`LabelDecision`]: Outcome of the labeling rule, including the ignored buffer zone
//! - [`BoxRange`]: Per-volume tumor slice range with the labeling rule
//! - [`ExtractionConfig`]: The full configuration surface of an extraction run

mod box_range;
mod config;
mod label;

pub use box_range::BoxRange;
pub use config::ExtractionConfig;
pub use label::{LabelDecision, SliceLabel};
