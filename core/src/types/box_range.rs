use crate::error::{MribalError, Result};
use crate::types::{LabelDecision, SliceLabel};

/// Tumor extent of one 3D volume, reduced to a slice-index range.
///
/// Slice indices are 1-based, matching the source dataset. The range is
/// inclusive as stored (`start_slice..=end_slice`), but the labeling rule
/// treats it as half-open: `end_slice` itself is never positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxRange {
    start_slice: u32,
    end_slice: u32,
}

impl BoxRange {
    /// Creates a validated range.
    ///
    /// # Errors
    ///
    /// Returns [`MribalError::DataIntegrity`] if `end_slice < start_slice`,
    /// which indicates corrupt annotation data.
    pub fn new(start_slice: u32, end_slice: u32) -> Result<Self> {
        if end_slice < start_slice {
            return Err(MribalError::DataIntegrity(format!(
                "end slice {} precedes start slice {}",
                end_slice, start_slice
            )));
        }
        Ok(Self {
            start_slice,
            end_slice,
        })
    }

    pub fn start_slice(&self) -> u32 {
        self.start_slice
    }

    pub fn end_slice(&self) -> u32 {
        self.end_slice
    }

    /// Applies the labeling rule to a slice index.
    ///
    /// In priority order:
    /// - positive when `start_slice <= i < end_slice` (half-open);
    /// - negative when `i + buffer <= start_slice` or `i - buffer > end_slice`
    ///   (strict `>` on the upper side);
    /// - otherwise ignored (the buffer zone adjacent to the box).
    ///
    /// The asymmetry between the two negative margins is deliberate: it
    /// defines the class boundary of the source dataset and must not be
    /// normalized.
    pub fn decide(&self, slice_index: u32, buffer: u32) -> LabelDecision {
        if slice_index >= self.start_slice && slice_index < self.end_slice {
            return LabelDecision::Keep(SliceLabel::Positive);
        }

        let i = i64::from(slice_index);
        let buffer = i64::from(buffer);
        if i + buffer <= i64::from(self.start_slice) || i - buffer > i64::from(self.end_slice) {
            return LabelDecision::Keep(SliceLabel::Negative);
        }

        LabelDecision::Ignored
    }
}
