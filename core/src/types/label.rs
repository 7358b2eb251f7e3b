use std::fmt;

/// Binary class assigned to a slice that is kept for the output dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliceLabel {
    /// Slice lies outside the tumor box by more than the buffer width
    Negative,
    /// Slice lies within the tumor bounding-box slice range
    Positive,
}

impl SliceLabel {
    /// Output subdirectory for this class
    pub fn dir_name(&self) -> &'static str {
        match self {
            SliceLabel::Positive => "pos",
            SliceLabel::Negative => "neg",
        }
    }
}

impl fmt::Display for SliceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}

/// Outcome of the labeling rule for one slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelDecision {
    /// Slice is kept with the given class
    Keep(SliceLabel),
    /// Slice falls in the buffer zone adjacent to the tumor box; no output
    Ignored,
}
