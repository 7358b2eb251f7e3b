pub mod cli;
pub mod conversion;
pub mod error;
pub mod extraction;
pub mod selection;
pub mod types;

pub use cli::report::ExtractionReport;
pub use cli::Cli;
pub use conversion::PngConverter;
pub use error::{MribalError, Result};
pub use extraction::{BalancedExtractor, ConvertOutcome, ConvertSlice, ExtractionCounters};
pub use selection::{load_annotation_boxes, load_mapping, AnnotationBoxes, MappingRecord};
pub use types::*;
