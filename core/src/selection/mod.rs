//! Dataset selection
//!
//! Loads the annotation-box and file-path mapping tables, applies the
//! exam-type and patient-range filters, and parses volume/slice indices out
//! of mapping-table paths.

mod record;
mod tables;

pub use record::{parse_slice_index, parse_volume_index, MappingRecord};
pub use tables::{load_annotation_boxes, load_mapping, AnnotationBoxes};
