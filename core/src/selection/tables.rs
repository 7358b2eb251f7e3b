use crate::error::{MribalError, Result};
use crate::selection::record::{parse_slice_index, parse_volume_index, MappingRecord};
use crate::types::{BoxRange, ExtractionConfig};
use log::info;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct BoxRow {
    #[serde(rename = "Start Slice")]
    start_slice: u32,
    #[serde(rename = "End Slice")]
    end_slice: u32,
}

#[derive(Debug, Deserialize)]
struct MappingRow {
    original_path_and_filename: String,
    classic_path: String,
}

/// Tumor bounding-box slice ranges keyed by 1-based volume index.
///
/// Row order in the annotation table is the volume index: row 1 describes
/// volume 1 and so on.
#[derive(Debug, Clone)]
pub struct AnnotationBoxes {
    ranges: Vec<BoxRange>,
}

impl AnnotationBoxes {
    /// Looks up the box range for a 1-based volume index
    pub fn get(&self, volume_index: u32) -> Option<&BoxRange> {
        let row = (volume_index as usize).checked_sub(1)?;
        self.ranges.get(row)
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Loads the annotation-box table.
///
/// Every row is validated against the `end_slice >= start_slice` invariant;
/// a violation anywhere in the table is a fatal [`MribalError::DataIntegrity`]
/// error rather than a best-effort skip.
pub fn load_annotation_boxes(path: &Path) -> Result<AnnotationBoxes> {
    if !path.is_file() {
        return Err(MribalError::Config(format!(
            "annotation box table not found: {}",
            path.display()
        )));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut ranges = Vec::new();
    for row in reader.deserialize() {
        let row: BoxRow = row?;
        ranges.push(BoxRange::new(row.start_slice, row.end_slice)?);
    }

    info!(
        "Loaded {} annotation boxes from {}",
        ranges.len(),
        path.display()
    );
    Ok(AnnotationBoxes { ranges })
}

/// Loads the file-path mapping table and applies the exam-type and
/// patient-range filters, preserving table order.
///
/// Rows whose path lacks a `Breast_MRI_<n>` segment cannot match the patient
/// filter and are excluded like any other non-matching row. A filter that
/// matches nothing yields an empty vector, not an error.
///
/// # Errors
///
/// Returns [`MribalError::MalformedPath`] when a row that passes both
/// filters carries a filename with no parseable slice index.
pub fn load_mapping(path: &Path, config: &ExtractionConfig) -> Result<Vec<MappingRecord>> {
    if !path.is_file() {
        return Err(MribalError::Config(format!(
            "mapping table not found: {}",
            path.display()
        )));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    let mut total = 0usize;
    for row in reader.deserialize() {
        let row: MappingRow = row?;
        total += 1;

        if !row.original_path_and_filename.contains(&config.exam_filter) {
            continue;
        }
        let volume_index = match parse_volume_index(&row.original_path_and_filename) {
            Ok(v) => v,
            Err(_) => continue,
        };
        if !config.includes_patient(volume_index) {
            continue;
        }

        let slice_index = parse_slice_index(&row.original_path_and_filename)?;
        records.push(MappingRecord {
            volume_index,
            slice_index,
            source_path: config.data_root.join(&row.classic_path),
        });
    }

    info!(
        "Selected {} of {} mapping rows (exam filter \"{}\", patients {}-{})",
        records.len(),
        total,
        config.exam_filter,
        config.patient_low,
        config.patient_high
    );
    Ok(records)
}
