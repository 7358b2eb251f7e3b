use crate::error::{MribalError, Result};
use std::path::PathBuf;

/// Configuration surface of one extraction run.
///
/// The defaults target the Duke Breast Cancer MRI release: fat-saturated
/// "pre" exams of patients 201-300, 2600 output images per class, and a
/// 5-slice ignored buffer around each tumor box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Root directory the mapping table's `classic_path` values are joined against
    pub data_root: PathBuf,
    /// Annotation-box table, one row per volume in volume-index order
    pub boxes_path: PathBuf,
    /// File-path mapping table, one row per 2D slice
    pub mapping_path: PathBuf,
    /// Destination root for the `pos/` and `neg/` PNG trees
    pub output_root: PathBuf,
    /// Substring an exam path must contain to be included
    pub exam_filter: String,
    /// Lowest included patient (volume) index, 1-based
    pub patient_low: u32,
    /// Highest included patient (volume) index, inclusive
    pub patient_high: u32,
    /// Maximum number of output images per class
    pub per_class_quota: usize,
    /// Width of the ignored buffer zone around the tumor box, in slices
    pub buffer: u32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("manifest-1662587153455"),
            boxes_path: PathBuf::from("Annotation_Boxes.csv"),
            mapping_path: PathBuf::from("Breast-Cancer-MRI-filepath_filename-mapping.csv"),
            output_root: PathBuf::from("png_out"),
            exam_filter: "pre".to_string(),
            patient_low: 201,
            patient_high: 300,
            per_class_quota: 2600,
            buffer: 5,
        }
    }
}

impl ExtractionConfig {
    /// Checks the cross-field constraints that clap cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.patient_low == 0 {
            return Err(MribalError::Config(
                "patient indices are 1-based; 0 is not a valid lower bound".to_string(),
            ));
        }
        if self.patient_low > self.patient_high {
            return Err(MribalError::Config(format!(
                "patient range is empty: {} > {}",
                self.patient_low, self.patient_high
            )));
        }
        Ok(())
    }

    /// Whether a 1-based volume index falls inside the patient filter
    pub fn includes_patient(&self, volume_index: u32) -> bool {
        (self.patient_low..=self.patient_high).contains(&volume_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = ExtractionConfig::default();
        assert_eq!(config.exam_filter, "pre");
        assert_eq!(config.patient_low, 201);
        assert_eq!(config.patient_high, 300);
        assert_eq!(config.per_class_quota, 2600);
        assert_eq!(config.buffer, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_range() {
        let config = ExtractionConfig {
            patient_low: 300,
            patient_high: 201,
            ..Default::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            MribalError::Config(_)
        ));
    }

    #[test]
    fn test_validate_rejects_zero_low_bound() {
        let config = ExtractionConfig {
            patient_low: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_includes_patient_bounds() {
        let config = ExtractionConfig::default();
        assert!(!config.includes_patient(200));
        assert!(config.includes_patient(201));
        assert!(config.includes_patient(300));
        assert!(!config.includes_patient(301));
    }
}
