pub mod report;

use crate::types::ExtractionConfig;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for mribal
///
/// Every item of the configuration surface is overridable; the defaults
/// target the Duke Breast Cancer MRI release.
#[derive(Parser, Debug)]
#[command(name = "mribal")]
#[command(about = "Extract a balanced 2D PNG dataset from breast MRI DICOM volumes")]
#[command(version)]
pub struct Cli {
    /// Root directory the mapping table's classic paths are joined against
    #[arg(long, value_name = "DIR", default_value = "manifest-1662587153455")]
    pub data_root: PathBuf,

    /// Annotation-box table (one row per volume, "Start Slice"/"End Slice" columns)
    #[arg(long, value_name = "FILE", default_value = "Annotation_Boxes.csv")]
    pub boxes: PathBuf,

    /// File-path mapping table (one row per 2D slice)
    #[arg(
        long,
        value_name = "FILE",
        default_value = "Breast-Cancer-MRI-filepath_filename-mapping.csv"
    )]
    pub mapping: PathBuf,

    /// Output directory for the pos/ and neg/ PNG trees
    #[arg(short, long, value_name = "DIR", default_value = "png_out")]
    pub output: PathBuf,

    /// Substring an exam path must contain (e.g. "pre" for pre-contrast fat-saturated exams)
    #[arg(long, default_value = "pre")]
    pub exam: String,

    /// Lowest patient (volume) index to include, 1-based
    #[arg(long, default_value_t = 201)]
    pub patient_low: u32,

    /// Highest patient (volume) index to include, inclusive
    #[arg(long, default_value_t = 300)]
    pub patient_high: u32,

    /// Maximum number of output images per class
    #[arg(long, default_value_t = 2600)]
    pub quota: usize,

    /// Width of the ignored buffer zone around the tumor box, in slices
    #[arg(long, default_value_t = 5)]
    pub buffer: u32,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn to_config(&self) -> ExtractionConfig {
        ExtractionConfig {
            data_root: self.data_root.clone(),
            boxes_path: self.boxes.clone(),
            mapping_path: self.mapping.clone(),
            output_root: self.output.clone(),
            exam_filter: self.exam.clone(),
            patient_low: self.patient_low,
            patient_high: self.patient_high,
            per_class_quota: self.quota,
            buffer: self.buffer,
        }
    }
}
