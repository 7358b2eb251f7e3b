use std::path::PathBuf;
use thiserror::Error;

/// Result type for mribal operations
pub type Result<T> = std::result::Result<T, MribalError>;

/// Error types for mribal operations
#[derive(Error, Debug)]
pub enum MribalError {
    /// A required input table or directory is missing or unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// Table parsing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// DICOM reading or pixel decoding error
    #[error("DICOM error: {0}")]
    Dicom(String),

    /// A mapping-table path does not match the expected grammar
    #[error("Malformed path: {0}")]
    MalformedPath(String),

    /// A volume in the mapping table has no annotation-box row
    #[error("No annotation box for volume {volume}")]
    BoxNotFound { volume: u32 },

    /// Annotation data violates a structural invariant
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    /// Slice source file missing even after the one-shot filename correction
    #[error("Source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// All-zero pixel grid cannot be rescaled to 8 bits
    #[error("Degenerate intensity (all-zero pixel data): {}", .0.display())]
    DegenerateIntensity(PathBuf),

    /// PNG encoding or writing error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for MribalError {
    fn from(e: dicom_object::ReadError) -> Self {
        MribalError::Dicom(format!("{}", e))
    }
}
