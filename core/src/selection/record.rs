use crate::error::{MribalError, Result};
use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;

/// One 2D slice row from the file-path mapping table.
///
/// The mapping table is ordered; all slices of a volume form a contiguous
/// block, so a change in `volume_index` between adjacent records marks a
/// volume boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRecord {
    /// 1-based patient volume index, parsed from the original path
    pub volume_index: u32,
    /// 1-based slice index within the volume, parsed from the filename
    pub slice_index: u32,
    /// Location of the source DICOM file (data root joined with `classic_path`)
    pub source_path: PathBuf,
}

fn volume_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Breast_MRI_0*(\d+)").expect("valid regex"))
}

fn slice_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)$").expect("valid regex"))
}

/// Extracts the 1-based volume index from a mapping-table path.
///
/// Grammar: the path must contain a segment of the form
/// `Breast_MRI_<digits>`; leading zeros in the digits are ignored.
pub fn parse_volume_index(original_path: &str) -> Result<u32> {
    let captures = volume_pattern()
        .captures(original_path)
        .ok_or_else(|| malformed(original_path, "no Breast_MRI_<n> segment"))?;
    captures[1]
        .parse::<u32>()
        .map_err(|_| malformed(original_path, "volume index out of range"))
}

/// Extracts the 1-based slice index from the final path segment.
///
/// Grammar: the filename stem (extension removed) must end with a run of
/// digits; zero padding is allowed.
pub fn parse_slice_index(original_path: &str) -> Result<u32> {
    let filename = original_path
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| malformed(original_path, "empty filename"))?;
    let stem = filename
        .rsplit_once('.')
        .map(|(stem, _ext)| stem)
        .unwrap_or(filename);
    let captures = slice_pattern()
        .captures(stem)
        .ok_or_else(|| malformed(original_path, "filename does not end with a slice index"))?;
    captures[1]
        .parse::<u32>()
        .map_err(|_| malformed(original_path, "slice index out of range"))
}

fn malformed(path: &str, reason: &str) -> MribalError {
    MribalError::MalformedPath(format!("{} ({})", path, reason))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("DICOM_Images/Breast_MRI_001/pre/Breast_MRI_001_0045.dcm", 1)]
    #[case("DICOM_Images/Breast_MRI_250/pre/Breast_MRI_250_0001.dcm", 250)]
    #[case("Breast_MRI_007/post_1/IM-0002-0131.dcm", 7)]
    fn test_parse_volume_index(#[case] path: &str, #[case] expected: u32) {
        assert_eq!(parse_volume_index(path).unwrap(), expected);
    }

    #[rstest]
    #[case("DICOM_Images/Breast_MRI_001/pre/Breast_MRI_001_0045.dcm", 45)]
    #[case("DICOM_Images/Breast_MRI_250/pre/Breast_MRI_250_0001.dcm", 1)]
    #[case("Breast_MRI_007/post_1/IM-0002-0131.dcm", 131)]
    #[case("Breast_MRI_007/pre/no_extension_012", 12)]
    fn test_parse_slice_index(#[case] path: &str, #[case] expected: u32) {
        assert_eq!(parse_slice_index(path).unwrap(), expected);
    }

    #[test]
    fn test_parse_volume_index_missing_segment() {
        let err = parse_volume_index("DICOM_Images/Other_Study_001/x.dcm").unwrap_err();
        assert!(matches!(err, MribalError::MalformedPath(_)));
    }

    #[test]
    fn test_parse_slice_index_non_numeric_stem() {
        let err = parse_slice_index("Breast_MRI_001/pre/notes.txt").unwrap_err();
        assert!(matches!(err, MribalError::MalformedPath(_)));
    }

    #[test]
    fn test_parse_slice_index_trailing_separator() {
        assert!(parse_slice_index("Breast_MRI_001/pre/").is_err());
    }
}
