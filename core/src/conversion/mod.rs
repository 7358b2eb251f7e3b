//! DICOM slice to PNG conversion
//!
//! The delegated primitive behind the balancing scan: resolve the source file
//! (with the one-shot filename correction), decode its pixel data, rescale to
//! 8 bits, honor the photometric interpretation, and persist a grayscale PNG
//! under the class directory.

mod paths;
mod pixels;

pub use paths::{candidate_paths, output_path};
pub use pixels::{invert_in_place, rescale_to_u8};

use crate::error::{MribalError, Result};
use crate::extraction::{ConvertOutcome, ConvertSlice};
use crate::types::SliceLabel;
use dicom_object::{open_file, DefaultDicomObject};
use dicom_pixeldata::PixelDecoder;
use image::GrayImage;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Converts DICOM slices to 8-bit grayscale PNGs under per-class directories.
///
/// Conversion is idempotent on the destination file: when it already exists
/// the source is neither opened nor decoded, which makes an interrupted run
/// cheap to resume.
#[derive(Debug)]
pub struct PngConverter {
    output_root: PathBuf,
}

impl PngConverter {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
        }
    }

    /// Resolves the first existing candidate spelling of the source path
    fn resolve_source(&self, primary: &Path) -> Result<PathBuf> {
        candidate_paths(primary)
            .into_iter()
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| MribalError::SourceNotFound(primary.to_path_buf()))
    }

    fn decode(&self, source: &Path) -> Result<GrayImage> {
        let obj = open_file(source)?;
        let decoded = obj
            .decode_pixel_data()
            .map_err(|e| MribalError::Dicom(format!("{}: {}", source.display(), e)))?;
        let (rows, columns) = (decoded.rows(), decoded.columns());
        let samples: Vec<u16> = decoded
            .to_vec()
            .map_err(|e| MribalError::Dicom(format!("{}: {}", source.display(), e)))?;

        let mut pixels = rescale_to_u8(&samples, source)?;
        if is_monochrome1(&obj) {
            invert_in_place(&mut pixels);
        }

        GrayImage::from_raw(columns, rows, pixels).ok_or_else(|| {
            MribalError::Dicom(format!(
                "pixel count does not match {}x{} grid: {}",
                columns,
                rows,
                source.display()
            ))
        })
    }
}

fn is_monochrome1(obj: &DefaultDicomObject) -> bool {
    obj.element_by_name("PhotometricInterpretation")
        .ok()
        .and_then(|elem| elem.to_str().ok())
        .map(|s| s.trim().eq_ignore_ascii_case("MONOCHROME1"))
        .unwrap_or(false)
}

impl ConvertSlice for PngConverter {
    fn convert(
        &mut self,
        source: &Path,
        label: SliceLabel,
        volume_index: u32,
    ) -> Result<ConvertOutcome> {
        let dest = output_path(&self.output_root, label, source, volume_index);
        if dest.exists() {
            debug!("destination exists, skipping: {}", dest.display());
            return Ok(ConvertOutcome::AlreadyExists);
        }

        let resolved = self.resolve_source(source)?;
        let image = self.decode(&resolved)?;

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        image.save(&dest)?;
        debug!("wrote {}", dest.display());
        Ok(ConvertOutcome::Written)
    }
}
