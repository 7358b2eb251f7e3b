use crate::error::{MribalError, Result};
use std::path::Path;

/// Rescales raw intensity samples to the full 8-bit range.
///
/// Each sample maps to `round(v * 255 / max)` where `max` is the largest
/// sample in the grid.
///
/// # Errors
///
/// An all-zero (or empty) grid has no usable contrast and is rejected as
/// [`MribalError::DegenerateIntensity`] rather than emitted as a black image
/// that would silently poison the output set.
pub fn rescale_to_u8(samples: &[u16], source: &Path) -> Result<Vec<u8>> {
    let max = samples.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return Err(MribalError::DegenerateIntensity(source.to_path_buf()));
    }

    let max = f64::from(max);
    Ok(samples
        .iter()
        .map(|&v| (f64::from(v) * 255.0 / max).round() as u8)
        .collect())
}

/// Inverts 8-bit samples in place.
///
/// MONOCHROME1 sources store intensities light-to-dark; inversion after
/// rescaling restores the conventional dark-to-light mapping.
pub fn invert_in_place(pixels: &mut [u8]) {
    for p in pixels.iter_mut() {
        *p = 255 - *p;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn src() -> &'static Path {
        Path::new("slice.dcm")
    }

    #[test]
    fn test_rescale_maps_max_to_255() {
        let out = rescale_to_u8(&[0, 500, 1000], src()).unwrap();
        assert_eq!(out, vec![0, 128, 255]); // round(500 * 255 / 1000) = 128
    }

    #[test]
    fn test_rescale_is_identity_when_max_is_255() {
        let out = rescale_to_u8(&[0, 17, 255], src()).unwrap();
        assert_eq!(out, vec![0, 17, 255]);
    }

    #[test]
    fn test_rescale_rejects_all_zero_grid() {
        let err = rescale_to_u8(&[0, 0, 0], src()).unwrap_err();
        assert!(matches!(err, MribalError::DegenerateIntensity(_)));
    }

    #[test]
    fn test_rescale_rejects_empty_grid() {
        assert!(rescale_to_u8(&[], src()).is_err());
    }

    #[test]
    fn test_invert() {
        let mut pixels = vec![0, 1, 128, 255];
        invert_in_place(&mut pixels);
        assert_eq!(pixels, vec![255, 254, 127, 0]);
    }
}
