use crate::types::SliceLabel;
use std::path::{Path, PathBuf};

/// Computes the destination PNG path for a slice.
///
/// The source basename keeps its stem, gets the volume index spliced in, and
/// swaps the extension for `.png`, under the label's class directory:
/// `<root>/pos/IM-123-045-7.png`. The volume index disambiguates identical
/// slice filenames recurring across volumes.
pub fn output_path(
    output_root: &Path,
    label: SliceLabel,
    source: &Path,
    volume_index: u32,
) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_root
        .join(label.dir_name())
        .join(format!("{stem}-{volume_index}.png"))
}

/// Ordered source-path candidates for one slice.
///
/// The mapping table sometimes carries a spurious leading zero in the second
/// hyphen-separated token of the filename (`IM-0123-045.dcm` on disk as
/// `IM-123-045.dcm`). The primary path is tried first, then the corrected
/// spelling with exactly one zero stripped. The list is resolved against the
/// filesystem by the caller, which keeps the correction testable on its own.
pub fn candidate_paths(primary: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![primary.to_path_buf()];
    if let Some(corrected) = strip_spurious_zero(primary) {
        candidates.push(corrected);
    }
    candidates
}

fn strip_spurious_zero(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?.to_str()?;
    let mut parts: Vec<&str> = name.split('-').collect();
    if parts.len() < 2 {
        return None;
    }
    let stripped = parts[1].strip_prefix('0')?;
    if stripped.is_empty() {
        return None;
    }
    parts[1] = stripped;
    Some(path.with_file_name(parts.join("-")))
}
