use crate::error::{MribalError, Result};
use crate::selection::{AnnotationBoxes, MappingRecord};
use crate::types::{BoxRange, LabelDecision, SliceLabel};
use log::debug;
use std::path::Path;

/// Outcome of converting one slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertOutcome {
    /// A new PNG was decoded and written
    Written,
    /// The destination already existed; nothing was decoded or written
    AlreadyExists,
}

/// Seam between the balancing scan and the DICOM-to-PNG machinery.
///
/// Both outcomes count toward the class quota: a destination left by an
/// earlier interrupted run fills the quota the same way a fresh write does,
/// so re-runs are resumable and produce an identical file set.
pub trait ConvertSlice {
    fn convert(
        &mut self,
        source: &Path,
        label: SliceLabel,
        volume_index: u32,
    ) -> Result<ConvertOutcome>;
}

/// Running per-class counts for one extraction pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionCounters {
    pub positive: usize,
    pub negative: usize,
}

impl ExtractionCounters {
    fn count(&self, label: SliceLabel) -> usize {
        match label {
            SliceLabel::Positive => self.positive,
            SliceLabel::Negative => self.negative,
        }
    }

    fn increment(&mut self, label: SliceLabel) {
        match label {
            SliceLabel::Positive => self.positive += 1,
            SliceLabel::Negative => self.negative += 1,
        }
    }
}

/// Walks the filtered mapping records strictly in table order, labeling each
/// slice against its volume's annotation box and converting kept slices until
/// both class quotas fill.
///
/// All scan state lives here: the per-class counters and the box range of the
/// volume currently being crossed. The range cache relies on the mapping
/// table keeping each volume's slices contiguous; a change of volume index
/// triggers exactly one annotation lookup.
#[derive(Debug)]
pub struct BalancedExtractor {
    per_class_quota: usize,
    buffer: u32,
    counters: ExtractionCounters,
    active: Option<(u32, BoxRange)>,
}

impl BalancedExtractor {
    pub fn new(per_class_quota: usize, buffer: u32) -> Self {
        Self {
            per_class_quota,
            buffer,
            counters: ExtractionCounters::default(),
            active: None,
        }
    }

    /// Counts accumulated so far (final counts after [`scan`](Self::scan) returns)
    pub fn counters(&self) -> ExtractionCounters {
        self.counters
    }

    /// Processes records in order. `on_record` is invoked once per scanned
    /// record, before it is labeled (progress reporting).
    ///
    /// The scan stops when the records are exhausted or both quotas are
    /// full; records are independent given the running state, so the early
    /// exit changes runtime only, never the output set.
    ///
    /// # Errors
    ///
    /// Any conversion or lookup failure aborts the scan; the counters keep
    /// the values accumulated before the failing record.
    pub fn scan<C, F>(
        &mut self,
        records: &[MappingRecord],
        boxes: &AnnotationBoxes,
        converter: &mut C,
        mut on_record: F,
    ) -> Result<ExtractionCounters>
    where
        C: ConvertSlice,
        F: FnMut(&MappingRecord),
    {
        for record in records {
            if self.quotas_full() {
                debug!(
                    "both quotas full after {} positive / {} negative, stopping scan",
                    self.counters.positive, self.counters.negative
                );
                break;
            }
            on_record(record);

            let range = self.range_for(record.volume_index, boxes)?;
            let label = match range.decide(record.slice_index, self.buffer) {
                LabelDecision::Keep(label) => label,
                LabelDecision::Ignored => continue,
            };
            if self.counters.count(label) >= self.per_class_quota {
                continue;
            }

            converter.convert(&record.source_path, label, record.volume_index)?;
            self.counters.increment(label);
        }

        Ok(self.counters)
    }

    fn quotas_full(&self) -> bool {
        self.counters.positive >= self.per_class_quota
            && self.counters.negative >= self.per_class_quota
    }

    /// Returns the box range for a volume, refreshing the cache when the
    /// scan crosses a volume boundary.
    fn range_for(&mut self, volume_index: u32, boxes: &AnnotationBoxes) -> Result<BoxRange> {
        if let Some((current, range)) = self.active {
            if current == volume_index {
                return Ok(range);
            }
        }

        let range = *boxes
            .get(volume_index)
            .ok_or(MribalError::BoxNotFound {
                volume: volume_index,
            })?;
        debug!(
            "volume {}: tumor box slices {}..{}",
            volume_index,
            range.start_slice(),
            range.end_slice()
        );
        self.active = Some((volume_index, range));
        Ok(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MribalError;
    use crate::selection::load_annotation_boxes;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Records every conversion request without touching the filesystem
    #[derive(Debug, Default)]
    struct RecordingConverter {
        calls: Vec<(PathBuf, SliceLabel, u32)>,
        /// Sources reported as already existing instead of freshly written
        preexisting: Vec<PathBuf>,
        /// Source that makes the converter fail
        poison: Option<PathBuf>,
    }

    impl ConvertSlice for RecordingConverter {
        fn convert(
            &mut self,
            source: &Path,
            label: SliceLabel,
            volume_index: u32,
        ) -> Result<ConvertOutcome> {
            if self.poison.as_deref() == Some(source) {
                return Err(MribalError::SourceNotFound(source.to_path_buf()));
            }
            self.calls.push((source.to_path_buf(), label, volume_index));
            if self.preexisting.iter().any(|p| p.as_path() == source) {
                Ok(ConvertOutcome::AlreadyExists)
            } else {
                Ok(ConvertOutcome::Written)
            }
        }
    }

    fn boxes_from_csv(rows: &str) -> AnnotationBoxes {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("boxes.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "Start Slice,End Slice\n{rows}").unwrap();
        load_annotation_boxes(&path).unwrap()
    }

    fn record(volume_index: u32, slice_index: u32) -> MappingRecord {
        MappingRecord {
            volume_index,
            slice_index,
            source_path: PathBuf::from(format!("vol{volume_index}/slice{slice_index}.dcm")),
        }
    }

    /// Volume 1 box is slices 40..60 (half-open positive interval)
    fn single_volume_boxes() -> AnnotationBoxes {
        boxes_from_csv("40,60\n")
    }

    #[test]
    fn test_scan_labels_and_converts() {
        let boxes = single_volume_boxes();
        let records = vec![
            record(1, 10), // negative
            record(1, 38), // ignored (buffer)
            record(1, 45), // positive
            record(1, 62), // ignored (buffer)
            record(1, 70), // negative
        ];
        let mut converter = RecordingConverter::default();
        let mut extractor = BalancedExtractor::new(100, 5);

        let counters = extractor
            .scan(&records, &boxes, &mut converter, |_| {})
            .unwrap();

        assert_eq!(counters.positive, 1);
        assert_eq!(counters.negative, 2);
        let labels: Vec<SliceLabel> = converter.calls.iter().map(|(_, l, _)| *l).collect();
        assert_eq!(
            labels,
            vec![SliceLabel::Negative, SliceLabel::Positive, SliceLabel::Negative]
        );
    }

    #[test]
    fn test_quota_skips_full_class_but_keeps_scanning() {
        let boxes = single_volume_boxes();
        // Three positives and three negatives, quota of 2 per class.
        let records = vec![
            record(1, 41),
            record(1, 42),
            record(1, 43),
            record(1, 70),
            record(1, 71),
            record(1, 72),
        ];
        let mut converter = RecordingConverter::default();
        let mut extractor = BalancedExtractor::new(2, 5);

        let counters = extractor
            .scan(&records, &boxes, &mut converter, |_| {})
            .unwrap();

        assert_eq!(counters.positive, 2);
        assert_eq!(counters.negative, 2);
        // The third positive was skipped without conversion, then scanning
        // continued into the negatives.
        assert_eq!(converter.calls.len(), 4);
        assert!(!converter
            .calls
            .iter()
            .any(|(p, _, _)| p.ends_with("slice43.dcm")));
    }

    #[test]
    fn test_scan_stops_once_both_quotas_full() {
        let boxes = single_volume_boxes();
        let records = vec![
            record(1, 41), // positive, fills quota
            record(1, 70), // negative, fills quota
            record(1, 42), // never visited
        ];
        let mut converter = RecordingConverter::default();
        let mut extractor = BalancedExtractor::new(1, 5);
        let mut visited = 0usize;

        let counters = extractor
            .scan(&records, &boxes, &mut converter, |_| visited += 1)
            .unwrap();

        assert_eq!(counters, ExtractionCounters { positive: 1, negative: 1 });
        assert_eq!(visited, 2);
        assert_eq!(converter.calls.len(), 2);
    }

    #[test]
    fn test_missing_box_is_fatal() {
        let boxes = single_volume_boxes();
        let records = vec![record(1, 45), record(2, 45)];
        let mut converter = RecordingConverter::default();
        let mut extractor = BalancedExtractor::new(100, 5);

        let err = extractor
            .scan(&records, &boxes, &mut converter, |_| {})
            .unwrap_err();

        assert!(matches!(err, MribalError::BoxNotFound { volume: 2 }));
        // The first record was converted before the failure.
        assert_eq!(extractor.counters().positive, 1);
    }

    #[test]
    fn test_box_lookup_happens_once_per_volume_block() {
        // Two volumes, contiguous blocks; second volume's box is 10..30.
        let boxes = boxes_from_csv("40,60\n10,30\n");
        let records = vec![record(1, 45), record(1, 46), record(2, 15), record(2, 16)];
        let mut converter = RecordingConverter::default();
        let mut extractor = BalancedExtractor::new(100, 5);

        let counters = extractor
            .scan(&records, &boxes, &mut converter, |_| {})
            .unwrap();

        assert_eq!(counters.positive, 4);
        let volumes: Vec<u32> = converter.calls.iter().map(|(_, _, v)| *v).collect();
        assert_eq!(volumes, vec![1, 1, 2, 2]);
    }

    #[test]
    fn test_converter_failure_aborts_without_counting() {
        let boxes = single_volume_boxes();
        let records = vec![record(1, 41), record(1, 42)];
        let mut converter = RecordingConverter {
            poison: Some(PathBuf::from("vol1/slice42.dcm")),
            ..Default::default()
        };
        let mut extractor = BalancedExtractor::new(100, 5);

        let err = extractor
            .scan(&records, &boxes, &mut converter, |_| {})
            .unwrap_err();

        assert!(matches!(err, MribalError::SourceNotFound(_)));
        assert_eq!(extractor.counters().positive, 1);
    }

    #[test]
    fn test_preexisting_output_still_fills_quota() {
        let boxes = single_volume_boxes();
        let records = vec![record(1, 41), record(1, 42)];
        let mut converter = RecordingConverter {
            preexisting: vec![PathBuf::from("vol1/slice41.dcm")],
            ..Default::default()
        };
        let mut extractor = BalancedExtractor::new(1, 5);

        let counters = extractor
            .scan(&records, &boxes, &mut converter, |_| {})
            .unwrap();

        // The already-present slice consumed the quota; the second positive
        // was skipped, so a resumed run converges on the same file set.
        assert_eq!(counters.positive, 1);
        assert_eq!(converter.calls.len(), 1);
    }

    #[test]
    fn test_empty_record_sequence_produces_nothing() {
        let boxes = single_volume_boxes();
        let mut converter = RecordingConverter::default();
        let mut extractor = BalancedExtractor::new(100, 5);

        let counters = extractor
            .scan(&[], &boxes, &mut converter, |_| {})
            .unwrap();

        assert_eq!(counters, ExtractionCounters::default());
        assert!(converter.calls.is_empty());
    }
}
