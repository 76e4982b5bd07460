use crate::annotations::bounding_box::{BoundingBox, InvalidGeometryError};
use crate::annotations::detection::Detection;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A raw, untrusted detection record as produced by the upstream detector.
///
/// The detector runs in a separate process and its output is structurally
/// typed JSON; nothing about it can be trusted downstream. Ingestion converts
/// each record into a strict [`Detection`] or drops it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    pub class_name: String,
    pub confidence: f32,
    pub bbox: [f32; 4],
}

/// Reasons a single raw record was skipped. Never fatal to the request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedDetectionError {
    #[error("confidence {confidence} outside [0, 1] for class '{class_name}'")]
    ConfidenceOutOfRange { class_name: String, confidence: f32 },
    #[error("empty class name")]
    EmptyClassName,
    #[error(transparent)]
    InvalidGeometry(#[from] InvalidGeometryError),
}

/// Output of one ingest pass: the accepted detections plus drop counts so
/// that exclusion is observable rather than silent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IngestReport {
    pub detections: Vec<Detection>,
    pub malformed_dropped: usize,
    pub below_threshold_dropped: usize,
}

/// Normalizes per-frame raw detection lists into a flat, frame-tagged
/// sequence.
///
/// The detector is expected to have applied `conf_threshold` already, but the
/// threshold is re-applied here and confidence bounds are re-validated; a bad
/// record is skipped and counted, never abortive. The result is stable-sorted
/// by frame index, then by descending confidence within a frame, which fixes
/// the processing order the correlator depends on for determinism.
pub fn ingest_frames(frames: &[Vec<RawDetection>], conf_threshold: f32) -> IngestReport {
    let mut report = IngestReport::default();
    for (frame_index, raw_detections) in frames.iter().enumerate() {
        for raw in raw_detections {
            match validate_raw(raw, frame_index) {
                Ok(detection) => {
                    if detection.confidence < conf_threshold {
                        debug!(
                            "dropping sub-threshold detection '{}' ({} < {}) in frame {}",
                            detection.class_name, detection.confidence, conf_threshold, frame_index
                        );
                        report.below_threshold_dropped += 1;
                    } else {
                        report.detections.push(detection);
                    }
                }
                Err(err) => {
                    warn!("skipping malformed detection in frame {frame_index}: {err}");
                    report.malformed_dropped += 1;
                }
            }
        }
    }
    report
        .detections
        .sort_by(|a, b| {
            a.frame_index
                .cmp(&b.frame_index)
                .then(b.confidence.total_cmp(&a.confidence))
        });
    report
}

fn validate_raw(
    raw: &RawDetection,
    frame_index: usize,
) -> Result<Detection, MalformedDetectionError> {
    if raw.class_name.is_empty() {
        return Err(MalformedDetectionError::EmptyClassName);
    }
    // NaN fails the contains check, so it lands here too.
    if !(0.0..=1.0).contains(&raw.confidence) {
        return Err(MalformedDetectionError::ConfidenceOutOfRange {
            class_name: raw.class_name.clone(),
            confidence: raw.confidence,
        });
    }
    let bbox = BoundingBox::try_from(raw.bbox)?;
    Ok(Detection {
        class_name: raw.class_name.clone(),
        confidence: raw.confidence,
        bbox,
        frame_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(class_name: &str, confidence: f32, bbox: [f32; 4]) -> RawDetection {
        RawDetection {
            class_name: class_name.to_string(),
            confidence,
            bbox,
        }
    }

    #[test]
    fn tags_detections_with_their_frame_index() {
        let frames = vec![
            vec![raw("pothole", 0.8, [0.0, 0.0, 1.0, 1.0])],
            vec![raw("graffiti", 0.7, [0.0, 0.0, 1.0, 1.0])],
        ];
        let report = ingest_frames(&frames, 0.25);
        assert_eq!(report.detections[0].frame_index, 0);
        assert_eq!(report.detections[1].frame_index, 1);
    }

    #[test]
    fn sorts_by_frame_then_descending_confidence() {
        let frames = vec![
            vec![
                raw("pothole", 0.5, [0.0, 0.0, 1.0, 1.0]),
                raw("graffiti", 0.9, [2.0, 2.0, 3.0, 3.0]),
            ],
            vec![raw("pothole", 0.7, [0.0, 0.0, 1.0, 1.0])],
        ];
        let report = ingest_frames(&frames, 0.25);
        let order: Vec<(usize, f32)> = report
            .detections
            .iter()
            .map(|d| (d.frame_index, d.confidence))
            .collect();
        assert_eq!(order, vec![(0, 0.9), (0, 0.5), (1, 0.7)]);
    }

    #[test]
    fn malformed_records_are_skipped_and_counted() {
        let frames = vec![vec![
            raw("pothole", 1.4, [0.0, 0.0, 1.0, 1.0]),
            raw("", 0.8, [0.0, 0.0, 1.0, 1.0]),
            raw("pothole", 0.8, [5.0, 0.0, 1.0, 1.0]),
            raw("pothole", 0.8, [0.0, 0.0, 1.0, 1.0]),
        ]];
        let report = ingest_frames(&frames, 0.25);
        assert_eq!(report.detections.len(), 1);
        assert_eq!(report.malformed_dropped, 3);
    }

    #[test]
    fn nan_confidence_is_malformed() {
        let frames = vec![vec![raw("pothole", f32::NAN, [0.0, 0.0, 1.0, 1.0])]];
        let report = ingest_frames(&frames, 0.25);
        assert!(report.detections.is_empty());
        assert_eq!(report.malformed_dropped, 1);
    }

    #[test]
    fn sub_threshold_detections_are_filtered_separately() {
        let frames = vec![vec![
            raw("pothole", 0.1, [0.0, 0.0, 1.0, 1.0]),
            raw("pothole", 0.8, [0.0, 0.0, 1.0, 1.0]),
        ]];
        let report = ingest_frames(&frames, 0.25);
        assert_eq!(report.detections.len(), 1);
        assert_eq!(report.below_threshold_dropped, 1);
        assert_eq!(report.malformed_dropped, 0);
    }

    #[test]
    fn empty_request_produces_empty_report() {
        let report = ingest_frames(&[], 0.25);
        assert_eq!(report, IngestReport::default());
    }
}
