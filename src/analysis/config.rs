use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_IOU_THRESHOLD: f32 = 0.5;
pub const DEFAULT_CONFIDENCE_BOOST: f32 = 0.15;
pub const DEFAULT_MIN_FRAMES_FOR_VALIDATION: usize = 2;
pub const DEFAULT_CONF_THRESHOLD: f32 = 0.25;

/// A configuration the analyzer can never satisfy. Rejected before any
/// processing starts; the caller sent an impossible request, nothing was
/// partially computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidConfigError {
    #[error(
        "min_frames_for_validation ({min_frames}) exceeds the number of \
         submitted frames ({num_frames}); no detection could ever validate"
    )]
    GateExceedsFrameCount {
        min_frames: usize,
        num_frames: usize,
    },
    #[error("iou_threshold must be within [0, 1], got {0}")]
    IouThresholdOutOfRange(f32),
}

/// Tunable knobs for one analysis run.
///
/// The confidence boost rewards multi-viewpoint corroboration; it is a
/// tunable constant, not a law, and the default matches the documented
/// behavior of the production detector pipeline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Minimum IoU (inclusive) for a detection to join an existing cluster.
    pub iou_threshold: f32,
    /// Added to the best member confidence of clusters seen in >= 2 frames.
    pub confidence_boost: f32,
    /// Clusters observed in fewer distinct frames than this are discarded.
    pub min_frames_for_validation: usize,
    /// Detections below this confidence are dropped at ingest.
    pub conf_threshold: f32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            confidence_boost: DEFAULT_CONFIDENCE_BOOST,
            min_frames_for_validation: DEFAULT_MIN_FRAMES_FOR_VALIDATION,
            conf_threshold: DEFAULT_CONF_THRESHOLD,
        }
    }
}

impl AnalyzerConfig {
    /// Fails fast when this configuration cannot produce any output for a
    /// request of `num_frames` frames.
    pub fn validate_for(&self, num_frames: usize) -> Result<(), InvalidConfigError> {
        if !(0.0..=1.0).contains(&self.iou_threshold) {
            return Err(InvalidConfigError::IouThresholdOutOfRange(
                self.iou_threshold,
            ));
        }
        if self.min_frames_for_validation > num_frames {
            return Err(InvalidConfigError::GateExceedsFrameCount {
                min_frames: self.min_frames_for_validation,
                num_frames,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid_for_two_frames() {
        assert_eq!(AnalyzerConfig::default().validate_for(2), Ok(()));
    }

    #[test]
    fn gate_minimum_above_frame_count_is_rejected() {
        let config = AnalyzerConfig {
            min_frames_for_validation: 3,
            ..AnalyzerConfig::default()
        };
        assert_eq!(
            config.validate_for(2),
            Err(InvalidConfigError::GateExceedsFrameCount {
                min_frames: 3,
                num_frames: 2
            })
        );
    }

    #[test]
    fn iou_threshold_outside_unit_interval_is_rejected() {
        let config = AnalyzerConfig {
            iou_threshold: 1.5,
            ..AnalyzerConfig::default()
        };
        assert_eq!(
            config.validate_for(2),
            Err(InvalidConfigError::IouThresholdOutOfRange(1.5))
        );
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: AnalyzerConfig =
            serde_json::from_str(r#"{"min_frames_for_validation": 3}"#).unwrap();
        assert_eq!(config.min_frames_for_validation, 3);
        assert_eq!(config.iou_threshold, DEFAULT_IOU_THRESHOLD);
        assert_eq!(config.confidence_boost, DEFAULT_CONFIDENCE_BOOST);
    }
}
