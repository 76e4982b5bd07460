use crate::analysis::aggregate::ValidatedDetection;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary over one analysis run. Computed once, read-only, scoped to a
/// single request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisStatistics {
    pub num_frames: usize,
    pub total_detections_before: usize,
    pub total_detections_after: usize,
    pub false_positive_reduction_rate: f32,
    pub detections_by_class: BTreeMap<String, usize>,
    pub avg_confidence: f32,
}

pub fn compile_statistics(
    num_frames: usize,
    total_detections_before: usize,
    survivors: &[ValidatedDetection],
) -> AnalysisStatistics {
    let total_detections_after = survivors.len();
    let false_positive_reduction_rate = if total_detections_before > 0 {
        1.0 - (total_detections_after as f32 / total_detections_before as f32)
    } else {
        0.0
    };
    let detections_by_class: BTreeMap<String, usize> = survivors
        .iter()
        .map(|v| v.class_name.clone())
        .counts()
        .into_iter()
        .collect();
    let avg_confidence = if survivors.is_empty() {
        0.0
    } else {
        survivors.iter().map(|v| v.confidence).sum::<f32>() / survivors.len() as f32
    };
    AnalysisStatistics {
        num_frames,
        total_detections_before,
        total_detections_after,
        false_positive_reduction_rate,
        detections_by_class,
        avg_confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregate::ValidationInfo;
    use crate::annotations::bounding_box::BoundingBox;

    fn survivor(class_name: &str, confidence: f32) -> ValidatedDetection {
        ValidatedDetection {
            class_name: class_name.to_string(),
            confidence,
            bbox: BoundingBox::new(0.0, 0.0, 1.0, 1.0).unwrap(),
            validation: ValidationInfo {
                num_frames: 2,
                frame_indices: vec![0, 1],
                individual_confidences: vec![confidence, confidence],
                confidence_boost: 0.15,
            },
            enrichment: None,
        }
    }

    #[test]
    fn reduction_rate_with_no_input_is_zero() {
        let stats = compile_statistics(0, 0, &[]);
        assert_eq!(stats.false_positive_reduction_rate, 0.0);
        assert_eq!(stats.avg_confidence, 0.0);
    }

    #[test]
    fn reduction_rate_twelve_in_eight_out() {
        let survivors: Vec<ValidatedDetection> =
            (0..8).map(|_| survivor("pothole", 0.9)).collect();
        let stats = compile_statistics(3, 12, &survivors);
        assert!((stats.false_positive_reduction_rate - (1.0 - 8.0 / 12.0)).abs() < 1e-6);
    }

    #[test]
    fn histogram_counts_survivors_per_class() {
        let survivors = vec![
            survivor("pothole", 0.9),
            survivor("pothole", 0.8),
            survivor("graffiti", 0.7),
        ];
        let stats = compile_statistics(2, 5, &survivors);
        assert_eq!(stats.detections_by_class["pothole"], 2);
        assert_eq!(stats.detections_by_class["graffiti"], 1);
        assert_eq!(stats.detections_by_class.len(), 2);
    }

    #[test]
    fn avg_confidence_is_the_arithmetic_mean() {
        let survivors = vec![survivor("pothole", 0.8), survivor("graffiti", 0.6)];
        let stats = compile_statistics(2, 2, &survivors);
        assert!((stats.avg_confidence - 0.7).abs() < 1e-6);
    }
}
