use crate::analysis::correlate::Cluster;
use crate::annotations::bounding_box::BoundingBox;
use crate::enrichment::metadata::EnrichmentMetadata;
use serde::{Deserialize, Serialize};

/// Audit trail explaining why a validated detection earned its confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationInfo {
    /// Number of distinct frames corroborating this detection.
    pub num_frames: usize,
    pub frame_indices: Vec<usize>,
    /// Member confidences in frame-index order.
    pub individual_confidences: Vec<f32>,
    /// Delta that was added on top of the best member confidence.
    pub confidence_boost: f32,
}

/// The aggregated, post-validation record carried forward to reporting.
///
/// Derived once from a finalized cluster; never mutated afterward except to
/// attach enrichment, which is best-effort and may stay absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedDetection {
    pub class_name: String,
    pub confidence: f32,
    pub bbox: BoundingBox,
    pub validation: ValidationInfo,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub enrichment: Option<EnrichmentMetadata>,
}

/// Collapses a finalized cluster into a single validated detection.
///
/// The confidence is the best member confidence plus `confidence_boost`,
/// clamped to 1.0; the boost only applies when at least two frames
/// corroborate, so a single viewpoint is never rewarded. The representative
/// bbox is the highest-confidence member's (ties broken by lowest frame
/// index inside the cluster).
pub fn aggregate_cluster(cluster: Cluster, confidence_boost: f32) -> ValidatedDetection {
    let boost = if cluster.num_frames() >= 2 {
        confidence_boost
    } else {
        0.0
    };
    let representative = cluster.representative();
    let confidence = (representative.confidence + boost).min(1.0);
    let bbox = representative.bbox.clone();
    let class_name = cluster.class_name().to_string();
    let frame_indices: Vec<usize> = cluster.frame_indices().iter().copied().collect();
    let individual_confidences: Vec<f32> = cluster.members().iter().map(|m| m.confidence).collect();
    ValidatedDetection {
        class_name,
        confidence,
        bbox,
        validation: ValidationInfo {
            num_frames: frame_indices.len(),
            frame_indices,
            individual_confidences,
            confidence_boost: boost,
        },
        enrichment: None,
    }
}
