use crate::annotations::bounding_box::BoundingBox;
use crate::annotations::detection::Detection;
use std::collections::BTreeSet;

/// A working group of detections believed to depict the same physical issue
/// seen from multiple viewpoints.
///
/// Every member shares the cluster's class name, and the cluster holds at
/// most one member per frame index: the same issue cannot appear twice in one
/// photograph, so a second same-frame match is evidence of a different issue,
/// not more corroboration. Members are kept in arrival order, which is frame
/// order because of how ingest sorts. Once correlation completes the cluster
/// is read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    class_name: String,
    members: Vec<Detection>,
    frame_indices: BTreeSet<usize>,
    /// Index into `members` of the highest-confidence member, whose bbox
    /// stands in for the whole cluster during matching.
    representative: usize,
}

impl Cluster {
    fn new(seed: Detection) -> Self {
        Cluster {
            class_name: seed.class_name.clone(),
            frame_indices: BTreeSet::from([seed.frame_index]),
            members: vec![seed],
            representative: 0,
        }
    }

    fn push(&mut self, detection: Detection) {
        // Strict comparison keeps the earlier member on ties, which is the
        // lowest frame index since members arrive in frame order.
        if detection.confidence > self.members[self.representative].confidence {
            self.representative = self.members.len();
        }
        self.frame_indices.insert(detection.frame_index);
        self.members.push(detection);
    }

    fn contains_frame(&self, frame_index: usize) -> bool {
        self.frame_indices.contains(&frame_index)
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn members(&self) -> &[Detection] {
        &self.members
    }

    pub fn frame_indices(&self) -> &BTreeSet<usize> {
        &self.frame_indices
    }

    /// Number of distinct frames contributing members.
    pub fn num_frames(&self) -> usize {
        self.frame_indices.len()
    }

    pub fn representative(&self) -> &Detection {
        &self.members[self.representative]
    }

    pub fn representative_bbox(&self) -> &BoundingBox {
        &self.members[self.representative].bbox
    }
}

/// Partitions a frame-tagged detection sequence into clusters of detections
/// that depict the same physical issue.
///
/// Single greedy pass in ingestion order. Each detection is matched against
/// the representative bbox of every open cluster that shares its class and
/// has no member from its frame; the highest IoU wins, with equal IoU going
/// to the earliest-created cluster. A match at or above `iou_threshold`
/// (inclusive) joins that cluster, anything else seeds a new one. The open
/// cluster list is local to this call, so concurrent requests share nothing.
///
/// O(n * k) for n detections and k open clusters; k is bounded by the number
/// of distinct issues in the scene, which stays small at the per-request
/// scale this runs at.
pub fn correlate(detections: Vec<Detection>, iou_threshold: f32) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = Vec::new();
    for detection in detections {
        let mut best: Option<(usize, f32)> = None;
        for (index, cluster) in clusters.iter().enumerate() {
            if cluster.class_name() != detection.class_name
                || cluster.contains_frame(detection.frame_index)
            {
                continue;
            }
            let iou = detection
                .bbox
                .intersection_over_union(cluster.representative_bbox());
            // Strictly-greater keeps the earliest-created cluster on ties.
            if best.is_none_or(|(_, best_iou)| iou > best_iou) {
                best = Some((index, iou));
            }
        }
        match best {
            Some((index, iou)) if iou >= iou_threshold => clusters[index].push(detection),
            _ => clusters.push(Cluster::new(detection)),
        }
    }
    clusters
}
