use crate::annotations::bounding_box::BoundingBox;
use serde::{Deserialize, Serialize};

/// One object found in one frame.
///
/// A detection combines a bounding box and an issue category with a
/// confidence score: a probability value encoding the detector's belief that
/// the detection is real. The frame index records which submitted frame the
/// detection came from, so the correlator can reason about which viewpoints
/// corroborate each other. Detections are immutable once built by the
/// ingestor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub class_name: String,
    pub confidence: f32,
    pub bbox: BoundingBox,
    pub frame_index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let detection = Detection {
            class_name: "pothole".to_string(),
            confidence: 0.85,
            bbox: BoundingBox::new(10.0, 20.0, 110.0, 140.0).unwrap(),
            frame_index: 2,
        };
        let json = serde_json::to_string(&detection).unwrap();
        let back: Detection = serde_json::from_str(&json).unwrap();
        assert_eq!(detection, back);
    }
}
