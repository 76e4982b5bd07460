use crate::analysis::aggregate::ValidatedDetection;
use log::debug;

/// Discards detections not corroborated by enough distinct frames.
///
/// Anything below the minimum is an unconfirmed single-viewpoint candidate
/// and is treated as a likely false positive. A minimum of one or zero makes
/// the gate a no-op.
pub fn apply_gate(
    validated: Vec<ValidatedDetection>,
    min_frames_for_validation: usize,
) -> Vec<ValidatedDetection> {
    if min_frames_for_validation <= 1 {
        return validated;
    }
    let before = validated.len();
    let survivors: Vec<ValidatedDetection> = validated
        .into_iter()
        .filter(|v| v.validation.num_frames >= min_frames_for_validation)
        .collect();
    debug!(
        "validation gate dropped {} of {} candidate detections",
        before - survivors.len(),
        before
    );
    survivors
}
