use crate::analysis::aggregate::ValidatedDetection;
use crate::enrichment::knowledge_base::KnowledgeBase;
use crate::enrichment::metadata::Location;
use log::{debug, warn};

/// Attaches municipal metadata to surviving detections, best-effort.
///
/// One batch call per request. When the collaborator is unavailable the
/// detections are left exactly as computed; enrichment failure must never
/// abort validation results. A partial or short answer enriches what it can
/// and leaves the rest untouched.
pub fn resolve_enrichment(
    kb: &dyn KnowledgeBase,
    detections: &mut [ValidatedDetection],
    location: Option<&Location>,
) {
    if detections.is_empty() {
        return;
    }
    let class_names: Vec<String> = detections.iter().map(|d| d.class_name.clone()).collect();
    let class_refs: Vec<&str> = class_names.iter().map(String::as_str).collect();
    match kb.enrich(&class_refs, location) {
        Ok(entries) => {
            let mut unresolved = 0;
            for (index, detection) in detections.iter_mut().enumerate() {
                match entries.get(index).cloned().flatten() {
                    Some(metadata) => detection.enrichment = Some(metadata),
                    None => unresolved += 1,
                }
            }
            if unresolved > 0 {
                debug!("{unresolved} of {} detections left unenriched", class_refs.len());
            }
        }
        Err(err) => {
            warn!("enrichment degraded, returning unenriched detections: {err}");
        }
    }
}
