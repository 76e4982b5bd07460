use crate::enrichment::metadata::{EnrichmentMetadata, Location};
use std::collections::BTreeMap;
use thiserror::Error;

/// The knowledge-base collaborator could not be reached or could not answer.
/// Callers degrade to "no enrichment" rather than failing the request.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("knowledge base unavailable: {reason}")]
pub struct EnrichmentUnavailableError {
    pub reason: String,
}

impl EnrichmentUnavailableError {
    pub fn new(reason: impl Into<String>) -> Self {
        EnrichmentUnavailableError {
            reason: reason.into(),
        }
    }
}

/// Looks up municipal metadata for issue categories.
///
/// `enrich` maps its input 1:1 by position; an entry is `None` when the
/// category is unknown to the knowledge base. Implementations may return a
/// shorter vector than requested (a partial answer) and callers must
/// tolerate that.
pub trait KnowledgeBase {
    fn enrich(
        &self,
        class_names: &[&str],
        location: Option<&Location>,
    ) -> Result<Vec<Option<EnrichmentMetadata>>, EnrichmentUnavailableError>;
}

/// Routing summary for one issue category, for callers that only need to
/// know where a report goes.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingInfo {
    pub department: String,
    pub routing_category: String,
    pub urgency: String,
    pub safety_priority: String,
}

/// In-process knowledge base over the fixed municipal protocol table.
///
/// This is the fallback the production service used when its vector store
/// was unavailable, and the default collaborator for offline runs and tests.
pub struct StaticKnowledgeBase {
    entries: BTreeMap<&'static str, EnrichmentMetadata>,
}

fn entry(
    department: &str,
    urgency: &str,
    response_time: &str,
    technical_specs: &str,
    routing_category: &str,
    required_fields: &[&str],
    safety_priority: &str,
) -> EnrichmentMetadata {
    EnrichmentMetadata {
        department: department.to_string(),
        urgency: urgency.to_string(),
        response_time: response_time.to_string(),
        technical_specs: technical_specs.to_string(),
        routing_category: routing_category.to_string(),
        required_fields: required_fields.iter().map(|f| f.to_string()).collect(),
        safety_priority: safety_priority.to_string(),
    }
}

impl Default for StaticKnowledgeBase {
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(
            "pothole",
            entry(
                "Department of Public Works - Street Maintenance Division",
                "high",
                "24-48 hours",
                "Road surface depression > 2 inches deep, potential vehicle damage risk",
                "street_maintenance",
                &["location", "size_estimate", "traffic_level"],
                "high",
            ),
        );
        entries.insert(
            "road_crack",
            entry(
                "Department of Public Works - Pavement Management",
                "medium",
                "7-14 days",
                "Pavement surface cracking, alligator patterns, longitudinal/transverse cracks",
                "pavement_maintenance",
                &["location", "crack_type", "length_estimate"],
                "medium",
            ),
        );
        entries.insert(
            "road_debris",
            entry(
                "Department of Public Works - Street Cleaning",
                "high",
                "4-8 hours",
                "Objects, rocks, branches, or other obstacles on roadway",
                "emergency_cleanup",
                &["location", "debris_type", "lane_blockage"],
                "high",
            ),
        );
        entries.insert(
            "overflowing_trash",
            entry(
                "Department of Sanitation - Waste Management",
                "medium",
                "24-48 hours",
                "Garbage overflow, litter accumulation, illegal dumping",
                "waste_collection",
                &["location", "volume_estimate", "waste_type"],
                "low",
            ),
        );
        entries.insert(
            "damaged_sign",
            entry(
                "Department of Transportation - Traffic Signs Division",
                "high",
                "24 hours",
                "Broken, bent, vandalized, or missing traffic/street signage",
                "traffic_control",
                &["location", "sign_type", "damage_description"],
                "high",
            ),
        );
        entries.insert(
            "graffiti",
            entry(
                "Department of Public Works - Graffiti Removal",
                "low",
                "5-7 days",
                "Spray paint, vandalism markings on public property",
                "property_maintenance",
                &["location", "surface_type", "offensive_content"],
                "low",
            ),
        );
        entries.insert(
            "bad_streetlight",
            entry(
                "Department of Public Works - Street Lighting Division",
                "medium",
                "48-72 hours",
                "Non-functional, damaged, or flickering street lighting",
                "electrical_maintenance",
                &["location", "pole_number", "light_status"],
                "medium",
            ),
        );
        entries.insert(
            "sidewalk_obstruction",
            entry(
                "Department of Public Works - Sidewalk Maintenance",
                "medium",
                "48-72 hours",
                "Blocked walkways, overgrown vegetation, ADA compliance issues",
                "pedestrian_infrastructure",
                &["location", "obstruction_type", "ada_impact"],
                "medium",
            ),
        );
        entries.insert(
            "utility_line_defect",
            entry(
                "Department of Public Utilities - Infrastructure Division",
                "critical",
                "2-4 hours",
                "Power line damage, cable issues, insulator defects, potential electrical hazard",
                "utility_emergency",
                &["location", "utility_type", "hazard_level"],
                "critical",
            ),
        );
        entries.insert(
            "flooded_road",
            entry(
                "Department of Public Works - Drainage Division",
                "critical",
                "1-2 hours",
                "Water accumulation on roadway, drainage system failure, flooding",
                "emergency_response",
                &["location", "water_depth", "road_closure"],
                "critical",
            ),
        );
        StaticKnowledgeBase { entries }
    }
}

impl StaticKnowledgeBase {
    pub fn lookup(&self, class_name: &str) -> Option<&EnrichmentMetadata> {
        self.entries.get(class_name)
    }

    pub fn routing_info(&self, class_name: &str) -> Option<RoutingInfo> {
        self.entries.get(class_name).map(|m| RoutingInfo {
            department: m.department.clone(),
            routing_category: m.routing_category.clone(),
            urgency: m.urgency.clone(),
            safety_priority: m.safety_priority.clone(),
        })
    }

    /// Every issue category the table knows about.
    pub fn issue_types(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }
}

impl KnowledgeBase for StaticKnowledgeBase {
    fn enrich(
        &self,
        class_names: &[&str],
        _location: Option<&Location>,
    ) -> Result<Vec<Option<EnrichmentMetadata>>, EnrichmentUnavailableError> {
        Ok(class_names
            .iter()
            .map(|class_name| self.entries.get(class_name).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_category_is_enriched() {
        let kb = StaticKnowledgeBase::default();
        let result = kb.enrich(&["pothole"], None).unwrap();
        assert_eq!(result.len(), 1);
        let metadata = result[0].as_ref().unwrap();
        assert_eq!(metadata.routing_category, "street_maintenance");
        assert_eq!(metadata.safety_priority, "high");
    }

    #[test]
    fn unknown_category_maps_to_none() {
        let kb = StaticKnowledgeBase::default();
        let result = kb.enrich(&["pothole", "unicorn"], None).unwrap();
        assert!(result[0].is_some());
        assert!(result[1].is_none());
    }

    #[test]
    fn routing_info_summarizes_the_entry() {
        let kb = StaticKnowledgeBase::default();
        let routing = kb.routing_info("flooded_road").unwrap();
        assert_eq!(routing.routing_category, "emergency_response");
        assert_eq!(routing.urgency, "critical");
        assert!(kb.routing_info("unicorn").is_none());
    }

    #[test]
    fn table_covers_the_full_taxonomy() {
        let kb = StaticKnowledgeBase::default();
        assert_eq!(kb.issue_types().len(), 10);
        assert!(kb.issue_types().contains(&"utility_line_defect"));
    }
}
