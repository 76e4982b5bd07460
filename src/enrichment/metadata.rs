use serde::{Deserialize, Serialize};

/// Municipal metadata attached to a validated detection.
///
/// Sourced from the knowledge base keyed by issue category. Absence is a
/// valid state: enrichment is best-effort and a detection without it is still
/// a confirmed finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentMetadata {
    pub department: String,
    pub urgency: String,
    pub response_time: String,
    pub technical_specs: String,
    pub routing_category: String,
    pub required_fields: Vec<String>,
    pub safety_priority: String,
}

/// Where the frames were captured. Lets the knowledge base pick
/// jurisdiction-specific routing when it supports that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub address: Option<String>,
}
