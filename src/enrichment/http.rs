use crate::enrichment::knowledge_base::{EnrichmentUnavailableError, KnowledgeBase};
use crate::enrichment::metadata::{EnrichmentMetadata, Location};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The enrichment call sits on the request path, so it must stay well under
/// interactive latency even when the collaborator is unhealthy.
const ENRICH_TIMEOUT: Duration = Duration::from_millis(200);

/// Client for a remote knowledge-base service.
///
/// Speaks the collaborator contract: POST `{detections, location}` to the
/// endpoint, expect `{enriched_detections}` mapping 1:1 by position. Every
/// transport or decode failure becomes [`EnrichmentUnavailableError`] and is
/// absorbed by the resolver, never the caller.
pub struct HttpKnowledgeBase {
    agent: ureq::Agent,
    endpoint: String,
}

impl HttpKnowledgeBase {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(ENRICH_TIMEOUT)
            .build();
        HttpKnowledgeBase {
            agent,
            endpoint: endpoint.into(),
        }
    }
}

#[derive(Serialize)]
struct EnrichRequest<'a> {
    detections: Vec<DetectionStub<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<&'a Location>,
}

#[derive(Serialize)]
struct DetectionStub<'a> {
    class_name: &'a str,
}

#[derive(Deserialize)]
struct EnrichResponse {
    enriched_detections: Vec<EnrichedEntry>,
}

#[derive(Deserialize)]
struct EnrichedEntry {
    #[serde(default)]
    enrichment: Option<EnrichmentMetadata>,
}

impl KnowledgeBase for HttpKnowledgeBase {
    fn enrich(
        &self,
        class_names: &[&str],
        location: Option<&Location>,
    ) -> Result<Vec<Option<EnrichmentMetadata>>, EnrichmentUnavailableError> {
        let request = EnrichRequest {
            detections: class_names
                .iter()
                .map(|class_name| DetectionStub { class_name })
                .collect(),
            location,
        };
        let response = self
            .agent
            .post(&self.endpoint)
            .send_json(&request)
            .map_err(|e| EnrichmentUnavailableError::new(e.to_string()))?;
        let parsed: EnrichResponse = response
            .into_json()
            .map_err(|e| EnrichmentUnavailableError::new(format!("invalid response: {e}")))?;
        Ok(parsed
            .enriched_detections
            .into_iter()
            .map(|e| e.enrichment)
            .collect())
    }
}
