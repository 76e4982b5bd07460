//! Cross-frame spatial validation for per-frame object detections.
//!
//! Detectors run on each photograph of a scene independently; this crate
//! decides which of those detections depict the same real-world issue seen
//! from multiple viewpoints, boosts the confidence of corroborated findings,
//! discards single-viewpoint false positives, and attaches municipal routing
//! metadata to whatever survives.

pub mod analysis;
pub mod annotations;
pub mod enrichment;

pub use analysis::aggregate::{ValidatedDetection, ValidationInfo};
pub use analysis::analyzer::{AnalysisOutcome, MultiFrameAnalyzer};
pub use analysis::config::{AnalyzerConfig, InvalidConfigError};
pub use analysis::ingest::RawDetection;
pub use analysis::statistics::AnalysisStatistics;
pub use annotations::bounding_box::{BoundingBox, InvalidGeometryError};
pub use annotations::detection::Detection;
pub use enrichment::knowledge_base::{
    EnrichmentUnavailableError, KnowledgeBase, StaticKnowledgeBase,
};
pub use enrichment::metadata::{EnrichmentMetadata, Location};
