use crate::analysis::aggregate::{aggregate_cluster, ValidatedDetection};
use crate::analysis::config::{AnalyzerConfig, InvalidConfigError};
use crate::analysis::correlate::correlate;
use crate::analysis::gate::apply_gate;
use crate::analysis::ingest::{ingest_frames, RawDetection};
use crate::analysis::statistics::{compile_statistics, AnalysisStatistics};
use crate::enrichment::knowledge_base::KnowledgeBase;
use crate::enrichment::metadata::Location;
use crate::enrichment::resolver::resolve_enrichment;
use log::info;
use serde::Serialize;

/// What one analysis run hands back to the reporting layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOutcome {
    pub validated_detections: Vec<ValidatedDetection>,
    pub statistics: AnalysisStatistics,
}

impl AnalysisOutcome {
    /// How many frames corroborate the given issue category, or `None` when
    /// no detection of that category survived validation.
    pub fn validated_frames_for(&self, class_name: &str) -> Option<usize> {
        self.validated_detections
            .iter()
            .find(|v| v.class_name == class_name)
            .map(|v| v.validation.num_frames)
    }
}

/// Cross-frame spatial validation of per-frame detection results.
///
/// Each call to [`analyze`](MultiFrameAnalyzer::analyze) is a stateless,
/// single-request computation: ingest, correlate, aggregate, gate,
/// statistics. All working state lives inside the call, so independent
/// requests can run on any number of threads with no coordination.
pub struct MultiFrameAnalyzer {
    config: AnalyzerConfig,
}

impl MultiFrameAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        MultiFrameAnalyzer { config }
    }

    pub fn with_defaults() -> Self {
        MultiFrameAnalyzer::new(AnalyzerConfig::default())
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Runs the full validation pipeline over per-frame raw detection lists.
    ///
    /// The only fatal error is an impossible configuration, rejected before
    /// any processing; malformed individual records are skipped and counted.
    pub fn analyze(
        &self,
        frames: &[Vec<RawDetection>],
    ) -> Result<AnalysisOutcome, InvalidConfigError> {
        self.config.validate_for(frames.len())?;
        let report = ingest_frames(frames, self.config.conf_threshold);
        let total_before = report.detections.len();
        let clusters = correlate(report.detections, self.config.iou_threshold);
        let validated: Vec<ValidatedDetection> = clusters
            .into_iter()
            .map(|cluster| aggregate_cluster(cluster, self.config.confidence_boost))
            .collect();
        let survivors = apply_gate(validated, self.config.min_frames_for_validation);
        let statistics = compile_statistics(frames.len(), total_before, &survivors);
        info!(
            "analyzed {} frames: {} detections in, {} validated ({} malformed, {} sub-threshold)",
            statistics.num_frames,
            statistics.total_detections_before,
            statistics.total_detections_after,
            report.malformed_dropped,
            report.below_threshold_dropped
        );
        Ok(AnalysisOutcome {
            validated_detections: survivors,
            statistics,
        })
    }

    /// [`analyze`](MultiFrameAnalyzer::analyze), then best-effort enrichment
    /// of the survivors. Collaborator failure degrades to unenriched output.
    pub fn analyze_enriched(
        &self,
        frames: &[Vec<RawDetection>],
        kb: &dyn KnowledgeBase,
        location: Option<&Location>,
    ) -> Result<AnalysisOutcome, InvalidConfigError> {
        let mut outcome = self.analyze(frames)?;
        resolve_enrichment(kb, &mut outcome.validated_detections, location);
        Ok(outcome)
    }
}
