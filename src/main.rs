use multiframe_validator::enrichment::http::HttpKnowledgeBase;
use multiframe_validator::{
    AnalyzerConfig, KnowledgeBase, Location, MultiFrameAnalyzer, RawDetection,
    StaticKnowledgeBase,
};
use serde::Deserialize;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One analysis request as submitted by the capture frontend.
#[derive(Deserialize)]
struct AnalysisRequest {
    frames: Vec<Vec<RawDetection>>,
    location: Option<Location>,
    config: Option<AnalyzerConfig>,
    /// Remote knowledge-base endpoint; the built-in municipal table is used
    /// when absent.
    knowledge_base_url: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let request_path = std::env::args()
        .nth(1)
        .ok_or("usage: multiframe-validator <request.json>")?;
    let request_path = Path::new(&request_path);
    if !request_path.exists() {
        return Err(format!(
            "Request path does not exist, or cannot be read: {:?}",
            request_path
        )
        .into());
    }
    let request: AnalysisRequest =
        serde_json::from_reader(BufReader::new(File::open(request_path)?))?;

    let analyzer = MultiFrameAnalyzer::new(request.config.unwrap_or_default());
    let kb: Box<dyn KnowledgeBase> = match &request.knowledge_base_url {
        Some(url) => Box::new(HttpKnowledgeBase::new(url.clone())),
        None => Box::new(StaticKnowledgeBase::default()),
    };
    let outcome = analyzer.analyze_enriched(&request.frames, kb.as_ref(), request.location.as_ref())?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
