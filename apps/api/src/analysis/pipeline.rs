//! The request/response contract for one "Analyze" action:
//! extract both documents → build prompt → one model call → parse → present.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::client::AnalysisClient;
use crate::analysis::extractor::{extract_blocking, Document};
use crate::analysis::parser::{parse, AnalysisResult};
use crate::analysis::presenter::{render, RenderedAnalysis};
use crate::analysis::prompts::{PromptProfile, ResponseSchema};
use crate::analysis::request::AnalysisRequest;
use crate::errors::AppError;

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub model: String,
    pub profile: PromptProfile,
    /// Present only when the model output parsed.
    pub result: Option<AnalysisResult>,
    pub display: RenderedAnalysis,
}

/// Runs one analysis. Extraction and provider failures are returned as
/// `AppError`; an unparseable model response is not an error and comes back
/// as a raw-text display.
pub async fn run_analysis(
    resume: Document,
    job_description: Document,
    client: &dyn AnalysisClient,
    profile: PromptProfile,
    schema: &ResponseSchema,
) -> Result<AnalysisOutcome, AppError> {
    let analysis_id = Uuid::new_v4();
    let started = Instant::now();
    info!(
        %analysis_id,
        resume_type = resume.media_type.label(),
        resume_bytes = resume.bytes.len(),
        jd_type = job_description.media_type.label(),
        jd_bytes = job_description.bytes.len(),
        "Starting analysis"
    );

    let (resume_text, jd_text) =
        tokio::try_join!(extract_blocking(resume), extract_blocking(job_description))?;

    let request = AnalysisRequest::build(resume_text, jd_text, profile, schema);
    if request.resume_text().trim().is_empty() || request.jd_text().trim().is_empty() {
        warn!(%analysis_id, "A document yielded no extractable text; continuing");
    }

    let raw = client.analyze(&request).await?;

    let parsed = parse(&raw, schema);
    if let Err(malformed) = &parsed {
        warn!(%analysis_id, "Falling back to raw response: {}", malformed.reason);
    }
    let result = parsed.as_ref().ok().cloned();
    let display = render(parsed);

    info!(
        %analysis_id,
        model = client.model(),
        parsed = result.is_some(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Analysis complete"
    );

    Ok(AnalysisOutcome {
        analysis_id,
        analyzed_at: Utc::now(),
        model: client.model().to_string(),
        profile,
        result,
        display,
    })
}
