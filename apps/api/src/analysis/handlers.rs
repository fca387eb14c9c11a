//! Axum route handlers for the analysis page and JSON API.

use askama::Template;
use axum::{
    extract::{
        multipart::{Field, MultipartError},
        Multipart, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::analysis::extractor::{Document, MediaType};
use crate::analysis::page::IndexPage;
use crate::analysis::pipeline::{run_analysis, AnalysisOutcome};
use crate::errors::AppError;
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const JD_FIELD: &str = "job_description";

/// GET /
pub async fn handle_index() -> Response {
    render_page(StatusCode::OK, IndexPage::empty())
}

/// POST /analyze
///
/// Every failure is caught here and shown as a banner on the page.
pub async fn handle_analyze_page(State(state): State<AppState>, multipart: Multipart) -> Response {
    match analyze(&state, multipart).await {
        Ok(outcome) => render_page(StatusCode::OK, IndexPage::with_analysis(outcome.display)),
        Err(err) => {
            err.log();
            render_page(err.status(), IndexPage::with_error(&err))
        }
    }
}

/// POST /api/v1/analyze
pub async fn handle_analyze_api(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisOutcome>, AppError> {
    Ok(Json(analyze(&state, multipart).await?))
}

async fn analyze(state: &AppState, multipart: Multipart) -> Result<AnalysisOutcome, AppError> {
    let (resume, job_description) = read_uploads(multipart).await?;
    run_analysis(
        resume,
        job_description,
        state.client.as_ref(),
        state.profile,
        &state.schema,
    )
    .await
}

/// Pulls the resume and job description out of the form. Both are required.
async fn read_uploads(mut multipart: Multipart) -> Result<(Document, Document), AppError> {
    let mut resume = None;
    let mut job_description = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(upload_error)?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            RESUME_FIELD => resume = read_document(field).await?,
            JD_FIELD => job_description = read_document(field).await?,
            _ => {
                // drain unknown fields
                field
                    .bytes()
                    .await
                    .map_err(upload_error)?;
            }
        }
    }

    match (resume, job_description) {
        (Some(resume), Some(jd)) => Ok((resume, jd)),
        (None, _) => Err(AppError::Validation(
            "Please upload your resume before analyzing.".to_string(),
        )),
        (_, None) => Err(AppError::Validation(
            "Please upload the job description before analyzing.".to_string(),
        )),
    }
}

/// Returns `None` for an empty file input (no file chosen).
async fn read_document(field: Field<'_>) -> Result<Option<Document>, AppError> {
    let file_name = field
        .file_name()
        .map(str::to_string)
        .filter(|name| !name.is_empty());
    let content_type = field.content_type().map(str::to_string);

    let bytes = field
        .bytes()
        .await
        .map_err(upload_error)?;

    if file_name.is_none() && bytes.is_empty() {
        return Ok(None);
    }

    let media_type = MediaType::detect(content_type.as_deref(), file_name.as_deref())?;
    Ok(Some(Document::new(file_name, media_type, bytes)))
}

/// Keeps the body-limit rejection distinct from a malformed form.
fn upload_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(format!("Invalid upload: {err}"))
    }
}

fn render_page(status: StatusCode, page: IndexPage) -> Response {
    match page.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => AppError::Internal(e.into()).into_response(),
    }
}
