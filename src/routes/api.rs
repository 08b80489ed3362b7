use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::agents::{detect_language, truncate_chars, Analysis, Suggestion};
use crate::db::{NewReview, ReviewPayload};
use crate::error::ReviewError;
use crate::state::AppState;
use crate::storage::generate_timestamp;

const STORED_CODE_CHARS: usize = 1000;
const SNIPPET_CHARS: usize = 500;
const DEFAULT_FILENAME: &str = "upload";

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub id: i64,
    pub filename: String,
    pub language: String,
    pub timestamp: String,
    pub summary: String,
    pub readability_score: u8,
    pub modularity_score: u8,
    pub bug_risk_score: u8,
    pub suggestions: Vec<Suggestion>,
    pub code_snippet: String,
}

struct Upload {
    filename: String,
    data: Vec<u8>,
}

pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Code Review Assistant API (Hugging Face)",
        "version": "1.0"
    }))
}

pub async fn review_code(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ReviewResponse>, ReviewError> {
    let upload = read_upload(multipart?).await?;
    let filename = upload.filename;
    let code = String::from_utf8(upload.data)?;

    let language = detect_language(&filename);
    let analysis = state.inference.analyze(&code, &filename, language).await?;

    let timestamp = generate_timestamp();
    let review_data = serde_json::to_string(&ReviewPayload {
        filename: &filename,
        language,
        analysis: &analysis,
        code: truncate_chars(&code, STORED_CODE_CHARS),
    })?;

    let id = state
        .store
        .append(&NewReview {
            filename: &filename,
            language,
            timestamp: &timestamp,
            review_data: &review_data,
        })
        .await?;

    tracing::info!("Stored review {} for {} ({})", id, filename, language);

    let Analysis {
        summary,
        readability_score,
        modularity_score,
        bug_risk_score,
        suggestions,
    } = analysis;

    Ok(Json(ReviewResponse {
        id,
        language: language.to_string(),
        timestamp,
        summary,
        readability_score,
        modularity_score,
        bug_risk_score,
        suggestions,
        code_snippet: truncate_chars(&code, SNIPPET_CHARS),
        filename,
    }))
}

/// Takes the first `file` field; other fields are skipped.
async fn read_upload(mut multipart: Multipart) -> Result<Upload, ReviewError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_FILENAME)
            .to_string();
        let data = field.bytes().await?.to_vec();
        return Ok(Upload { filename, data });
    }
    Err(ReviewError::MissingFile)
}
