//! Axum route handler for the Enrichment API.

use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::generate::{generate, GenerationContext, TextKind};

#[derive(Debug, Deserialize)]
pub struct GenerateAiRequest {
    /// One of `summary`, `experience`, `skills`, `coverLetter`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub context: GenerationContext,
}

/// POST /api/generate-ai
///
/// Returns templated enrichment text for one form section. Purely advisory —
/// the renderers never depend on it.
pub async fn handle_generate_ai(
    Json(request): Json<GenerateAiRequest>,
) -> Result<Json<Value>, AppError> {
    let kind = request
        .kind
        .as_deref()
        .ok_or_else(|| AppError::Validation("Type is required".to_string()))?;
    let kind = TextKind::parse(kind)
        .ok_or_else(|| AppError::Validation(format!("Unknown generator type '{kind}'")))?;

    let result = generate(kind, &request.context);
    Ok(Json(json!({ "result": result })))
}
