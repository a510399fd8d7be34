//! Axum route handlers for the Export API.
//!
//! Two endpoints, two backends: `/api/download/pdf` draws from structured
//! form data (programmatic backend), `/api/download/pdf-original` prints the
//! captured preview HTML (snapshot backend). Failures never produce a
//! partial PDF — the client gets an error status and no body instead.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use bytes::Bytes;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::resume::ResumeData;
use crate::render::selector;
use crate::render::template::Template;
use crate::render::RenderRequest;
use crate::state::AppState;

/// Longest filename accepted into the Content-Disposition header.
const MAX_FILENAME_LEN: usize = 80;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfRequest {
    pub user_data: ResumeData,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub template: Template,
    #[serde(default)]
    pub photo_base64: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotPdfRequest {
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/download/pdf
///
/// Programmatic export: structured data in, `application/pdf` out.
pub async fn handle_pdf(
    State(state): State<AppState>,
    Json(request): Json<PdfRequest>,
) -> Result<impl IntoResponse, AppError> {
    let render_request = RenderRequest::Structured {
        data: request.user_data,
        is_premium: request.is_premium,
        template: request.template,
        photo: request.photo_base64,
    };

    let renderer = selector::renderer_for(&render_request, &state.config);
    let bytes = renderer.render(render_request).await?;

    Ok(pdf_response("resume", bytes))
}

/// POST /api/download/pdf-original
///
/// Snapshot export: prints the captured preview HTML so the download matches
/// the on-screen page exactly. Serves as the server-side fallback when
/// client-side rasterization fails.
pub async fn handle_pdf_original(
    State(state): State<AppState>,
    Json(request): Json<SnapshotPdfRequest>,
) -> Result<impl IntoResponse, AppError> {
    let html = request
        .html
        .filter(|h| !h.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Missing html".to_string()))?;

    let filename = sanitize_filename(request.filename.as_deref().unwrap_or(""));

    let render_request = RenderRequest::Snapshot { html };
    let renderer = selector::renderer_for(&render_request, &state.config);
    let bytes = renderer.render(render_request).await?;

    Ok(pdf_response(&filename, bytes))
}

fn pdf_response(filename: &str, bytes: Vec<u8>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}.pdf"),
            ),
        ],
        Bytes::from(bytes),
    )
}

/// Restricts a client-supplied filename to word characters, hyphens, and
/// spaces, bounded to [`MAX_FILENAME_LEN`]. An empty result falls back to
/// `resume` — the header always carries a usable name.
pub fn sanitize_filename(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ' '))
        .collect();
    let truncated: String = cleaned.trim().chars().take(MAX_FILENAME_LEN).collect();
    let result = truncated.trim().to_string();
    if result.is_empty() {
        "resume".to_string()
    } else {
        result
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_path_traversal_and_shell_noise() {
        let result = sanitize_filename("../../etc/passwd; rm -rf");
        assert!(
            result
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ' ')),
            "unexpected character in {result:?}"
        );
        assert!(result.len() <= 80);
        assert!(!result.is_empty());
    }

    #[test]
    fn test_sanitize_truncates_to_eighty_chars() {
        let long = "a".repeat(200);
        assert_eq!(sanitize_filename(&long).len(), 80);
    }

    #[test]
    fn test_sanitize_falls_back_to_resume() {
        assert_eq!(sanitize_filename(""), "resume");
        assert_eq!(sanitize_filename("###///:::"), "resume");
        assert_eq!(sanitize_filename("   "), "resume");
    }

    #[test]
    fn test_sanitize_keeps_ordinary_names() {
        assert_eq!(sanitize_filename("Jane Doe"), "Jane Doe");
        assert_eq!(sanitize_filename("resume-v2_final"), "resume-v2_final");
    }

    #[test]
    fn test_sanitize_trims_whitespace_left_by_stripping() {
        assert_eq!(sanitize_filename("  Jane Doe!!  "), "Jane Doe");
    }

    #[test]
    fn test_pdf_request_accepts_minimal_payload() {
        let request: PdfRequest = serde_json::from_str(
            r#"{"userData": {"fullName": "Ada"}}"#,
        )
        .unwrap();
        assert_eq!(request.user_data.full_name, "Ada");
        assert!(!request.is_premium);
        assert_eq!(request.template, Template::Classic);
        assert!(request.photo_base64.is_none());
    }

    #[test]
    fn test_snapshot_request_tolerates_missing_fields() {
        let request: SnapshotPdfRequest = serde_json::from_str("{}").unwrap();
        assert!(request.html.is_none());
        assert!(request.filename.is_none());
    }
}
