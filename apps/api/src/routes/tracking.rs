//! Axum route handlers for the Tracking API.
//!
//! Both endpoints are fire-and-forget from the client: the UI posts and
//! ignores the outcome, so nothing here may ever block or fail an export.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackCvRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub is_premium: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// POST /api/track-cv
///
/// Upserts the user row (bumping the download counter) and records a
/// `resume_downloaded` activity.
pub async fn handle_track_cv(
    State(state): State<AppState>,
    Json(request): Json<TrackCvRequest>,
) -> Result<Json<Value>, AppError> {
    let email = require_email(request.email)?;
    record_download(
        &state.db,
        &email,
        request.full_name.as_deref(),
        request.is_premium.unwrap_or(false),
    )
    .await?;
    Ok(Json(json!({ "success": true })))
}

/// POST /api/heartbeat
///
/// Refreshes `last_active` for the user, creating the row if needed.
pub async fn handle_heartbeat(
    State(state): State<AppState>,
    Json(request): Json<HeartbeatRequest>,
) -> Result<Json<Value>, AppError> {
    let email = require_email(request.email)?;
    heartbeat(&state.db, &email, request.full_name.as_deref()).await?;
    Ok(Json(json!({ "success": true })))
}

fn require_email(email: Option<String>) -> Result<String, AppError> {
    email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Email required".to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Store operations
// ────────────────────────────────────────────────────────────────────────────

pub async fn record_download(
    pool: &SqlitePool,
    email: &str,
    full_name: Option<&str>,
    is_premium: bool,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"INSERT INTO users (email, full_name, is_premium, downloads_count, last_active)
           VALUES (?, ?, ?, 1, CURRENT_TIMESTAMP)
           ON CONFLICT(email) DO UPDATE SET
               downloads_count = downloads_count + 1,
               last_active = CURRENT_TIMESTAMP,
               full_name = COALESCE(excluded.full_name, full_name)"#,
    )
    .bind(email)
    .bind(full_name)
    .bind(is_premium)
    .execute(pool)
    .await?;

    let user_id: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    if let Some(user_id) = user_id {
        sqlx::query(
            "INSERT INTO activities (user_id, activity_type, description)
             VALUES (?, 'resume_downloaded', ?)",
        )
        .bind(user_id)
        .bind(format!(
            "Resume downloaded by {}",
            full_name.unwrap_or(email)
        ))
        .execute(pool)
        .await?;
    }

    Ok(())
}

pub async fn heartbeat(
    pool: &SqlitePool,
    email: &str,
    full_name: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"INSERT INTO users (email, full_name, last_active)
           VALUES (?, ?, CURRENT_TIMESTAMP)
           ON CONFLICT(email) DO UPDATE SET
               last_active = CURRENT_TIMESTAMP,
               full_name = COALESCE(excluded.full_name, full_name)"#,
    )
    .bind(email)
    .bind(full_name)
    .execute(pool)
    .await?;
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;

    #[tokio::test]
    async fn test_record_download_counts_repeat_downloads() {
        let pool = memory_pool().await;

        record_download(&pool, "ada@example.com", Some("Ada"), false)
            .await
            .unwrap();
        record_download(&pool, "ada@example.com", Some("Ada"), false)
            .await
            .unwrap();

        let count: i64 =
            sqlx::query_scalar("SELECT downloads_count FROM users WHERE email = ?")
                .bind("ada@example.com")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(count, 2);

        let activities: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM activities")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(activities, 2);
    }

    #[tokio::test]
    async fn test_record_download_keeps_existing_name_when_missing() {
        let pool = memory_pool().await;

        record_download(&pool, "ada@example.com", Some("Ada"), false)
            .await
            .unwrap();
        record_download(&pool, "ada@example.com", None, false)
            .await
            .unwrap();

        let name: Option<String> =
            sqlx::query_scalar("SELECT full_name FROM users WHERE email = ?")
                .bind("ada@example.com")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_heartbeat_creates_user_without_download() {
        let pool = memory_pool().await;

        heartbeat(&pool, "new@example.com", None).await.unwrap();

        let downloads: i64 =
            sqlx::query_scalar("SELECT downloads_count FROM users WHERE email = ?")
                .bind("new@example.com")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(downloads, 0);
    }

    #[test]
    fn test_require_email_rejects_blank() {
        assert!(require_email(None).is_err());
        assert!(require_email(Some("  ".to_string())).is_err());
        assert_eq!(
            require_email(Some("a@b.c".to_string())).unwrap(),
            "a@b.c"
        );
    }
}
