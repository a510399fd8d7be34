//! Axum route handlers for the Admin API.
//!
//! Read-only dashboard metrics over the tracking store, plus the demo login
//! check the original UI ships with.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::user::{ActivityWithUser, OverviewStats, UserRow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// POST /api/admin/login
///
/// Demo credential check — accepts any non-empty email/password pair. The
/// seeded `admins` table is where a real check would look.
pub async fn handle_login(
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
    if !filled(&request.email) || !filled(&request.password) {
        return Err(AppError::Validation(
            "Email and password required".to_string(),
        ));
    }
    Ok(Json(json!({ "success": true })))
}

/// GET /api/admin/overview
///
/// Aggregate counters for the dashboard cards.
pub async fn handle_overview(
    State(state): State<AppState>,
) -> Result<Json<OverviewStats>, AppError> {
    let total_users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&state.db)
        .await?;
    let premium_users: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE is_premium = 1")
            .fetch_one(&state.db)
            .await?;
    let resumes_generated: i64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(downloads_count), 0) FROM users")
            .fetch_one(&state.db)
            .await?;
    let today_generated: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM activities WHERE DATE(created_at) = DATE('now')",
    )
    .fetch_one(&state.db)
    .await?;

    Ok(Json(OverviewStats {
        total_users,
        premium_users,
        resumes_generated,
        today_generated,
    }))
}

/// GET /api/admin/users
///
/// The 10 most recently active users.
pub async fn handle_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserRow>>, AppError> {
    let users = sqlx::query_as::<_, UserRow>(
        "SELECT id, email, full_name, is_premium, downloads_count, last_active
         FROM users
         ORDER BY last_active DESC
         LIMIT 10",
    )
    .fetch_all(&state.db)
    .await?;
    Ok(Json(users))
}

/// GET /api/admin/activity
///
/// The 10 most recent activities joined to their users.
pub async fn handle_activity(
    State(state): State<AppState>,
) -> Result<Json<Vec<ActivityWithUser>>, AppError> {
    let activity = sqlx::query_as::<_, ActivityWithUser>(
        "SELECT a.activity_type, a.description, a.created_at, u.full_name, u.email
         FROM activities a
         LEFT JOIN users u ON a.user_id = u.id
         ORDER BY a.created_at DESC
         LIMIT 10",
    )
    .fetch_all(&state.db)
    .await?;
    Ok(Json(activity))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
