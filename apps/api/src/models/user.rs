#![allow(dead_code)]

//! Persisted tracking rows backing the admin dashboard.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub full_name: Option<String>,
    pub is_premium: bool,
    pub downloads_count: i64,
    pub last_active: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActivityRow {
    pub id: i64,
    pub user_id: i64,
    pub activity_type: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Activity joined to its user, as shown in the admin activity feed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActivityWithUser {
    pub activity_type: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub full_name: Option<String>,
    pub email: Option<String>,
}

/// Aggregates for the admin overview cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    pub total_users: i64,
    pub premium_users: i64,
    pub resumes_generated: i64,
    pub today_generated: i64,
}
