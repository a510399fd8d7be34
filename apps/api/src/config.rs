use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Everything has a sensible local default — the service starts with no env at all.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Explicit Chromium binary for the snapshot backend. When unset,
    /// chromiumoxide autodetects an installed Chrome/Chromium.
    pub chrome_executable: Option<String>,
    /// Upper bound on the snapshot load + settle + print sequence, in seconds.
    pub snapshot_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://cvstudio.db".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            chrome_executable: std::env::var("CHROME_EXECUTABLE").ok(),
            snapshot_timeout_secs: std::env::var("SNAPSHOT_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .context("SNAPSHOT_TIMEOUT_SECS must be a number of seconds")?,
        })
    }
}
