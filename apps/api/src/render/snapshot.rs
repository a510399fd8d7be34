//! HTML-snapshot PDF backend — prints a captured preview document with a
//! request-scoped headless Chromium, preserving exact fonts, colors and CSS
//! layout.
//!
//! Lifecycle discipline: launch → drive → print → tear down, all inside one
//! detached task. Dropping the HTTP response future (client disconnect)
//! cannot skip teardown, and the page-load wait is bounded by a configurable
//! timeout. Teardown failures are logged, never surfaced.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64_STD, Engine as _};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use futures::StreamExt;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::render::{RenderError, RenderRequest, ResumeRenderer};

/// CDP print margins are in inches; the preview prints with 12 mm margins.
const PRINT_MARGIN_IN: f64 = 12.0 / 25.4;
const A4_WIDTH_IN: f64 = 8.27;
const A4_HEIGHT_IN: f64 = 11.69;

/// Two rAF ticks after network idle let fonts and layout settle before
/// printing.
const SETTLE_SCRIPT: &str = "(async () => { \
     await new Promise(r => requestAnimationFrame(() => requestAnimationFrame(r))); \
 })()";

pub struct SnapshotRenderer {
    chrome_executable: Option<String>,
    timeout: Duration,
}

impl SnapshotRenderer {
    pub fn new(chrome_executable: Option<String>, timeout: Duration) -> Self {
        SnapshotRenderer {
            chrome_executable,
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.chrome_executable.clone(),
            Duration::from_secs(config.snapshot_timeout_secs),
        )
    }

    /// Native print-to-PDF settings: background graphics on, page size from
    /// CSS when the stylesheet declares one, A4 otherwise.
    pub(crate) fn print_params() -> PrintToPdfParams {
        PrintToPdfParams {
            print_background: Some(true),
            prefer_css_page_size: Some(true),
            paper_width: Some(A4_WIDTH_IN),
            paper_height: Some(A4_HEIGHT_IN),
            margin_top: Some(PRINT_MARGIN_IN),
            margin_bottom: Some(PRINT_MARGIN_IN),
            margin_left: Some(PRINT_MARGIN_IN),
            margin_right: Some(PRINT_MARGIN_IN),
            ..Default::default()
        }
    }

    async fn print_html(&self, html: String) -> Result<Vec<u8>, RenderError> {
        let executable = self.chrome_executable.clone();
        let timeout = self.timeout;

        // Detached task: the render (and its teardown) runs to completion
        // even if this future is dropped mid-flight.
        let task = tokio::spawn(async move { render_snapshot(executable, timeout, html).await });
        task.await.map_err(|_| RenderError::Cancelled)?
    }
}

#[async_trait]
impl ResumeRenderer for SnapshotRenderer {
    async fn render(&self, request: RenderRequest) -> Result<Vec<u8>, RenderError> {
        match request {
            RenderRequest::Snapshot { html } => self.print_html(html).await,
            RenderRequest::Structured { .. } => Err(RenderError::UnsupportedRequest),
        }
    }
}

async fn render_snapshot(
    executable: Option<String>,
    timeout: Duration,
    html: String,
) -> Result<Vec<u8>, RenderError> {
    // Unique profile dir so concurrent requests never share browser state.
    let user_data_dir = std::env::temp_dir().join(format!("cvstudio-snapshot-{}", Uuid::new_v4()));

    let mut builder = BrowserConfig::builder()
        .arg("--no-sandbox")
        .arg("--disable-setuid-sandbox")
        .user_data_dir(&user_data_dir);
    if let Some(path) = executable {
        builder = builder.chrome_executable(PathBuf::from(path));
    }
    let config = builder.build().map_err(RenderError::Browser)?;

    let (mut browser, mut handler) = Browser::launch(config).await.map_err(browser_error)?;
    let handler_task = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if event.is_err() {
                break;
            }
        }
    });

    let result = tokio::time::timeout(timeout, drive_page(&browser, &html)).await;

    // Teardown runs on success, failure, and timeout alike.
    if let Err(e) = browser.close().await {
        warn!("Failed to close snapshot browser: {e}");
    }
    if let Err(e) = browser.wait().await {
        warn!("Failed to reap snapshot browser process: {e}");
    }
    handler_task.abort();
    if let Err(e) = std::fs::remove_dir_all(&user_data_dir) {
        debug!("Could not remove snapshot profile dir: {e}");
    }

    match result {
        Ok(inner) => inner,
        Err(_) => Err(RenderError::Timeout(timeout.as_secs())),
    }
}

async fn drive_page(browser: &Browser, html: &str) -> Result<Vec<u8>, RenderError> {
    let page = browser
        .new_page("about:blank")
        .await
        .map_err(browser_error)?;

    // Loading through a data URL gives the document a real navigation, so
    // the wait below covers stylesheets and fonts it references.
    let url = format!("data:text/html;base64,{}", BASE64_STD.encode(html));
    page.goto(url).await.map_err(browser_error)?;
    page.wait_for_navigation().await.map_err(browser_error)?;
    page.evaluate(SETTLE_SCRIPT).await.map_err(browser_error)?;

    let bytes = page
        .pdf(SnapshotRenderer::print_params())
        .await
        .map_err(browser_error)?;

    let _ = page.close().await;
    Ok(bytes)
}

fn browser_error(e: impl std::fmt::Display) -> RenderError {
    RenderError::Browser(e.to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
