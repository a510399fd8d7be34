//! The document-to-PDF rendering subsystem.
//!
//! Two server-side backends implement the same [`ResumeRenderer`] capability:
//! a programmatic layout engine that draws structured data onto a page
//! ([`programmatic`]), and a headless-browser printer that reproduces the
//! live preview pixel-for-pixel from a captured HTML snapshot ([`snapshot`]).
//! [`selector`] maps requests to backends and documents the fallback order.

pub mod canvas;
pub mod font_metrics;
pub mod photo;
pub mod programmatic;
pub mod sections;
pub mod selector;
pub mod snapshot;
pub mod template;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::resume::ResumeData;
use crate::render::template::Template;

/// A single export request. Variants map 1:1 onto the two server-side
/// backends. Requests are independent — no cross-request state anywhere in
/// the rendering path.
#[derive(Debug, Clone)]
pub enum RenderRequest {
    /// Structured form data for the programmatic backend. No HTML involved.
    Structured {
        data: ResumeData,
        is_premium: bool,
        template: Template,
        /// Base64 data URL as posted by the form; decoded (and discarded on
        /// failure) by the backend.
        photo: Option<String>,
    },
    /// A full HTML document captured from the live preview, printed by a
    /// request-scoped headless browser.
    Snapshot { html: String },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("document construction failed: {0}")]
    Document(String),

    #[error("browser rendering failed: {0}")]
    Browser(String),

    #[error("snapshot render timed out after {0}s")]
    Timeout(u64),

    #[error("render task did not complete")]
    Cancelled,

    #[error("backend does not support this request kind")]
    UnsupportedRequest,
}

/// Capability shared by both PDF backends.
///
/// Callers (and parity tests) depend on this seam instead of a concrete
/// strategy: both implementations must honor the same watermark policy and
/// the same error taxonomy, even though their pixels differ.
#[async_trait]
pub trait ResumeRenderer: Send + Sync {
    /// Renders the request to complete PDF bytes. Never returns a partial
    /// document — on failure the caller gets an error, not truncated bytes.
    async fn render(&self, request: RenderRequest) -> Result<Vec<u8>, RenderError>;
}
