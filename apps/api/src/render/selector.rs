//! Backend selection and fallback policy.
//!
//! The default export path starts in the requester's browser: the live
//! preview DOM is rasterized client-side, which costs the server nothing and
//! mirrors on-screen state exactly. When that fails, the client posts the
//! captured HTML here and the server-side snapshot backend takes over. The
//! programmatic backend is a separate export path behind its own endpoint —
//! deliberately outside that fallback chain.

use std::sync::Arc;

use crate::config::Config;
use crate::render::programmatic::ProgrammaticRenderer;
use crate::render::snapshot::SnapshotRenderer;
use crate::render::{RenderRequest, ResumeRenderer};

/// Every strategy that can service an export, including the one that never
/// runs on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportBackend {
    /// DOM-to-canvas-to-PDF in the requester's browser.
    ClientRasterize,
    /// Headless-browser print of the captured preview HTML.
    ServerSnapshot,
    /// Structured-data drawing, no HTML involved.
    Programmatic,
}

/// Fallback order for the default (snapshot) export path. Client first,
/// server snapshot on any client failure. The programmatic path is not in
/// this chain.
pub const SNAPSHOT_FALLBACK_CHAIN: [ExportBackend; 2] =
    [ExportBackend::ClientRasterize, ExportBackend::ServerSnapshot];

/// Maps a request to the server-side backend that services it.
pub fn backend_for(request: &RenderRequest) -> ExportBackend {
    match request {
        RenderRequest::Structured { .. } => ExportBackend::Programmatic,
        RenderRequest::Snapshot { .. } => ExportBackend::ServerSnapshot,
    }
}

/// Builds the renderer servicing this request.
pub fn renderer_for(request: &RenderRequest, config: &Config) -> Arc<dyn ResumeRenderer> {
    match backend_for(request) {
        ExportBackend::ServerSnapshot | ExportBackend::ClientRasterize => {
            Arc::new(SnapshotRenderer::from_config(config))
        }
        ExportBackend::Programmatic => Arc::new(ProgrammaticRenderer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_fallback_order_is_client_first() {
        assert_eq!(
            SNAPSHOT_FALLBACK_CHAIN,
            [ExportBackend::ClientRasterize, ExportBackend::ServerSnapshot]
        );
    }

    #[test]
    fn test_programmatic_path_is_not_in_the_fallback_chain() {
        assert!(!SNAPSHOT_FALLBACK_CHAIN.contains(&ExportBackend::Programmatic));
    }

    #[test]
    fn test_request_kinds_map_to_their_backends() {
        let structured = RenderRequest::Structured {
            data: Default::default(),
            is_premium: false,
            template: Default::default(),
            photo: None,
        };
        let snapshot = RenderRequest::Snapshot {
            html: "<html></html>".to_string(),
        };
        assert_eq!(backend_for(&structured), ExportBackend::Programmatic);
        assert_eq!(backend_for(&snapshot), ExportBackend::ServerSnapshot);
    }
}
