//! Programmatic PDF backend — builds a one-page document straight from
//! structured data, no HTML or browser involved.
//!
//! This is the dependency-light, lower-fidelity export path. A bad photo
//! never fails the export; everything else that goes wrong during document
//! construction surfaces as [`RenderError::Document`].

use std::io::{BufWriter, Cursor};

use async_trait::async_trait;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use tracing::warn;

use crate::models::resume::ResumeData;
use crate::render::canvas::{PageCanvas, PAGE_HEIGHT_PT, PAGE_WIDTH_PT, PT_TO_MM};
use crate::render::photo::DecodedPhoto;
use crate::render::sections;
use crate::render::template::Template;
use crate::render::{RenderError, RenderRequest, ResumeRenderer};

pub struct ProgrammaticRenderer;

impl ProgrammaticRenderer {
    /// Synchronous render: create the document, embed fonts, decode the photo
    /// (best effort), drive the section renderer, serialize.
    pub fn render_document(
        data: &ResumeData,
        is_premium: bool,
        template: Template,
        photo: Option<&str>,
    ) -> Result<Vec<u8>, RenderError> {
        let (doc, page, layer) = PdfDocument::new(
            "Resume",
            Mm(PAGE_WIDTH_PT * PT_TO_MM),
            Mm(PAGE_HEIGHT_PT * PT_TO_MM),
            "Layer 1",
        );

        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(document_error)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(document_error)?;

        // Asset errors are recovered locally: the export continues photo-less.
        let decoded = photo.and_then(|url| match DecodedPhoto::from_data_url(url) {
            Ok(p) => Some(p),
            Err(e) => {
                warn!("Failed to embed photo, continuing without it: {e}");
                None
            }
        });

        let canvas = PageCanvas::new(doc.get_page(page).get_layer(layer), regular, bold);
        sections::draw_resume(&canvas, data, &template.style(), decoded.as_ref(), is_premium);
        drop(canvas);

        let mut buf = Vec::new();
        {
            let mut writer = BufWriter::new(Cursor::new(&mut buf));
            doc.save(&mut writer).map_err(document_error)?;
        }
        Ok(buf)
    }
}

fn document_error(e: printpdf::Error) -> RenderError {
    RenderError::Document(e.to_string())
}

#[async_trait]
impl ResumeRenderer for ProgrammaticRenderer {
    async fn render(&self, request: RenderRequest) -> Result<Vec<u8>, RenderError> {
        match request {
            RenderRequest::Structured {
                data,
                is_premium,
                template,
                photo,
            } => {
                // CPU-bound work stays off the async executor so concurrent
                // exports keep making progress.
                tokio::task::spawn_blocking(move || {
                    Self::render_document(&data, is_premium, template, photo.as_deref())
                })
                .await
                .map_err(|_| RenderError::Cancelled)?
            }
            RenderRequest::Snapshot { .. } => Err(RenderError::UnsupportedRequest),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{EducationEntry, ExperienceEntry};
    use crate::render::sections::WATERMARK_TEXT;

    fn sample_data(name: &str) -> ResumeData {
        ResumeData {
            full_name: name.to_string(),
            job_role: "Platform Engineer".to_string(),
            email: "candidate@example.com".to_string(),
            phone: "+49 30 1234567".to_string(),
            address: "Berlin".to_string(),
            summary: "Engineer with a decade of experience running data platforms \
                      and leading small teams through large migrations."
                .to_string(),
            skills: "Rust, SQL, Kubernetes".to_string(),
            experience: vec![ExperienceEntry {
                title: "Senior Engineer".to_string(),
                company: "Acme GmbH".to_string(),
                start: "2019".to_string(),
                end: "2024".to_string(),
                description: "Owned the ingestion pipeline end to end and cut \
                              infrastructure cost by a third."
                    .to_string(),
            }],
            education: vec![EducationEntry {
                degree: "BSc Computer Science".to_string(),
                institution: "TU Berlin".to_string(),
                year: "2014".to_string(),
            }],
        }
    }

    fn extracted_text(bytes: &[u8]) -> String {
        let text = pdf_extract::extract_text_from_mem(bytes).expect("produced PDF must parse");
        // Collapse whitespace so assertions survive extraction quirks.
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    // ── well-formedness ─────────────────────────────────────────────────────

    #[test]
    fn test_renders_valid_pdf_for_every_template() {
        for template in Template::all() {
            let bytes =
                ProgrammaticRenderer::render_document(&sample_data("Ada"), false, template, None)
                    .unwrap();
            assert!(!bytes.is_empty());
            assert!(bytes.starts_with(b"%PDF-"), "missing PDF header");
            let tail = &bytes[bytes.len().saturating_sub(32)..];
            assert!(
                tail.windows(5).any(|w| w == b"%%EOF"),
                "missing PDF trailer for {template:?}"
            );
        }
    }

    #[test]
    fn test_minimal_data_still_renders() {
        let bytes = ProgrammaticRenderer::render_document(
            &ResumeData::default(),
            false,
            Template::Classic,
            None,
        )
        .unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    // ── content ─────────────────────────────────────────────────────────────

    #[test]
    fn test_output_contains_name_and_section_titles() {
        let bytes = ProgrammaticRenderer::render_document(
            &sample_data("Ada Lovelace"),
            false,
            Template::Classic,
            None,
        )
        .unwrap();
        let text = extracted_text(&bytes);
        assert!(text.contains("Ada Lovelace"));
        assert!(text.contains("PROFILE"));
        assert!(text.contains("EXPERIENCE"));
        assert!(text.contains("EDUCATION"));
    }

    #[test]
    fn test_empty_sections_emit_no_headings() {
        let data = ResumeData {
            full_name: "Ada".to_string(),
            job_role: "Engineer".to_string(),
            ..Default::default()
        };
        for template in Template::all() {
            let bytes =
                ProgrammaticRenderer::render_document(&data, true, template, None).unwrap();
            let text = extracted_text(&bytes);
            assert!(!text.contains("PROFILE"), "{template:?} leaked summary heading");
            assert!(!text.contains("EXPERIENCE"), "{template:?} leaked experience heading");
            assert!(!text.contains("EDUCATION"), "{template:?} leaked education heading");
        }
    }

    #[test]
    fn test_skills_never_rendered_by_programmatic_backend() {
        let bytes = ProgrammaticRenderer::render_document(
            &sample_data("Ada"),
            false,
            Template::Classic,
            None,
        )
        .unwrap();
        let text = extracted_text(&bytes);
        assert!(!text.contains("SKILLS"));
        assert!(!text.contains("Kubernetes"));
    }

    // ── watermark policy ────────────────────────────────────────────────────

    #[test]
    fn test_watermark_present_for_free_exports() {
        let bytes = ProgrammaticRenderer::render_document(
            &sample_data("Ada"),
            false,
            Template::Classic,
            None,
        )
        .unwrap();
        assert!(extracted_text(&bytes).contains(WATERMARK_TEXT));
    }

    #[test]
    fn test_watermark_absent_for_premium_exports() {
        let bytes = ProgrammaticRenderer::render_document(
            &sample_data("Ada"),
            true,
            Template::Classic,
            None,
        )
        .unwrap();
        assert!(!extracted_text(&bytes).contains(WATERMARK_TEXT));
    }

    // ── photo degradation ───────────────────────────────────────────────────

    #[test]
    fn test_unrecognized_photo_mime_degrades_gracefully() {
        let bytes = ProgrammaticRenderer::render_document(
            &sample_data("Ada"),
            false,
            Template::Classic,
            Some("data:image/tiff;base64,AAAA"),
        )
        .unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_corrupt_photo_payload_degrades_gracefully() {
        let bytes = ProgrammaticRenderer::render_document(
            &sample_data("Ada"),
            false,
            Template::Classic,
            Some("data:image/png;base64,not-an-image"),
        )
        .unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    // ── trait surface ───────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_renderer_rejects_snapshot_requests() {
        let result = ProgrammaticRenderer
            .render(RenderRequest::Snapshot {
                html: "<html></html>".to_string(),
            })
            .await;
        assert!(matches!(result, Err(RenderError::UnsupportedRequest)));
    }

    #[tokio::test]
    async fn test_concurrent_exports_do_not_interleave() {
        let mut handles = Vec::new();
        for i in 0..8 {
            handles.push(tokio::spawn(async move {
                let name = format!("Candidate {i}");
                let request = RenderRequest::Structured {
                    data: sample_data(&name),
                    is_premium: false,
                    template: Template::Modern,
                    photo: None,
                };
                let bytes = ProgrammaticRenderer.render(request).await.unwrap();
                (name, bytes)
            }));
        }

        let results: Vec<(String, Vec<u8>)> = futures::future::join_all(handles)
            .await
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        for (name, bytes) in &results {
            let text = extracted_text(bytes);
            assert!(text.contains(name), "output missing its own name");
            for (other, _) in &results {
                if other != name {
                    assert!(
                        !text.contains(other.as_str()),
                        "output for {name} contains {other}"
                    );
                }
            }
        }
    }
}
