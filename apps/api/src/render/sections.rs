//! Section renderer — turns `ResumeData` + a template style into the full
//! top-to-bottom sequence of draw calls.
//!
//! The vertical cursor is a plain value threaded through every section call
//! (each returns the updated position), so renders are trivially concurrent
//! and each section is testable in isolation. Vertical flow uses the
//! approximate `estimated_lines` policy from `font_metrics`. There is no
//! page-break logic: content past the single page overflows silently.

use crate::models::resume::{EducationEntry, ExperienceEntry, ResumeData};
use crate::render::canvas::{Color, PageCanvas};
use crate::render::font_metrics::{metrics_for, FontWeight};
use crate::render::photo::{DecodedPhoto, PHOTO_MAX_DIM_PT};
use crate::render::template::TemplateStyle;

pub const MARGIN_PT: f32 = 50.0;

const NAME_SIZE: f32 = 24.0;
const ROLE_SIZE: f32 = 14.0;
const CONTACT_SIZE: f32 = 10.0;
const SECTION_TITLE_SIZE: f32 = 12.0;
const ENTRY_TITLE_SIZE: f32 = 11.0;
const BODY_SIZE: f32 = 10.0;
const BODY_LINE_HEIGHT: f32 = 14.0;

/// Gap left under a wrapped body block before the next heading or entry.
const BLOCK_GAP: f32 = 12.0;
const ENTRY_GAP: f32 = 10.0;

const BODY_TEXT: Color = Color::gray(0.2);
const DIVIDER: Color = Color::gray(0.8);
const WATERMARK_TINT: Color = Color::gray(0.7);

pub const WATERMARK_TEXT: &str = "Created with Free CV Builder";

/// Sections drawn by the programmatic backend, in order. Skills is absent on
/// purpose: it only appears in the snapshot export, which prints the live
/// preview. Keep the two lists in sync if that ever changes.
pub const SECTION_ORDER: [&str; 3] = ["Profile", "Experience", "Education"];

/// Draws the whole résumé onto one page.
pub fn draw_resume(
    canvas: &PageCanvas,
    data: &ResumeData,
    style: &TemplateStyle,
    photo: Option<&DecodedPhoto>,
    is_premium: bool,
) {
    let cursor = draw_header(canvas, data, style);

    if let Some(photo) = photo {
        draw_photo(canvas, photo);
    }

    let cursor = if data.summary.trim().is_empty() {
        cursor
    } else {
        draw_summary(canvas, style, &data.summary, cursor)
    };
    let cursor = if data.experience.iter().any(has_experience_content) {
        draw_experience(canvas, style, &data.experience, cursor)
    } else {
        cursor
    };
    if data.education.iter().any(has_education_content) {
        draw_education(canvas, style, &data.education, cursor);
    }

    if !is_premium {
        draw_watermark(canvas);
    }
}

/// Header band (if any), name, role, and the contact line.
/// Returns the cursor below the header block.
fn draw_header(canvas: &PageCanvas, data: &ResumeData, style: &TemplateStyle) -> f32 {
    let mut cursor = canvas.height_pt - MARGIN_PT;

    if let Some(band) = style.header_band {
        canvas.draw_rect(
            0.0,
            canvas.height_pt - band.height_pt,
            canvas.width_pt,
            band.height_pt,
            band.color,
        );
        cursor = canvas.height_pt - 60.0;
    }

    let name = non_empty_or(&data.full_name, "Name");
    canvas.draw_text(name, NAME_SIZE, FontWeight::Bold, style.header_text, MARGIN_PT, cursor);
    cursor -= 25.0;

    let role = non_empty_or(&data.job_role, "Job Title");
    canvas.draw_text(role, ROLE_SIZE, FontWeight::Regular, style.header_text, MARGIN_PT, cursor);
    cursor -= 30.0;

    if style.header_band.is_some() {
        cursor -= 15.0; // clear the band before body text starts
    }

    let contact = contact_line(data);
    if !contact.is_empty() {
        canvas.draw_text(&contact, CONTACT_SIZE, FontWeight::Regular, BODY_TEXT, MARGIN_PT, cursor);
    }
    cursor - 30.0
}

/// Joins email / phone / address with `" | "`, skipping empty fields.
pub fn contact_line(data: &ResumeData) -> String {
    [&data.email, &data.phone, &data.address]
        .into_iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Photo sits top-right inside the margin, independent of the cursor flow.
fn draw_photo(canvas: &PageCanvas, photo: &DecodedPhoto) {
    let (w, h) = photo.scaled_dims(PHOTO_MAX_DIM_PT);
    let x = canvas.width_pt - MARGIN_PT - w;
    let y = canvas.height_pt - MARGIN_PT - h;
    canvas.draw_image(photo, x, y, w);
}

/// Uppercased accent title with a thin full-width divider below it.
fn draw_section_title(canvas: &PageCanvas, style: &TemplateStyle, title: &str, cursor: f32) -> f32 {
    canvas.draw_text(
        &title.to_uppercase(),
        SECTION_TITLE_SIZE,
        FontWeight::Bold,
        style.accent,
        MARGIN_PT,
        cursor,
    );
    canvas.draw_line(
        MARGIN_PT,
        cursor - 5.0,
        canvas.width_pt - MARGIN_PT,
        cursor - 5.0,
        1.0,
        DIVIDER,
    );
    cursor - 25.0
}

fn draw_summary(canvas: &PageCanvas, style: &TemplateStyle, summary: &str, cursor: f32) -> f32 {
    let cursor = draw_section_title(canvas, style, SECTION_ORDER[0], cursor);
    let max_width = canvas.width_pt - MARGIN_PT * 2.0;
    canvas.draw_text_wrapped(
        summary,
        BODY_SIZE,
        FontWeight::Regular,
        BODY_TEXT,
        MARGIN_PT,
        cursor,
        max_width,
        BODY_LINE_HEIGHT,
    );
    cursor - body_block_advance(summary, max_width)
}

fn draw_experience(
    canvas: &PageCanvas,
    style: &TemplateStyle,
    entries: &[ExperienceEntry],
    cursor: f32,
) -> f32 {
    let mut cursor = draw_section_title(canvas, style, SECTION_ORDER[1], cursor);
    let max_width = canvas.width_pt - MARGIN_PT * 2.0;

    for entry in entries.iter().filter(|e| has_experience_content(e)) {
        canvas.draw_text(
            &experience_heading(entry),
            ENTRY_TITLE_SIZE,
            FontWeight::Bold,
            Color::BLACK,
            MARGIN_PT,
            cursor,
        );
        let dates = date_range(&entry.start, &entry.end);
        if !dates.is_empty() {
            canvas.draw_text_right_aligned(
                &dates,
                BODY_SIZE,
                FontWeight::Regular,
                BODY_TEXT,
                canvas.width_pt - MARGIN_PT,
                cursor,
            );
        }
        cursor -= 15.0;

        if !entry.description.trim().is_empty() {
            canvas.draw_text_wrapped(
                &entry.description,
                BODY_SIZE,
                FontWeight::Regular,
                BODY_TEXT,
                MARGIN_PT,
                cursor,
                max_width,
                BODY_LINE_HEIGHT,
            );
            cursor -= body_block_advance(&entry.description, max_width);
        }
        cursor -= ENTRY_GAP;
    }
    cursor
}

fn draw_education(
    canvas: &PageCanvas,
    style: &TemplateStyle,
    entries: &[EducationEntry],
    cursor: f32,
) -> f32 {
    let mut cursor = draw_section_title(canvas, style, SECTION_ORDER[2], cursor);

    for entry in entries.iter().filter(|e| has_education_content(e)) {
        canvas.draw_text(
            &education_heading(entry),
            ENTRY_TITLE_SIZE,
            FontWeight::Bold,
            Color::BLACK,
            MARGIN_PT,
            cursor,
        );
        if !entry.year.trim().is_empty() {
            canvas.draw_text_right_aligned(
                &entry.year,
                BODY_SIZE,
                FontWeight::Regular,
                BODY_TEXT,
                canvas.width_pt - MARGIN_PT,
                cursor,
            );
        }
        cursor -= 20.0;
    }
    cursor
}

/// Fixed branding line stamped on non-premium exports, centered near the
/// bottom edge.
fn draw_watermark(canvas: &PageCanvas) {
    let width = metrics_for(FontWeight::Regular).measure_pt(WATERMARK_TEXT, CONTACT_SIZE);
    canvas.draw_text(
        WATERMARK_TEXT,
        CONTACT_SIZE,
        FontWeight::Regular,
        WATERMARK_TINT,
        (canvas.width_pt - width) / 2.0,
        20.0,
    );
}

/// Cursor advance for a wrapped body block: the `estimated_lines` policy
/// times the line height, plus a fixed gap. Never measured from rendered
/// output.
pub fn body_block_advance(text: &str, max_width_pt: f32) -> f32 {
    let lines = metrics_for(FontWeight::Regular).estimated_lines(text, max_width_pt, BODY_SIZE);
    lines as f32 * BODY_LINE_HEIGHT + BLOCK_GAP
}

pub fn experience_heading(entry: &ExperienceEntry) -> String {
    match (entry.title.trim(), entry.company.trim()) {
        ("", company) => company.to_string(),
        (title, "") => title.to_string(),
        (title, company) => format!("{title} at {company}"),
    }
}

pub fn education_heading(entry: &EducationEntry) -> String {
    [entry.degree.trim(), entry.institution.trim()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn date_range(start: &str, end: &str) -> String {
    match (start.trim(), end.trim()) {
        ("", "") => String::new(),
        (start, end) => format!("{start} - {end}"),
    }
}

fn has_experience_content(entry: &ExperienceEntry) -> bool {
    !(entry.title.trim().is_empty()
        && entry.company.trim().is_empty()
        && entry.description.trim().is_empty())
}

fn has_education_content(entry: &EducationEntry) -> bool {
    !(entry.degree.trim().is_empty() && entry.institution.trim().is_empty())
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback
    } else {
        trimmed
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
