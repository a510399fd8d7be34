//! Named visual templates and their programmatic-backend styling.
//!
//! A template only changes the header treatment (band color/height, header
//! text color) and the accent color; the section flow is identical across
//! all of them. The snapshot backend gets the same variants from CSS classes
//! instead, so this table is the programmatic side of that contract.

use serde::{Deserialize, Serialize};

use crate::render::canvas::Color;

/// Accent used for section titles in every template (#2563eb).
pub const ACCENT_BLUE: Color = Color::rgb(0.14, 0.38, 0.92);

/// Dark slate band of the `bold` template (#1e293b).
const BOLD_SLATE: Color = Color::rgb(0.11, 0.16, 0.23);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    /// No header band, black header text.
    #[default]
    Classic,
    /// Blue header band.
    Modern,
    /// Tall dark header band.
    Bold,
    /// Unknown/missing template names fall back to the classic look.
    #[serde(other)]
    Unknown,
}

/// A colored band filling the full page width at the top of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderBand {
    pub height_pt: f32,
    pub color: Color,
}

/// Resolved styling for the programmatic backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateStyle {
    pub header_band: Option<HeaderBand>,
    /// Color of the name/role lines (white on a band, black otherwise).
    pub header_text: Color,
    /// Section title color.
    pub accent: Color,
}

impl Template {
    pub fn style(self) -> TemplateStyle {
        match self {
            Template::Modern => TemplateStyle {
                header_band: Some(HeaderBand {
                    height_pt: 150.0,
                    color: ACCENT_BLUE,
                }),
                header_text: Color::WHITE,
                accent: ACCENT_BLUE,
            },
            Template::Bold => TemplateStyle {
                header_band: Some(HeaderBand {
                    height_pt: 180.0,
                    color: BOLD_SLATE,
                }),
                header_text: Color::WHITE,
                accent: ACCENT_BLUE,
            },
            Template::Classic | Template::Unknown => TemplateStyle {
                header_band: None,
                header_text: Color::BLACK,
                accent: ACCENT_BLUE,
            },
        }
    }

    /// All variants with distinct styling, for exhaustive render tests.
    pub fn all() -> [Template; 3] {
        [Template::Classic, Template::Modern, Template::Bold]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_template_falls_back_to_default_look() {
        let t: Template = serde_json::from_str("\"vaporwave\"").unwrap();
        assert_eq!(t, Template::Unknown);
        let style = t.style();
        assert!(style.header_band.is_none());
        assert_eq!(style.header_text, Color::BLACK);
    }

    #[test]
    fn test_known_templates_deserialize_lowercase() {
        assert_eq!(
            serde_json::from_str::<Template>("\"modern\"").unwrap(),
            Template::Modern
        );
        assert_eq!(
            serde_json::from_str::<Template>("\"bold\"").unwrap(),
            Template::Bold
        );
        assert_eq!(
            serde_json::from_str::<Template>("\"classic\"").unwrap(),
            Template::Classic
        );
    }

    #[test]
    fn test_banded_templates_use_light_header_text() {
        for t in [Template::Modern, Template::Bold] {
            let style = t.style();
            assert!(style.header_band.is_some());
            assert_eq!(style.header_text, Color::WHITE);
        }
    }

    #[test]
    fn test_bold_band_taller_than_modern() {
        let modern = Template::Modern.style().header_band.unwrap();
        let bold = Template::Bold.style().header_band.unwrap();
        assert!(bold.height_pt > modern.height_pt);
    }
}
