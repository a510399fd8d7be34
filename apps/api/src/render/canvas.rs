//! Layout primitives — low-level drawing operations over one PDF page.
//!
//! Coordinates are PDF points with the origin at the bottom-left of the page,
//! y increasing upward. Higher layers (the section renderer) convert their
//! top-down visual intent into this system; nothing above this module touches
//! printpdf types directly.

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    Color as PdfColor, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject,
    IndirectFontRef, Line, Mm, PdfLayerReference, Point, Polygon, Px, Rgb,
};

use crate::render::font_metrics::{metrics_for, FontWeight};
use crate::render::photo::DecodedPhoto;

/// Points → millimeters, the unit printpdf speaks at its API edge.
pub const PT_TO_MM: f32 = 0.352_777_78;

/// A4 page size in points (matches the preview stylesheet's page box).
pub const PAGE_WIDTH_PT: f32 = 595.28;
pub const PAGE_HEIGHT_PT: f32 = 841.89;

// ────────────────────────────────────────────────────────────────────────────
// Color
// ────────────────────────────────────────────────────────────────────────────

/// An RGB color with components in 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color { r, g, b }
    }

    pub const fn gray(v: f32) -> Self {
        Color { r: v, g: v, b: v }
    }

    pub const BLACK: Color = Color::gray(0.0);
    pub const WHITE: Color = Color::gray(1.0);

    fn to_pdf(self) -> PdfColor {
        PdfColor::Rgb(Rgb::new(self.r, self.g, self.b, None))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page canvas
// ────────────────────────────────────────────────────────────────────────────

/// One page of the document under construction, with both font weights
/// already embedded. Owned exclusively by a single render call.
pub struct PageCanvas {
    layer: PdfLayerReference,
    font_regular: IndirectFontRef,
    font_bold: IndirectFontRef,
    pub width_pt: f32,
    pub height_pt: f32,
}

impl PageCanvas {
    pub fn new(
        layer: PdfLayerReference,
        font_regular: IndirectFontRef,
        font_bold: IndirectFontRef,
    ) -> Self {
        PageCanvas {
            layer,
            font_regular,
            font_bold,
            width_pt: PAGE_WIDTH_PT,
            height_pt: PAGE_HEIGHT_PT,
        }
    }

    fn font(&self, weight: FontWeight) -> &IndirectFontRef {
        match weight {
            FontWeight::Regular => &self.font_regular,
            FontWeight::Bold => &self.font_bold,
        }
    }

    /// Draws a single line of text with its baseline at `(x_pt, y_pt)`.
    pub fn draw_text(
        &self,
        text: &str,
        size_pt: f32,
        weight: FontWeight,
        color: Color,
        x_pt: f32,
        y_pt: f32,
    ) {
        self.layer.set_fill_color(color.to_pdf());
        self.layer.use_text(
            text,
            size_pt,
            Mm(x_pt * PT_TO_MM),
            Mm(y_pt * PT_TO_MM),
            self.font(weight),
        );
    }

    /// Draws a single line of text ending at `right_edge_pt` (right-aligned).
    pub fn draw_text_right_aligned(
        &self,
        text: &str,
        size_pt: f32,
        weight: FontWeight,
        color: Color,
        right_edge_pt: f32,
        y_pt: f32,
    ) {
        let width = metrics_for(weight).measure_pt(text, size_pt);
        self.draw_text(text, size_pt, weight, color, right_edge_pt - width, y_pt);
    }

    /// Draws `text` word-wrapped into `max_width_pt`, the first baseline at
    /// `(x_pt, y_pt)` and each following line `line_height_pt` lower.
    ///
    /// Returns the number of lines emitted. Callers advance their cursor via
    /// the `estimated_lines` policy, which uses the same wrap algorithm.
    pub fn draw_text_wrapped(
        &self,
        text: &str,
        size_pt: f32,
        weight: FontWeight,
        color: Color,
        x_pt: f32,
        y_pt: f32,
        max_width_pt: f32,
        line_height_pt: f32,
    ) -> usize {
        let lines = metrics_for(weight).wrap_words(text, max_width_pt, size_pt);
        for (i, line) in lines.iter().enumerate() {
            self.draw_text(line, size_pt, weight, color, x_pt, y_pt - i as f32 * line_height_pt);
        }
        lines.len()
    }

    /// Fills a rectangle whose bottom-left corner is `(x_pt, y_pt)`.
    pub fn draw_rect(&self, x_pt: f32, y_pt: f32, width_pt: f32, height_pt: f32, color: Color) {
        let (x0, y0) = (x_pt * PT_TO_MM, y_pt * PT_TO_MM);
        let (x1, y1) = ((x_pt + width_pt) * PT_TO_MM, (y_pt + height_pt) * PT_TO_MM);
        let points = vec![
            (Point::new(Mm(x0), Mm(y0)), false),
            (Point::new(Mm(x1), Mm(y0)), false),
            (Point::new(Mm(x1), Mm(y1)), false),
            (Point::new(Mm(x0), Mm(y1)), false),
        ];
        let polygon = Polygon {
            rings: vec![points],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        };
        self.layer.set_fill_color(color.to_pdf());
        self.layer.add_polygon(polygon);
    }

    /// Strokes a straight line between two points.
    pub fn draw_line(
        &self,
        x1_pt: f32,
        y1_pt: f32,
        x2_pt: f32,
        y2_pt: f32,
        thickness_pt: f32,
        color: Color,
    ) {
        let points = vec![
            (Point::new(Mm(x1_pt * PT_TO_MM), Mm(y1_pt * PT_TO_MM)), false),
            (Point::new(Mm(x2_pt * PT_TO_MM), Mm(y2_pt * PT_TO_MM)), false),
        ];
        let line = Line {
            points,
            is_closed: false,
        };
        self.layer.set_outline_color(color.to_pdf());
        self.layer.set_outline_thickness(thickness_pt);
        self.layer.add_line(line);
    }

    /// Places a decoded photo with its bottom-left corner at `(x_pt, y_pt)`,
    /// scaled to `width_pt` wide. Height follows from the pixel aspect ratio,
    /// which callers have already constrained.
    pub fn draw_image(&self, photo: &DecodedPhoto, x_pt: f32, y_pt: f32, width_pt: f32) {
        let image = Image::from(ImageXObject {
            width: Px(photo.width_px as usize),
            height: Px(photo.height_px as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: photo.rgb_pixels.clone(),
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        });

        // DPI chosen so the pixel width lands on the requested point width.
        let target_mm = width_pt * PT_TO_MM;
        let dpi = photo.width_px as f32 / (target_mm / 25.4);

        image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(x_pt * PT_TO_MM)),
                translate_y: Some(Mm(y_pt * PT_TO_MM)),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
    }
}
