//! Request-scoped photo assets.
//!
//! The form posts the photo as a base64 data URL. The backend decodes it,
//! composites any alpha channel against white, caps its longer dimension,
//! embeds it, and drops it — nothing outlives the render call. A photo that
//! fails any of these steps degrades the export (no image), never fails it.

use base64::{engine::general_purpose::STANDARD as BASE64_STD, Engine as _};
use image::{Rgba, RgbImage};
use thiserror::Error;

/// Cap on the photo's longer dimension on the page, in points.
pub const PHOTO_MAX_DIM_PT: f32 = 80.0;

#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("unsupported image type (expected a png or jpeg data URL)")]
    UnsupportedType,

    #[error("data URL has no payload")]
    MissingPayload,

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

/// A decoded, white-matted RGB image ready for embedding.
#[derive(Debug)]
pub struct DecodedPhoto {
    pub rgb_pixels: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
}

impl DecodedPhoto {
    /// Decodes a `data:image/png;base64,...` or `data:image/jpeg;base64,...`
    /// URL. The type check is a prefix inspection, mirroring the form
    /// contract — anything else is rejected before the payload is touched.
    pub fn from_data_url(data_url: &str) -> Result<Self, PhotoError> {
        let is_png = data_url.starts_with("data:image/png");
        let is_jpeg =
            data_url.starts_with("data:image/jpeg") || data_url.starts_with("data:image/jpg");
        if !is_png && !is_jpeg {
            return Err(PhotoError::UnsupportedType);
        }

        let payload = data_url
            .split_once(',')
            .map(|(_, p)| p)
            .ok_or(PhotoError::MissingPayload)?;
        let bytes = BASE64_STD.decode(payload.trim())?;
        let dynamic = image::load_from_memory(&bytes)?;

        // Composite against white so transparent PNG corners print white,
        // matching what the preview shows on paper-colored background.
        let rgba = dynamic.to_rgba8();
        let (width_px, height_px) = rgba.dimensions();
        let mut rgb = RgbImage::new(width_px, height_px);
        for (x, y, pixel) in rgba.enumerate_pixels() {
            let Rgba([r, g, b, a]) = *pixel;
            let alpha = a as f32 / 255.0;
            let bg = 255.0;
            rgb.put_pixel(
                x,
                y,
                image::Rgb([
                    (r as f32 * alpha + bg * (1.0 - alpha)) as u8,
                    (g as f32 * alpha + bg * (1.0 - alpha)) as u8,
                    (b as f32 * alpha + bg * (1.0 - alpha)) as u8,
                ]),
            );
        }

        Ok(DecodedPhoto {
            rgb_pixels: rgb.into_raw(),
            width_px,
            height_px,
        })
    }

    /// Page dimensions in points: the longer side is capped at `max_dim_pt`,
    /// aspect ratio preserved. Images already inside the cap keep their
    /// pixel size as points.
    pub fn scaled_dims(&self, max_dim_pt: f32) -> (f32, f32) {
        let w = self.width_px as f32;
        let h = self.height_px as f32;
        let longer = w.max(h);
        let scale = if longer > max_dim_pt {
            max_dim_pt / longer
        } else {
            1.0
        };
        (w * scale, h * scale)
    }
}
