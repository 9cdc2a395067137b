//! Photo validation and the local style filter used when no generated image
//! is available.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, RgbImage};
use tracing::warn;

use crate::error::{AppError, AppResult};
use crate::models::DesignType;

/// Accepted edge length range, in pixels.
pub const MIN_DIMENSION: u32 = 200;
pub const MAX_DIMENSION: u32 = 4000;

/// JPEG quality of processed output.
const OUTPUT_QUALITY: u8 = 90;

/// Facts about a validated photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// MIME type detected from the bytes, not the client's claim
    pub mime_type: &'static str,
}

fn mime_for_format(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Jpeg => Some("image/jpeg"),
        ImageFormat::Png => Some("image/png"),
        ImageFormat::WebP => Some("image/webp"),
        _ => None,
    }
}

/// Check that `data` is a fully decodable photo of an accepted type and size.
pub fn validate_image(data: &[u8], allowed_mime_types: &[String]) -> AppResult<ImageInfo> {
    let format = image::guess_format(data)
        .map_err(|_| AppError::Image("Unrecognized image format".to_string()))?;

    let mime_type = mime_for_format(format)
        .filter(|mime| allowed_mime_types.iter().any(|m| m == mime))
        .ok_or_else(|| {
            AppError::InvalidInput(format!(
                "File type {:?} not allowed. Allowed types: {}",
                format,
                allowed_mime_types.join(", ")
            ))
        })?;

    let decoded = image::load_from_memory_with_format(data, format)?;
    let (width, height) = (decoded.width(), decoded.height());

    let in_range = |d: u32| (MIN_DIMENSION..=MAX_DIMENSION).contains(&d);
    if !in_range(width) || !in_range(height) {
        return Err(AppError::Image(format!(
            "Image is {}x{}; each side must be between {} and {} pixels",
            width, height, MIN_DIMENSION, MAX_DIMENSION
        )));
    }

    Ok(ImageInfo {
        width,
        height,
        mime_type,
    })
}

/// Per-style color adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleFilter {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
    /// Overlay color, composited in overlay blend mode
    pub overlay: [u8; 3],
    pub overlay_alpha: f32,
}

impl StyleFilter {
    pub fn for_design(design_type: DesignType) -> Self {
        match design_type {
            DesignType::ModernPremium => Self {
                brightness: 1.15,
                contrast: 1.3,
                saturation: 0.7,
                overlay: [20, 60, 120],
                overlay_alpha: 0.15,
            },
            DesignType::TrustHeritage => Self {
                brightness: 0.85,
                contrast: 1.15,
                saturation: 1.3,
                overlay: [120, 80, 40],
                overlay_alpha: 0.15,
            },
            DesignType::EcoSmart => Self {
                brightness: 1.05,
                contrast: 1.1,
                saturation: 1.4,
                overlay: [30, 120, 60],
                overlay_alpha: 0.15,
            },
            DesignType::Festive => Self {
                brightness: 1.25,
                contrast: 1.4,
                saturation: 1.5,
                overlay: [180, 120, 20],
                overlay_alpha: 0.2,
            },
        }
    }

    /// Adjust one pixel: brightness, saturation, contrast, then overlay.
    fn apply_pixel(&self, rgb: [u8; 3]) -> [u8; 3] {
        let mut c = rgb.map(|v| v as f32 * self.brightness);

        let luma = 0.2126 * c[0] + 0.7152 * c[1] + 0.0722 * c[2];
        for v in c.iter_mut() {
            *v = luma + (*v - luma) * self.saturation;
            // Contrast pivots on mid-gray so the overall exposure is kept.
            *v = (*v - 128.0) * self.contrast + 128.0;
        }

        let mut out = [0u8; 3];
        for i in 0..3 {
            let base = (c[i] / 255.0).clamp(0.0, 1.0);
            let top = self.overlay[i] as f32 / 255.0;
            let blended = if base < 0.5 {
                2.0 * base * top
            } else {
                1.0 - 2.0 * (1.0 - base) * (1.0 - top)
            };
            let mixed = base + (blended - base) * self.overlay_alpha;
            out[i] = (mixed * 255.0).round().clamp(0.0, 255.0) as u8;
        }
        out
    }

    /// Filter, sharpen and re-encode as JPEG.
    pub fn render(&self, data: &[u8]) -> Result<Vec<u8>, image::ImageError> {
        let mut img: RgbImage = image::load_from_memory(data)?.to_rgb8();

        for pixel in img.pixels_mut() {
            pixel.0 = self.apply_pixel(pixel.0);
        }

        let sharpened = image::imageops::unsharpen(&img, 1.0, 2);

        let mut out = Cursor::new(Vec::new());
        sharpened.write_with_encoder(JpegEncoder::new_with_quality(&mut out, OUTPUT_QUALITY))?;
        Ok(out.into_inner())
    }
}

/// Apply the style filter, returning the original bytes if processing fails.
pub fn apply_style(data: &[u8], design_type: DesignType) -> Vec<u8> {
    match StyleFilter::for_design(design_type).render(data) {
        Ok(processed) => processed,
        Err(e) => {
            warn!(design_type = %design_type, error = %e, "Style filter failed, keeping original");
            data.to_vec()
        }
    }
}
