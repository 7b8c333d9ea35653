use crate::core::Dimensions;
use crate::utils::error::{Result, VariantError};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

pub const DEFAULT_DIVISOR: u32 = 6;
pub const DEFAULT_QUALITY: u8 = 70;

/// An encoded preview, ready to be stored.
#[derive(Debug, Clone)]
pub struct Preview {
    pub bytes: Vec<u8>,
    pub dimensions: Dimensions,
}

/// `floor(w / divisor) x floor(h / divisor)`; an image too small to yield at
/// least one pixel on each side has no preview.
pub fn preview_dimensions(source: Dimensions, divisor: u32) -> Result<Dimensions> {
    if divisor == 0 {
        return Err(VariantError::InvalidConfigValueError {
            field: "preview.divisor".to_string(),
            value: divisor.to_string(),
            reason: "Divisor must be at least 1".to_string(),
        });
    }

    let scaled = Dimensions::new(source.width / divisor, source.height / divisor);
    if scaled.width == 0 || scaled.height == 0 {
        return Err(VariantError::decode_failed(format!(
            "image {} is too small for a 1/{} preview",
            source, divisor
        )));
    }
    Ok(scaled)
}

/// Scales uniformly by `1/divisor` with bilinear filtering and compresses the
/// result as JPEG. Alpha is dropped; JPEG has none.
pub fn render_preview(image: &DynamicImage, divisor: u32, quality: u8) -> Result<Preview> {
    let dimensions = preview_dimensions(Dimensions::new(image.width(), image.height()), divisor)?;

    let scaled = image
        .resize_exact(dimensions.width, dimensions.height, FilterType::Triangle)
        .to_rgb8();

    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality)
        .encode_image(&scaled)
        .map_err(|e| VariantError::write_failed("<preview>", e))?;

    tracing::debug!(%dimensions, quality, size = bytes.len(), "encoded preview");
    Ok(Preview { bytes, dimensions })
}

/// Lossless encoding for rotated originals, so the stored pixels are exactly
/// the upright source.
pub fn encode_lossless(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| VariantError::write_failed("<original>", e))?;
    Ok(bytes)
}
