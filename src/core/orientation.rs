use crate::core::Rotation;
use crate::utils::error::{Result, VariantError};
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader, Limits};
use std::io::Cursor;

/// A decoded image already turned upright.
#[derive(Debug, Clone)]
pub struct UprightImage {
    pub image: DynamicImage,
    pub rotation: Rotation,
    pub format: ImageFormat,
}

/// Maps an EXIF orientation to the clockwise rotation that makes the image
/// upright. Mirrored orientations are left untransformed.
pub fn rotation_for(orientation: Orientation) -> Rotation {
    match orientation {
        Orientation::Rotate90 => Rotation::Cw90,
        Orientation::Rotate180 => Rotation::Cw180,
        Orientation::Rotate270 => Rotation::Cw270,
        _ => Rotation::None,
    }
}

pub fn apply_rotation(image: DynamicImage, rotation: Rotation) -> DynamicImage {
    match rotation {
        Rotation::None => image,
        Rotation::Cw90 => image.rotate90(),
        Rotation::Cw180 => image.rotate180(),
        Rotation::Cw270 => image.rotate270(),
    }
}

/// Decodes `bytes`, reads the embedded orientation and rotates the pixels
/// before anyone gets to scale them.
///
/// Images whose decoded buffer would exceed `max_alloc` bytes are refused
/// with `DecodeFailed` before any pixel is allocated.
pub fn decode_upright(bytes: &[u8], max_alloc: u64) -> Result<UprightImage> {
    let mut reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(VariantError::decode_failed)?;
    let format = reader
        .format()
        .ok_or_else(|| VariantError::decode_failed("unrecognized image format"))?;

    let mut limits = Limits::default();
    limits.max_alloc = Some(max_alloc);
    reader.limits(limits);

    let mut decoder = reader.into_decoder().map_err(VariantError::decode_failed)?;
    let needed = decoder.total_bytes();
    if needed > max_alloc {
        return Err(VariantError::decode_failed(format!(
            "decoded image needs {} bytes, limit is {}",
            needed, max_alloc
        )));
    }

    // Broken metadata should not make an otherwise valid image unusable.
    let orientation = match decoder.orientation() {
        Ok(orientation) => orientation,
        Err(e) => {
            tracing::warn!("Ignoring unreadable orientation metadata: {}", e);
            Orientation::NoTransforms
        }
    };
    let rotation = rotation_for(orientation);

    let raw = DynamicImage::from_decoder(decoder).map_err(VariantError::decode_failed)?;
    tracing::debug!(
        ?format,
        width = raw.width(),
        height = raw.height(),
        degrees = rotation.degrees(),
        "decoded source image"
    );

    Ok(UprightImage {
        image: apply_rotation(raw, rotation),
        rotation,
        format,
    })
}
