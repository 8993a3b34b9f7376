//! Off-screen raster helpers
//!
//! Arbitrary decoded bitmaps are normalized through an RGBA raster of their
//! native size and a PNG data URI before becoming textures.

use crate::error::{Result, SceneError};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Draws `bitmap` into a fresh RGBA buffer of the same pixel size
pub fn rasterize(bitmap: &DynamicImage) -> Result<RgbaImage> {
    let (width, height) = (bitmap.width(), bitmap.height());
    if width == 0 || height == 0 {
        return Err(SceneError::EmptyBitmap { width, height });
    }

    let mut canvas: RgbaImage = ImageBuffer::new(width, height);
    image::imageops::replace(&mut canvas, &bitmap.to_rgba8(), 0, 0);
    Ok(canvas)
}

/// Encodes a raster as a `data:image/png;base64,…` URI
pub fn encode_data_uri(raster: &RgbaImage) -> Result<String> {
    let mut png = Cursor::new(Vec::new());
    raster.write_to(&mut png, ImageFormat::Png)?;

    let mut uri = String::with_capacity(PNG_DATA_URI_PREFIX.len() + png.get_ref().len() * 4 / 3 + 4);
    uri.push_str(PNG_DATA_URI_PREFIX);
    STANDARD.encode_string(png.get_ref(), &mut uri);
    Ok(uri)
}

/// Decodes an image data URI (`data:<mime>;base64,<payload>`)
pub fn decode_data_uri(uri: &str) -> Result<DynamicImage> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| SceneError::InvalidDataUri("missing data: scheme".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| SceneError::InvalidDataUri("missing ',' separator".to_string()))?;

    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| SceneError::InvalidDataUri(format!("not base64 encoded: {}", header)))?;
    if !mime.starts_with("image/") {
        return Err(SceneError::InvalidDataUri(format!("not an image: {}", mime)));
    }

    let bytes = STANDARD.decode(payload)?;
    let bitmap = match ImageFormat::from_mime_type(mime) {
        Some(format) => image::load_from_memory_with_format(&bytes, format)?,
        None => image::load_from_memory(&bytes)?,
    };
    Ok(bitmap)
}

/// Checkerboard bitmap used when the placeholder asset itself is unavailable
pub fn checkerboard(width: u32, height: u32, cell: u32) -> DynamicImage {
    let cell = cell.max(1);
    let img: RgbaImage = ImageBuffer::from_fn(width, height, |x, y| {
        if ((x / cell) + (y / cell)) % 2 == 0 {
            Rgba([200, 30, 60, 255])
        } else {
            Rgba([30, 30, 30, 255])
        }
    });
    DynamicImage::ImageRgba8(img)
}
