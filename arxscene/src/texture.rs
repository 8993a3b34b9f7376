//! Textures built from image data URIs

use crate::error::Result;
use crate::raster;
use image::RgbaImage;
use std::sync::Arc;

/// Decoded RGBA texture
///
/// Pixels are shared, cloning a texture does not copy them.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pixels: Arc<RgbaImage>,
}

impl Texture {
    /// Loads a texture from a `data:image/…;base64,` URI
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let bitmap = raster::decode_data_uri(uri)?;
        Ok(Self::from_rgba(bitmap.to_rgba8()))
    }

    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(pixels),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Height over width, 0 for a degenerate texture
    pub fn aspect_ratio(&self) -> f32 {
        if self.width() == 0 {
            0.0
        } else {
            self.height() as f32 / self.width() as f32
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Size of the pixel data in bytes
    pub fn byte_size(&self) -> usize {
        self.pixels.as_raw().len()
    }
}
