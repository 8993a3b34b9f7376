//! Error types for scene construction

/// Result type alias for scene operations
pub type Result<T> = std::result::Result<T, SceneError>;

/// Errors raised while building textures, fonts or meshes
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// Image decoding or encoding failed
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Base64 payload of a data URI is invalid
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Data URI without the expected `data:<mime>;base64,` header
    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    /// Typeface JSON could not be parsed
    #[error("Typeface parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Glyph outline command stream is malformed
    #[error("Invalid glyph outline for {glyph:?}: {reason}")]
    Outline { glyph: char, reason: String },

    /// Polygon tessellation failed
    #[error("Tessellation failed: {0}")]
    Tessellation(String),

    /// Bitmap without pixels
    #[error("Empty bitmap ({width}x{height})")]
    EmptyBitmap { width: u32, height: u32 },
}
