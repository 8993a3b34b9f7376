//! Error types for the display cycle

/// Result type alias for viewer operations
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Errors that can end a display cycle
///
/// None of them stops the viewer: a failed cycle is logged and the scene
/// stays without a display until the next trigger.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// Collection API failure
    #[error("Collection error: {0}")]
    Collection(#[from] arxcollection::Error),

    /// Texture, font or mesh construction failed
    #[error("Scene error: {0}")]
    Scene(#[from] arxscene::SceneError),

    /// Local asset could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image download failed
    #[error("Image request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Image server answered with a non-success status
    #[error("Image request returned status {status} for {url}")]
    ImageStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    /// Downloaded bytes are not a decodable image
    #[error("Image decoding failed: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// Blocking worker panicked or was cancelled
    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
