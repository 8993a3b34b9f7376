//! Image and font assets
//!
//! Remote artwork images are downloaded anonymously: the HTTP client keeps
//! no cookies and sends no credentials. The placeholder and the font are
//! read from disk. Decoding runs on the blocking pool.

use crate::content::ImageSource;
use crate::error::{Result, ViewerError};
use arxscene::raster::checkerboard;
use arxscene::TypefaceFont;
use async_trait::async_trait;
use image::DynamicImage;
use reqwest::Client;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Default timeout for image downloads
pub const DEFAULT_IMAGE_TIMEOUT_SECS: u64 = 60;

/// Size of the generated stand-in for a missing placeholder file
const FALLBACK_PLACEHOLDER_SIZE: u32 = 256;

/// Turns an [`ImageSource`] into a decoded bitmap
#[async_trait]
pub trait ImageLoader: Debug + Send + Sync {
    async fn load(&self, source: &ImageSource) -> Result<DynamicImage>;
}

/// Loads remote images over HTTP and the placeholder from disk
#[derive(Debug, Clone)]
pub struct HttpImageLoader {
    client: Client,
    placeholder: PathBuf,
}

impl HttpImageLoader {
    pub fn new(placeholder: impl Into<PathBuf>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_IMAGE_TIMEOUT_SECS))
            .build()?;
        Ok(Self::with_client(client, placeholder))
    }

    /// Uses `client` for downloads; it should carry no cookie store
    pub fn with_client(client: Client, placeholder: impl Into<PathBuf>) -> Self {
        Self {
            client,
            placeholder: placeholder.into(),
        }
    }

    pub fn placeholder_path(&self) -> &Path {
        &self.placeholder
    }

    async fn download(&self, url: &str) -> Result<DynamicImage> {
        debug!(%url, "Downloading artwork image");
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ViewerError::ImageStatus {
                status: response.status(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?.to_vec();
        decode(bytes).await
    }

    /// Reads the placeholder, or generates one when the file is unusable
    async fn placeholder(&self) -> DynamicImage {
        let loaded = match tokio::fs::read(&self.placeholder).await {
            Ok(bytes) => decode(bytes).await,
            Err(e) => Err(e.into()),
        };

        loaded.unwrap_or_else(|e| {
            warn!(
                path = %self.placeholder.display(),
                "Placeholder image unavailable ({}), using a generated one", e
            );
            checkerboard(FALLBACK_PLACEHOLDER_SIZE, FALLBACK_PLACEHOLDER_SIZE, 32)
        })
    }
}

#[async_trait]
impl ImageLoader for HttpImageLoader {
    async fn load(&self, source: &ImageSource) -> Result<DynamicImage> {
        match source {
            ImageSource::Remote(url) => self.download(url).await,
            ImageSource::Placeholder => Ok(self.placeholder().await),
        }
    }
}

async fn decode(bytes: Vec<u8>) -> Result<DynamicImage> {
    let bitmap = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes)).await??;
    Ok(bitmap)
}

/// Typeface loaded on first use and kept for the process lifetime
///
/// A failed load leaves the cache empty, so the next cycle tries again.
#[derive(Debug)]
pub struct FontCache {
    path: PathBuf,
    font: OnceCell<Arc<TypefaceFont>>,
}

impl FontCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            font: OnceCell::new(),
        }
    }

    /// Cache already holding `font`
    pub fn preloaded(font: TypefaceFont) -> Self {
        Self {
            path: PathBuf::new(),
            font: OnceCell::from(Arc::new(font)),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.font.initialized()
    }

    pub async fn get(&self) -> Result<Arc<TypefaceFont>> {
        let font = self
            .font
            .get_or_try_init(|| async {
                let bytes = tokio::fs::read(&self.path).await?;
                let font =
                    tokio::task::spawn_blocking(move || TypefaceFont::from_slice(&bytes)).await??;
                info!(
                    path = %self.path.display(),
                    family = %font.family_name,
                    glyphs = font.glyphs.len(),
                    "Font loaded"
                );
                Ok::<_, ViewerError>(Arc::new(font))
            })
            .await?;
        Ok(Arc::clone(font))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbaImage};
    use std::io::Cursor;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        RgbaImage::new(width, height)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[tokio::test]
    async fn test_download_remote_image() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ph/1.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes(12, 8)))
            .mount(&server)
            .await;

        let loader = HttpImageLoader::new("missing.png").unwrap();
        let bitmap = loader
            .load(&ImageSource::Remote(format!("{}/ph/1.png", server.uri())))
            .await
            .unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (12, 8));
    }

    #[tokio::test]
    async fn test_download_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let loader = HttpImageLoader::new("missing.png").unwrap();
        let err = loader
            .load(&ImageSource::Remote(format!("{}/ph/1.png", server.uri())))
            .await
            .unwrap_err();
        assert!(matches!(err, ViewerError::ImageStatus { .. }));
    }

    #[tokio::test]
    async fn test_download_undecodable_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not an image"))
            .mount(&server)
            .await;

        let loader = HttpImageLoader::new("missing.png").unwrap();
        let err = loader
            .load(&ImageSource::Remote(format!("{}/x.jpg", server.uri())))
            .await
            .unwrap_err();
        assert!(matches!(err, ViewerError::ImageDecode(_)));
    }

    #[tokio::test]
    async fn test_placeholder_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("error.png");
        std::fs::write(&file, png_bytes(30, 20)).unwrap();

        let loader = HttpImageLoader::new(&file).unwrap();
        let bitmap = loader.load(&ImageSource::Placeholder).await.unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (30, 20));
    }

    #[tokio::test]
    async fn test_missing_placeholder_is_generated() {
        let dir = tempfile::tempdir().unwrap();
        let loader = HttpImageLoader::new(dir.path().join("nope.png")).unwrap();

        let bitmap = loader.load(&ImageSource::Placeholder).await.unwrap();
        assert_eq!(bitmap.width(), FALLBACK_PLACEHOLDER_SIZE);
    }

    #[tokio::test]
    async fn test_font_cache_retries_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("font.json");
        let cache = FontCache::new(&file);

        assert!(matches!(cache.get().await, Err(ViewerError::Io(_))));
        assert!(!cache.is_loaded());

        std::fs::write(
            &file,
            r#"{"resolution": 1000, "boundingBox": {"xMin": 0, "xMax": 1, "yMin": 0, "yMax": 1}, "glyphs": {}}"#,
        )
        .unwrap();
        let font = cache.get().await.unwrap();
        assert_eq!(font.resolution, 1000.0);
        assert!(cache.is_loaded());

        // Later calls hit the cache even if the file disappears
        std::fs::remove_file(&file).unwrap();
        assert!(cache.get().await.is_ok());
    }
}
