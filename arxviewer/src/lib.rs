//! ArtXR display cycle
//!
//! This crate ties the collection client to the scene: it decides when a new
//! artwork is due, fetches it, turns it into a textured surface with title
//! and artist labels, and swaps it into the scene.
//!
//! - [`Viewer`] owns the frame-loop state: trigger gate, compositor and
//!   cycle generation. Its `tick` never blocks.
//! - [`DisplayCompositor`] keeps at most one [`DisplaySet`] in the scene and
//!   disposes it before inserting the next.
//! - [`ArtworkSource`] and [`ImageLoader`] are the async seams for records
//!   and bitmaps; [`CollectionSource`] and [`HttpImageLoader`] are the
//!   network implementations.
//!
//! # Example
//!
//! ```no_run
//! use arxcollection::CollectionClient;
//! use arxscene::{ComponentState, HeadlessScene, InputSource};
//! use arxviewer::{
//!     CollectionSource, DisplayPipeline, FontCache, HttpImageLoader, Layout, Viewer,
//!     ViewerSettings,
//! };
//! use std::sync::Arc;
//! use std::time::Instant;
//!
//! struct NoController;
//!
//! impl InputSource for NoController {
//!     fn input_state(&mut self, _controller: usize) -> Option<Vec<ComponentState>> {
//!         None
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = CollectionSource::connect(CollectionClient::new().await?).await?;
//!     let pipeline = DisplayPipeline {
//!         source: Arc::new(source),
//!         loader: Arc::new(HttpImageLoader::new("assets/error.png")?),
//!         fonts: FontCache::new("assets/block_mono.typeface.json"),
//!         layout: Layout::default(),
//!     };
//!
//!     let mut viewer = Viewer::new(HeadlessScene::new(), NoController, pipeline, ViewerSettings::default());
//!     viewer.start(Instant::now());
//!     viewer.next_completion().await;
//!     viewer.tick(Instant::now());
//!     Ok(())
//! }
//! ```

pub mod compositor;
pub mod content;
pub mod error;
pub mod loader;
pub mod source;
pub mod trigger;
pub mod viewer;

#[cfg(feature = "arxconfig")]
pub mod config_ext;

// Re-exports
pub use compositor::{
    build_display, build_label, build_surface, prepare_display, DisplayCompositor, DisplaySet,
    Layout, PreparedDisplay,
};
pub use content::{DisplayContent, ImageSource, UNDEFINED_LABEL, UNKNOWN_LABEL};
pub use error::{Result, ViewerError};
pub use loader::{FontCache, HttpImageLoader, ImageLoader};
pub use source::{ArtworkSource, CollectionSource};
pub use trigger::{ButtonMapping, TriggerGate, DEFAULT_DWELL};
pub use viewer::{CompletedCycle, CycleOutcome, DisplayPipeline, Viewer, ViewerSettings};

#[cfg(feature = "arxconfig")]
pub use config_ext::{Viewport, ViewerConfigExt};
