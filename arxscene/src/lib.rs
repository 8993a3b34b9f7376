//! Scene building blocks for ArtXR
//!
//! Everything here is CPU-side: geometry, textures, materials and typeface
//! text meshes are built in memory and handed to a [`SceneHost`], which owns
//! the GPU resources and the draw loop.
//!
//! - [`SceneHost`] and [`InputSource`] are the ports to the rendering and XR
//!   runtime.
//! - [`HeadlessScene`] implements the scene port without rendering and keeps
//!   count of live resources.
//! - [`raster`] normalizes decoded bitmaps into PNG data URIs, from which
//!   [`Texture`]s are built.
//! - [`text_geometry`] extrudes text laid out with a [`TypefaceFont`].
//!
//! # Example
//!
//! ```no_run
//! use arxscene::{
//!     text_geometry, Color, HeadlessScene, Material, Mesh, SceneHost, TextGeometryOptions,
//!     TypefaceFont,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let font = TypefaceFont::from_slice(&std::fs::read("assets/block_mono.typeface.json")?)?;
//! let mut geometry = text_geometry(&font, "Hello", &TextGeometryOptions::default())?;
//! geometry.center();
//!
//! let mut scene = HeadlessScene::new();
//! let id = scene.add(Mesh::new("label", geometry, Material::basic_transparent(Color::WHITE)));
//! scene.render();
//!
//! if let Some(mesh) = scene.remove(id) {
//!     scene.dispose(mesh);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod font;
pub mod geometry;
pub mod headless;
pub mod mesh;
pub mod port;
pub mod raster;
pub mod stage;
pub mod text;
pub mod texture;

// Re-exports
pub use error::{Result, SceneError};
pub use font::{Glyph, GlyphShape, TypefaceFont};
pub use geometry::{Aabb, Geometry};
pub use headless::{HeadlessScene, ResourceCounts};
pub use mesh::{Color, Material, Mesh, Transform};
pub use port::{ComponentState, InputSource, NodeId, SceneHost};
pub use stage::{AmbientLight, PerspectiveCamera, Stage};
pub use text::{text_geometry, TextGeometryOptions};
pub use texture::Texture;
