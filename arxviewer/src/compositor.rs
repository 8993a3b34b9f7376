//! Display compositor
//!
//! A display is the artwork surface plus its title and artist labels. It is
//! built off the frame loop as CPU-side meshes ([`PreparedDisplay`]) and
//! inserted by the [`DisplayCompositor`], which owns the single live
//! [`DisplaySet`] and disposes it before anything replaces it.

use crate::content::DisplayContent;
use crate::error::Result;
use crate::loader::{FontCache, ImageLoader};
use arxcollection::ArtworkRecord;
use arxscene::raster;
use arxscene::{
    text_geometry, Color, Geometry, Material, Mesh, NodeId, SceneHost, TextGeometryOptions,
    Texture, Transform, TypefaceFont,
};
use glam::Vec3;
use image::DynamicImage;
use tracing::{debug, info};

/// Node names of the three display elements
pub const SURFACE_NODE: &str = "artwork";
pub const TITLE_NODE: &str = "title";
pub const ARTIST_NODE: &str = "artist";

/// Sizes and placement of the display elements, in world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Surface width; the height follows the bitmap's aspect ratio
    pub surface_width: f32,
    /// Label text size and extrusion, before scaling
    pub label: TextGeometryOptions,
    /// Uniform scale applied to label meshes
    pub label_scale: f32,
    /// Label positions relative to the surface origin
    pub title_offset: Vec3,
    pub artist_offset: Vec3,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            surface_width: 5.0,
            label: TextGeometryOptions::default(),
            label_scale: 0.08,
            title_offset: Vec3::new(0.0, -5.0, 0.0),
            artist_offset: Vec3::new(0.0, -6.0, 0.0),
        }
    }
}

/// Display built in memory, not yet in the scene
#[derive(Debug, Clone)]
pub struct PreparedDisplay {
    pub content: DisplayContent,
    pub surface: Mesh,
    pub title: Mesh,
    pub artist: Mesh,
}

/// Nodes of the display currently in the scene
#[derive(Debug)]
pub struct DisplaySet {
    content: DisplayContent,
    surface: NodeId,
    title: NodeId,
    artist: NodeId,
}

impl DisplaySet {
    pub fn content(&self) -> &DisplayContent {
        &self.content
    }

    pub fn nodes(&self) -> [NodeId; 3] {
        [self.surface, self.title, self.artist]
    }

    /// Detaches the three nodes and releases their geometry and material
    pub fn dispose(self, host: &mut dyn SceneHost) {
        for id in self.nodes() {
            if let Some(mesh) = host.remove(id) {
                host.dispose(mesh);
            }
        }
    }
}

/// Owner of the live display
#[derive(Debug, Default)]
pub struct DisplayCompositor {
    live: Option<DisplaySet>,
}

impl DisplayCompositor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live(&self) -> Option<&DisplaySet> {
        self.live.as_ref()
    }

    /// Removes the live display, if any, and frees its resources
    pub fn teardown(&mut self, host: &mut dyn SceneHost) {
        if let Some(live) = self.live.take() {
            debug!(title = %live.content.title, "Tearing down display");
            live.dispose(host);
        }
    }

    /// Inserts `prepared`, disposing whatever display was live
    pub fn insert(&mut self, host: &mut dyn SceneHost, prepared: PreparedDisplay) -> &DisplaySet {
        self.teardown(host);

        let PreparedDisplay {
            content,
            surface,
            title,
            artist,
        } = prepared;

        info!(
            title = %content.title,
            artist = %content.artist,
            placeholder = content.is_placeholder(),
            "Displaying artwork"
        );

        let surface = host.add(surface);
        let title = host.add(title);
        let artist = host.add(artist);

        self.live.insert(DisplaySet {
            content,
            surface,
            title,
            artist,
        })
    }
}

/// Resolves, downloads and builds the display of `record`
///
/// Image download and font loading are awaited; rasterization and text
/// tessellation run on the blocking pool.
pub async fn prepare_display(
    record: &ArtworkRecord,
    loader: &dyn ImageLoader,
    fonts: &FontCache,
    layout: &Layout,
) -> Result<PreparedDisplay> {
    let content = DisplayContent::resolve(record);
    let bitmap = loader.load(&content.image).await?;
    let font = fonts.get().await?;

    let layout = *layout;
    tokio::task::spawn_blocking(move || build_display(content, &bitmap, &font, &layout)).await?
}

/// Builds the three meshes of a display
pub fn build_display(
    content: DisplayContent,
    bitmap: &DynamicImage,
    font: &TypefaceFont,
    layout: &Layout,
) -> Result<PreparedDisplay> {
    let surface = build_surface(bitmap, layout.surface_width)?;
    // The surface sits at the origin, so label offsets are world positions
    let title = build_label(TITLE_NODE, &content.title, font, layout, layout.title_offset)?;
    let artist = build_label(ARTIST_NODE, &content.artist, font, layout, layout.artist_offset)?;

    Ok(PreparedDisplay {
        content,
        surface,
        title,
        artist,
    })
}

/// Textured plane of fixed width keeping the bitmap's aspect ratio
///
/// The bitmap goes through an RGBA raster and a PNG data URI before
/// becoming a texture, whatever its source format.
pub fn build_surface(bitmap: &DynamicImage, width: f32) -> Result<Mesh> {
    let canvas = raster::rasterize(bitmap)?;
    let uri = raster::encode_data_uri(&canvas)?;
    let texture = Texture::from_data_uri(&uri)?;

    let height = width * texture.aspect_ratio();
    debug!(
        pixels = ?(texture.width(), texture.height()),
        width,
        height,
        "Surface built"
    );

    Ok(Mesh::new(
        SURFACE_NODE,
        Geometry::plane(width, height),
        Material::phong(texture),
    ))
}

/// Centered, scaled, unlit white text
pub fn build_label(
    name: &str,
    text: &str,
    font: &TypefaceFont,
    layout: &Layout,
    offset: Vec3,
) -> Result<Mesh> {
    let mut geometry = text_geometry(font, text, &layout.label)?;
    geometry.center();

    Ok(Mesh::new(name, geometry, Material::basic_transparent(Color::WHITE))
        .with_transform(Transform::at(offset).with_uniform_scale(layout.label_scale)))
}
