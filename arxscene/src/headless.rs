//! Headless scene host
//!
//! `HeadlessScene` implements [`SceneHost`] by bookkeeping only: it tracks
//! attached nodes and the number of GPU resources that a real renderer
//! would hold, without drawing anything. The binary uses it when no XR
//! runtime is available and the tests use it to check resource lifetimes.

use crate::mesh::Mesh;
use crate::port::{NodeId, SceneHost};
use crate::stage::Stage;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Live GPU-side resources
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceCounts {
    pub geometries: usize,
    pub materials: usize,
    pub textures: usize,
}

impl ResourceCounts {
    pub fn total(&self) -> usize {
        self.geometries + self.materials + self.textures
    }
}

/// Scene host without a renderer
#[derive(Debug, Default)]
pub struct HeadlessScene {
    nodes: BTreeMap<NodeId, Mesh>,
    next_id: u64,
    live: ResourceCounts,
    stage: Option<Stage>,
    viewport: (u32, u32, f32),
    render_count: u64,
    /// Meshes detached but never disposed would show up here
    detached: usize,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Attached nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Mesh)> {
        self.nodes.iter().map(|(id, mesh)| (*id, mesh))
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Mesh> {
        self.nodes.values().find(|mesh| mesh.name == name)
    }

    pub fn live_resources(&self) -> ResourceCounts {
        self.live
    }

    /// Meshes removed from the graph whose resources are still allocated
    pub fn detached_undisposed(&self) -> usize {
        self.detached
    }

    pub fn stage(&self) -> Option<&Stage> {
        self.stage.as_ref()
    }

    pub fn viewport(&self) -> (u32, u32, f32) {
        self.viewport
    }

    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    fn resources_of(mesh: &Mesh) -> ResourceCounts {
        ResourceCounts {
            geometries: 1,
            materials: 1,
            textures: usize::from(mesh.material.texture().is_some()),
        }
    }
}

impl SceneHost for HeadlessScene {
    fn set_stage(&mut self, stage: &Stage) {
        debug!(
            fov = stage.camera.fov_degrees,
            rig = ?stage.rig_position,
            ambient = stage.ambient.intensity,
            controller = stage.controller_index,
            "Stage installed"
        );
        self.stage = Some(*stage);
    }

    fn resize(&mut self, width: u32, height: u32, pixel_ratio: f32) {
        self.viewport = (width, height, pixel_ratio);
        if let Some(stage) = self.stage.as_mut() {
            stage.camera.set_viewport(width, height);
        }
    }

    fn add(&mut self, mesh: Mesh) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;

        let cost = Self::resources_of(&mesh);
        self.live.geometries += cost.geometries;
        self.live.materials += cost.materials;
        self.live.textures += cost.textures;

        debug!(node = %id, name = %mesh.name, triangles = mesh.geometry.triangle_count(), "Node added");
        self.nodes.insert(id, mesh);
        id
    }

    fn remove(&mut self, id: NodeId) -> Option<Mesh> {
        let mesh = self.nodes.remove(&id)?;
        self.detached += 1;
        debug!(node = %id, name = %mesh.name, "Node removed");
        Some(mesh)
    }

    fn dispose(&mut self, mesh: Mesh) {
        let cost = Self::resources_of(&mesh);
        self.live.geometries = self.live.geometries.saturating_sub(cost.geometries);
        self.live.materials = self.live.materials.saturating_sub(cost.materials);
        self.live.textures = self.live.textures.saturating_sub(cost.textures);
        self.detached = self.detached.saturating_sub(1);
        trace!(name = %mesh.name, "Resources released");
    }

    fn render(&mut self) {
        self.render_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;
    use crate::mesh::{Color, Material};
    use crate::texture::Texture;
    use image::RgbaImage;

    fn label(name: &str) -> Mesh {
        Mesh::new(
            name,
            Geometry::plane(1.0, 1.0),
            Material::basic_transparent(Color::WHITE),
        )
    }

    fn surface() -> Mesh {
        Mesh::new(
            "surface",
            Geometry::plane(5.0, 2.5),
            Material::phong(Texture::from_rgba(RgbaImage::new(2, 1))),
        )
    }

    #[test]
    fn test_add_remove_dispose_balances_resources() {
        let mut scene = HeadlessScene::new();
        let a = scene.add(surface());
        let b = scene.add(label("title"));

        assert_eq!(scene.node_count(), 2);
        assert_eq!(
            scene.live_resources(),
            ResourceCounts {
                geometries: 2,
                materials: 2,
                textures: 1
            }
        );

        let mesh = scene.remove(a).unwrap();
        assert_eq!(scene.node_count(), 1);
        assert_eq!(scene.detached_undisposed(), 1);
        assert_eq!(scene.live_resources().textures, 1);

        scene.dispose(mesh);
        assert_eq!(scene.detached_undisposed(), 0);
        assert_eq!(scene.live_resources().textures, 0);

        let mesh = scene.remove(b).unwrap();
        scene.dispose(mesh);
        assert_eq!(scene.live_resources().total(), 0);
    }

    #[test]
    fn test_remove_unknown_node() {
        let mut scene = HeadlessScene::new();
        assert!(scene.remove(NodeId(42)).is_none());
    }

    #[test]
    fn test_resize_updates_camera_aspect() {
        let mut scene = HeadlessScene::new();
        scene.set_stage(&Stage::default());
        scene.resize(1000, 500, 2.0);

        assert_eq!(scene.viewport(), (1000, 500, 2.0));
        assert_eq!(scene.stage().unwrap().camera.aspect, 2.0);
    }

    #[test]
    fn test_render_counts_frames() {
        let mut scene = HeadlessScene::new();
        scene.render();
        scene.render();
        assert_eq!(scene.render_count(), 2);
    }
}
