//! CPU-side mesh geometry
//!
//! Indexed triangle lists with per-vertex normals and UVs, ready to be
//! uploaded by a [`SceneHost`](crate::SceneHost).

use glam::{Vec2, Vec3};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Indexed triangle mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl Geometry {
    /// Rectangle in the XY plane centered on the origin, facing +Z
    ///
    /// UV (0, 0) is the bottom-left corner, as for a texture whose first row
    /// is the top of the image.
    pub fn plane(width: f32, height: f32) -> Self {
        let hw = width * 0.5;
        let hh = height * 0.5;

        Self {
            positions: vec![
                Vec3::new(-hw, hh, 0.0),
                Vec3::new(hw, hh, 0.0),
                Vec3::new(-hw, -hh, 0.0),
                Vec3::new(hw, -hh, 0.0),
            ],
            normals: vec![Vec3::Z; 4],
            uvs: vec![
                Vec2::new(0.0, 1.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
            ],
            indices: vec![0, 2, 1, 2, 3, 1],
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Bounding box of all positions, `None` for an empty geometry
    pub fn bounding_box(&self) -> Option<Aabb> {
        let first = *self.positions.first()?;
        let (min, max) = self
            .positions
            .iter()
            .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Aabb { min, max })
    }

    pub fn translate(&mut self, offset: Vec3) {
        for p in &mut self.positions {
            *p += offset;
        }
    }

    /// Moves the geometry so its bounding box is centered on the origin
    ///
    /// Returns the translation applied.
    pub fn center(&mut self) -> Vec3 {
        match self.bounding_box() {
            Some(bbox) => {
                let offset = -bbox.center();
                self.translate(offset);
                offset
            }
            None => Vec3::ZERO,
        }
    }

    /// Appends `other`, re-basing its indices
    pub fn merge(&mut self, other: &Geometry) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }
}
