//! Meshes: geometry plus material plus transform

use crate::geometry::Geometry;
use crate::texture::Texture;
use glam::Vec3;

/// Linear RGB color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }
}

/// Surface material
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    /// Lit (Phong) material sampling a texture
    Phong { map: Texture, color: Color },
    /// Unlit flat color
    Basic {
        color: Color,
        transparent: bool,
        opacity: f32,
    },
}

impl Material {
    pub fn phong(map: Texture) -> Self {
        Material::Phong {
            map,
            color: Color::WHITE,
        }
    }

    pub fn basic_transparent(color: Color) -> Self {
        Material::Basic {
            color,
            transparent: true,
            opacity: 1.0,
        }
    }

    pub fn texture(&self) -> Option<&Texture> {
        match self {
            Material::Phong { map, .. } => Some(map),
            Material::Basic { .. } => None,
        }
    }

    pub fn is_lit(&self) -> bool {
        matches!(self, Material::Phong { .. })
    }
}

/// Local transform of a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Applies scale then translation to a local point
    pub fn apply(&self, point: Vec3) -> Vec3 {
        point * self.scale + self.position
    }
}

/// Renderable node content
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub geometry: Geometry,
    pub material: Material,
    pub transform: Transform,
}

impl Mesh {
    pub fn new(name: impl Into<String>, geometry: Geometry, material: Material) -> Self {
        Self {
            name: name.into(),
            geometry,
            material,
            transform: Transform::default(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// World-space size of the geometry's bounding box
    pub fn world_size(&self) -> Vec3 {
        self.geometry
            .bounding_box()
            .map(|bbox| bbox.size() * self.transform.scale)
            .unwrap_or(Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex(0xffffff), Color::WHITE);
        let c = Color::from_hex(0xff0000);
        assert_eq!((c.r, c.g, c.b), (1.0, 0.0, 0.0));
    }

    #[test]
    fn test_transform_apply() {
        let t = Transform::at(Vec3::new(0.0, -5.0, 0.0)).with_uniform_scale(0.25);
        assert_eq!(t.apply(Vec3::new(100.0, 0.0, 0.0)), Vec3::new(25.0, -5.0, 0.0));
    }

    #[test]
    fn test_world_size_uses_scale() {
        let mesh = Mesh::new(
            "plane",
            Geometry::plane(10.0, 4.0),
            Material::basic_transparent(Color::WHITE),
        )
        .with_transform(Transform::default().with_uniform_scale(0.5));
        assert_eq!(mesh.world_size(), Vec3::new(5.0, 2.0, 0.0));
    }
}
