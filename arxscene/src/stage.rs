//! Fixed stage elements: camera rig, ambient light, tracked controller

use crate::mesh::Color;
use glam::Vec3;

/// Perspective camera parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            fov_degrees: 80.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl PerspectiveCamera {
    /// Updates the aspect ratio from a viewport size; zero heights are ignored
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}

/// Uniform light applied to lit materials
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            intensity: 2.0,
        }
    }
}

/// Camera, light and the controller attached to the camera rig
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stage {
    pub camera: PerspectiveCamera,
    /// Rig holding the camera and the tracked controller
    pub rig_position: Vec3,
    pub ambient: AmbientLight,
    /// XR controller index attached to the rig (1 = right hand)
    pub controller_index: usize,
}

impl Default for Stage {
    fn default() -> Self {
        Self {
            camera: PerspectiveCamera::default(),
            rig_position: Vec3::new(0.0, 0.0, 10.0),
            ambient: AmbientLight::default(),
            controller_index: 1,
        }
    }
}
