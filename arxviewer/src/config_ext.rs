//! Extension integrating the viewer settings into arxconfig
//!
//! ```no_run
//! use arxconfig::get_config;
//! use arxviewer::ViewerConfigExt;
//!
//! let config = get_config();
//! println!("dwell: {:?}", config.get_viewer_dwell());
//! println!("font: {}", config.get_viewer_font_path().display());
//! ```

use crate::compositor::Layout;
use crate::trigger::{ButtonMapping, DEFAULT_DWELL};
use crate::viewer::ViewerSettings;
use anyhow::Result;
use arxconfig::Config;
use arxscene::TextGeometryOptions;
use glam::Vec3;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_FRAME_RATE: u64 = 60;
pub const MAX_FRAME_RATE: u64 = 1000;
pub const DEFAULT_FONT_PATH: &str = "assets/block_mono.typeface.json";
pub const DEFAULT_PLACEHOLDER_PATH: &str = "assets/error.png";

/// Initial viewport of the scene host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
}

/// Extension trait exposing the `viewer.*` section of the configuration
pub trait ViewerConfigExt {
    /// Minimum time between two cycles (default: 5 s)
    fn get_viewer_dwell(&self) -> Duration;

    fn set_viewer_dwell(&self, dwell: Duration) -> Result<()>;

    /// Frames per second of the frame loop (default: 60, clamped to 1..=1000)
    fn get_viewer_frame_rate(&self) -> u64;

    /// Controller, component and value making up the "next" button
    fn get_viewer_button(&self) -> ButtonMapping;

    fn get_viewer_viewport(&self) -> Viewport;

    /// Typeface JSON used for the labels
    fn get_viewer_font_path(&self) -> PathBuf;

    fn set_viewer_font_path(&self, path: &str) -> Result<()>;

    /// Image shown when an artwork cannot be displayed
    fn get_viewer_placeholder_path(&self) -> PathBuf;

    fn set_viewer_placeholder_path(&self, path: &str) -> Result<()>;

    fn get_viewer_layout(&self) -> Layout;

    fn get_viewer_settings(&self) -> ViewerSettings {
        ViewerSettings {
            dwell: self.get_viewer_dwell(),
            button: self.get_viewer_button(),
        }
    }
}

impl ViewerConfigExt for Config {
    fn get_viewer_dwell(&self) -> Duration {
        Duration::from_secs(self.get_u64(&["viewer", "dwell_secs"], DEFAULT_DWELL.as_secs()))
    }

    fn set_viewer_dwell(&self, dwell: Duration) -> Result<()> {
        self.set_u64(&["viewer", "dwell_secs"], dwell.as_secs())
    }

    fn get_viewer_frame_rate(&self) -> u64 {
        self.get_u64(&["viewer", "frame_rate"], DEFAULT_FRAME_RATE)
            .clamp(1, MAX_FRAME_RATE)
    }

    fn get_viewer_button(&self) -> ButtonMapping {
        let defaults = ButtonMapping::default();
        ButtonMapping {
            controller_index: self
                .get_u64(&["viewer", "controller_index"], defaults.controller_index as u64)
                as usize,
            button_index: self.get_u64(&["viewer", "button_index"], defaults.button_index as u64)
                as usize,
            pressed_value: self.get_f64(&["viewer", "pressed_value"], defaults.pressed_value as f64)
                as f32,
        }
    }

    fn get_viewer_viewport(&self) -> Viewport {
        Viewport {
            width: self.get_u64(&["viewer", "viewport", "width"], 1280) as u32,
            height: self.get_u64(&["viewer", "viewport", "height"], 720) as u32,
            pixel_ratio: self.get_f64(&["viewer", "viewport", "pixel_ratio"], 1.0) as f32,
        }
    }

    fn get_viewer_font_path(&self) -> PathBuf {
        PathBuf::from(self.get_string(&["viewer", "assets", "font"], DEFAULT_FONT_PATH))
    }

    fn set_viewer_font_path(&self, path: &str) -> Result<()> {
        self.set_string(&["viewer", "assets", "font"], path)
    }

    fn get_viewer_placeholder_path(&self) -> PathBuf {
        PathBuf::from(self.get_string(&["viewer", "assets", "placeholder"], DEFAULT_PLACEHOLDER_PATH))
    }

    fn set_viewer_placeholder_path(&self, path: &str) -> Result<()> {
        self.set_string(&["viewer", "assets", "placeholder"], path)
    }

    fn get_viewer_layout(&self) -> Layout {
        let defaults = Layout::default();
        let layout = |key: &str, default: f32| {
            self.get_f64(&["viewer", "layout", key], default as f64) as f32
        };

        Layout {
            surface_width: layout("surface_width", defaults.surface_width),
            label: TextGeometryOptions {
                size: layout("label_size", defaults.label.size),
                depth: layout("label_depth", defaults.label.depth),
                ..defaults.label
            },
            label_scale: layout("label_scale", defaults.label_scale),
            title_offset: Vec3::from_array(self.get_vec3(
                &["viewer", "layout", "title_offset"],
                defaults.title_offset.to_array(),
            )),
            artist_offset: Vec3::from_array(self.get_vec3(
                &["viewer", "layout", "artist_offset"],
                defaults.artist_offset.to_array(),
            )),
        }
    }
}
