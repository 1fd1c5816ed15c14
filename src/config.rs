//! Render settings shared by every frame.

use std::path::PathBuf;

use crate::colors::{self, Color};
use crate::light::Reflectivity;
use crate::math::vec3::Vec3;

pub const DEFAULT_WIDTH: u32 = 500;
pub const DEFAULT_HEIGHT: u32 = 500;

/// Tessellation and output settings plus the lighting defaults a script
/// starts from.
///
/// Settings use a fluent builder:
///
/// ```ignore
/// let config = RenderConfig::default().with_size(256, 256).with_step_3d(20);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Samples per circle for spheres and tori.
    pub step_3d: usize,
    /// Samples for circles and curves.
    pub step_2d: usize,
    /// Ambient light in effect until an `ambient` operation replaces it.
    pub ambient: Color,
    /// Unit vector toward the viewer, used for specular highlights.
    pub view: Vec3,
    /// Reflectivity for shapes that do not name a constants bundle.
    pub default_constants: Reflectivity,
    /// Color of lines, circles and curves.
    pub line_color: Color,
    pub background: Color,
    /// Directory receiving numbered animation frames.
    pub output_dir: PathBuf,
    /// Delay between frames of the assembled animation.
    pub gif_delay_ms: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            step_3d: 100,
            step_2d: 100,
            ambient: Color::new(50, 50, 50),
            view: Vec3::FORWARD,
            default_constants: Reflectivity::WHITE,
            line_color: colors::WHITE,
            background: colors::BLACK,
            output_dir: PathBuf::from("anim"),
            gif_delay_ms: 17,
        }
    }
}

impl RenderConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self::default().with_size(width, height)
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_step_3d(mut self, step: usize) -> Self {
        self.step_3d = step;
        self
    }

    pub fn with_step_2d(mut self, step: usize) -> Self {
        self.step_2d = step;
        self
    }

    pub fn with_ambient(mut self, ambient: Color) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn with_default_constants(mut self, constants: Reflectivity) -> Self {
        self.default_constants = constants;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}
