//! Phong illumination for flat-shaded polygons.
//!
//! Each triangle receives a single color:
//!
//! ```text
//! I = Ka·A + Σ_lights ( Kd·C·(N·L) + Ks·C·max(0, R·V)^4 ),   R = 2(N·L)N − L
//! ```
//!
//! The diffuse dot product is deliberately left unclamped, so a light behind
//! a surface subtracts from its color. The sum is clamped to `[0, 255]` only
//! once, at the end.

use crate::colors::Color;
use crate::math::vec3::Vec3;

/// Upper bound on lights contributing to a frame.
pub const MAX_LIGHTS: usize = 10;

/// Exponent applied to the specular reflection term.
pub const SPECULAR_EXPONENT: i32 = 4;

/// A point-at-infinity light: `location` is used only as a direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub location: Vec3,
    /// Per-channel intensity, nominally `0..=255`.
    pub color: [f64; 3],
}

impl Light {
    pub fn new(location: Vec3, color: [f64; 3]) -> Self {
        Self { location, color }
    }

    /// Same light with its color multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            location: self.location,
            color: self.color.map(|c| c * factor),
        }
    }

    /// Normalized direction toward the light.
    pub fn direction(&self) -> Vec3 {
        self.location.normalize()
    }
}

/// Ambient, diffuse and specular coefficients, one per color channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reflectivity {
    pub ambient: [f64; 3],
    pub diffuse: [f64; 3],
    pub specular: [f64; 3],
}

impl Reflectivity {
    /// Neutral material used when a shape names no constants.
    pub const WHITE: Self = Self {
        ambient: [0.1, 0.1, 0.1],
        diffuse: [0.5, 0.5, 0.5],
        specular: [0.5, 0.5, 0.5],
    };

    /// Build from per-channel `[ambient, diffuse, specular]` triples, the
    /// layout used by `constants` definitions.
    pub fn from_channels(red: [f64; 3], green: [f64; 3], blue: [f64; 3]) -> Self {
        Self {
            ambient: [red[0], green[0], blue[0]],
            diffuse: [red[1], green[1], blue[1]],
            specular: [red[2], green[2], blue[2]],
        }
    }
}

impl Default for Reflectivity {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Ordered, capacity-limited set of point lights.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Lights {
    lights: Vec<Light>,
}

impl Lights {
    pub fn new() -> Self {
        Self {
            lights: Vec::with_capacity(MAX_LIGHTS),
        }
    }

    /// Add a light. Returns `false` (and drops it) once [`MAX_LIGHTS`] are held.
    pub fn push(&mut self, light: Light) -> bool {
        if self.lights.len() >= MAX_LIGHTS {
            return false;
        }
        self.lights.push(light);
        true
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn as_slice(&self) -> &[Light] {
        &self.lights
    }

    pub fn clear(&mut self) {
        self.lights.clear();
    }
}

/// Unnormalized normal of triangle `p0, p1, p2`: `(p1 − p0) × (p2 − p0)`.
pub fn surface_normal(triangle: &[Vec3; 3]) -> Vec3 {
    let [p0, p1, p2] = *triangle;
    (p1 - p0).cross(p2 - p0)
}

pub fn ambient_term(ambient: Color, reflect: &Reflectivity) -> Color {
    Color::from_f64([
        ambient.red as f64 * reflect.ambient[0],
        ambient.green as f64 * reflect.ambient[1],
        ambient.blue as f64 * reflect.ambient[2],
    ])
}

/// Lambertian term. `normal` must already be unit length.
pub fn diffuse_term(light: &Light, reflect: &Reflectivity, normal: Vec3) -> Color {
    let dot = normal.dot(light.direction());
    Color::from_f64([
        light.color[0] * reflect.diffuse[0] * dot,
        light.color[1] * reflect.diffuse[1] * dot,
        light.color[2] * reflect.diffuse[2] * dot,
    ])
}

/// Phong specular term. `normal` and `view` must already be unit length.
pub fn specular_term(light: &Light, reflect: &Reflectivity, view: Vec3, normal: Vec3) -> Color {
    let l = light.direction();
    let reflected = normal * (2.0 * normal.dot(l)) - l;
    let highlight = reflected.dot(view).max(0.0).powi(SPECULAR_EXPONENT);
    Color::from_f64([
        light.color[0] * reflect.specular[0] * highlight,
        light.color[1] * reflect.specular[1] * highlight,
        light.color[2] * reflect.specular[2] * highlight,
    ])
}

/// Flat color for a surface with the given (unnormalized) normal.
///
/// At most [`MAX_LIGHTS`] lights contribute.
pub fn shade(
    normal: Vec3,
    view: Vec3,
    ambient: Color,
    lights: &[Light],
    reflect: &Reflectivity,
) -> Color {
    let normal = normal.normalize();
    let mut color = ambient_term(ambient, reflect);

    for light in lights.iter().take(MAX_LIGHTS) {
        color += diffuse_term(light, reflect, normal);
        color += specular_term(light, reflect, view, normal);
    }

    color.clamped()
}
