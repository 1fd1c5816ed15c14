//! A CPU-based software renderer for scripted, animated 3D scenes.
//!
//! A scene is an ordered list of [`Operation`]s (transforms, shapes, lights,
//! output commands) plus a [`SymbolTable`] of named knobs, reflectivity
//! constants and lights. The [`Engine`] runs the list once per frame into a
//! z-buffered raster and writes the frames out as images.
//!
//! # Quick Start
//!
//! ```ignore
//! use mdl_render::prelude::*;
//!
//! let ops = vec![
//!     Operation::translate(250.0, 250.0, 0.0),
//!     Operation::rotate(Axis::X, 30.0),
//!     Operation::sphere(Vec3::ZERO, 100.0),
//!     Operation::Save { path: "sphere.png".into() },
//! ];
//! let engine = Engine::new(RenderConfig::default(), ops, SymbolTable::new());
//! engine.run()?;
//! ```

// Public API - exposed to library consumers
pub mod animation;
pub mod colors;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod light;
pub mod math;
pub mod mesh;
pub mod output;
pub mod render;
pub mod script;
pub mod transform;
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use config::RenderConfig;
pub use engine::{Engine, RenderSummary};
pub use error::{Error, Result};
pub use script::{Axis, Operation, Symbol, SymbolTable};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use mdl_render::prelude::*;
/// ```
pub mod prelude {
    // Engine
    pub use crate::config::RenderConfig;
    pub use crate::engine::{Engine, RenderSummary};
    pub use crate::error::{Error, Result};

    // Scene description
    pub use crate::geometry::CurveType;
    pub use crate::light::{Light, Reflectivity};
    pub use crate::script::{Axis, Operation, Symbol, SymbolTable};

    // Math
    pub use crate::colors::Color;
    pub use crate::math::mat4::Mat4;
    pub use crate::math::point_matrix::PointMatrix;
    pub use crate::math::vec3::Vec3;
    pub use crate::transform::TransformStack;
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::colors::Color;
    pub use crate::render::{draw_line, draw_polygons, scan_convert, FrameBuffer, Shading};
}
