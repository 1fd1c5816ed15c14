//! Core rendering engine.
//!
//! The [`Engine`] owns a scene (operation list plus symbol table) and the
//! render settings. [`Engine::run`] prepares the animation in two passes and
//! then renders every frame:
//!
//! 1. **first pass**: frame count and basename
//! 2. **second pass**: per-frame knob table
//! 3. **frames**: each frame starts from a fresh transform stack, polygon
//!    buffer and frame buffer, applies its knob values, then executes the
//!    operation list top to bottom
//!
//! Frames share nothing mutable, so with the `multithreading` feature they
//! render in parallel, one batch of frames per worker pool at a time.
//! Everything a frame asks to write or display is captured as a [`Snapshot`]
//! and handled after its batch, in frame order. Only the finished image of a
//! frame outlives [`Engine::render_frame`]; the depth buffer stays behind.

use std::collections::HashMap;
use std::ops::Range;
use std::path::PathBuf;

use image::RgbImage;
use log::{debug, info, warn};

use crate::animation::{self, AnimationSettings, FrameKnobs};
use crate::colors::Color;
use crate::config::RenderConfig;
use crate::error::{Error, Result};
use crate::geometry;
use crate::light::{Lights, Reflectivity};
use crate::math::mat4::Mat4;
use crate::math::point_matrix::PointMatrix;
use crate::mesh;
use crate::output;
use crate::render::{self, FrameBuffer, Shading};
use crate::script::{Axis, Operation, SymbolTable};
use crate::transform::TransformStack;
use crate::window;

/// Output requested by a `save` or `display` operation, with the raster as
/// it was at that point of the frame.
#[derive(Debug, Clone)]
pub enum Snapshot {
    Save { path: PathBuf, image: RgbImage },
    Display(RgbImage),
}

/// A finished frame and the output it requested.
#[derive(Debug, Clone)]
pub struct RenderedFrame {
    pub index: usize,
    pub image: RgbImage,
    pub snapshots: Vec<Snapshot>,
}

impl RenderedFrame {
    /// Color at scene pixel (x, y), with y pointing up as in
    /// [`FrameBuffer::get_pixel`].
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        let (width, height) = self.image.dimensions();
        if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
            return None;
        }
        let [r, g, b] = self.image.get_pixel(x as u32, height - 1 - y as u32).0;
        Some(Color::new(r as i32, g as i32, b as i32))
    }
}

/// What a call to [`Engine::run`] produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderSummary {
    pub settings: AnimationSettings,
    /// Files written by `save` operations, in order.
    pub saved: Vec<PathBuf>,
    /// Numbered animation frames.
    pub frames: Vec<PathBuf>,
    pub animation: Option<PathBuf>,
}

/// State of one frame while its operations run.
struct FrameContext<'a> {
    config: &'a RenderConfig,
    symbols: &'a SymbolTable,
    stack: TransformStack,
    polygons: PointMatrix,
    edges: PointMatrix,
    buffer: FrameBuffer,
    lights: Lights,
    ambient: Color,
    knobs: HashMap<String, f64>,
    coord_systems: HashMap<String, Mat4>,
    snapshots: Vec<Snapshot>,
}

impl<'a> FrameContext<'a> {
    fn new(config: &'a RenderConfig, symbols: &'a SymbolTable, knobs: HashMap<String, f64>) -> Self {
        Self {
            config,
            symbols,
            stack: TransformStack::new(),
            polygons: PointMatrix::new(),
            edges: PointMatrix::new(),
            buffer: FrameBuffer::new(config.width, config.height, config.background),
            lights: Lights::new(),
            ambient: config.ambient,
            knobs,
            coord_systems: HashMap::new(),
            snapshots: Vec::new(),
        }
    }

    /// Current value of a knob: frame overrides first, then its resting value.
    fn knob(&self, name: &str) -> Result<f64> {
        match self.knobs.get(name) {
            Some(v) => Ok(*v),
            None => self.symbols.value(name),
        }
    }

    /// Knob value, or 1 when an operation names no knob.
    fn factor(&self, knob: &Option<String>) -> Result<f64> {
        knob.as_deref().map_or(Ok(1.0), |name| self.knob(name))
    }

    fn reflectivity(&self, constants: &Option<String>) -> Result<Reflectivity> {
        match constants {
            Some(name) => self.symbols.constants(name),
            None => Ok(self.config.default_constants),
        }
    }

    /// The transform a shape is drawn with: a saved system or the stack top.
    fn coord_system(&self, name: &Option<String>) -> Result<Mat4> {
        match name {
            Some(name) => self
                .coord_systems
                .get(name)
                .copied()
                .ok_or_else(|| Error::UnknownCoordSystem(name.clone())),
            None => Ok(*self.stack.peek()),
        }
    }

    /// Transform, light and fill the polygon buffer, then empty it.
    fn flush_polygons(
        &mut self,
        constants: &Option<String>,
        coord_system: &Option<String>,
    ) -> Result<()> {
        let transform = self.coord_system(coord_system)?;
        let reflect = self.reflectivity(constants)?;
        self.polygons.transform(&transform);

        let shading = Shading {
            view: self.config.view,
            ambient: self.ambient,
            lights: self.lights.as_slice(),
            reflect: &reflect,
        };
        let drawn = render::draw_polygons(&self.polygons, &mut self.buffer, &shading);
        debug!("drew {drawn} of {} triangles", self.polygons.len() / 3);
        self.polygons.clear();
        Ok(())
    }

    /// Transform and draw the edge buffer, then empty it.
    fn flush_edges(&mut self, coord_system: &Option<String>) -> Result<()> {
        let transform = self.coord_system(coord_system)?;
        self.edges.transform(&transform);
        render::draw_lines(&self.edges, &mut self.buffer, self.config.line_color);
        self.edges.clear();
        Ok(())
    }

    fn execute(&mut self, op: &Operation) -> Result<()> {
        match op {
            Operation::Push => {
                self.stack.push();
            }
            Operation::Pop => {
                self.stack.pop()?;
            }
            Operation::Move { offset, knob } => {
                let k = self.factor(knob)?;
                self.stack.translate(offset.x * k, offset.y * k, offset.z * k);
            }
            Operation::Scale { factors, knob } => {
                let k = self.factor(knob)?;
                self.stack.scale(factors.x * k, factors.y * k, factors.z * k);
            }
            Operation::Rotate {
                axis,
                degrees,
                knob,
            } => {
                let theta = degrees.to_radians() * self.factor(knob)?;
                match axis {
                    Axis::X => self.stack.rotate_x(theta),
                    Axis::Y => self.stack.rotate_y(theta),
                    Axis::Z => self.stack.rotate_z(theta),
                };
            }
            Operation::Box {
                corner,
                width,
                height,
                depth,
                constants,
                coord_system,
            } => {
                geometry::add_box(&mut self.polygons, *corner, *width, *height, *depth);
                self.flush_polygons(constants, coord_system)?;
            }
            Operation::Sphere {
                center,
                radius,
                constants,
                coord_system,
            } => {
                geometry::add_sphere(&mut self.polygons, *center, *radius, self.config.step_3d);
                self.flush_polygons(constants, coord_system)?;
            }
            Operation::Torus {
                center,
                r1,
                r2,
                constants,
                coord_system,
            } => {
                geometry::add_torus(&mut self.polygons, *center, *r1, *r2, self.config.step_3d);
                self.flush_polygons(constants, coord_system)?;
            }
            Operation::Mesh {
                path,
                constants,
                coord_system,
            } => {
                let added = mesh::add_mesh(&mut self.polygons, path)?;
                debug!("loaded {added} triangles from {}", path.display());
                self.flush_polygons(constants, coord_system)?;
            }
            Operation::Line {
                p0,
                p1,
                coord_system,
            } => {
                self.edges.add_edge(*p0, *p1);
                self.flush_edges(coord_system)?;
            }
            Operation::Circle {
                center,
                radius,
                coord_system,
            } => {
                geometry::add_circle(&mut self.edges, *center, *radius, self.config.step_2d);
                self.flush_edges(coord_system)?;
            }
            Operation::Curve {
                kind,
                controls,
                coord_system,
            } => {
                geometry::add_curve(&mut self.edges, *controls, self.config.step_2d, *kind);
                self.flush_edges(coord_system)?;
            }
            Operation::Light { name, knob } => {
                let light = self.symbols.light(name)?.scaled(self.factor(knob)?);
                if !self.lights.push(light) {
                    warn!("light '{name}' ignored: {} lights already on", self.lights.len());
                }
            }
            Operation::Ambient(color) => {
                self.ambient = *color;
            }
            Operation::SaveCoords { name } => {
                self.coord_systems.insert(name.clone(), *self.stack.peek());
            }
            Operation::Set { name, value } => {
                self.knobs.insert(name.clone(), *value);
            }
            Operation::SetKnobs(value) => {
                let names: Vec<String> = self
                    .symbols
                    .knob_names()
                    .map(str::to_string)
                    .chain(self.knobs.keys().cloned())
                    .collect();
                for name in names {
                    self.knobs.insert(name, *value);
                }
            }
            Operation::Save { path } => {
                self.snapshots.push(Snapshot::Save {
                    path: path.clone(),
                    image: self.buffer.to_rgb_image(),
                });
            }
            Operation::Display => {
                self.snapshots
                    .push(Snapshot::Display(self.buffer.to_rgb_image()));
            }
            Operation::Constants { .. }
            | Operation::Frames(_)
            | Operation::Basename(_)
            | Operation::Vary { .. } => {}
        }
        Ok(())
    }
}

/// Renders a scene, one frame or a whole animation.
#[derive(Debug, Clone)]
pub struct Engine {
    config: RenderConfig,
    operations: Vec<Operation>,
    symbols: SymbolTable,
}

impl Engine {
    pub fn new(config: RenderConfig, operations: Vec<Operation>, symbols: SymbolTable) -> Self {
        Self {
            config,
            operations,
            symbols,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Run both animation passes.
    pub fn prepare(&self) -> Result<(AnimationSettings, FrameKnobs)> {
        let settings = animation::first_pass(&self.operations)?;
        let knobs = animation::second_pass(&self.operations, settings.num_frames)?;
        Ok((settings, knobs))
    }

    /// Execute the operation list for frame `index`.
    pub fn render_frame(&self, index: usize, knobs: &FrameKnobs) -> Result<RenderedFrame> {
        let frame_knobs = knobs.frame(index).cloned().unwrap_or_default();
        for (name, value) in &frame_knobs {
            debug!("frame {index}: {name} = {value}");
        }

        let mut ctx = FrameContext::new(&self.config, &self.symbols, frame_knobs);
        for (i, op) in self.operations.iter().enumerate() {
            info!("{i}: {op}");
            ctx.execute(op)?;
        }

        Ok(RenderedFrame {
            index,
            image: ctx.buffer.to_rgb_image(),
            snapshots: ctx.snapshots,
        })
    }

    /// Render a range of frames, in parallel when built with
    /// `multithreading`.
    ///
    /// Results are returned in frame order. The first failing frame's error
    /// is returned.
    pub fn render_batch(
        &self,
        frames: Range<usize>,
        knobs: &FrameKnobs,
    ) -> Result<Vec<RenderedFrame>> {
        #[cfg(feature = "multithreading")]
        let frames: Vec<Result<RenderedFrame>> = {
            use rayon::prelude::*;
            frames
                .into_par_iter()
                .map(|f| self.render_frame(f, knobs))
                .collect()
        };

        #[cfg(not(feature = "multithreading"))]
        let frames: Vec<Result<RenderedFrame>> =
            frames.map(|f| self.render_frame(f, knobs)).collect();

        frames.into_iter().collect()
    }

    /// Render every frame at once. [`Engine::run`] renders in batches
    /// instead, so memory does not grow with the frame count.
    pub fn render_frames(&self, knobs: &FrameKnobs) -> Result<Vec<RenderedFrame>> {
        self.render_batch(0..knobs.num_frames().max(1), knobs)
    }

    /// Render the scene and write everything it asks for.
    ///
    /// Frames are rendered [`batch_size`] at a time. Each batch is written
    /// out and dropped before the next one starts.
    pub fn run(&self) -> Result<RenderSummary> {
        let (settings, knobs) = self.prepare()?;
        info!(
            "rendering {} frame(s) at {}x{}",
            settings.num_frames, self.config.width, self.config.height
        );

        let mut animation = if settings.is_animated() {
            let path = output::animation_path(&self.config.output_dir, &settings.basename);
            Some(output::AnimationWriter::create(&path, self.config.gif_delay_ms)?)
        } else {
            None
        };
        let mut summary = RenderSummary {
            settings,
            ..Default::default()
        };

        let count = knobs.num_frames().max(1);
        let batch = batch_size();
        for start in (0..count).step_by(batch) {
            let end = (start + batch).min(count);
            for frame in self.render_batch(start..end, &knobs)? {
                self.write_frame(frame, &mut summary, animation.as_mut())?;
            }
        }

        if let Some(writer) = animation {
            writer.finish()?;
            summary.animation = Some(output::animation_path(
                &self.config.output_dir,
                &summary.settings.basename,
            ));
        }

        Ok(summary)
    }

    /// Handle a frame's snapshots, then write it as a numbered file and a
    /// GIF frame when animating.
    fn write_frame(
        &self,
        frame: RenderedFrame,
        summary: &mut RenderSummary,
        animation: Option<&mut output::AnimationWriter>,
    ) -> Result<()> {
        for snapshot in frame.snapshots {
            match snapshot {
                Snapshot::Save { path, image } => {
                    output::save_image(&image, &path)?;
                    info!("frame {}: saved {}", frame.index, path.display());
                    summary.saved.push(path);
                }
                Snapshot::Display(image) => window::display(&image)?,
            }
        }

        if let Some(writer) = animation {
            let path = output::frame_path(
                &self.config.output_dir,
                &summary.settings.basename,
                frame.index,
            );
            output::save_image(&frame.image, &path)?;
            info!("frame {}: wrote {}", frame.index, path.display());
            summary.frames.push(path);
            writer.push(&frame.image)?;
        }
        Ok(())
    }
}

/// Frames rendered per batch: one per worker thread.
pub fn batch_size() -> usize {
    #[cfg(feature = "multithreading")]
    let size = rayon::current_num_threads();
    #[cfg(not(feature = "multithreading"))]
    let size = 1;
    size.max(1)
}
