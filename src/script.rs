//! Parsed scene operations and the symbol table they refer to.
//!
//! An [`Operation`] list is the program an [`Engine`](crate::engine::Engine)
//! runs once per frame. Operations refer to named values (knobs, constants
//! bundles, lights) that live in a [`SymbolTable`].
//!
//! ```ignore
//! let ops = vec![
//!     Operation::Frames(20),
//!     Operation::Basename("spin".into()),
//!     Operation::Vary { knob: "k".into(), start_frame: 0, end_frame: 19, start_value: 0.0, end_value: 1.0 },
//!     Operation::Push,
//!     Operation::rotate(Axis::Y, 360.0).with_knob("k"),
//!     Operation::torus(Vec3::new(250.0, 250.0, 0.0), 25.0, 125.0),
//!     Operation::Pop,
//! ];
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use crate::colors::Color;
use crate::error::{Error, Result};
use crate::geometry::CurveType;
use crate::light::{Light, Reflectivity};
use crate::math::vec3::Vec3;

/// Rotation axis of a `rotate` operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// One scene command.
///
/// `knob` fields name a scalar that multiplies the amount at run time.
/// `constants` fields name a [`Reflectivity`] bundle, and `coord_system`
/// fields name a transform saved by [`Operation::SaveCoords`] to use in place
/// of the top of the stack.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Push,
    Pop,
    Move {
        offset: Vec3,
        knob: Option<String>,
    },
    Scale {
        factors: Vec3,
        knob: Option<String>,
    },
    Rotate {
        axis: Axis,
        degrees: f64,
        knob: Option<String>,
    },
    Box {
        corner: Vec3,
        width: f64,
        height: f64,
        depth: f64,
        constants: Option<String>,
        coord_system: Option<String>,
    },
    Sphere {
        center: Vec3,
        radius: f64,
        constants: Option<String>,
        coord_system: Option<String>,
    },
    Torus {
        center: Vec3,
        /// Tube radius.
        r1: f64,
        /// Distance from the center to the middle of the tube.
        r2: f64,
        constants: Option<String>,
        coord_system: Option<String>,
    },
    Line {
        p0: Vec3,
        p1: Vec3,
        coord_system: Option<String>,
    },
    Circle {
        center: Vec3,
        radius: f64,
        coord_system: Option<String>,
    },
    Curve {
        kind: CurveType,
        controls: [Vec3; 4],
        coord_system: Option<String>,
    },
    Mesh {
        path: PathBuf,
        constants: Option<String>,
        coord_system: Option<String>,
    },
    /// Switch on a light defined in the symbol table.
    Light {
        name: String,
        knob: Option<String>,
    },
    Ambient(Color),
    /// Declares a constants bundle. The bundle itself lives in the symbol table.
    Constants {
        name: String,
    },
    SaveCoords {
        name: String,
    },
    /// Override one knob for the rest of the frame.
    Set {
        name: String,
        value: f64,
    },
    /// Override every knob for the rest of the frame.
    SetKnobs(f64),
    Save {
        path: PathBuf,
    },
    Display,
    Frames(usize),
    Basename(String),
    Vary {
        knob: String,
        start_frame: usize,
        end_frame: usize,
        start_value: f64,
        end_value: f64,
    },
}

impl Operation {
    pub fn translate(x: f64, y: f64, z: f64) -> Self {
        Operation::Move {
            offset: Vec3::new(x, y, z),
            knob: None,
        }
    }

    pub fn scale(x: f64, y: f64, z: f64) -> Self {
        Operation::Scale {
            factors: Vec3::new(x, y, z),
            knob: None,
        }
    }

    pub fn rotate(axis: Axis, degrees: f64) -> Self {
        Operation::Rotate {
            axis,
            degrees,
            knob: None,
        }
    }

    pub fn cuboid(corner: Vec3, width: f64, height: f64, depth: f64) -> Self {
        Operation::Box {
            corner,
            width,
            height,
            depth,
            constants: None,
            coord_system: None,
        }
    }

    pub fn sphere(center: Vec3, radius: f64) -> Self {
        Operation::Sphere {
            center,
            radius,
            constants: None,
            coord_system: None,
        }
    }

    pub fn torus(center: Vec3, r1: f64, r2: f64) -> Self {
        Operation::Torus {
            center,
            r1,
            r2,
            constants: None,
            coord_system: None,
        }
    }

    pub fn line(p0: Vec3, p1: Vec3) -> Self {
        Operation::Line {
            p0,
            p1,
            coord_system: None,
        }
    }

    /// Attach a knob to a `move`, `scale`, `rotate` or `light`.
    /// Other operations are returned unchanged.
    pub fn with_knob(mut self, name: impl Into<String>) -> Self {
        match &mut self {
            Operation::Move { knob, .. }
            | Operation::Scale { knob, .. }
            | Operation::Rotate { knob, .. }
            | Operation::Light { knob, .. } => *knob = Some(name.into()),
            _ => {}
        }
        self
    }

    /// Attach a constants bundle to a solid.
    /// Other operations are returned unchanged.
    pub fn with_constants(mut self, name: impl Into<String>) -> Self {
        match &mut self {
            Operation::Box { constants, .. }
            | Operation::Sphere { constants, .. }
            | Operation::Torus { constants, .. }
            | Operation::Mesh { constants, .. } => *constants = Some(name.into()),
            _ => {}
        }
        self
    }

    /// Draw a shape in a saved coordinate system.
    /// Operations that draw nothing are returned unchanged.
    pub fn with_coord_system(mut self, name: impl Into<String>) -> Self {
        match &mut self {
            Operation::Box { coord_system, .. }
            | Operation::Sphere { coord_system, .. }
            | Operation::Torus { coord_system, .. }
            | Operation::Line { coord_system, .. }
            | Operation::Circle { coord_system, .. }
            | Operation::Curve { coord_system, .. }
            | Operation::Mesh { coord_system, .. } => *coord_system = Some(name.into()),
            _ => {}
        }
        self
    }
}

fn write_vec(f: &mut fmt::Formatter<'_>, v: &Vec3) -> fmt::Result {
    write!(f, "{} {} {}", v.x, v.y, v.z)
}

fn write_opt(f: &mut fmt::Formatter<'_>, label: &str, name: &Option<String>) -> fmt::Result {
    match name {
        Some(name) => write!(f, " {label} {name}"),
        None => Ok(()),
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Push => write!(f, "push"),
            Operation::Pop => write!(f, "pop"),
            Operation::Move { offset, knob } => {
                write!(f, "move ")?;
                write_vec(f, offset)?;
                write_opt(f, "knob", knob)
            }
            Operation::Scale { factors, knob } => {
                write!(f, "scale ")?;
                write_vec(f, factors)?;
                write_opt(f, "knob", knob)
            }
            Operation::Rotate {
                axis,
                degrees,
                knob,
            } => {
                write!(f, "rotate {axis} {degrees}")?;
                write_opt(f, "knob", knob)
            }
            Operation::Box {
                corner,
                width,
                height,
                depth,
                constants,
                coord_system,
            } => {
                write!(f, "box ")?;
                write_vec(f, corner)?;
                write!(f, " {width} {height} {depth}")?;
                write_opt(f, "constants", constants)?;
                write_opt(f, "cs", coord_system)
            }
            Operation::Sphere {
                center,
                radius,
                constants,
                coord_system,
            } => {
                write!(f, "sphere ")?;
                write_vec(f, center)?;
                write!(f, " {radius}")?;
                write_opt(f, "constants", constants)?;
                write_opt(f, "cs", coord_system)
            }
            Operation::Torus {
                center,
                r1,
                r2,
                constants,
                coord_system,
            } => {
                write!(f, "torus ")?;
                write_vec(f, center)?;
                write!(f, " {r1} {r2}")?;
                write_opt(f, "constants", constants)?;
                write_opt(f, "cs", coord_system)
            }
            Operation::Line {
                p0,
                p1,
                coord_system,
            } => {
                write!(f, "line ")?;
                write_vec(f, p0)?;
                write!(f, " ")?;
                write_vec(f, p1)?;
                write_opt(f, "cs", coord_system)
            }
            Operation::Circle {
                center,
                radius,
                coord_system,
            } => {
                write!(f, "circle ")?;
                write_vec(f, center)?;
                write!(f, " {radius}")?;
                write_opt(f, "cs", coord_system)
            }
            Operation::Curve {
                kind,
                controls,
                coord_system,
            } => {
                write!(f, "{kind}")?;
                for c in controls {
                    write!(f, " ")?;
                    write_vec(f, c)?;
                }
                write_opt(f, "cs", coord_system)
            }
            Operation::Mesh {
                path,
                constants,
                coord_system,
            } => {
                write!(f, "mesh {}", path.display())?;
                write_opt(f, "constants", constants)?;
                write_opt(f, "cs", coord_system)
            }
            Operation::Light { name, knob } => {
                write!(f, "light {name}")?;
                write_opt(f, "knob", knob)
            }
            Operation::Ambient(c) => write!(f, "ambient {} {} {}", c.red, c.green, c.blue),
            Operation::Constants { name } => write!(f, "constants {name}"),
            Operation::SaveCoords { name } => write!(f, "save_coord_system {name}"),
            Operation::Set { name, value } => write!(f, "set {name} {value}"),
            Operation::SetKnobs(value) => write!(f, "setknobs {value}"),
            Operation::Save { path } => write!(f, "save {}", path.display()),
            Operation::Display => write!(f, "display"),
            Operation::Frames(n) => write!(f, "frames {n}"),
            Operation::Basename(name) => write!(f, "basename {name}"),
            Operation::Vary {
                knob,
                start_frame,
                end_frame,
                start_value,
                end_value,
            } => write!(
                f,
                "vary {knob} {start_frame} {end_frame} {start_value} {end_value}"
            ),
        }
    }
}

/// A named value a script can refer to.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    /// A knob's resting value, used when no frame table or override sets it.
    Value(f64),
    Constants(Reflectivity),
    Light(Light),
}

/// Name → [`Symbol`] lookup shared read-only by every frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    symbols: HashMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or redefine `name`. Returns the previous symbol, if any.
    pub fn insert(&mut self, name: impl Into<String>, symbol: Symbol) -> Option<Symbol> {
        self.symbols.insert(name.into(), symbol)
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Names of every knob defined with a resting value.
    pub fn knob_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.symbols.iter().filter_map(|(name, symbol)| match symbol {
            Symbol::Value(_) => Some(name.as_str()),
            _ => None,
        })
    }

    fn lookup(&self, name: &str) -> Result<&Symbol> {
        self.symbols
            .get(name)
            .ok_or_else(|| Error::UnknownSymbol(name.to_string()))
    }

    fn wrong_kind(name: &str, expected: &'static str) -> Error {
        Error::SymbolKind {
            name: name.to_string(),
            expected,
        }
    }

    pub fn value(&self, name: &str) -> Result<f64> {
        match self.lookup(name)? {
            Symbol::Value(v) => Ok(*v),
            _ => Err(Self::wrong_kind(name, "knob")),
        }
    }

    pub fn constants(&self, name: &str) -> Result<Reflectivity> {
        match self.lookup(name)? {
            Symbol::Constants(c) => Ok(*c),
            _ => Err(Self::wrong_kind(name, "constants")),
        }
    }

    pub fn light(&self, name: &str) -> Result<Light> {
        match self.lookup(name)? {
            Symbol::Light(l) => Ok(*l),
            _ => Err(Self::wrong_kind(name, "light")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_check_symbol_kind() {
        let mut table = SymbolTable::new();
        table.insert("spin", Symbol::Value(0.5));
        table.insert("shiny", Symbol::Constants(Reflectivity::WHITE));
        table.insert(
            "sun",
            Symbol::Light(Light::new(Vec3::new(0.0, 0.0, 1.0), [255.0, 255.0, 255.0])),
        );

        assert_eq!(table.value("spin").unwrap(), 0.5);
        assert_eq!(table.constants("shiny").unwrap(), Reflectivity::WHITE);
        assert_eq!(table.light("sun").unwrap().color, [255.0, 255.0, 255.0]);

        assert!(matches!(
            table.light("spin"),
            Err(Error::SymbolKind { expected: "light", .. })
        ));
        assert!(matches!(table.value("missing"), Err(Error::UnknownSymbol(n)) if n == "missing"));
    }

    #[test]
    fn knob_names_skip_other_symbols() {
        let mut table = SymbolTable::new();
        table.insert("a", Symbol::Value(1.0));
        table.insert("b", Symbol::Constants(Reflectivity::WHITE));
        let names: Vec<_> = table.knob_names().collect();
        assert_eq!(names, vec!["a"]);
    }

    #[test]
    fn builders_attach_names_where_they_apply() {
        let op = Operation::rotate(Axis::Z, 90.0).with_knob("k");
        assert_eq!(op.to_string(), "rotate z 90 knob k");

        let op = Operation::sphere(Vec3::ZERO, 10.0)
            .with_constants("shiny")
            .with_coord_system("saved");
        assert_eq!(op.to_string(), "sphere 0 0 0 10 constants shiny cs saved");

        // A knob means nothing to push
        assert_eq!(Operation::Push.with_knob("k"), Operation::Push);
    }

    #[test]
    fn trace_lines() {
        assert_eq!(Operation::translate(1.0, 2.5, -3.0).to_string(), "move 1 2.5 -3");
        assert_eq!(Operation::Frames(12).to_string(), "frames 12");
        let vary = Operation::Vary {
            knob: "k".into(),
            start_frame: 0,
            end_frame: 9,
            start_value: 0.0,
            end_value: 1.5,
        };
        assert_eq!(vary.to_string(), "vary k 0 9 0 1.5");
    }
}
