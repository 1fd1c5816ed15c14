//! Error type shared by the renderer.

use std::fmt;

/// Errors raised while preparing or rendering a script.
#[derive(Debug)]
pub enum Error {
    /// A `vary` appeared before any `frames` directive.
    VaryWithoutFrames { knob: String },
    /// A `vary` whose end frame precedes its start frame.
    InvertedVary {
        knob: String,
        start_frame: usize,
        end_frame: usize,
    },
    /// `pop` with only the root coordinate system left.
    StackUnderflow,
    /// A name the symbol table does not know.
    UnknownSymbol(String),
    /// A symbol exists but holds a different kind of value.
    SymbolKind {
        name: String,
        expected: &'static str,
    },
    /// A `coord_system` reference that was never saved in this frame.
    UnknownCoordSystem(String),
    Mesh(tobj::LoadError),
    Image(image::ImageError),
    Io(std::io::Error),
    Display(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::VaryWithoutFrames { knob } => {
                write!(f, "vary on knob '{knob}' found but number of frames not set")
            }
            Error::InvertedVary {
                knob,
                start_frame,
                end_frame,
            } => write!(
                f,
                "end frame {end_frame} is before start frame {start_frame} for knob '{knob}'"
            ),
            Error::StackUnderflow => write!(f, "pop would remove the root coordinate system"),
            Error::UnknownSymbol(name) => write!(f, "unknown symbol '{name}'"),
            Error::SymbolKind { name, expected } => {
                write!(f, "symbol '{name}' is not a {expected}")
            }
            Error::UnknownCoordSystem(name) => {
                write!(f, "coordinate system '{name}' was never saved")
            }
            Error::Mesh(e) => write!(f, "failed to load mesh: {e}"),
            Error::Image(e) => write!(f, "failed to write image: {e}"),
            Error::Io(e) => write!(f, "i/o error: {e}"),
            Error::Display(msg) => write!(f, "display failed: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Mesh(e) => Some(e),
            Error::Image(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<tobj::LoadError> for Error {
    fn from(e: tobj::LoadError) -> Self {
        Error::Mesh(e)
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
