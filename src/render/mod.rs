//! Software rasterization into a color and depth raster.

pub mod framebuffer;
pub mod line;
pub mod renderer;
pub mod scanline;

pub use framebuffer::FrameBuffer;
pub use line::draw_line;
pub use renderer::{draw_lines, draw_polygons, Shading};
pub use scanline::{draw_scanline, scan_convert};
