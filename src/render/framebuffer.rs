//! Color raster plus depth buffer.
//!
//! # Coordinates
//!
//! Scene coordinates are y-up with the origin at the bottom-left pixel.
//! Storage is row-major top-down (row 0 is the top of the image), so
//! [`FrameBuffer::plot`] flips y on the way in and the buffer can be handed
//! to an image encoder as-is.
//!
//! # Depth
//!
//! The viewer sits at +Z looking toward −Z, so a **larger z is nearer**.
//! The depth buffer is reset to negative infinity, and a write wins when its
//! z is at least the stored value. Ties overwrite, which keeps edges drawn
//! on top of coplanar faces visible. Depths are truncated to thousandths
//! before comparison so faces and their edges agree despite rounding.

use crate::colors::Color;

/// Depth of a pixel no geometry has touched.
pub const FAR_DEPTH: f64 = f64::NEG_INFINITY;

#[inline]
fn quantize_depth(z: f64) -> f64 {
    (z * 1000.0).trunc() / 1000.0
}

/// Storage index of scene pixel (x, y) in a `width`×`height` raster, or None
/// if out of bounds.
#[inline]
fn storage_index(width: u32, height: u32, x: i32, y: i32) -> Option<usize> {
    if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
        return None;
    }
    let row = (height - 1 - y as u32) as usize;
    Some(row * width as usize + x as usize)
}

/// Owned color and depth buffers of a single frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    color_buffer: Vec<Color>,
    depth_buffer: Vec<f64>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    /// Create a cleared buffer filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let size = width as usize * height as usize;
        Self {
            color_buffer: vec![background; size],
            depth_buffer: vec![FAR_DEPTH; size],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fill the color buffer and push every depth back to [`FAR_DEPTH`].
    pub fn clear(&mut self, background: Color) {
        self.color_buffer.fill(background);
        self.clear_depth();
    }

    #[inline]
    pub fn clear_depth(&mut self) {
        self.depth_buffer.fill(FAR_DEPTH);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        storage_index(self.width, self.height, x, y)
    }

    /// Depth-tested write at scene pixel (x, y).
    ///
    /// Out-of-bounds coordinates are ignored. Returns whether the pixel was
    /// written.
    #[inline]
    pub fn plot(&mut self, x: i32, y: i32, z: f64, color: Color) -> bool {
        let Some(idx) = self.index(x, y) else {
            return false;
        };
        let z = quantize_depth(z);
        if z >= self.depth_buffer[idx] {
            self.depth_buffer[idx] = z;
            self.color_buffer[idx] = color.clamped();
            true
        } else {
            false
        }
    }

    /// Color at scene pixel (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|idx| self.color_buffer[idx])
    }

    /// Stored depth at scene pixel (x, y), or None if out of bounds.
    #[inline]
    pub fn depth_at(&self, x: i32, y: i32) -> Option<f64> {
        self.index(x, y).map(|idx| self.depth_buffer[idx])
    }

    /// Pixels in storage order (top row first).
    pub fn pixels(&self) -> &[Color] {
        &self.color_buffer
    }

    /// Copy into an 8-bit RGB image, top row first.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        let bytes: Vec<u8> = self
            .color_buffer
            .iter()
            .flat_map(|c| c.to_rgb())
            .collect();
        // Length always matches width * height * 3
        image::RgbImage::from_raw(self.width, self.height, bytes)
            .unwrap_or_else(|| image::RgbImage::new(self.width, self.height))
    }
}
