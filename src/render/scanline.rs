//! Scanline triangle fill with per-pixel depth.
//!
//! # Algorithm Overview
//!
//! 1. **Sort vertices** by Y into bottom, middle and top.
//! 2. **Walk rows** from bottom to top with two edge walkers:
//!    - the long edge, bottom → top, for the whole height
//!    - the short edges, bottom → middle, then middle → top after the walker
//!      reaches the middle row
//! 3. **Fill each row** between the two walkers, interpolating depth.
//!
//! ```text
//!            top
//!            /|
//!     long  / |  short (upper)
//!          /  + middle
//!         /  /
//!        /  /    short (lower)
//!       / /
//!      bot
//! ```
//!
//! Each walker advances X and Z by a fixed increment per row. An edge
//! spanning `n` rows is divided into `n + 1` steps, so rows that share a
//! Y value (flat tops and bottoms) never divide by zero.

use crate::colors::Color;
use crate::math::vec3::Vec3;
use crate::render::framebuffer::FrameBuffer;

/// Sorts three vertices by Y coordinate (ascending: bottom to top).
///
/// Three comparisons suffice for 3 elements. Equal Y values keep their
/// input order.
fn sort_vertices(triangle: &[Vec3; 3]) -> [Vec3; 3] {
    let [mut v0, mut v1, mut v2] = *triangle;
    if v1.y < v0.y {
        std::mem::swap(&mut v0, &mut v1);
    }
    if v2.y < v1.y {
        std::mem::swap(&mut v1, &mut v2);
    }
    if v1.y < v0.y {
        std::mem::swap(&mut v0, &mut v1);
    }
    [v0, v1, v2]
}

/// Per-row increment of `delta` spread over `rows` rows, or zero for an
/// empty span.
#[inline]
fn slope(delta: f64, rows: f64) -> f64 {
    if rows > 0.0 {
        delta / rows
    } else {
        0.0
    }
}

/// Fill a triangle with a flat color, depth-testing every pixel.
///
/// Rows outside the raster are never visited. The walkers jump straight to
/// the first visible row, so far off-screen vertices cost nothing.
pub fn scan_convert(triangle: &[Vec3; 3], buffer: &mut FrameBuffer, color: Color) {
    let [bot, mid, top] = sort_vertices(triangle);

    let bot_y = bot.y as i64;
    let mid_y = mid.y as i64;
    let top_y = top.y as i64;

    // Distances in f64: saturated row numbers may be i64::MIN and i64::MAX
    let long_distance = top_y as f64 - bot_y as f64 + 1.0;
    let lower_distance = mid_y as f64 - bot_y as f64 + 1.0;
    let upper_distance = top_y as f64 - mid_y as f64 + 1.0;

    let first_y = bot_y.max(0);
    let last_y = top_y.min(buffer.height() as i64 - 1);
    if first_y > last_y {
        return;
    }
    let skipped = first_y as f64 - bot_y as f64;

    let dx0 = slope(top.x - bot.x, long_distance);
    let dz0 = slope(top.z - bot.z, long_distance);
    let mut dx1 = slope(mid.x - bot.x, lower_distance);
    let mut dz1 = slope(mid.z - bot.z, lower_distance);

    let (mut x0, mut z0) = (bot.x + dx0 * skipped, bot.z + dz0 * skipped);
    let (mut x1, mut z1) = (bot.x + dx1 * skipped, bot.z + dz1 * skipped);
    let mut on_upper_edge = false;

    for y in first_y..=last_y {
        if !on_upper_edge && y >= mid_y {
            on_upper_edge = true;
            dx1 = slope(top.x - mid.x, upper_distance);
            dz1 = slope(top.z - mid.z, upper_distance);
            let past_mid = y as f64 - mid_y as f64;
            x1 = mid.x + dx1 * past_mid;
            z1 = mid.z + dz1 * past_mid;
        }

        // last_y < height, so the row fits in i32
        draw_scanline(x0 as i64, z0, x1 as i64, z1, y as i32, buffer, color);

        x0 += dx0;
        x1 += dx1;
        z0 += dz0;
        z1 += dz1;
    }
}

/// Fill row `y` from `x0` to `x1` inclusive, interpolating depth.
pub fn draw_scanline(
    x0: i64,
    z0: f64,
    x1: i64,
    z1: f64,
    y: i32,
    buffer: &mut FrameBuffer,
    color: Color,
) {
    if y < 0 || y >= buffer.height() as i32 {
        return;
    }

    let (x0, z0, x1, z1) = if x0 > x1 {
        (x1, z1, x0, z0)
    } else {
        (x0, z0, x1, z1)
    };

    let dz = if x1 != x0 {
        (z1 - z0) / (x1 as f64 - x0 as f64 + 1.0)
    } else {
        0.0
    };

    // Skip the part of the span left of the raster without losing depth
    let start = x0.max(0);
    let end = x1.min(buffer.width() as i64 - 1);
    let mut z = z0 + dz * (start as f64 - x0 as f64);

    for x in start..=end {
        buffer.plot(x as i32, y, z, color);
        z += dz;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLACK, WHITE};

    fn lit_pixels(fb: &FrameBuffer) -> usize {
        fb.pixels().iter().filter(|&&p| p == WHITE).count()
    }

    #[test]
    fn fills_interior_of_general_triangle() {
        let mut fb = FrameBuffer::new(50, 50, BLACK);
        let triangle = [
            Vec3::new(5.0, 5.0, 0.0),
            Vec3::new(40.0, 10.0, 0.0),
            Vec3::new(20.0, 40.0, 0.0),
        ];
        scan_convert(&triangle, &mut fb, WHITE);

        assert_eq!(fb.get_pixel(20, 15), Some(WHITE));
        assert_eq!(fb.get_pixel(45, 45), Some(BLACK));
        assert_eq!(fb.get_pixel(2, 30), Some(BLACK));
    }

    #[test]
    fn vertex_order_does_not_matter() {
        let a = Vec3::new(3.0, 2.0, 0.0);
        let b = Vec3::new(28.0, 9.0, 0.0);
        let c = Vec3::new(12.0, 27.0, 0.0);

        let mut first = FrameBuffer::new(32, 32, BLACK);
        scan_convert(&[a, b, c], &mut first, WHITE);
        let mut second = FrameBuffer::new(32, 32, BLACK);
        scan_convert(&[c, a, b], &mut second, WHITE);

        assert_eq!(first.pixels(), second.pixels());
    }

    #[test]
    fn flat_bottom_triangle_is_filled() {
        let mut fb = FrameBuffer::new(20, 20, BLACK);
        let triangle = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(5.0, 10.0, 0.0),
        ];
        scan_convert(&triangle, &mut fb, WHITE);

        // The whole bottom row is covered
        for x in 0..=10 {
            assert_eq!(fb.get_pixel(x, 0), Some(WHITE), "x = {x}");
        }
        assert_eq!(fb.get_pixel(5, 5), Some(WHITE));
        assert!(lit_pixels(&fb) > 40);
    }

    #[test]
    fn flat_top_triangle_is_filled() {
        let mut fb = FrameBuffer::new(20, 20, BLACK);
        let triangle = [
            Vec3::new(0.0, 10.0, 0.0),
            Vec3::new(10.0, 10.0, 0.0),
            Vec3::new(5.0, 0.0, 0.0),
        ];
        scan_convert(&triangle, &mut fb, WHITE);

        // The long edge stops one step short of its top vertex
        for x in 0..=8 {
            assert_eq!(fb.get_pixel(x, 10), Some(WHITE), "x = {x}");
        }
        assert_eq!(fb.get_pixel(5, 5), Some(WHITE));
        assert_eq!(fb.get_pixel(5, 0), Some(WHITE));
    }

    #[test]
    fn zero_height_triangle_draws_single_row() {
        let mut fb = FrameBuffer::new(20, 20, BLACK);
        let triangle = [
            Vec3::new(2.0, 7.0, 0.0),
            Vec3::new(9.0, 7.0, 0.0),
            Vec3::new(15.0, 7.0, 0.0),
        ];
        scan_convert(&triangle, &mut fb, WHITE);

        assert!(lit_pixels(&fb) > 0);
        for y in (0..20).filter(|&y| y != 7) {
            for x in 0..20 {
                assert_eq!(fb.get_pixel(x, y), Some(BLACK));
            }
        }
    }

    #[test]
    fn nearer_triangle_hides_farther_one() {
        let red = Color::new(255, 0, 0);
        let mut fb = FrameBuffer::new(30, 30, BLACK);
        let near = [
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(29.0, 0.0, 10.0),
            Vec3::new(15.0, 29.0, 10.0),
        ];
        let far = [
            Vec3::new(0.0, 0.0, -10.0),
            Vec3::new(29.0, 0.0, -10.0),
            Vec3::new(15.0, 29.0, -10.0),
        ];

        scan_convert(&near, &mut fb, red);
        scan_convert(&far, &mut fb, WHITE);
        assert_eq!(fb.get_pixel(15, 10), Some(red));
        assert_eq!(fb.depth_at(15, 10), Some(10.0));
    }

    #[test]
    fn scanline_interpolates_depth() {
        let mut fb = FrameBuffer::new(10, 1, BLACK);
        draw_scanline(9, 9.0, 0, 0.0, 0, &mut fb, WHITE);
        assert_eq!(lit_pixels(&fb), 10);
        assert_eq!(fb.depth_at(0, 0), Some(0.0));
        assert!(fb.depth_at(8, 0).unwrap() > fb.depth_at(1, 0).unwrap());
    }

    #[test]
    fn offscreen_triangle_is_clipped() {
        let mut fb = FrameBuffer::new(10, 10, BLACK);
        let triangle = [
            Vec3::new(-50.0, -50.0, 0.0),
            Vec3::new(60.0, -50.0, 0.0),
            Vec3::new(5.0, 60.0, 0.0),
        ];
        scan_convert(&triangle, &mut fb, WHITE);
        assert_eq!(fb.get_pixel(5, 5), Some(WHITE));
    }

    #[test]
    fn huge_triangle_is_clipped_without_overflow() {
        let mut fb = FrameBuffer::new(20, 20, BLACK);
        let triangle = [
            Vec3::new(-2e9, 0.0, 0.0),
            Vec3::new(2e9, 0.0, 0.0),
            Vec3::new(0.0, 10.0, 0.0),
        ];
        scan_convert(&triangle, &mut fb, WHITE);

        // Rows 0 through 10 are covered edge to edge, nothing above
        assert_eq!(lit_pixels(&fb), 11 * 20);
        assert!((0..20).all(|x| fb.get_pixel(x, 11) == Some(BLACK)));
    }

    #[test]
    fn rows_below_the_raster_are_skipped() {
        let mut fb = FrameBuffer::new(20, 20, BLACK);
        let triangle = [
            Vec3::new(-1e9, -2e9, 0.0),
            Vec3::new(1e9, -2e9, 0.0),
            Vec3::new(0.0, 2e9, 0.0),
        ];
        scan_convert(&triangle, &mut fb, WHITE);
        assert_eq!(lit_pixels(&fb), 400);
    }

    #[test]
    fn span_across_the_whole_i64_range() {
        let mut fb = FrameBuffer::new(8, 1, BLACK);
        draw_scanline(i64::MIN, 0.0, i64::MAX, 0.0, 0, &mut fb, WHITE);
        assert_eq!(lit_pixels(&fb), 8);
    }
}
