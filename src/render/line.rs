//! Bresenham line drawing with depth.
//!
//! Lines are always walked left to right. The axis with the larger extent
//! is the primary axis: "wide" lines step X every pixel and Y occasionally,
//! "tall" lines the other way round. Each step is either an east step (primary
//! axis only) or a northeast step (both axes), chosen by an integer error
//! term so no floating point enters the pixel walk.
//!
//! Depth is interpolated linearly across the pixel count and written through
//! [`FrameBuffer::plot`], so wireframes share one depth buffer with filled
//! polygons.

use crate::colors::Color;
use crate::render::framebuffer::FrameBuffer;

/// Northeast steps taken in the first `k` steps of a walk with the given
/// minor and major extents.
///
/// The error term before step `k` is `2m - M + 2mk - 2Mn` and always lies in
/// `(2m - 2M, 2m]`, which pins `n = ceil((2mk - M) / 2M)`.
fn northeast_steps(k: i64, minor: i64, major: i64) -> i64 {
    if major == 0 {
        return 0;
    }
    let (k, minor, major) = (k as i128, minor as i128, major as i128);
    ((2 * minor * k + major - 1).div_euclid(2 * major)) as i64
}

/// First step after which at least `target` northeast steps have been
/// taken, or `major + 1` if the walk never gets there.
fn steps_until_northeast(target: i64, minor: i64, major: i64) -> i64 {
    if target <= 0 {
        return 0;
    }
    if minor == 0 {
        return major + 1;
    }
    let (t, m, big) = (target as i128, minor as i128, major as i128);
    ((2 * big * t - big).div_euclid(2 * m) + 1).min(big + 1) as i64
}

/// Draw a segment from (x0, y0, z0) to (x1, y1, z1), both ends inclusive.
///
/// Steps that fall before the raster are skipped in one jump, and the walk
/// stops once it has left the raster for good.
#[allow(clippy::too_many_arguments)]
pub fn draw_line(
    x0: i32,
    y0: i32,
    z0: f64,
    x1: i32,
    y1: i32,
    z1: f64,
    buffer: &mut FrameBuffer,
    color: Color,
) {
    let (x0, y0, z0, x1, y1, z1) = if x0 > x1 {
        (x1, y1, z1, x0, y0, z0)
    } else {
        (x0, y0, z0, x1, y1, z1)
    };
    let (x0, y0, x1, y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);
    let width = buffer.width() as i64;
    let height = buffer.height() as i64;

    let dx = x1 - x0;
    let dy = (y1 - y0).abs();
    // +1 walks up, -1 walks down
    let y_step = if y1 >= y0 { 1 } else { -1 };

    let wide = dx >= dy;
    let (major, minor) = if wide { (dx, dy) } else { (dy, dx) };

    let pixels = major + 1;
    let dz = (z1 - z0) / pixels as f64;

    let d_east = 2 * minor;
    let d_northeast = 2 * minor - 2 * major;

    // Distance from the start to the near edge of the raster on each axis
    let x_gap = -x0;
    let y_gap = if y_step > 0 { -y0 } else { y0 - (height - 1) };
    let (major_gap, minor_gap) = if wide { (x_gap, y_gap) } else { (y_gap, x_gap) };
    let start = major_gap
        .max(steps_until_northeast(minor_gap, minor, major))
        .clamp(0, pixels);

    let diagonal = northeast_steps(start, minor, major);
    let (mut x, mut y) = if wide {
        (x0 + start, y0 + y_step * diagonal)
    } else {
        (x0 + diagonal, y0 + y_step * start)
    };
    // Error term after `start` steps, in (2m - 2M, 2m] so it fits back in i64
    let d_start = (2 * minor - major) as i128 + 2 * (minor as i128) * (start as i128)
        - 2 * (major as i128) * (diagonal as i128);
    let mut d = d_start as i64;
    let mut z = z0 + dz * start as f64;

    for _ in start..major {
        if x >= width || (y_step > 0 && y >= height) || (y_step < 0 && y < 0) {
            break;
        }
        buffer.plot(x as i32, y as i32, z, color);

        if d > 0 {
            x += 1;
            y += y_step;
            d += d_northeast;
        } else {
            if wide {
                x += 1;
            } else {
                y += y_step;
            }
            d += d_east;
        }
        z += dz;
    }
    buffer.plot(x1 as i32, y1 as i32, z0 + dz * major as f64, color);
}
