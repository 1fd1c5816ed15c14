//! Growable 4×N buffer of homogeneous points.
//!
//! The same storage backs both polygon buffers (every 3 consecutive points
//! form a triangle) and edge buffers (every 2 consecutive points form an
//! independent segment). Storage grows in fixed chunks and is retained
//! across [`PointMatrix::clear`] so a frame reuses one allocation.

use super::mat4::Mat4;
use super::vec3::Vec3;

/// Number of columns added each time the buffer runs out of room.
pub const GROWTH_CHUNK: usize = 100;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointMatrix {
    columns: Vec<[f64; 4]>,
}

impl PointMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with room for `capacity` points.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: Vec::with_capacity(capacity),
        }
    }

    /// Number of points currently stored.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of points the buffer can hold before it grows again.
    pub fn capacity(&self) -> usize {
        self.columns.capacity()
    }

    /// Ensure room for at least `new_capacity` points. Never shrinks.
    pub fn grow(&mut self, new_capacity: usize) {
        if new_capacity > self.columns.capacity() {
            self.columns.reserve_exact(new_capacity - self.columns.len());
        }
    }

    /// Append a point with w = 1, growing by [`GROWTH_CHUNK`] when full.
    pub fn add_point(&mut self, x: f64, y: f64, z: f64) {
        if self.columns.len() == self.columns.capacity() {
            self.grow(self.columns.len() + GROWTH_CHUNK);
        }
        self.columns.push([x, y, z, 1.0]);
    }

    /// Append the segment `p0`→`p1`.
    pub fn add_edge(&mut self, p0: Vec3, p1: Vec3) {
        self.add_point(p0.x, p0.y, p0.z);
        self.add_point(p1.x, p1.y, p1.z);
    }

    /// Append the triangle `p0`, `p1`, `p2`. Counter-clockwise winding (seen
    /// from +Z) faces the viewer.
    pub fn add_polygon(&mut self, p0: Vec3, p1: Vec3, p2: Vec3) {
        self.add_point(p0.x, p0.y, p0.z);
        self.add_point(p1.x, p1.y, p1.z);
        self.add_point(p2.x, p2.y, p2.z);
    }

    /// Reset the logical length to zero, keeping the allocation.
    pub fn clear(&mut self) {
        self.columns.clear();
    }

    /// Make this buffer an exact copy of `src`.
    pub fn copy_from(&mut self, src: &PointMatrix) {
        self.columns.clear();
        self.columns.extend_from_slice(&src.columns);
    }

    /// Replace every column `c` with `m · c`.
    pub fn transform(&mut self, m: &Mat4) {
        for column in self.columns.iter_mut() {
            *column = m.apply(*column);
        }
    }

    /// The point at `index`, dropping w.
    pub fn point(&self, index: usize) -> Vec3 {
        let [x, y, z, _] = self.columns[index];
        Vec3::new(x, y, z)
    }

    pub fn points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.columns.iter().map(|&[x, y, z, _]| Vec3::new(x, y, z))
    }

    /// Raw homogeneous columns.
    pub fn columns(&self) -> &[[f64; 4]] {
        &self.columns
    }

    /// Complete triangles, reading the buffer 3 points at a time.
    /// A trailing partial triangle is ignored.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.columns.chunks_exact(3).map(|c| {
            [
                Vec3::new(c[0][0], c[0][1], c[0][2]),
                Vec3::new(c[1][0], c[1][1], c[1][2]),
                Vec3::new(c[2][0], c[2][1], c[2][2]),
            ]
        })
    }

    /// Complete segments, reading the buffer 2 points at a time.
    pub fn edges(&self) -> impl Iterator<Item = [Vec3; 2]> + '_ {
        self.columns.chunks_exact(2).map(|c| {
            [
                Vec3::new(c[0][0], c[0][1], c[0][2]),
                Vec3::new(c[1][0], c[1][1], c[1][2]),
            ]
        })
    }
}
