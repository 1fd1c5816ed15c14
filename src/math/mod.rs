//! Homogeneous-coordinate math: vectors, 4x4 transforms and point buffers.

pub mod mat4;
pub mod point_matrix;
pub mod vec3;
