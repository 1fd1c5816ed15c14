//! Stack of nested coordinate systems.
//!
//! Provides a [`TransformStack`] whose top is the product of every enclosing
//! coordinate system. New transforms compose in the current local frame
//! (`top = top · T`), and mutating methods return `&mut Self` for chaining:
//!
//! ```ignore
//! stack
//!     .translate(250.0, 250.0, 0.0)
//!     .rotate_y(0.5)
//!     .scale(2.0, 2.0, 2.0);
//! ```

use crate::error::{Error, Result};
use crate::math::mat4::Mat4;

/// Initial room for nested systems before the stack reallocates.
const INITIAL_DEPTH: usize = 16;

/// A never-empty stack of 4x4 transforms seeded with the identity.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformStack {
    systems: Vec<Mat4>,
}

impl Default for TransformStack {
    fn default() -> Self {
        let mut systems = Vec::with_capacity(INITIAL_DEPTH);
        systems.push(Mat4::identity());
        Self { systems }
    }
}

impl TransformStack {
    /// Create a stack holding only the root identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of systems, including the root.
    pub fn depth(&self) -> usize {
        self.systems.len()
    }

    /// Duplicate the current top.
    pub fn push(&mut self) -> &mut Self {
        let top = *self.peek();
        self.systems.push(top);
        self
    }

    /// Discard the current top, revealing the enclosing system.
    ///
    /// Fails with [`Error::StackUnderflow`] rather than removing the root.
    pub fn pop(&mut self) -> Result<Mat4> {
        if self.systems.len() <= 1 {
            return Err(Error::StackUnderflow);
        }
        self.systems.pop().ok_or(Error::StackUnderflow)
    }

    /// The current coordinate system.
    pub fn peek(&self) -> &Mat4 {
        // The root is never removed
        &self.systems[self.systems.len() - 1]
    }

    /// Apply `t` in the current local frame: `top = top · t`.
    pub fn compose(&mut self, t: &Mat4) -> &mut Self {
        let last = self.systems.len() - 1;
        self.systems[last] = self.systems[last] * *t;
        self
    }

    pub fn translate(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.compose(&Mat4::translation(x, y, z))
    }

    pub fn scale(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.compose(&Mat4::scaling(x, y, z))
    }

    /// Rotate about X by `angle` radians.
    pub fn rotate_x(&mut self, angle: f64) -> &mut Self {
        self.compose(&Mat4::rotation_x(angle))
    }

    /// Rotate about Y by `angle` radians.
    pub fn rotate_y(&mut self, angle: f64) -> &mut Self {
        self.compose(&Mat4::rotation_y(angle))
    }

    /// Rotate about Z by `angle` radians.
    pub fn rotate_z(&mut self, angle: f64) -> &mut Self {
        self.compose(&Mat4::rotation_z(angle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec3::Vec3;
    use approx::assert_relative_eq;

    #[test]
    fn starts_with_identity_root() {
        let stack = TransformStack::new();
        assert_eq!(stack.depth(), 1);
        assert_eq!(*stack.peek(), Mat4::identity());
    }

    #[test]
    fn push_then_pop_restores_top() {
        let mut stack = TransformStack::new();
        stack.translate(3.0, 4.0, 5.0).rotate_z(0.3);
        let before = *stack.peek();

        stack.push();
        assert_eq!(*stack.peek(), before);
        stack.scale(2.0, 2.0, 2.0).rotate_x(1.1);
        assert_ne!(*stack.peek(), before);

        stack.pop().unwrap();
        assert_eq!(*stack.peek(), before);
    }

    #[test]
    fn popping_root_is_an_error() {
        let mut stack = TransformStack::new();
        assert!(matches!(stack.pop(), Err(Error::StackUnderflow)));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn transforms_apply_in_local_frame() {
        // Move, then rotate: the rotation happens about the moved origin
        let mut stack = TransformStack::new();
        stack
            .translate(100.0, 0.0, 0.0)
            .rotate_z(std::f64::consts::FRAC_PI_2);

        let p = *stack.peek() * Vec3::new(10.0, 0.0, 0.0);
        assert_relative_eq!(p.x, 100.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn grows_past_initial_depth() {
        let mut stack = TransformStack::new();
        for _ in 0..(INITIAL_DEPTH * 3) {
            stack.push();
        }
        assert_eq!(stack.depth(), INITIAL_DEPTH * 3 + 1);
    }
}
