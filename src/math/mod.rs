//! Small linear-algebra layer on top of `nalgebra`
//!
//! The physics code works with `nalgebra::Vector2<f64>` directly; this module
//! adds the few operations whose failure policy matters to the simulation:
//! - raw scalar division by zero is an error (`try_div`)
//! - normalizing a zero-length vector is not (`normalize_or_zero`)
//! - inverting a near-singular 2x2 matrix is an error (`checked_inverse`)

pub mod matrix;
pub mod vector;

use thiserror::Error;

pub use matrix::{checked_inverse, rotation, Mat2, SINGULARITY_EPSILON};
pub use vector::{Component, Vec2f, Vec2i, Vector2Ext, Vector2FloatExt};

/// Failures raised by the math helpers
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MathError {
    /// A vector was divided by an exact zero scalar
    #[error("cannot divide a vector by zero")]
    DivisionByZero,

    /// A matrix was too close to singular to invert
    #[error("matrix is not invertible (determinant {determinant})")]
    SingularMatrix { determinant: f64 },
}
