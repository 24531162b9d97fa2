//! 2D vector helpers
//!
//! `Vec2f` is the physics vector, `Vec2i` the integer variant used for pixel
//! coordinates. Both are plain `nalgebra::Vector2` values, so `+`, `-`,
//! scalar `*`, `dot`, `+=`/`-=` and friends come from nalgebra.

use nalgebra::{Scalar, Vector2};
use std::ops::{Div, Mul, Sub};

use super::MathError;

pub type Vec2f = Vector2<f64>;
pub type Vec2i = Vector2<i32>;

/// Numeric component type usable in a checked vector
pub trait Component:
    Scalar + Copy + Div<Output = Self> + Mul<Output = Self> + Sub<Output = Self>
{
    const ZERO: Self;
}

macro_rules! impl_component {
    ($($t:ty => $zero:expr),* $(,)?) => {
        $(impl Component for $t {
            const ZERO: Self = $zero;
        })*
    };
}

impl_component!(f32 => 0.0, f64 => 0.0, i32 => 0, i64 => 0);

/// Operations shared by every component type
pub trait Vector2Ext<T: Component>: Sized {
    /// Divide both components by `scalar`, failing on an exact zero
    fn try_div(&self, scalar: T) -> Result<Self, MathError>;

    /// Compound form of [`Vector2Ext::try_div`]; `self` is untouched on error
    fn try_div_assign(&mut self, scalar: T) -> Result<(), MathError>;

    /// Scalar 2D cross product `a.x * b.y - a.y * b.x`
    fn cross(&self, other: &Self) -> T;
}

impl<T: Component> Vector2Ext<T> for Vector2<T> {
    fn try_div(&self, scalar: T) -> Result<Self, MathError> {
        if scalar == T::ZERO {
            return Err(MathError::DivisionByZero);
        }
        Ok(Vector2::new(self.x / scalar, self.y / scalar))
    }

    fn try_div_assign(&mut self, scalar: T) -> Result<(), MathError> {
        *self = self.try_div(scalar)?;
        Ok(())
    }

    fn cross(&self, other: &Self) -> T {
        self.x * other.y - self.y * other.x
    }
}

/// Float-only geometry
pub trait Vector2FloatExt {
    fn length(&self) -> f64;
    fn distance(&self, other: &Self) -> f64;

    /// Unit vector in the same direction, or the zero vector when the input
    /// has zero length
    fn normalize_or_zero(&self) -> Self;
}

impl Vector2FloatExt for Vec2f {
    #[inline]
    fn length(&self) -> f64 {
        self.norm()
    }

    #[inline]
    fn distance(&self, other: &Self) -> f64 {
        (self - other).norm()
    }

    #[inline]
    fn normalize_or_zero(&self) -> Self {
        let len = self.norm();
        if len > 0.0 {
            self / len
        } else {
            Vec2f::zeros()
        }
    }
}
