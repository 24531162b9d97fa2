//! Physical state attached to a shape
//!
//! A `Body` is a point mass: position history, velocity, an acceleration
//! accumulator and the integration scheme used to advance it. Shape extents
//! live on the owning object and only matter for geometry tests.
//!
//! Velocities are in units per second under every scheme. Verlet keeps no
//! velocity of its own, so it converts through the length of its last step.

use crate::math::Vec2f;
use crate::simulation::error::SimError;
use crate::simulation::integrator::{self, IntegrationScheme};

/// Step length assumed before a body has taken its first step
pub const DEFAULT_STEP: f64 = 1.0 / 60.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub(crate) mass: f64, // always > 0
    pub(crate) position: Vec2f, // current position
    pub(crate) previous_position: Vec2f, // position before the last step (Verlet)
    pub(crate) velocity: Vec2f, // explicit velocity (Euler/RK4)
    pub(crate) acceleration: Vec2f, // per-tick accumulator, cleared by every step
    pub(crate) scheme: IntegrationScheme,
    pub(crate) step: f64, // length of the last non-zero step, > 0
}

impl Body {
    /// Create a body at rest at `position`
    ///
    /// Rejects a non-positive or non-finite mass: impulse and acceleration
    /// formulas divide by it.
    pub fn new(mass: f64, position: Vec2f, scheme: IntegrationScheme) -> Result<Self, SimError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimError::InvalidArgument { what: "mass", value: mass });
        }
        Ok(Self {
            mass,
            position,
            previous_position: position,
            velocity: Vec2f::zeros(),
            acceleration: Vec2f::zeros(),
            scheme,
            step: DEFAULT_STEP,
        })
    }

    /// Add `accel` to this tick's accumulator; repeated calls sum
    pub fn accelerate(&mut self, accel: Vec2f) {
        self.acceleration += accel;
    }

    /// Advance by `dt` with the selected scheme and clear the accumulator
    pub fn update_position(&mut self, dt: f64) {
        integrator::integrate(self, dt);
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn position(&self) -> Vec2f {
        self.position
    }

    pub fn previous_position(&self) -> Vec2f {
        self.previous_position
    }

    pub fn acceleration(&self) -> Vec2f {
        self.acceleration
    }

    pub fn scheme(&self) -> IntegrationScheme {
        self.scheme
    }

    /// Length of the last non-zero step
    pub fn last_step(&self) -> f64 {
        self.step
    }

    /// Current velocity in units per second
    ///
    /// Under Verlet this is the last displacement
    /// `(position - previous_position) / last_step`; the other schemes store
    /// it explicitly.
    pub fn velocity(&self) -> Vec2f {
        match self.scheme {
            IntegrationScheme::Verlet => (self.position - self.previous_position) / self.step,
            IntegrationScheme::Euler | IntegrationScheme::Rk4 => self.velocity,
        }
    }

    /// Move the body without touching its position history
    ///
    /// Under Verlet the displacement becomes part of the next reconstructed
    /// velocity.
    pub fn set_position(&mut self, position: Vec2f) {
        self.position = position;
    }

    /// Set the velocity (units per second) the next step will use
    ///
    /// Verlet rewrites its position history so that one step of the last
    /// length reproduces `velocity`.
    pub fn set_velocity(&mut self, velocity: Vec2f) {
        self.velocity = velocity;
        if self.scheme == IntegrationScheme::Verlet {
            self.previous_position = self.position - velocity * self.step;
        }
    }

    /// Switch schemes, carrying the current velocity across
    pub fn set_scheme(&mut self, scheme: IntegrationScheme) {
        let velocity = self.velocity();
        self.scheme = scheme;
        self.set_velocity(velocity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(scheme: IntegrationScheme) -> Body {
        Body::new(500.0, Vec2f::new(100.0, 100.0), scheme).unwrap()
    }

    #[test]
    fn non_positive_mass_is_rejected() {
        for mass in [0.0, -1.0, f64::NAN] {
            assert!(Body::new(mass, Vec2f::zeros(), IntegrationScheme::Verlet).is_err());
        }
    }

    #[test]
    fn accelerate_is_additive() {
        let mut b = body(IntegrationScheme::Verlet);
        b.accelerate(Vec2f::new(1.0, 2.0));
        b.accelerate(Vec2f::new(3.0, -1.0));
        assert_eq!(b.acceleration(), Vec2f::new(4.0, 1.0));
    }

    #[test]
    fn every_scheme_clears_the_accumulator() {
        for scheme in [IntegrationScheme::Verlet, IntegrationScheme::Euler, IntegrationScheme::Rk4] {
            let mut b = body(scheme);
            b.accelerate(Vec2f::new(0.0, 1000.0));
            b.update_position(1.0 / 60.0);
            assert_eq!(b.acceleration(), Vec2f::zeros(), "{scheme:?}");
        }
    }

    #[test]
    fn verlet_step_matches_formula() {
        let mut b = body(IntegrationScheme::Verlet);
        // 120 units/s over the default 1/60 s step is a 2 unit displacement
        b.set_velocity(Vec2f::new(120.0, 0.0));
        b.accelerate(Vec2f::new(0.0, 100.0));
        b.update_position(0.1);
        // x = x + (x - x_prev) + a dt^2
        assert!((b.position() - Vec2f::new(102.0, 101.0)).norm() < 1e-9);
        assert_eq!(b.previous_position(), Vec2f::new(100.0, 100.0));
        assert_eq!(b.last_step(), 0.1);
        assert!((b.velocity() - Vec2f::new(20.0, 10.0)).norm() < 1e-9);
    }

    #[test]
    fn euler_step_kicks_then_drifts() {
        let mut b = body(IntegrationScheme::Euler);
        b.set_velocity(Vec2f::new(10.0, 0.0));
        b.accelerate(Vec2f::new(0.0, 10.0));
        b.update_position(0.5);
        assert_eq!(b.velocity(), Vec2f::new(10.0, 5.0));
        assert!((b.position() - Vec2f::new(105.0, 102.5)).norm() < 1e-12);
    }

    #[test]
    fn zero_dt_keeps_positions_of_moving_bodies() {
        for scheme in [IntegrationScheme::Verlet, IntegrationScheme::Euler, IntegrationScheme::Rk4] {
            let mut b = body(scheme);
            b.set_velocity(Vec2f::new(180.0, 0.0));
            b.accelerate(Vec2f::new(0.0, 1000.0));
            b.update_position(0.0);
            assert_eq!(b.position(), Vec2f::new(100.0, 100.0), "{scheme:?}");
            assert_eq!(b.acceleration(), Vec2f::zeros(), "{scheme:?}");
            assert!((b.velocity() - Vec2f::new(180.0, 0.0)).norm() < 1e-9, "{scheme:?}");
        }
    }

    #[test]
    fn switching_scheme_keeps_velocity() {
        let mut b = body(IntegrationScheme::Euler);
        b.set_velocity(Vec2f::new(3.0, -4.0));
        b.set_scheme(IntegrationScheme::Verlet);
        assert!((b.velocity() - Vec2f::new(3.0, -4.0)).norm() < 1e-9);
    }

    #[test]
    fn switching_from_verlet_keeps_speed() {
        let dt = 1.0 / 60.0;
        let mut b = body(IntegrationScheme::Verlet);
        b.set_velocity(Vec2f::new(120.0, 0.0));
        b.update_position(dt);
        let moved_verlet = b.position().x - 100.0;

        b.set_scheme(IntegrationScheme::Euler);
        let before = b.position();
        b.update_position(dt);
        let moved_euler = b.position().x - before.x;

        assert!((moved_verlet - 2.0).abs() < 1e-9);
        assert!((moved_euler - 2.0).abs() < 1e-9);
        assert!((b.velocity() - Vec2f::new(120.0, 0.0)).norm() < 1e-9);
    }
}
