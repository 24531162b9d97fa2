//! Global simulation parameters
//!
//! `Parameters` holds the world-wide settings:
//! - gravity (screen space, +y is down),
//! - restitution and friction used by the collision response,
//! - the circular arena every body is confined to,
//! - the integration scheme and radius used for input-driven spawns

use crate::math::Vec2f;
use crate::simulation::error::SimError;
use crate::simulation::integrator::IntegrationScheme;

/// Circular region bodies are kept inside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub center: Vec2f,
    pub radius: f64,
}

impl Arena {
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(SimError::InvalidArgument { what: "arena radius", value: self.radius });
        }
        Ok(())
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            center: Vec2f::new(500.0, 500.0),
            radius: 450.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub gravity: Vec2f, // acceleration applied to every body each tick
    pub restitution: f64, // bounce energy retention, [0, 1]
    pub friction: f64, // tangential drag scale, >= 0
    pub arena: Arena, // boundary constraint
    pub integrator: IntegrationScheme, // default scheme for spawned bodies
    pub spawn_radius: f64, // radius of circles spawned from input
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            gravity: Vec2f::new(0.0, 1000.0),
            restitution: 0.2,
            friction: 0.1,
            arena: Arena::default(),
            integrator: IntegrationScheme::Verlet,
            spawn_radius: 20.0,
        }
    }
}

impl Parameters {
    /// Check every range constraint
    pub fn validate(&self) -> Result<(), SimError> {
        validate_gravity(self.gravity)?;
        validate_restitution(self.restitution)?;
        validate_friction(self.friction)?;
        self.arena.validate()?;
        if !(self.spawn_radius.is_finite() && self.spawn_radius > 0.0) {
            return Err(SimError::InvalidArgument { what: "spawn radius", value: self.spawn_radius });
        }
        Ok(())
    }
}

pub(crate) fn validate_gravity(gravity: Vec2f) -> Result<(), SimError> {
    match gravity.iter().find(|g| !g.is_finite()) {
        Some(&value) => Err(SimError::InvalidArgument { what: "gravity", value }),
        None => Ok(()),
    }
}

pub(crate) fn validate_restitution(restitution: f64) -> Result<(), SimError> {
    if !(0.0..=1.0).contains(&restitution) {
        return Err(SimError::InvalidArgument { what: "restitution", value: restitution });
    }
    Ok(())
}

pub(crate) fn validate_friction(friction: f64) -> Result<(), SimError> {
    if !(friction.is_finite() && friction >= 0.0) {
        return Err(SimError::InvalidArgument { what: "friction", value: friction });
    }
    Ok(())
}
