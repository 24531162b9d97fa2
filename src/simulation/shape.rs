//! Shapes and the objects that carry them
//!
//! A shape is a closed variant (circle or axis-aligned rectangle centred on
//! its position). An `Object` pairs a shape with either a static position or
//! an owned `Body`; objects without a body are decoration only and never take
//! part in integration, gravity, the boundary constraint or collisions.

use crate::math::Vec2f;
use crate::simulation::body::Body;
use crate::simulation::error::SimError;
use crate::simulation::integrator::IntegrationScheme;

pub const CIRCLE_DEFAULT_MASS: f64 = 500.0;
pub const RECTANGLE_DEFAULT_MASS: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { radius: f64 },
    Rectangle { width: f64, height: f64 },
}

impl Shape {
    pub fn circle(radius: f64) -> Result<Self, SimError> {
        let shape = Shape::Circle { radius };
        shape.validate()?;
        Ok(shape)
    }

    pub fn rectangle(width: f64, height: f64) -> Result<Self, SimError> {
        let shape = Shape::Rectangle { width, height };
        shape.validate()?;
        Ok(shape)
    }

    /// Reject non-positive or non-finite extents
    pub fn validate(&self) -> Result<(), SimError> {
        let check = |what: &'static str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SimError::InvalidArgument { what, value })
            }
        };
        match *self {
            Shape::Circle { radius } => check("radius", radius),
            Shape::Rectangle { width, height } => {
                check("width", width)?;
                check("height", height)
            }
        }
    }

    pub fn default_mass(&self) -> f64 {
        match self {
            Shape::Circle { .. } => CIRCLE_DEFAULT_MASS,
            Shape::Rectangle { .. } => RECTANGLE_DEFAULT_MASS,
        }
    }

    /// Radius of the smallest centred circle containing the shape
    /// (half-diagonal for rectangles)
    pub fn bounding_radius(&self) -> f64 {
        match *self {
            Shape::Circle { radius } => radius,
            Shape::Rectangle { width, height } => 0.5 * width.hypot(height),
        }
    }

    /// Half width and half height of the axis-aligned bounding box
    pub fn half_extents(&self) -> Vec2f {
        match *self {
            Shape::Circle { radius } => Vec2f::new(radius, radius),
            Shape::Rectangle { width, height } => Vec2f::new(0.5 * width, 0.5 * height),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Circle { .. } => "circle",
            Shape::Rectangle { .. } => "rectangle",
        }
    }
}

/// A shape plus its physics, owned by the world once added
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    shape: Shape,
    position: Vec2f, // reference position, authoritative only without a body
    body: Option<Body>,
}

impl Object {
    /// Static object: drawn, never simulated
    pub fn new_static(shape: Shape, position: Vec2f) -> Result<Self, SimError> {
        shape.validate()?;
        Ok(Self { shape, position, body: None })
    }

    /// Simulated object using the shape's default mass
    pub fn new_dynamic(shape: Shape, position: Vec2f, scheme: IntegrationScheme) -> Result<Self, SimError> {
        Self::with_mass(shape, position, shape.default_mass(), scheme)
    }

    /// Simulated object with an explicit mass
    pub fn with_mass(shape: Shape, position: Vec2f, mass: f64, scheme: IntegrationScheme) -> Result<Self, SimError> {
        shape.validate()?;
        let body = Body::new(mass, position, scheme)?;
        Ok(Self { shape, position, body: Some(body) })
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Body position when simulated, reference position otherwise
    pub fn position(&self) -> Vec2f {
        self.body.as_ref().map_or(self.position, Body::position)
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// Mutable access for callers preparing an object before handing it to
    /// the world; the world itself never exposes this
    pub fn body_mut(&mut self) -> Option<&mut Body> {
        self.body.as_mut()
    }
}
