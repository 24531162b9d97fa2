//! Build a populated `World` from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing), validates it into runtime
//! `Parameters`, and fills the world with the configured objects followed by
//! the optional random scatter.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::configuration::config::{ObjectConfig, ScenarioConfig, WorldConfig};
use crate::math::Vec2f;
use crate::simulation::error::SimError;
use crate::simulation::integrator::IntegrationScheme;
use crate::simulation::params::{Arena, Parameters};
use crate::simulation::shape::{Object, Shape};
use crate::simulation::world::World;

/// A world ready to be driven by the viewer or the headless runner
#[derive(Debug)]
pub struct Scenario {
    pub world: World,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, SimError> {
        let parameters = parameters_from(&cfg.world);
        let default_scheme = parameters.integrator;
        let mut world = World::new(parameters)?;

        for object_cfg in &cfg.objects {
            world.add_object(object_from(object_cfg, default_scheme)?);
        }

        if let Some(scatter) = &cfg.scatter {
            let mut rng = StdRng::seed_from_u64(scatter.seed);
            world.scatter_circles(scatter.count, scatter.min_radius, scatter.max_radius, &mut rng)?;
        }

        info!(objects = world.len(), "scenario built");
        Ok(Self { world })
    }
}

fn vec2(v: [f64; 2]) -> Vec2f {
    Vec2f::new(v[0], v[1])
}

fn parameters_from(cfg: &WorldConfig) -> Parameters {
    Parameters {
        gravity: vec2(cfg.gravity),
        restitution: cfg.restitution,
        friction: cfg.friction,
        arena: Arena {
            center: vec2(cfg.arena.center),
            radius: cfg.arena.radius,
        },
        integrator: cfg.integrator,
        spawn_radius: cfg.spawn_radius,
    }
}

fn object_from(cfg: &ObjectConfig, default_scheme: IntegrationScheme) -> Result<Object, SimError> {
    let (shape, position, body, mass, velocity, integrator) = match *cfg {
        ObjectConfig::Circle { radius, position, body, mass, velocity, integrator } => {
            (Shape::circle(radius)?, position, body, mass, velocity, integrator)
        }
        ObjectConfig::Rectangle { width, height, position, body, mass, velocity, integrator } => {
            (Shape::rectangle(width, height)?, position, body, mass, velocity, integrator)
        }
    };

    if !body {
        return Object::new_static(shape, vec2(position));
    }

    let scheme = integrator.unwrap_or(default_scheme);
    let mass = mass.unwrap_or_else(|| shape.default_mass());
    let mut object = Object::with_mass(shape, vec2(position), mass, scheme)?;
    if let (Some(v), Some(b)) = (velocity, object.body_mut()) {
        b.set_velocity(vec2(v));
    }
    Ok(object)
}
