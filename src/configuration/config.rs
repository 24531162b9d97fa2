//! Configuration types for loading arena scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`WorldConfig`]   – gravity, collision coefficients, arena, default integrator
//! - [`ObjectConfig`]  – initial shape, position and physics of each object
//! - [`ScatterConfig`] – optional batch of random circles
//! - [`ScenarioConfig`] – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! world:
//!   gravity: [0.0, 1000.0]   # screen space, +y is down
//!   restitution: 0.2         # [0, 1]
//!   friction: 0.1            # >= 0
//!   arena:
//!     center: [500.0, 500.0]
//!     radius: 450.0
//!   integrator: "verlet"     # or "euler", "rk4"
//!   spawn_radius: 20.0       # circles spawned with the mouse
//!
//! objects:
//!   - shape: circle
//!     radius: 20.0
//!     position: [300.0, 200.0]
//!   - shape: rectangle
//!     width: 20.0
//!     height: 40.0
//!     position: [650.0, 300.0]
//!     velocity: [-120.0, 0.0] # units per second
//!     integrator: "rk4"
//!   - shape: circle
//!     radius: 60.0
//!     position: [500.0, 800.0]
//!     body: false            # decoration, never simulated
//!
//! scatter:
//!   count: 40
//!   min_radius: 8.0
//!   max_radius: 18.0
//!   seed: 42
//! ```
//!
//! Every `world` field is optional and falls back to the engine defaults.

use serde::Deserialize;

use crate::simulation::integrator::IntegrationScheme;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ArenaConfig {
    pub center: [f64; 2],
    pub radius: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self { center: [500.0, 500.0], radius: 450.0 }
    }
}

/// Global world settings
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub gravity: [f64; 2], // acceleration applied every tick
    pub restitution: f64, // collision bounce, [0, 1]
    pub friction: f64, // tangential drag, >= 0
    pub arena: ArenaConfig, // circular boundary
    pub integrator: IntegrationScheme, // default for objects and spawns
    pub spawn_radius: f64, // radius of input-spawned circles
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, 1000.0],
            restitution: 0.2,
            friction: 0.1,
            arena: ArenaConfig::default(),
            integrator: IntegrationScheme::Verlet,
            spawn_radius: 20.0,
        }
    }
}

fn default_body() -> bool {
    true
}

/// One object's initial state
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum ObjectConfig {
    Circle {
        radius: f64,
        position: [f64; 2],
        #[serde(default = "default_body")]
        body: bool, // false -> static decoration
        #[serde(default)]
        mass: Option<f64>, // shape default when absent
        #[serde(default)]
        velocity: Option<[f64; 2]>, // units per second, any integrator
        #[serde(default)]
        integrator: Option<IntegrationScheme>, // world default when absent
    },
    Rectangle {
        width: f64,
        height: f64,
        position: [f64; 2],
        #[serde(default = "default_body")]
        body: bool,
        #[serde(default)]
        mass: Option<f64>,
        #[serde(default)]
        velocity: Option<[f64; 2]>,
        #[serde(default)]
        integrator: Option<IntegrationScheme>,
    },
}

/// Random circles dropped into the arena at load time
#[derive(Deserialize, Debug, Clone)]
pub struct ScatterConfig {
    pub count: usize,
    pub min_radius: f64,
    pub max_radius: f64,
    #[serde(default)]
    pub seed: u64, // deterministic seed to make runs reproducible
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub objects: Vec<ObjectConfig>,
    #[serde(default)]
    pub scatter: Option<ScatterConfig>,
}
