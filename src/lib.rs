pub mod math;
pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use math::{MathError, Vec2f, Vec2i, Vector2Ext, Vector2FloatExt};

pub use simulation::body::Body;
pub use simulation::collision::{Contact, Response, VELOCITY_DAMPING};
pub use simulation::engine::{run_headless, RunSummary};
pub use simulation::error::SimError;
pub use simulation::input::{InputSample, SpawnTrigger};
pub use simulation::integrator::IntegrationScheme;
pub use simulation::params::{Arena, Parameters};
pub use simulation::scenario::Scenario;
pub use simulation::shape::{Object, Shape};
pub use simulation::world::{ObjectId, ObjectSnapshot, TickReport, World};

pub use configuration::config::{ArenaConfig, ObjectConfig, ScatterConfig, ScenarioConfig, WorldConfig};

pub use visualization::rbsim_vis2d::run_2d;

pub use benchmark::benchmark::{bench_tick, time_ticks, TickTiming};
