pub mod body;
pub mod collision;
pub mod constraint;
pub mod engine;
pub mod error;
pub mod input;
pub mod integrator;
pub mod params;
pub mod scenario;
pub mod shape;
pub mod world;
