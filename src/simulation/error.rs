use thiserror::Error;

use crate::simulation::world::ObjectId;

/// Errors raised at the simulation's API boundary
///
/// In-pipeline numeric edge cases (zero distances, zero-length normals) are
/// handled locally and never surface here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A construction or configuration value was out of range
    #[error("invalid {what}: {value}")]
    InvalidArgument { what: &'static str, value: f64 },

    /// The handle does not name an object in this world
    #[error("no object with id {0}")]
    UnknownObject(ObjectId),
}
