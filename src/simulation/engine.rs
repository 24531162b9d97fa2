//! Headless driver
//!
//! Runs a world for a fixed number of ticks with a constant `dt`, standing in
//! for the windowed clock when no display is available.

use tracing::{debug, info};

use crate::simulation::error::SimError;
use crate::simulation::world::World;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunSummary {
    pub ticks: usize,
    pub collisions: usize, // resolved pairs over the whole run
    pub simulated_time: f64,
}

/// Advance `world` by `ticks` steps of `dt` seconds
pub fn run_headless(world: &mut World, ticks: usize, dt: f64) -> Result<RunSummary, SimError> {
    let mut summary = RunSummary::default();

    for tick in 0..ticks {
        let report = world.step(dt)?;
        summary.ticks += 1;
        summary.collisions += report.collisions;
        summary.simulated_time += dt;

        if report.collisions > 0 {
            debug!(tick, collisions = report.collisions, "tick");
        }
    }

    info!(
        ticks = summary.ticks,
        collisions = summary.collisions,
        simulated_time = summary.simulated_time,
        objects = world.len(),
        "headless run finished"
    );
    Ok(summary)
}
