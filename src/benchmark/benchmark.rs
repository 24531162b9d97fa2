use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::simulation::error::SimError;
use crate::simulation::params::Parameters;
use crate::simulation::world::World;

/// Wall time and resolved collisions of one timed run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickTiming {
    pub elapsed: f64, // seconds over all timed ticks
    pub collisions: usize,
}

/// Time the full tick pipeline for growing object counts
/// Collision detection is all-pairs, so expect roughly quadratic growth.
pub fn bench_tick() {
    // Different world sizes to test
    let ns = [50, 100, 200, 400, 800, 1600];
    let ticks = 60; // one simulated second at 60 Hz
    let dt = 1.0 / 60.0;

    for n in ns {
        match time_ticks(n, ticks, dt) {
            Ok(timing) => info!(
                "N = {n:5}, {ticks} ticks = {:8.6} s, per tick = {:8.6} s, collisions = {}",
                timing.elapsed,
                timing.elapsed / ticks as f64,
                timing.collisions
            ),
            Err(err) => {
                warn!("bench_tick: {err}");
                return;
            }
        }
    }
}

/// Scatter `n` circles and time `ticks` steps of `dt` after one warm-up step
pub fn time_ticks(n: usize, ticks: usize, dt: f64) -> Result<TickTiming, SimError> {
    let mut world = World::new(Parameters::default())?;

    // deterministic scatter so runs are comparable
    let mut rng = StdRng::seed_from_u64(42);
    world.scatter_circles(n, 3.0, 8.0, &mut rng)?;

    // Warm up
    world.step(dt)?;

    let t0 = Instant::now();
    let mut collisions = 0;
    for _ in 0..ticks {
        collisions += world.step(dt)?.collisions;
    }

    Ok(TickTiming { elapsed: t0.elapsed().as_secs_f64(), collisions })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_run_is_timed() {
        let timing = time_ticks(20, 5, 1.0 / 60.0).unwrap();
        assert!(timing.elapsed >= 0.0);
    }

    #[test]
    fn warm_up_failure_is_reported() {
        assert!(matches!(
            time_ticks(5, 5, -1.0),
            Err(SimError::InvalidArgument { what: "time step", .. })
        ));
    }
}
