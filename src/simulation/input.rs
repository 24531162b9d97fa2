//! Edge-triggered spawn input
//!
//! The windowing layer reports the raw button state every frame; the world
//! turns it into at most one spawn per press/release cycle.

use crate::math::Vec2f;

/// Input state sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSample {
    pub spawn_held: bool, // spawn button currently down
    pub cursor: Vec2f, // cursor position in world coordinates
}

impl InputSample {
    pub fn pressed_at(cursor: Vec2f) -> Self {
        Self { spawn_held: true, cursor }
    }

    pub fn released() -> Self {
        Self::default()
    }
}

/// Latch that fires on the released -> held transition only
#[derive(Debug, Clone, Default)]
pub struct SpawnTrigger {
    latched: bool,
}

impl SpawnTrigger {
    /// Returns the spawn point when this sample starts a new press
    pub fn poll(&mut self, sample: &InputSample) -> Option<Vec2f> {
        if !sample.spawn_held {
            self.latched = false;
            return None;
        }
        if self.latched {
            return None;
        }
        self.latched = true;
        Some(sample.cursor)
    }
}
