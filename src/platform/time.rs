//! Fixed timestep accumulator

use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS, TIME_STEP_MS};

/// Turns variable frame times into a whole number of fixed ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTimestep {
    accumulator: f32,
    step: f32,
    max_substeps: u32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(TIME_STEP_MS, MAX_SUBSTEPS)
    }
}

impl FixedTimestep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        debug_assert!(step > 0.0, "non-positive timestep");
        Self {
            accumulator: 0.0,
            step,
            max_substeps,
        }
    }

    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add a frame's elapsed time and return how many ticks to run
    ///
    /// Long frames are clamped and at most `max_substeps` ticks are returned
    /// so a stall can't spiral; leftover time carries into the next frame.
    pub fn advance(&mut self, elapsed_ms: f32) -> u32 {
        self.accumulator += elapsed_ms.clamp(0.0, MAX_FRAME_MS);

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }
        ticks
    }
}
