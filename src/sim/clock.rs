//! Fixed timestep accumulator
//!
//! Turns variable frame deltas into a whole number of `SIM_DT` steps. Long
//! frames are clamped first so a stall can't queue up an unbounded backlog.

use crate::consts::{MAX_FRAME_DELTA, SIM_DT};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTimestep {
    step: f32,
    max_frame_delta: f32,
    accumulator: f32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_FRAME_DELTA)
    }
}

impl FixedTimestep {
    pub fn new(step: f32, max_frame_delta: f32) -> Self {
        Self {
            step,
            max_frame_delta,
            accumulator: 0.0,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Feed one frame's elapsed time; returns how many fixed steps are due
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if self.step <= 0.0 {
            return 0;
        }

        self.accumulator += frame_dt.clamp(0.0, self.max_frame_delta);

        let mut steps = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            steps += 1;
        }
        steps
    }

    /// `advance`, then call `tick(step)` once per due step
    pub fn run(&mut self, frame_dt: f32, mut tick: impl FnMut(f32)) -> u32 {
        let steps = self.advance(frame_dt);
        for _ in 0..steps {
            tick(self.step);
        }
        steps
    }

    /// Fraction of a step left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        if self.step <= 0.0 {
            return 0.0;
        }
        self.accumulator / self.step
    }
}
