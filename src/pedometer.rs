//! Simulated step counter
//!
//! No sensor is read. While the pedometer view is shown the count grows by a
//! fixed amount every tick.

/// Steps added per tick
pub const STEP_DELTA: u32 = 5;

/// The count stops here so "Steps: N" always fits across the panel.
pub const MAX_STEPS: u32 = 999_999;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StepCounter {
    steps: u32,
}

impl StepCounter {
    pub const fn new() -> Self {
        Self { steps: 0 }
    }

    pub const fn steps(&self) -> u32 {
        self.steps
    }

    pub fn step(&mut self) -> u32 {
        self.steps = self.steps.saturating_add(STEP_DELTA).min(MAX_STEPS);
        self.steps
    }
}
