/*
 * Runtime Inputs Module
 *
 * Mutable state shared between the host's event handlers and the simulation
 * tick: the pointer position, the viewport size, the tick clock and the
 * random-cycle mode selector. Event handlers write it, the tick reads it.
 */

use nannou::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::params::MotionMode;
use crate::viewport::Viewport;

/// Ticks between random-cycle reselections (about five seconds at 60 Hz).
pub const MODE_CYCLE_TICKS: u32 = 300;
/// Simulated seconds per tick.
pub const FRAME_SECONDS: f32 = 1.0 / 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeCycle {
    current: MotionMode,
    countdown: u32,
}

impl Default for ModeCycle {
    fn default() -> Self {
        Self {
            current: MotionMode::FlowDrift,
            countdown: MODE_CYCLE_TICKS,
        }
    }
}

impl ModeCycle {
    pub fn current(&self) -> MotionMode {
        self.current
    }

    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    // Count down one tick; returns the newly selected mode when the countdown expires
    pub fn advance<R: Rng>(&mut self, rng: &mut R) -> Option<MotionMode> {
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown > 0 {
            return None;
        }

        self.countdown = MODE_CYCLE_TICKS;
        self.current = *MotionMode::CYCLE.choose(rng).unwrap_or(&MotionMode::FlowDrift);
        Some(self.current)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuntimeInputs {
    /// Last pointer or touch position in canvas space, `None` while absent.
    pub pointer: Option<Vec2>,
    pub viewport: Viewport,
    pub cycle: ModeCycle,
    ticks: u64,
}

impl RuntimeInputs {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn advance_clock(&mut self) {
        self.ticks += 1;
    }

    pub fn elapsed_seconds(&self) -> f32 {
        self.ticks as f32 * FRAME_SECONDS
    }

    /// Phase used by the noise field, waves and attractor path.
    pub fn phase(&self, speed: f32) -> f32 {
        self.elapsed_seconds() * speed
    }

    /// Resolves `RandomCycle` to the mode currently selected by the cycle.
    pub fn effective_mode(&self, configured: MotionMode) -> MotionMode {
        match configured {
            MotionMode::RandomCycle => self.cycle.current(),
            mode => mode,
        }
    }
}
