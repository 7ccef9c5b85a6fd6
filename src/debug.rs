/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * and simulation state to be displayed in the UI.
 *
 * Includes metrics for:
 * - FPS (frames per second)
 * - Frame time
 * - Number of live particles
 * - The mode currently driving the particles
 * - Ticks since the loop started
 */

use std::time::Duration;

use crate::params::MotionMode;

// Debug information to display
#[derive(Debug, Clone)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub live_particles: usize,
    pub effective_mode: MotionMode,
    pub ticks: u64,
}

impl Default for DebugInfo {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time: Duration::ZERO,
            live_particles: 0,
            effective_mode: MotionMode::default(),
            ticks: 0,
        }
    }
}
