/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationConfig struct that holds every adjustable
 * parameter of the particle flow simulation, and the MotionMode enum that
 * selects which force model drives the particles. The config is owned by the
 * host (UI, config file) and handed to the simulation whole whenever it
 * changes; the simulation only ever reads a sanitized copy.
 */

use std::path::Path;

use nannou::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::FlowError;

pub const DEFAULT_COLOR: &str = "#4285F4";
pub const MAX_SPEED: f32 = 50.0;
pub const MAX_FLOW_INTENSITY: f32 = 10.0;
pub const MAX_TRAIL_LENGTH: f32 = 0.99;
pub const PARTICLE_COUNT_STEP: usize = 50;

// Named swatches offered by the control panel
pub const SWATCHES: [(&str, &str); 5] = [
    ("Blue", "#4285F4"),
    ("Red", "#EA4335"),
    ("Yellow", "#FBBC04"),
    ("Green", "#34A853"),
    ("White", "#ffffff"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MotionMode {
    /// Noise-steered drift towards the left edge.
    #[serde(alias = "right-to-left")]
    FlowDrift,
    /// Particles fly towards the viewer out of the screen centre.
    OnCamera,
    /// Phase-shifted sine waves with a slow forward drift.
    Oceanic,
    /// Random walk.
    Brownian,
    /// Weak pull towards a wandering attractor plus jitter.
    Flocking,
    /// Plain flow field with pointer repulsion.
    Antigravity,
    /// Periodically picks one of `MotionMode::CYCLE`.
    #[serde(alias = "random")]
    RandomCycle,
}

impl MotionMode {
    /// Modes the random cycle chooses from.
    pub const CYCLE: [MotionMode; 5] = [
        MotionMode::FlowDrift,
        MotionMode::OnCamera,
        MotionMode::Oceanic,
        MotionMode::Brownian,
        MotionMode::Flocking,
    ];

    pub const ALL: [MotionMode; 7] = [
        MotionMode::FlowDrift,
        MotionMode::OnCamera,
        MotionMode::Oceanic,
        MotionMode::Brownian,
        MotionMode::Flocking,
        MotionMode::Antigravity,
        MotionMode::RandomCycle,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MotionMode::FlowDrift => "Flow Drift (Right to Left)",
            MotionMode::OnCamera => "On Camera (3D)",
            MotionMode::Oceanic => "Oceanic (Waves)",
            MotionMode::Brownian => "Brownian (Noise)",
            MotionMode::Flocking => "Flocking (Boids)",
            MotionMode::Antigravity => "Antigravity (Repel)",
            MotionMode::RandomCycle => "Random (Cycle)",
        }
    }
}

impl Default for MotionMode {
    fn default() -> Self {
        MotionMode::FlowDrift
    }
}

// Parameters for the simulation that can be adjusted via UI or a config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationConfig {
    pub particle_count: usize,
    pub speed: f32,
    pub trail_length: f32,
    pub flow_intensity: f32,
    pub base_color: String,
    pub motion_mode: MotionMode,
    pub decay: f32,
    pub is_interactive: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            particle_count: 200,
            speed: 1.5,
            trail_length: 0.8,
            flow_intensity: 1.0,
            base_color: DEFAULT_COLOR.to_string(),
            motion_mode: MotionMode::FlowDrift,
            decay: 0.5,
            is_interactive: true,
        }
    }
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> Result<Self, FlowError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, FlowError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Returns a copy that the force model can consume without producing
    /// non-finite positions. Out-of-range values are clamped, non-finite ones
    /// fall back to the defaults.
    pub fn sanitized(&self) -> SimulationConfig {
        let defaults = SimulationConfig::default();
        let finite_or = |value: f32, fallback: f32| if value.is_finite() { value } else { fallback };

        let base_color = match parse_hex_color(&self.base_color) {
            Ok(_) => self.base_color.clone(),
            Err(e) => {
                log::warn!("{}; using {}", e, DEFAULT_COLOR);
                defaults.base_color.clone()
            }
        };

        SimulationConfig {
            particle_count: self.particle_count,
            speed: finite_or(self.speed, defaults.speed).clamp(0.0, MAX_SPEED),
            trail_length: finite_or(self.trail_length, defaults.trail_length).clamp(0.0, MAX_TRAIL_LENGTH),
            flow_intensity: finite_or(self.flow_intensity, defaults.flow_intensity).clamp(0.0, MAX_FLOW_INTENSITY),
            base_color,
            motion_mode: self.motion_mode,
            decay: finite_or(self.decay, defaults.decay).clamp(0.0, 1.0),
            is_interactive: self.is_interactive,
        }
    }

    /// Fill colour for all particles, falling back to the default swatch.
    pub fn color(&self) -> Rgb<u8> {
        parse_hex_color(&self.base_color).unwrap_or_else(|_| rgb(0x42, 0x85, 0xF4))
    }

    // Get parameter ranges for UI sliders
    pub fn get_particle_count_range() -> std::ops::RangeInclusive<usize> {
        50..=1000
    }

    /// Rounds a slider value to the nearest particle count step, within the slider range.
    pub fn snap_particle_count(count: usize) -> usize {
        let range = Self::get_particle_count_range();
        let snapped = (count + PARTICLE_COUNT_STEP / 2) / PARTICLE_COUNT_STEP * PARTICLE_COUNT_STEP;
        snapped.clamp(*range.start(), *range.end())
    }

    pub fn get_speed_range() -> std::ops::RangeInclusive<f32> {
        0.1..=5.0
    }

    pub fn get_trail_length_range() -> std::ops::RangeInclusive<f32> {
        0.0..=MAX_TRAIL_LENGTH
    }

    pub fn get_decay_range() -> std::ops::RangeInclusive<f32> {
        0.01..=1.0
    }

    pub fn get_flow_intensity_range() -> std::ops::RangeInclusive<f32> {
        0.0..=3.0
    }
}

/// Parses `#rrggbb` or `#rgb` (leading `#` optional).
pub fn parse_hex_color(value: &str) -> Result<Rgb<u8>, FlowError> {
    let invalid = || FlowError::InvalidColor(value.to_string());
    let hex = value.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return Err(invalid());
    }

    let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());

    match hex.len() {
        6 => Ok(rgb(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        3 => {
            let expand = |i: usize| channel(&hex[i..i + 1]).map(|c| c * 17);
            Ok(rgb(expand(0)?, expand(1)?, expand(2)?))
        }
        _ => Err(invalid()),
    }
}
