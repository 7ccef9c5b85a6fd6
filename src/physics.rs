/*
 * Physics Module
 *
 * The field/force model of the particle flow simulation. Given a particle, the
 * sanitized config and the runtime inputs it computes the particle's motion
 * for one tick:
 * 1. Mode kinematics: flow field, perspective expansion, waves, random walk,
 *    attractor flocking or antigravity drift
 * 2. Pointer force: attraction (or repulsion in antigravity mode) inside a
 *    fixed radius, only when the config is interactive
 * 3. Friction and position integration
 * 4. Toroidal wrapping at the viewport edges (every mode but on-camera)
 *
 * Every function here is total: distance divisions are floored and the noise
 * is built from sin/cos only.
 */

use std::f32::consts::TAU;

use nannou::prelude::*;
use rand::Rng;

use crate::params::{MotionMode, SimulationConfig};
use crate::particle::Particle;
use crate::runtime::RuntimeInputs;
use crate::viewport::Viewport;

// Flow field
pub const NOISE_SCALE: f32 = 0.005;
pub const FLOW_STEP: f32 = 0.1;
pub const DRIFT_SPEED: f32 = 0.5;

// On-camera perspective
pub const MAX_DEPTH: f32 = 1000.0;
pub const FOCAL_LENGTH: f32 = 300.0;
pub const NEAR_CLIP: f32 = -FOCAL_LENGTH + 10.0;
pub const DEPTH_STEP: f32 = 10.0;
pub const PERSPECTIVE_SPREAD: f32 = 0.01;
pub const MIN_PROJECTION_DEPTH: f32 = 1.0;

// Oceanic waves
pub const WAVE_SCALE: f32 = 0.01;
pub const WAVE_AMPLITUDE: f32 = 0.5;
pub const WAVE_DRIFT: f32 = 0.2;

// Flocking attractor
pub const FLOCK_PULL: f32 = 0.0005;
pub const FLOCK_JITTER: f32 = 2.0;
pub const FLOCK_ORBIT: (f32, f32) = (300.0, 200.0);
pub const FLOCK_Y_RATE: f32 = 0.7;

// Antigravity
pub const ANTIGRAVITY_NOISE_SCALE: f32 = 0.01;
pub const ANTIGRAVITY_STEP_FACTOR: f32 = 0.5;

// Pointer
pub const ATTRACT_RADIUS: f32 = 300.0;
pub const ATTRACT_STRENGTH: f32 = 1.5;
pub const REPEL_RADIUS: f32 = 150.0;
pub const REPEL_STRENGTH: f32 = 1.0;
pub const MIN_DISTANCE: f32 = 1e-3;

pub const FRICTION: f32 = 0.95;

/// Velocity and depth of a particle after the mode kinematics of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub velocity: Vec2,
    pub depth: f32,
}

/// Cheap smooth pseudo-noise over position and time, roughly in [-2, 2].
pub fn flow_noise(x: f32, y: f32, t: f32) -> f32 {
    x.sin() * y.cos() + t.sin()
}

/// Time-independent noise used by the antigravity field.
pub fn drift_noise(x: f32, y: f32) -> f32 {
    (x * ANTIGRAVITY_NOISE_SCALE).sin() + (y * ANTIGRAVITY_NOISE_SCALE).cos()
}

/// Steering angle of the flow field at `position`.
pub fn steering_angle(position: Vec2, phase: f32, flow_intensity: f32) -> f32 {
    flow_noise(position.x * NOISE_SCALE, position.y * NOISE_SCALE, phase) * TAU * flow_intensity
}

// Uniform jitter in [-0.5, 0.5) on both axes, scaled
fn jitter<R: Rng>(rng: &mut R, scale: f32) -> Vec2 {
    vec2(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5) * scale
}

/// Position of the flocking attractor at `phase`.
pub fn attractor(viewport: &Viewport, phase: f32) -> Vec2 {
    viewport.center() + vec2(phase.sin() * FLOCK_ORBIT.0, (phase * FLOCK_Y_RATE).cos() * FLOCK_ORBIT.1)
}

/// Applies the kinematics of `mode` to the particle. `mode` must already be
/// resolved; `RandomCycle` is treated as its current selection by callers.
pub fn mode_motion<R: Rng>(
    mode: MotionMode,
    particle: &Particle,
    config: &SimulationConfig,
    inputs: &RuntimeInputs,
    rng: &mut R,
) -> Motion {
    let speed = config.speed;
    let phase = inputs.phase(speed);
    let position = particle.position;
    let mut velocity = particle.velocity;
    let mut depth = particle.depth;

    match mode {
        MotionMode::FlowDrift | MotionMode::RandomCycle => {
            let angle = steering_angle(position, phase, config.flow_intensity);
            velocity += vec2(angle.cos(), angle.sin()) * FLOW_STEP;
            velocity.x -= DRIFT_SPEED * speed;
        }
        MotionMode::OnCamera => {
            depth -= DEPTH_STEP * speed;
            // Radial expansion away from the centre
            velocity = (position - inputs.viewport.center()) * PERSPECTIVE_SPREAD * speed;
        }
        MotionMode::Oceanic => {
            velocity = vec2(
                (position.y * WAVE_SCALE + phase).sin(),
                (position.x * WAVE_SCALE + phase).cos(),
            ) * WAVE_AMPLITUDE
                * speed;
            velocity.x += WAVE_DRIFT * speed;
        }
        MotionMode::Brownian => {
            velocity += jitter(rng, speed);
        }
        MotionMode::Flocking => {
            let target = attractor(&inputs.viewport, phase);
            velocity += (target - position) * FLOCK_PULL * speed;
            // Stands in for separation and alignment
            velocity += jitter(rng, FLOCK_JITTER * speed);
        }
        MotionMode::Antigravity => {
            let angle = drift_noise(position.x * NOISE_SCALE, position.y * NOISE_SCALE) * TAU * config.flow_intensity;
            velocity += vec2(angle.cos(), angle.sin()) * FLOW_STEP * speed * ANTIGRAVITY_STEP_FACTOR;
        }
    }

    Motion { velocity, depth }
}

/// Radius and signed strength of the pointer force for a mode.
pub fn pointer_field(mode: MotionMode) -> (f32, f32) {
    match mode {
        MotionMode::Antigravity => (REPEL_RADIUS, -REPEL_STRENGTH),
        _ => (ATTRACT_RADIUS, ATTRACT_STRENGTH),
    }
}

/// Whether the pointer acts on particles. Antigravity repels regardless of
/// the interactive toggle.
pub fn pointer_enabled(mode: MotionMode, is_interactive: bool) -> bool {
    is_interactive || mode == MotionMode::Antigravity
}

/// Factor applied to the pointer force and to integration. Antigravity moves
/// at unscaled velocity; speed only enters through its flow step.
pub fn step_scale(mode: MotionMode, speed: f32) -> f32 {
    match mode {
        MotionMode::Antigravity => 1.0,
        _ => speed,
    }
}

/// Velocity change caused by the pointer. Zero when the pointer is absent or
/// out of range. The force grows linearly from the radius inwards.
pub fn pointer_force(mode: MotionMode, position: Vec2, pointer: Option<Vec2>, speed: f32) -> Vec2 {
    let Some(pointer) = pointer else {
        return Vec2::ZERO;
    };

    let (radius, strength) = pointer_field(mode);
    let offset = pointer - position;
    let dist = offset.length();
    if !dist.is_finite() || dist >= radius {
        return Vec2::ZERO;
    }

    let force = (radius - dist) / radius;
    let direction = offset / dist.max(MIN_DISTANCE);
    direction * force * strength * step_scale(mode, speed)
}

pub fn apply_friction(velocity: Vec2) -> Vec2 {
    velocity * FRICTION
}

pub fn integrate(position: Vec2, velocity: Vec2, speed: f32) -> Vec2 {
    position + velocity * speed
}

// Wrap a position around the viewport edges
pub fn wrap_edges(mut position: Vec2, viewport: &Viewport) -> Vec2 {
    if position.x < 0.0 {
        position.x = viewport.width;
    } else if position.x > viewport.width {
        position.x = 0.0;
    }

    if position.y < 0.0 {
        position.y = viewport.height;
    } else if position.y > viewport.height {
        position.y = 0.0;
    }

    position
}

/// On-camera size scale for a particle at `depth`.
pub fn perspective_scale(depth: f32) -> f32 {
    (FOCAL_LENGTH / (FOCAL_LENGTH + depth).max(MIN_PROJECTION_DEPTH)).clamp(0.25, 4.0)
}
