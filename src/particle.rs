/*
 * Particle Module
 *
 * This module defines the Particle struct and its lifecycle rules. A particle
 * is plain data; `update` and `Particle::respawn` return new values instead of
 * mutating shared state, so a tick over the pool is a map over particles.
 *
 * Lifecycle:
 * - Spawned with a random position, size, starting age and lifetime
 * - Aged by one every tick
 * - Respawned when it outlives its lifetime, passes the near clip plane in
 *   on-camera mode, or ends up with a non-finite state
 *
 * Antigravity particles never expire: their age only drives the breathing
 * size, so they are respawned only to recover from a non-finite state.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::params::{MotionMode, SimulationConfig};
use crate::physics::{self, MAX_DEPTH, NEAR_CLIP};
use crate::runtime::RuntimeInputs;
use crate::viewport::Viewport;

pub const BASE_LIFETIME: f32 = 100.0;
pub const LIFETIME_SPREAD: f32 = 200.0;
pub const DECAY_FLOOR: f32 = 0.1;
pub const ANTIGRAVITY_LIFETIME_SPREAD: f32 = 100.0;
pub const INITIAL_AGE_SPREAD: u32 = 100;
pub const CAMERA_SPAWN_SPREAD: f32 = 0.1;

// Size "breathing"
pub const MIN_SIZE: f32 = 0.5;
pub const BREATH_RATE: f32 = 0.05;
pub const BREATH_BASE: f32 = 1.5;
pub const BREATH_AMPLITUDE: f32 = 2.0;
pub const ANTIGRAVITY_BREATH_AMPLITUDE: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Distance from the viewer; only meaningful in on-camera mode.
    pub depth: f32,
    pub size: f32,
    pub age: u32,
    pub max_age: f32,
}

impl Particle {
    /// A fresh particle for a growing pool.
    pub fn spawn<R: Rng>(config: &SimulationConfig, mode: MotionMode, viewport: &Viewport, rng: &mut R) -> Self {
        let velocity = match mode {
            MotionMode::Antigravity => vec2(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5) * config.speed,
            _ => Vec2::ZERO,
        };

        Self {
            position: vec2(uniform(rng, viewport.width), uniform(rng, viewport.height)),
            velocity,
            depth: uniform(rng, MAX_DEPTH),
            size: rng.gen::<f32>() * 2.0 + 1.0,
            // Staggered so the initial population does not expire together
            age: rng.gen_range(0..INITIAL_AGE_SPREAD),
            max_age: draw_max_age(config.decay, mode, rng),
        }
    }

    /// Returns this particle moved back into the spawn region of `mode` with
    /// a zero age and a freshly drawn lifetime.
    pub fn respawn<R: Rng>(&self, config: &SimulationConfig, mode: MotionMode, viewport: &Viewport, rng: &mut R) -> Self {
        let (position, depth) = match mode {
            MotionMode::OnCamera => {
                let offset = vec2(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5) * viewport.size() * CAMERA_SPAWN_SPREAD;
                (viewport.center() + offset, MAX_DEPTH)
            }
            _ => (vec2(uniform(rng, viewport.width), uniform(rng, viewport.height)), 0.0),
        };

        Self {
            position,
            velocity: if self.velocity.is_finite() { self.velocity } else { Vec2::ZERO },
            depth,
            size: self.size,
            age: 0,
            max_age: draw_max_age(config.decay, mode, rng),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.age as f32 > self.max_age
    }

    /// Whether this particle must be respawned after an update under `mode`.
    pub fn needs_respawn(&self, mode: MotionMode) -> bool {
        match mode {
            MotionMode::Antigravity => !self.is_finite(),
            MotionMode::OnCamera => self.is_expired() || self.depth < NEAR_CLIP || !self.is_finite(),
            _ => self.is_expired() || !self.is_finite(),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.depth.is_finite()
    }

    /// Fraction of the lifetime used up, in [0, 1].
    pub fn life_fraction(&self) -> f32 {
        (self.age as f32 / self.max_age.max(1.0)).clamp(0.0, 1.0)
    }

    pub fn opacity(&self, mode: MotionMode) -> f32 {
        match mode {
            MotionMode::Antigravity => 1.0,
            _ => 1.0 - self.life_fraction(),
        }
    }

    /// Radius on screen, including perspective in on-camera mode.
    pub fn radius(&self, mode: MotionMode) -> f32 {
        match mode {
            MotionMode::OnCamera => self.size * physics::perspective_scale(self.depth),
            _ => self.size,
        }
    }
}

// Uniform sample in [0, extent), or 0 for an empty extent
fn uniform<R: Rng>(rng: &mut R, extent: f32) -> f32 {
    if extent > 0.0 {
        rng.gen_range(0.0..extent)
    } else {
        0.0
    }
}

/// Lifetime in ticks. Lower decay means longer lives; antigravity ignores decay.
pub fn draw_max_age<R: Rng>(decay: f32, mode: MotionMode, rng: &mut R) -> f32 {
    if mode == MotionMode::Antigravity {
        return BASE_LIFETIME + rng.gen::<f32>() * ANTIGRAVITY_LIFETIME_SPREAD;
    }
    let decay = if decay.is_finite() { decay.clamp(0.0, 1.0) } else { 0.5 };
    BASE_LIFETIME + rng.gen::<f32>() * LIFETIME_SPREAD * (1.0 - decay + DECAY_FLOOR)
}

pub fn breathing_size(age: u32, mode: MotionMode) -> f32 {
    let amplitude = match mode {
        MotionMode::Antigravity => ANTIGRAVITY_BREATH_AMPLITUDE,
        _ => BREATH_AMPLITUDE,
    };
    ((age as f32 * BREATH_RATE).sin() * amplitude + BREATH_BASE).max(MIN_SIZE)
}

/// Advances one particle by one tick under the resolved `mode`.
pub fn update<R: Rng>(
    particle: Particle,
    config: &SimulationConfig,
    inputs: &RuntimeInputs,
    mode: MotionMode,
    rng: &mut R,
) -> Particle {
    let motion = physics::mode_motion(mode, &particle, config, inputs, rng);

    let mut velocity = motion.velocity;
    if physics::pointer_enabled(mode, config.is_interactive) {
        velocity += physics::pointer_force(mode, particle.position, inputs.pointer, config.speed);
    }
    velocity = physics::apply_friction(velocity);

    let mut position = physics::integrate(particle.position, velocity, physics::step_scale(mode, config.speed));
    if mode != MotionMode::OnCamera {
        position = physics::wrap_edges(position, &inputs.viewport);
    }

    let mut next = Particle {
        position,
        velocity,
        depth: motion.depth,
        age: particle.age.saturating_add(1),
        ..particle
    };

    if next.needs_respawn(mode) {
        next = next.respawn(config, mode, &inputs.viewport, rng);
    }

    next.size = breathing_size(next.age, mode);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup() -> (SimulationConfig, RuntimeInputs, StdRng) {
        let config = SimulationConfig {
            speed: 1.0,
            is_interactive: false,
            ..Default::default()
        };
        (config, RuntimeInputs::new(Viewport::new(800.0, 600.0)), StdRng::seed_from_u64(42))
    }

    #[test]
    fn test_spawn_inside_viewport_with_valid_age() {
        let (config, inputs, mut rng) = setup();
        for _ in 0..500 {
            let p = Particle::spawn(&config, MotionMode::FlowDrift, &inputs.viewport, &mut rng);
            assert!(inputs.viewport.contains(p.position));
            assert!(p.age < INITIAL_AGE_SPREAD);
            assert!(!p.is_expired());
            assert!(p.size >= 1.0 && p.size < 3.0);
            assert!(p.depth >= 0.0 && p.depth < MAX_DEPTH);
        }
    }

    #[test]
    fn test_spawn_in_empty_viewport_does_not_panic() {
        let (config, _, mut rng) = setup();
        let p = Particle::spawn(&config, MotionMode::Brownian, &Viewport::default(), &mut rng);
        assert_eq!(p.position, Vec2::ZERO);
    }

    #[test]
    fn test_expired_particle_respawns_in_spawn_region() {
        let (config, inputs, mut rng) = setup();
        for mode in [MotionMode::FlowDrift, MotionMode::Oceanic, MotionMode::Brownian, MotionMode::Flocking] {
            let mut p = Particle::spawn(&config, mode, &inputs.viewport, &mut rng);
            p.age = 500;
            p.max_age = 120.0;

            let next = update(p, &config, &inputs, mode, &mut rng);
            assert_eq!(next.age, 0);
            assert!(next.max_age >= BASE_LIFETIME);
            assert!(inputs.viewport.contains(next.position));
            assert_eq!(next.depth, 0.0);
        }
    }

    #[test]
    fn test_on_camera_respawn_starts_far_away_near_centre() {
        let (config, inputs, mut rng) = setup();
        let mut p = Particle::spawn(&config, MotionMode::OnCamera, &inputs.viewport, &mut rng);
        p.age = 1000;
        p.max_age = 100.0;

        let next = update(p, &config, &inputs, MotionMode::OnCamera, &mut rng);
        assert_eq!(next.age, 0);
        assert_eq!(next.depth, MAX_DEPTH);
        assert!((next.position.x - 400.0).abs() <= 40.0);
        assert!((next.position.y - 300.0).abs() <= 30.0);
    }

    #[test]
    fn test_on_camera_resets_past_near_clip() {
        let (config, inputs, mut rng) = setup();
        let mut p = Particle::spawn(&config, MotionMode::OnCamera, &inputs.viewport, &mut rng);
        p.age = 0;
        p.max_age = 300.0;
        p.depth = NEAR_CLIP + 5.0;

        let next = update(p, &config, &inputs, MotionMode::OnCamera, &mut rng);
        assert_eq!(next.depth, MAX_DEPTH);
        assert_eq!(next.age, 0);
    }

    #[test]
    fn test_on_camera_does_not_wrap() {
        let (config, inputs, mut rng) = setup();
        let p = Particle {
            position: vec2(799.0, 300.0),
            velocity: Vec2::ZERO,
            depth: 500.0,
            size: 1.0,
            age: 0,
            max_age: 300.0,
        };
        let mut current = p;
        for _ in 0..20 {
            current = update(current, &config, &inputs, MotionMode::OnCamera, &mut rng);
        }
        assert!(current.position.x > 800.0);
    }

    #[test]
    fn test_update_ages_by_one_tick() {
        let (config, inputs, mut rng) = setup();
        let mut p = Particle::spawn(&config, MotionMode::Oceanic, &inputs.viewport, &mut rng);
        p.age = 10;
        p.max_age = 200.0;
        let next = update(p, &config, &inputs, MotionMode::Oceanic, &mut rng);
        assert_eq!(next.age, 11);
        assert_eq!(next.max_age, 200.0);
        assert_eq!(next.size, breathing_size(11, MotionMode::Oceanic));
    }

    #[test]
    fn test_wrap_moves_left_exit_to_right_edge() {
        let (config, inputs, mut rng) = setup();
        let p = Particle {
            position: vec2(0.1, 300.0),
            velocity: vec2(-20.0, 0.0),
            depth: 0.0,
            size: 1.0,
            age: 0,
            max_age: 300.0,
        };
        let config = SimulationConfig { flow_intensity: 0.0, ..config };
        let next = update(p, &config, &inputs, MotionMode::FlowDrift, &mut rng);
        assert_eq!(next.position.x, inputs.viewport.width);
    }

    #[test]
    fn test_non_finite_state_recovers() {
        let (config, inputs, mut rng) = setup();
        let p = Particle {
            position: vec2(f32::NAN, 10.0),
            velocity: vec2(f32::INFINITY, 0.0),
            depth: 0.0,
            size: 1.0,
            age: 0,
            max_age: 300.0,
        };
        let next = update(p, &config, &inputs, MotionMode::FlowDrift, &mut rng);
        assert!(next.is_finite());
        assert!(inputs.viewport.contains(next.position));
        assert_eq!(next.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_lower_decay_lives_longer_on_average() {
        let mut rng = StdRng::seed_from_u64(9);
        let samples = 2000;
        let mean = |decay: f32, rng: &mut StdRng| {
            (0..samples).map(|_| draw_max_age(decay, MotionMode::Brownian, rng)).sum::<f32>() / samples as f32
        };
        let long = mean(0.1, &mut rng);
        let short = mean(0.9, &mut rng);
        // Expected values are 200 and 120
        assert!(long > short);
        assert!((long - 200.0).abs() < 10.0);
        assert!((short - 120.0).abs() < 10.0);
    }

    #[test]
    fn test_antigravity_particle_keeps_aging_past_lifetime() {
        let (config, inputs, mut rng) = setup();
        let p = Particle {
            position: vec2(400.0, 300.0),
            velocity: Vec2::ZERO,
            depth: 0.0,
            size: 1.0,
            age: 500,
            max_age: 150.0,
        };
        let next = update(p, &config, &inputs, MotionMode::Antigravity, &mut rng);
        assert_eq!(next.age, 501);
        assert_eq!(next.max_age, 150.0);
        assert_eq!(next.size, breathing_size(501, MotionMode::Antigravity));
    }

    #[test]
    fn test_antigravity_lifetime_ignores_decay() {
        let mut rng = StdRng::seed_from_u64(13);
        for decay in [0.0, 0.5, 1.0] {
            for _ in 0..200 {
                let max_age = draw_max_age(decay, MotionMode::Antigravity, &mut rng);
                assert!((BASE_LIFETIME..BASE_LIFETIME + ANTIGRAVITY_LIFETIME_SPREAD).contains(&max_age));
            }
        }
    }

    #[test]
    fn test_antigravity_moves_at_unscaled_velocity() {
        let (config, inputs, mut rng) = setup();
        let config = SimulationConfig { speed: 4.0, flow_intensity: 0.0, ..config };
        let p = Particle {
            position: vec2(400.0, 300.0),
            velocity: vec2(10.0, 0.0),
            depth: 0.0,
            size: 1.0,
            age: 0,
            max_age: 150.0,
        };
        let next = update(p, &config, &inputs, MotionMode::Antigravity, &mut rng);
        // Flow step at zero intensity adds 0.1 * 4 * 0.5 along +x, then friction
        let expected = (10.0 + 0.2) * crate::physics::FRICTION;
        assert!((next.velocity.x - expected).abs() < 1e-4);
        assert!((next.position.x - (400.0 + expected)).abs() < 1e-3);
    }

    #[test]
    fn test_breathing_size_is_bounded() {
        for age in 0..2000 {
            let size = breathing_size(age, MotionMode::FlowDrift);
            assert!(size >= MIN_SIZE && size <= BREATH_BASE + BREATH_AMPLITUDE);
        }
        assert_eq!(breathing_size(0, MotionMode::Antigravity), BREATH_BASE);
    }

    #[test]
    fn test_opacity_fades_with_age() {
        let p = Particle {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            depth: 0.0,
            size: 1.0,
            age: 50,
            max_age: 200.0,
        };
        assert!((p.opacity(MotionMode::Brownian) - 0.75).abs() < 1e-6);
        assert_eq!(p.opacity(MotionMode::Antigravity), 1.0);
        let old = Particle { age: 400, ..p };
        assert_eq!(old.opacity(MotionMode::Brownian), 0.0);
    }
}
