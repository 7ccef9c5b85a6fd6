/*
 * Lifecycle Module
 *
 * The ParticlePool owns every live particle. Once per tick it updates each
 * particle through the force model and hands it to the renderer in the same
 * pass, then reconciles its size with the configured particle count.
 */

use rand::Rng;

use crate::params::{MotionMode, SimulationConfig};
use crate::particle::{self, Particle};
use crate::runtime::RuntimeInputs;
use crate::viewport::Viewport;

/// Outcome of reconciling the pool with the configured particle count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolChange {
    Unchanged,
    Grew(usize),
    Shrank(usize),
}

#[derive(Debug, Clone, Default)]
pub struct ParticlePool {
    particles: Vec<Particle>,
}

impl ParticlePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// A pool already holding `config.particle_count` particles.
    pub fn filled<R: Rng>(config: &SimulationConfig, mode: MotionMode, viewport: &Viewport, rng: &mut R) -> Self {
        let mut pool = Self {
            particles: Vec::with_capacity(config.particle_count),
        };
        pool.reconcile(config.particle_count, config, mode, viewport, rng);
        pool
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Updates every particle once and passes the result to `draw` before
    /// moving on, so nothing is drawn in a post-expiry state.
    pub fn update_each<R, F>(
        &mut self,
        config: &SimulationConfig,
        inputs: &RuntimeInputs,
        mode: MotionMode,
        rng: &mut R,
        mut draw: F,
    ) where
        R: Rng,
        F: FnMut(&Particle),
    {
        for slot in &mut self.particles {
            *slot = particle::update(*slot, config, inputs, mode, rng);
            draw(slot);
        }
    }

    /// Grows by spawning or shrinks by truncating from the end until the pool
    /// holds `target` particles. Survivors are left untouched.
    pub fn reconcile<R: Rng>(
        &mut self,
        target: usize,
        config: &SimulationConfig,
        mode: MotionMode,
        viewport: &Viewport,
        rng: &mut R,
    ) -> PoolChange {
        let current = self.particles.len();
        if current == target {
            return PoolChange::Unchanged;
        }

        self.particles
            .resize_with(target, || Particle::spawn(config, mode, viewport, rng));

        if target > current {
            PoolChange::Grew(target - current)
        } else {
            PoolChange::Shrank(current - target)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup(count: usize) -> (SimulationConfig, RuntimeInputs, StdRng) {
        let config = SimulationConfig {
            particle_count: count,
            is_interactive: false,
            ..Default::default()
        };
        (config, RuntimeInputs::new(Viewport::new(640.0, 480.0)), StdRng::seed_from_u64(3))
    }

    #[test]
    fn test_filled_pool_matches_count() {
        let (config, inputs, mut rng) = setup(120);
        let pool = ParticlePool::filled(&config, MotionMode::FlowDrift, &inputs.viewport, &mut rng);
        assert_eq!(pool.len(), 120);
    }

    #[test]
    fn test_reconcile_converges_for_any_target() {
        let (config, inputs, mut rng) = setup(0);
        let mut pool = ParticlePool::new();
        assert!(pool.is_empty());

        for target in [0usize, 1, 75, 3, 500, 500, 0, 42] {
            pool.reconcile(target, &config, MotionMode::Brownian, &inputs.viewport, &mut rng);
            assert_eq!(pool.len(), target);
        }
    }

    #[test]
    fn test_reconcile_reports_change() {
        let (config, inputs, mut rng) = setup(10);
        let mut pool = ParticlePool::filled(&config, MotionMode::Oceanic, &inputs.viewport, &mut rng);
        assert_eq!(pool.reconcile(10, &config, MotionMode::Oceanic, &inputs.viewport, &mut rng), PoolChange::Unchanged);
        assert_eq!(pool.reconcile(25, &config, MotionMode::Oceanic, &inputs.viewport, &mut rng), PoolChange::Grew(15));
        assert_eq!(pool.reconcile(5, &config, MotionMode::Oceanic, &inputs.viewport, &mut rng), PoolChange::Shrank(20));
    }

    #[test]
    fn test_shrinking_keeps_survivors_unchanged() {
        let (config, inputs, mut rng) = setup(30);
        let mut pool = ParticlePool::filled(&config, MotionMode::Flocking, &inputs.viewport, &mut rng);
        let before: Vec<Particle> = pool.iter().copied().collect();

        pool.reconcile(12, &config, MotionMode::Flocking, &inputs.viewport, &mut rng);
        let after: Vec<Particle> = pool.iter().copied().collect();
        assert_eq!(after[..], before[..12]);
    }

    #[test]
    fn test_update_each_draws_every_updated_particle() {
        let (config, inputs, mut rng) = setup(40);
        let mut pool = ParticlePool::filled(&config, MotionMode::FlowDrift, &inputs.viewport, &mut rng);

        let mut drawn = Vec::new();
        pool.update_each(&config, &inputs, MotionMode::FlowDrift, &mut rng, |p| drawn.push(*p));

        assert_eq!(drawn.len(), 40);
        let stored: Vec<Particle> = pool.iter().copied().collect();
        assert_eq!(drawn, stored);
        assert!(drawn.iter().all(|p| !p.is_expired()));
    }
}
