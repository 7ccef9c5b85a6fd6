/*
 * Loop Driver Module
 *
 * The LoopDriver runs the animation loop on top of a host that provides a
 * drawable surface, a frame clock and input listeners. It is a state machine:
 *
 *   Uninitialized --mount--> Running --teardown--> TornDown
 *
 * While running it keeps exactly one pending frame token. A frame delivered
 * by the host only ticks the simulation if the driver is running and the token
 * is the pending one, so frames that were cancelled or arrive after teardown
 * are ignored.
 *
 * Each tick:
 * 1. Advances the clock and, in random-cycle mode, the mode selector
 * 2. Paints the translucent fade rectangle
 * 3. Updates and draws every particle
 * 4. Reconciles the pool size with the configured particle count
 * 5. Requests the next frame
 */

use nannou::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::FlowError;
use crate::input::InputEvent;
use crate::lifecycle::{ParticlePool, PoolChange};
use crate::params::{MotionMode, SimulationConfig};
use crate::renderer::{self, Surface};
use crate::runtime::RuntimeInputs;
use crate::viewport::Viewport;

/// Handle of one scheduled frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(pub u64);

/// What the driver needs from the environment it runs in.
pub trait FrameHost {
    type Surface: Surface;

    /// The drawable surface, or `None` if the host cannot provide one.
    fn acquire_surface(&mut self) -> Option<Self::Surface>;
    fn viewport(&self) -> Viewport;
    /// Schedules one call of `LoopDriver::on_frame` with the returned token.
    fn request_frame(&mut self) -> FrameToken;
    fn cancel_frame(&mut self, token: FrameToken);
    /// Starts delivering pointer, touch and resize events.
    fn listen(&mut self);
    fn unlisten(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Uninitialized,
    Running,
    TornDown,
}

pub struct LoopDriver<S: Surface> {
    state: LoopState,
    pending: Option<FrameToken>,
    surface: Option<S>,
    config: SimulationConfig,
    color: Rgb<u8>,
    inputs: RuntimeInputs,
    pool: ParticlePool,
    rng: StdRng,
}

impl<S: Surface> LoopDriver<S> {
    pub fn new(config: SimulationConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// A driver whose random draws are reproducible.
    pub fn with_seed(config: SimulationConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SimulationConfig, rng: StdRng) -> Self {
        let config = config.sanitized();
        Self {
            state: LoopState::Uninitialized,
            pending: None,
            surface: None,
            color: config.color(),
            config,
            inputs: RuntimeInputs::default(),
            pool: ParticlePool::new(),
            rng,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn inputs(&self) -> &RuntimeInputs {
        &self.inputs
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Mode the particles currently follow, with random-cycle resolved.
    pub fn effective_mode(&self) -> MotionMode {
        self.inputs.effective_mode(self.config.motion_mode)
    }

    /// Replaces the whole config. Takes effect on the next tick.
    pub fn set_config(&mut self, config: SimulationConfig) {
        let config = config.sanitized();
        if config != self.config {
            log::debug!("Config replaced: {:?}", config);
        }
        self.color = config.color();
        self.config = config;
    }

    pub fn mount<H: FrameHost<Surface = S>>(&mut self, host: &mut H) -> Result<(), FlowError> {
        if self.state != LoopState::Uninitialized {
            return Err(FlowError::InvalidTransition { state: self.state, action: "mount" });
        }

        let Some(mut surface) = host.acquire_surface() else {
            log::error!("{}", FlowError::SurfaceUnavailable);
            return Err(FlowError::SurfaceUnavailable);
        };

        let viewport = host.viewport();
        surface.resize(viewport);
        self.surface = Some(surface);
        self.inputs = RuntimeInputs::new(viewport);

        let mode = self.effective_mode();
        self.pool = ParticlePool::filled(&self.config, mode, &viewport, &mut self.rng);

        host.listen();
        self.pending = Some(host.request_frame());
        self.state = LoopState::Running;

        log::info!(
            "Particle flow mounted: {}x{} viewport, {} particles, {:?}",
            viewport.width,
            viewport.height,
            self.pool.len(),
            self.config.motion_mode
        );
        Ok(())
    }

    /// Runs one tick if `token` is the pending frame. Returns whether a tick ran.
    pub fn on_frame<H: FrameHost<Surface = S>>(&mut self, host: &mut H, token: FrameToken) -> bool {
        if self.state != LoopState::Running || self.pending != Some(token) {
            return false;
        }

        self.pending = None;
        self.tick();
        self.pending = Some(host.request_frame());
        true
    }

    /// Applies a host input event. Ignored unless the loop is running.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        if self.state != LoopState::Running {
            return false;
        }

        match event {
            InputEvent::PointerMoved(position) | InputEvent::TouchMoved(position) => {
                self.inputs.pointer = Some(position);
            }
            InputEvent::PointerLeft => {
                self.inputs.pointer = None;
            }
            InputEvent::Resized(viewport) => {
                // Particles are not rescaled; they wrap or respawn into the new bounds
                self.inputs.viewport = viewport;
                if let Some(surface) = self.surface.as_mut() {
                    surface.resize(viewport);
                }
            }
        }
        true
    }

    /// Stops listening and cancels the pending frame. Safe to call repeatedly.
    pub fn teardown<H: FrameHost<Surface = S>>(&mut self, host: &mut H) {
        match self.state {
            LoopState::Running => {
                host.unlisten();
                if let Some(token) = self.pending.take() {
                    host.cancel_frame(token);
                }
                log::info!("Particle flow torn down after {} ticks", self.inputs.ticks());
            }
            LoopState::Uninitialized => {}
            LoopState::TornDown => return,
        }
        self.state = LoopState::TornDown;
    }

    fn tick(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        self.inputs.advance_clock();
        if self.config.motion_mode == MotionMode::RandomCycle {
            if let Some(mode) = self.inputs.cycle.advance(&mut self.rng) {
                log::debug!("Random cycle switched to {:?}", mode);
            }
        }

        let mode = self.inputs.effective_mode(self.config.motion_mode);
        let viewport = self.inputs.viewport;
        let color = self.color;

        surface.begin_frame();
        renderer::clear_with_fade(surface, &viewport, self.config.trail_length, mode);

        self.pool.update_each(&self.config, &self.inputs, mode, &mut self.rng, |particle| {
            renderer::draw_particle(surface, particle, color, mode);
        });

        match self.pool.reconcile(self.config.particle_count, &self.config, mode, &viewport, &mut self.rng) {
            PoolChange::Unchanged => {}
            PoolChange::Grew(n) => log::debug!("Pool grew by {} to {}", n, self.pool.len()),
            PoolChange::Shrank(n) => log::debug!("Pool shrank by {} to {}", n, self.pool.len()),
        }
    }
}
