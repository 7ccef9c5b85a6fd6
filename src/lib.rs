/*
 * Particle Flow Simulation - Module Definitions
 *
 * This file defines the module structure for the particle flow simulation.
 * The simulation core (physics, particle, lifecycle, driver) has no window
 * dependency beyond nannou's math types; app, input, renderer and ui bind it
 * to a nannou window.
 */

// Re-export key components for easier access
pub use driver::{FrameHost, FrameToken, LoopDriver, LoopState};
pub use error::FlowError;
pub use input::InputEvent;
pub use lifecycle::{ParticlePool, PoolChange};
pub use params::{MotionMode, SimulationConfig};
pub use particle::Particle;
pub use renderer::{DrawCommand, FrameCommands, Surface};
pub use runtime::RuntimeInputs;
pub use viewport::Viewport;
pub use debug::DebugInfo;
pub use app::Model;

// Define modules
pub mod app;
pub mod debug;
pub mod driver;
pub mod error;
pub mod input;
pub mod lifecycle;
pub mod params;
pub mod particle;
pub mod physics;
pub mod renderer;
pub mod runtime;
pub mod ui;
pub mod viewport;
