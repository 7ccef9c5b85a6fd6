/*
 * Particle Flow
 *
 * A field of particles steered by a pseudo-noise flow field and one of
 * several motion modes (flow drift, on-camera perspective, oceanic waves,
 * brownian motion, flocking, antigravity, or a random cycle through them).
 * The pointer attracts nearby particles, and each frame only partially
 * clears the last one so particles leave fading trails.
 *
 * Usage: particle-flow [config.json]
 */

use particle_flow::app::{model, update};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    nannou::app(model).update(update).run();
}
