/*
 * Renderer Module
 *
 * This module handles drawing for the particle flow simulation.
 *
 * The simulation paints onto a `Surface`. The nannou app uses `FrameCommands`,
 * which records the commands of the latest tick; `view` replays them onto the
 * window. The window is only cleared on its first frame: every tick paints a
 * translucent background rectangle instead, so earlier frames fade out slowly
 * and leave trails behind the particles.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::params::MotionMode;
use crate::particle::Particle;
use crate::viewport::Viewport;

/// Smallest fade alpha, so old frames always disappear eventually.
pub const MIN_FADE_ALPHA: f32 = 0.01;
pub const ANTIGRAVITY_TRAIL_FACTOR: f32 = 0.9;

/// A drawable 2D target in canvas space.
pub trait Surface {
    /// Called at the start of every tick, before anything is painted.
    fn begin_frame(&mut self) {}
    fn resize(&mut self, viewport: Viewport);
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgb<u8>, alpha: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb<u8>, alpha: f32);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Rect { origin: Vec2, size: Vec2, color: Rgb<u8>, alpha: f32 },
    Circle { center: Vec2, radius: f32, color: Rgb<u8>, alpha: f32 },
}

/// Records the draw commands of the most recent tick.
#[derive(Debug, Clone, Default)]
pub struct FrameCommands {
    commands: Vec<DrawCommand>,
    viewport: Viewport,
    draw_calls: u64,
}

impl FrameCommands {
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Draw calls issued since the surface was created.
    pub fn draw_calls(&self) -> u64 {
        self.draw_calls
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
        self.draw_calls += 1;
    }
}

impl Surface for FrameCommands {
    fn begin_frame(&mut self) {
        self.commands.clear();
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgb<u8>, alpha: f32) {
        self.push(DrawCommand::Rect { origin, size, color, alpha });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb<u8>, alpha: f32) {
        self.push(DrawCommand::Circle { center, radius, color, alpha });
    }
}

/// Alpha of the background rectangle painted each tick.
pub fn fade_alpha(trail_length: f32, mode: MotionMode) -> f32 {
    let retained = match mode {
        MotionMode::Antigravity => trail_length * ANTIGRAVITY_TRAIL_FACTOR,
        _ => trail_length,
    };
    (1.0 - retained).max(MIN_FADE_ALPHA)
}

pub fn clear_with_fade<S: Surface>(surface: &mut S, viewport: &Viewport, trail_length: f32, mode: MotionMode) {
    surface.fill_rect(Vec2::ZERO, viewport.size(), BLACK, fade_alpha(trail_length, mode));
}

pub fn draw_particle<S: Surface>(surface: &mut S, particle: &Particle, color: Rgb<u8>, mode: MotionMode) {
    surface.fill_circle(particle.position, particle.radius(mode), color, particle.opacity(mode));
}

// Replay recorded canvas-space commands onto a nannou Draw
pub fn replay(draw: &Draw, commands: &[DrawCommand], window_rect: Rect) {
    let paint = |color: Rgb<u8>, alpha: f32| {
        rgba(
            color.red as f32 / 255.0,
            color.green as f32 / 255.0,
            color.blue as f32 / 255.0,
            alpha,
        )
    };

    for command in commands {
        match *command {
            DrawCommand::Rect { origin, size, color, alpha } => {
                let center = Viewport::canvas_to_screen(origin + size / 2.0, window_rect);
                draw.rect().xy(center).wh(size).color(paint(color, alpha));
            }
            DrawCommand::Circle { center, radius, color, alpha } => {
                draw.ellipse()
                    .xy(Viewport::canvas_to_screen(center, window_rect))
                    .radius(radius)
                    .color(paint(color, alpha));
            }
        }
    }
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();

    // Only the very first frame is cleared; the fade rectangles do the rest
    if frame.nth() == 0 {
        draw.background().color(BLACK);
    }

    if let Some(surface) = model.driver.surface() {
        replay(&draw, surface.commands(), app.window_rect());
    }

    if let Err(e) = draw.to_frame(app, &frame) {
        log::error!("Failed to draw frame: {:?}", e);
    }

    if let Err(e) = model.egui.draw_to_frame(&frame) {
        log::error!("Failed to draw UI: {:?}", e);
    }
}
