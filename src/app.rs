/*
 * Application Module
 *
 * This module defines the nannou application model for the particle flow
 * window. It wires the window to the loop driver:
 * - WindowHost implements FrameHost on top of nannou's update loop, so each
 *   nannou update delivers the pending frame token to the driver
 * - The egui panel edits a config copy that is pushed to the driver on change
 * - The renderer replays the driver's recorded commands in `view`
 */

use nannou::prelude::*;
use nannou_egui::Egui;

use crate::debug::DebugInfo;
use crate::driver::{FrameHost, FrameToken, LoopDriver};
use crate::input::{InputEvent, mouse_exited, mouse_moved, raw_window_event, resized, touch};
use crate::params::SimulationConfig;
use crate::renderer::{view, FrameCommands, Surface};
use crate::ui;
use crate::viewport::Viewport;

const FALLBACK_WINDOW_SIZE: (u32, u32) = (1280, 800);

/// Frame host backed by nannou's own update loop.
#[derive(Debug, Default)]
pub struct WindowHost {
    pub viewport: Viewport,
    next_token: u64,
    scheduled: Option<FrameToken>,
    listening: bool,
}

impl WindowHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }

    /// Takes the frame scheduled for this display refresh, if any.
    pub fn take_due_frame(&mut self) -> Option<FrameToken> {
        self.scheduled.take()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Forwards a window event to the driver while listeners are attached.
    pub fn deliver<S: Surface>(&self, driver: &mut LoopDriver<S>, event: InputEvent) -> bool {
        self.listening && driver.handle_event(event)
    }
}

impl FrameHost for WindowHost {
    type Surface = FrameCommands;

    fn acquire_surface(&mut self) -> Option<FrameCommands> {
        Some(FrameCommands::default())
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn request_frame(&mut self) -> FrameToken {
        self.next_token += 1;
        let token = FrameToken(self.next_token);
        self.scheduled = Some(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if self.scheduled == Some(token) {
            self.scheduled = None;
        }
    }

    fn listen(&mut self) {
        self.listening = true;
    }

    fn unlisten(&mut self) {
        self.listening = false;
    }
}

// Main model for the application
pub struct Model {
    pub driver: LoopDriver<FrameCommands>,
    pub host: WindowHost,
    pub config: SimulationConfig,
    pub color_text: String,
    pub egui: Egui,
    pub debug_info: DebugInfo,
}

impl Drop for Model {
    fn drop(&mut self) {
        self.driver.teardown(&mut self.host);
    }
}

// Config from the path given as the first argument, or the defaults
fn initial_config() -> SimulationConfig {
    let Some(path) = std::env::args().nth(1) else {
        return SimulationConfig::default();
    };

    match SimulationConfig::load(&path) {
        Ok(config) => {
            log::info!("Loaded config from {}", path);
            config
        }
        Err(e) => {
            log::warn!("{}; using default config", e);
            SimulationConfig::default()
        }
    }
}

// Initialize the model
pub fn model(app: &App) -> Model {
    // 80% of the primary monitor, if there is one
    let (window_width, window_height) = app
        .primary_monitor()
        .map(|monitor| {
            let size = monitor.size();
            ((size.width as f32 * 0.8) as u32, (size.height as f32 * 0.8) as u32)
        })
        .unwrap_or(FALLBACK_WINDOW_SIZE);

    let window_id = app
        .new_window()
        .title("Particle Flow")
        .size(window_width, window_height)
        .view(view)
        .mouse_moved(mouse_moved)
        .mouse_exited(mouse_exited)
        .touch(touch)
        .resized(resized)
        .raw_event(raw_window_event)
        .build()
        .expect("Failed to build window");

    let window = app.window(window_id).expect("Window was just created");
    let egui = Egui::from_window(&window);

    let config = initial_config();
    let mut host = WindowHost::new(Viewport::from_rect(window.rect()));
    let mut driver = LoopDriver::new(config.clone());
    if let Err(e) = driver.mount(&mut host) {
        log::error!("Particle flow did not start: {}", e);
    }

    Model {
        driver,
        host,
        color_text: config.base_color.clone(),
        config,
        egui,
        debug_info: DebugInfo::default(),
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    if ui::update_ui(&mut model.egui, &mut model.config, &mut model.color_text, &model.debug_info) {
        model.driver.set_config(model.config.clone());
    }

    // One tick per display refresh
    if let Some(token) = model.host.take_due_frame() {
        model.driver.on_frame(&mut model.host, token);
    }

    model.debug_info.live_particles = model.driver.pool().len();
    model.debug_info.effective_mode = model.driver.effective_mode();
    model.debug_info.ticks = model.driver.inputs().ticks();
}
