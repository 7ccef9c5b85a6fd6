/*
 * Input Module
 *
 * This module handles user input events for the particle flow window. nannou
 * reports positions in screen space; the handlers convert them to canvas
 * space and forward them to the loop driver as InputEvents.
 *
 * Features:
 * - Pointer attraction target from mouse movement and touch
 * - Pointer release when the mouse leaves the window
 * - Viewport tracking on resize
 * - Passing raw events through to egui
 */

use nannou::event::TouchEvent;
use nannou::prelude::*;
use nannou::winit::event::TouchPhase;

use crate::app::Model;
use crate::viewport::Viewport;

/// Input delivered to the simulation, in canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMoved(Vec2),
    TouchMoved(Vec2),
    PointerLeft,
    Resized(Viewport),
}

// Mouse moved event handler
pub fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    let canvas = Viewport::screen_to_canvas(pos, app.window_rect());
    model.host.deliver(&mut model.driver, InputEvent::PointerMoved(canvas));
}

// Mouse left the window
pub fn mouse_exited(_app: &App, model: &mut Model) {
    model.host.deliver(&mut model.driver, InputEvent::PointerLeft);
}

pub fn touch(app: &App, model: &mut Model, touch: TouchEvent) {
    if let TouchPhase::Started | TouchPhase::Moved = touch.phase {
        let canvas = Viewport::screen_to_canvas(touch.position, app.window_rect());
        model.host.deliver(&mut model.driver, InputEvent::TouchMoved(canvas));
    }
}

pub fn resized(_app: &App, model: &mut Model, size: Vec2) {
    let viewport = Viewport::new(size.x, size.y);
    model.host.viewport = viewport;
    model.host.deliver(&mut model.driver, InputEvent::Resized(viewport));
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
