/*
 * Viewport Module
 *
 * The simulation works in canvas space: origin at the top-left corner, x to
 * the right, y down, bounded by the viewport dimensions. nannou draws in
 * screen space with the origin at the window centre and y up. This module
 * holds the viewport size and converts between the two spaces.
 */

use nannou::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        // A negative or non-finite size from the host is treated as empty
        let sanitize = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.w(), rect.h())
    }

    pub fn center(&self) -> Vec2 {
        vec2(self.width / 2.0, self.height / 2.0)
    }

    pub fn size(&self) -> Vec2 {
        vec2(self.width, self.height)
    }

    // Whether a canvas point lies in [0, width) x [0, height)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x < self.width && point.y >= 0.0 && point.y < self.height
    }

    // Convert a point from canvas space to nannou screen space
    pub fn canvas_to_screen(point: Vec2, window_rect: Rect) -> Vec2 {
        vec2(window_rect.left() + point.x, window_rect.top() - point.y)
    }

    // Convert a point from nannou screen space to canvas space
    pub fn screen_to_canvas(point: Vec2, window_rect: Rect) -> Vec2 {
        vec2(point.x - window_rect.left(), window_rect.top() - point.y)
    }
}
