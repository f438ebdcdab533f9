//! Pointer state for interaction picking
//!
//! Provides utilities for converting screen-space coordinates to
//! Normalized Device Coordinates (NDC) for ray casting.

use crate::foundation::math::Vec2;

/// Pointer state for picking operations
#[derive(Debug, Clone, PartialEq)]
pub struct PointerState {
    /// Current screen-space X position (pixels)
    pub screen_x: f64,
    /// Current screen-space Y position (pixels)
    pub screen_y: f64,
    /// Window width in pixels
    pub window_width: u32,
    /// Window height in pixels
    pub window_height: u32,
    /// Whether the pointer is locked to the view center (first-person look)
    pub locked: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

impl PointerState {
    /// Create a pointer resting at the center of the window
    pub fn new(window_width: u32, window_height: u32) -> Self {
        Self {
            screen_x: f64::from(window_width) * 0.5,
            screen_y: f64::from(window_height) * 0.5,
            window_width,
            window_height,
            locked: false,
        }
    }

    /// Convert screen coordinates to Normalized Device Coordinates (NDC)
    ///
    /// NDC range: [-1, 1] where:
    /// - X: -1 = left, +1 = right
    /// - Y: -1 = bottom, +1 = top
    ///
    /// A locked pointer always aims at the view center `(0, 0)`.
    pub fn ndc(&self) -> Vec2 {
        if self.locked || self.window_width == 0 || self.window_height == 0 {
            return Vec2::zeros();
        }
        let ndc_x = (self.screen_x / f64::from(self.window_width)) * 2.0 - 1.0;
        let ndc_y = -(self.screen_y / f64::from(self.window_height)) * 2.0 + 1.0;
        Vec2::new(ndc_x, ndc_y)
    }

    /// Update pointer position from window events
    pub fn update_position(&mut self, x: f64, y: f64) {
        self.screen_x = x;
        self.screen_y = y;
    }

    /// Update window size (for NDC conversion)
    pub fn update_window_size(&mut self, width: u32, height: u32) {
        self.window_width = width;
        self.window_height = height;
    }

    /// Aspect ratio of the window (width / height)
    pub fn aspect_ratio(&self) -> f64 {
        if self.window_height == 0 {
            1.0
        } else {
            f64::from(self.window_width) / f64::from(self.window_height)
        }
    }
}
