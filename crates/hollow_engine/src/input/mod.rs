//! Input management system
//!
//! The host feeds raw key and pointer events in; the world reads a snapshot
//! each frame. Held keys drive movement, discrete presses drive toggles and
//! interaction, and pointer motion is accumulated until the next frame
//! applies it to the camera.

pub mod picking;

use std::collections::{HashSet, VecDeque};

use crate::foundation::math::Vec2;

pub use picking::PointerState;

/// Key codes used by the walking simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Move forward
    W,
    /// Strafe left
    A,
    /// Move backward
    S,
    /// Strafe right
    D,
    /// Jump
    Space,
    /// Interact with the targeted object
    E,
    /// Toggle between first-person and follow camera
    C,
    /// Toggle the flashlight
    F,
}

/// Input snapshot shared between the host and the world
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<KeyCode>,
    presses: VecDeque<KeyCode>,
    look_delta: Vec2,
    /// Pointer position and lock state
    pub pointer: PointerState,
}

impl InputState {
    /// Radians of camera rotation per pixel of pointer motion
    pub const LOOK_SENSITIVITY: f64 = 0.002;

    /// Create an input state with nothing held
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle key input
    ///
    /// A key going down that was not already held also counts as one
    /// discrete press; OS key repeat does not queue more.
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            if self.held.insert(key) {
                self.presses.push_back(key);
            }
        } else {
            self.held.remove(&key);
        }
    }

    /// Hold a key down without queueing a press
    pub fn hold(&mut self, key: KeyCode) {
        self.held.insert(key);
    }

    /// Whether `key` is currently held
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Queue a discrete press without changing the held set
    pub fn press(&mut self, key: KeyCode) {
        self.presses.push_back(key);
    }

    /// Remove and return the queued presses in arrival order
    pub fn take_presses(&mut self) -> Vec<KeyCode> {
        self.presses.drain(..).collect()
    }

    /// Accumulate pointer motion in pixels (x right, y down)
    pub fn look(&mut self, dx: f64, dy: f64) {
        self.look_delta += Vec2::new(dx, dy);
    }

    /// Remove and return the accumulated pointer motion
    pub fn take_look(&mut self) -> Vec2 {
        std::mem::take(&mut self.look_delta)
    }

    /// Handle pointer movement in window pixels
    pub fn handle_pointer_move(&mut self, x: f64, y: f64) {
        self.pointer.update_position(x, y);
    }
}
