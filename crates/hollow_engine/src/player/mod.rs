//! Player state, movement integration and cameras

pub mod camera;
pub mod controller;

use crate::foundation::math::Vec3;
use crate::input::{InputState, KeyCode};
use crate::physics::collision::Capsule;

pub use camera::{CameraPose, ViewMode, MAX_PITCH};
pub use controller::PlayerController;

/// Physical state of the player
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Collision volume; `end` is the eye point
    pub collider: Capsule,
    /// Linear velocity in world units per second
    pub velocity: Vec3,
    /// Whether the last collision pass found a floor contact
    pub on_floor: bool,
}

impl Player {
    /// Player at rest inside `collider`, not yet grounded
    pub fn new(collider: Capsule) -> Self {
        Self {
            collider,
            velocity: Vec3::zeros(),
            on_floor: false,
        }
    }

    /// Eye position
    pub fn eye(&self) -> Vec3 {
        self.collider.end
    }
}

/// Movement requested for one substep
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveIntent {
    /// +1 forward, -1 backward
    pub forward: f64,
    /// +1 right, -1 left
    pub right: f64,
    /// Jump requested
    pub jump: bool,
}

impl MoveIntent {
    /// Read the held movement keys
    pub fn from_input(input: &InputState) -> Self {
        let axis = |positive: KeyCode, negative: KeyCode| {
            let mut value = 0.0;
            if input.is_held(positive) {
                value += 1.0;
            }
            if input.is_held(negative) {
                value -= 1.0;
            }
            value
        };
        Self {
            forward: axis(KeyCode::W, KeyCode::S),
            right: axis(KeyCode::D, KeyCode::A),
            jump: input.is_held(KeyCode::Space),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_keys_cancel() {
        let mut input = InputState::new();
        input.hold(KeyCode::W);
        input.hold(KeyCode::S);
        input.hold(KeyCode::A);
        let intent = MoveIntent::from_input(&input);
        assert_eq!(intent.forward, 0.0);
        assert_eq!(intent.right, -1.0);
        assert!(!intent.jump);
    }
}
