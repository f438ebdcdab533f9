//! Interaction capability shared by doors and light switches

use crate::physics::collision::Triangle;

/// Object the player can target with the interaction ray and activate
pub trait Interactable {
    /// Unique name used to look the object up in the house
    fn name(&self) -> &str;

    /// Activate the object (toggle a door, flip a switch)
    fn interact(&mut self);

    /// Current world-space geometry the interaction ray is tested against
    fn pick_triangles(&self) -> Vec<Triangle>;
}
