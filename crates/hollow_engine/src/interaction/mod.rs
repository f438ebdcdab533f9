//! Aiming at and activating interactable objects

pub mod raycaster;

pub use raycaster::{nearest_interactable, InteractionRaycaster, InteractionTarget};
