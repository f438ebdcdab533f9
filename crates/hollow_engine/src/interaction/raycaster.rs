//! View ray picking against interactable objects

use log::{debug, trace};

use crate::core::{InteractionConfig, PlayerConfig};
use crate::house::{House, Interactable};
use crate::input::picking::PointerState;
use crate::physics::collision::Ray;
use crate::player::CameraPose;

/// Nearest interactable under the view ray
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionTarget {
    /// Name of the object in the house
    pub name: String,
    /// Distance from the camera to the hit point
    pub distance: f64,
}

/// Tracks which interactable the player is aiming at
#[derive(Debug, Clone)]
pub struct InteractionRaycaster {
    range: f64,
    vertical_fov: f64,
    target: Option<InteractionTarget>,
}

impl InteractionRaycaster {
    /// Create a raycaster with the given reach and camera field of view
    pub fn new(interaction: &InteractionConfig, player: &PlayerConfig) -> Self {
        Self {
            range: interaction.range,
            vertical_fov: player.vertical_fov_degrees.to_radians(),
            target: None,
        }
    }

    /// Maximum distance at which `interact()` is triggered
    pub fn range(&self) -> f64 {
        self.range
    }

    /// Ray from the camera through the pointer, or the view center when locked
    pub fn view_ray(&self, camera: &CameraPose, pointer: &PointerState) -> Option<Ray> {
        camera.ray_through(pointer.ndc(), self.vertical_fov, pointer.aspect_ratio())
    }

    /// Recompute the nearest target for the current camera pose
    pub fn update(&mut self, camera: &CameraPose, pointer: &PointerState, house: &House) -> Option<&InteractionTarget> {
        self.target = self
            .view_ray(camera, pointer)
            .and_then(|ray| nearest_interactable(&ray, house.interactables()));
        trace!("Interaction target: {:?}", self.target);
        self.target.as_ref()
    }

    /// Nearest target found by the last update
    pub fn target(&self) -> Option<&InteractionTarget> {
        self.target.as_ref()
    }

    /// Interact with the current target if it is within range
    ///
    /// Returns the name of the activated object.
    pub fn check_interactions(&self, house: &mut House) -> Option<String> {
        let target = self.target.as_ref()?;
        if target.distance >= self.range {
            debug!(
                "'{}' is out of reach ({:.2} >= {:.2})",
                target.name, target.distance, self.range
            );
            return None;
        }
        house.interact(&target.name).then(|| target.name.clone())
    }
}

/// Closest interactable hit by `ray`
pub fn nearest_interactable<'a>(
    ray: &Ray,
    interactables: impl IntoIterator<Item = &'a dyn Interactable>,
) -> Option<InteractionTarget> {
    let mut nearest: Option<InteractionTarget> = None;
    for interactable in interactables {
        let hit = interactable
            .pick_triangles()
            .iter()
            .filter_map(|triangle| triangle.intersect_ray(ray))
            .min_by(f64::total_cmp);

        if let Some(distance) = hit {
            if nearest.as_ref().map_or(true, |best| distance < best.distance) {
                nearest = Some(InteractionTarget {
                    name: interactable.name().to_string(),
                    distance,
                });
            }
        }
    }
    nearest
}
