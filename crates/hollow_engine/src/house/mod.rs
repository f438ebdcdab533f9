//! # House
//!
//! Explicit aggregate owning every interactive object of the haunted house:
//! the doors, the light switches with their ceiling lights, and the door
//! collider registry. Doors report finished swings through an
//! [`EventQueue`]; [`House::process_door_events`] drains it and rebuilds the
//! registry, so no door ever holds a reference back into the house.

pub mod door;
pub mod interactable;
pub mod light;
pub mod registry;

use std::collections::HashMap;

use log::{debug, info};

use crate::core::DoorConfig;
use crate::events::EventQueue;
use crate::foundation::math::{
    constants::{HALF_PI, PI},
    Vec3,
};
use crate::spatial::OctreeConfig;

pub use door::{Door, DoorEvent, DoorState};
pub use interactable::Interactable;
pub use light::{CeilingLight, Flashlight, LightSwitch};
pub use registry::DoorColliderRegistry;

/// Errors raised while assembling a house
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HouseError {
    /// Two interactables share a name
    #[error("Duplicate interactable name: {0}")]
    DuplicateInteractable(String),
}

/// Index of an interactable inside its owning collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InteractableSlot {
    Door(usize),
    Switch(usize),
}

/// Doors, switches and door colliders of one house
#[derive(Debug)]
pub struct House {
    doors: Vec<Door>,
    switches: Vec<LightSwitch>,
    interactables: HashMap<String, InteractableSlot>,
    registry: DoorColliderRegistry,
    door_events: EventQueue<DoorEvent>,
}

impl House {
    /// Assemble a house and index the doors' initial poses
    pub fn build(
        doors: Vec<Door>,
        switches: Vec<LightSwitch>,
        octree_config: OctreeConfig,
    ) -> Result<Self, HouseError> {
        let mut interactables = HashMap::new();
        let slots = doors
            .iter()
            .enumerate()
            .map(|(i, door)| (door.name().to_string(), InteractableSlot::Door(i)))
            .chain(
                switches
                    .iter()
                    .enumerate()
                    .map(|(i, switch)| (switch.name().to_string(), InteractableSlot::Switch(i))),
            );
        for (name, slot) in slots {
            if interactables.insert(name.clone(), slot).is_some() {
                return Err(HouseError::DuplicateInteractable(name));
            }
        }

        let mut registry = DoorColliderRegistry::new(octree_config);
        registry.rebuild(&doors);

        info!(
            "House built with {} doors and {} switches",
            doors.len(),
            switches.len()
        );

        Ok(Self {
            doors,
            switches,
            interactables,
            registry,
            door_events: EventQueue::new(),
        })
    }

    /// All doors
    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    /// All light switches
    pub fn switches(&self) -> &[LightSwitch] {
        &self.switches
    }

    /// Door by name
    pub fn door(&self, name: &str) -> Option<&Door> {
        match self.interactables.get(name) {
            Some(&InteractableSlot::Door(i)) => self.doors.get(i),
            _ => None,
        }
    }

    /// Light switch by name
    pub fn switch(&self, name: &str) -> Option<&LightSwitch> {
        match self.interactables.get(name) {
            Some(&InteractableSlot::Switch(i)) => self.switches.get(i),
            _ => None,
        }
    }

    /// Interactable by name
    pub fn interactable(&self, name: &str) -> Option<&dyn Interactable> {
        match *self.interactables.get(name)? {
            InteractableSlot::Door(i) => self.doors.get(i).map(|door| door as &dyn Interactable),
            InteractableSlot::Switch(i) => self.switches.get(i).map(|switch| switch as &dyn Interactable),
        }
    }

    /// Mutable interactable by name
    pub fn interactable_mut(&mut self, name: &str) -> Option<&mut dyn Interactable> {
        match *self.interactables.get(name)? {
            InteractableSlot::Door(i) => self.doors.get_mut(i).map(|door| door as &mut dyn Interactable),
            InteractableSlot::Switch(i) => self
                .switches
                .get_mut(i)
                .map(|switch| switch as &mut dyn Interactable),
        }
    }

    /// Every interactable, doors first
    pub fn interactables(&self) -> impl Iterator<Item = &dyn Interactable> {
        self.doors
            .iter()
            .map(|door| door as &dyn Interactable)
            .chain(self.switches.iter().map(|switch| switch as &dyn Interactable))
    }

    /// Call `interact()` on the named object; unknown names are ignored
    pub fn interact(&mut self, name: &str) -> bool {
        match self.interactable_mut(name) {
            Some(target) => {
                target.interact();
                true
            }
            None => {
                debug!("Ignoring interaction with unknown object '{}'", name);
                false
            }
        }
    }

    /// Advance every door swing
    pub fn animate_doors(&mut self, delta_time: f64) {
        for door in &mut self.doors {
            door.animate(delta_time, &mut self.door_events);
        }
    }

    /// Drain finished door swings and rebuild the door colliders if any
    ///
    /// All transitions completed in the same step share one rebuild.
    pub fn process_door_events(&mut self) -> Vec<DoorEvent> {
        let events = self.door_events.drain();
        if !events.is_empty() {
            for event in &events {
                debug!("Door transition completed: {:?}", event);
            }
            self.registry.rebuild(&self.doors);
        }
        events
    }

    /// Door collision geometry
    pub fn registry(&self) -> &DoorColliderRegistry {
        &self.registry
    }
}

/// Fluent builder for the standard house layout
#[derive(Debug, Default)]
pub struct HouseBuilder {
    doors: Vec<Door>,
    switches: Vec<LightSwitch>,
    octree: OctreeConfig,
}

impl HouseBuilder {
    /// Start an empty house
    pub fn new(octree: OctreeConfig) -> Self {
        Self {
            octree,
            ..Default::default()
        }
    }

    /// Add the front, living room and bedroom doors
    pub fn with_doors(mut self, config: &DoorConfig) -> Self {
        self.doors.extend([
            Door::new("front_door", Vec3::new(3.1, 1.65, 0.0), 0.0, config),
            Door::new("living_door", Vec3::new(1.0, 1.65, -2.6), HALF_PI, config),
            Door::new("bedroom_door", Vec3::new(-1.1, 1.65, 0.0), PI, config),
        ]);
        self
    }

    /// Add the hall, living room and bedroom lights with their switches
    pub fn with_ceiling_lights(mut self) -> Self {
        self.switches.extend([
            LightSwitch::new(
                "hall_switch",
                Vec3::new(1.22, 2.0, -1.0),
                HALF_PI,
                CeilingLight::new(Vec3::new(2.5, 3.3, -2.0)),
            ),
            LightSwitch::new(
                "living_switch",
                Vec3::new(0.78, 2.0, -1.0),
                -HALF_PI,
                CeilingLight::new(Vec3::new(-1.5, 3.3, -2.0)),
            ),
            LightSwitch::new(
                "bedroom_switch",
                Vec3::new(0.4, 2.0, 0.22),
                0.0,
                CeilingLight::new(Vec3::new(-1.5, 3.3, 2.0)),
            ),
        ]);
        self
    }

    /// Add a custom door
    pub fn with_door(mut self, door: Door) -> Self {
        self.doors.push(door);
        self
    }

    /// Add a custom switch
    pub fn with_switch(mut self, switch: LightSwitch) -> Self {
        self.switches.push(switch);
        self
    }

    /// Build the house
    pub fn build(self) -> Result<House, HouseError> {
        House::build(self.doors, self.switches, self.octree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard_house() -> House {
        HouseBuilder::new(OctreeConfig::default())
            .with_doors(&DoorConfig::default())
            .with_ceiling_lights()
            .build()
            .unwrap()
    }

    #[test]
    fn test_standard_layout_is_indexed_by_name() {
        let house = standard_house();
        assert_eq!(house.doors().len(), 3);
        assert_eq!(house.switches().len(), 3);
        assert_eq!(house.interactables().count(), 6);
        assert!(house.door("living_door").is_some());
        assert!(house.switch("living_door").is_none());
        assert_eq!(house.interactable("hall_switch").map(|i| i.name()), Some("hall_switch"));
        // Initial poses are indexed on build
        assert_eq!(house.registry().rebuild_count(), 1);
        assert_eq!(house.registry().octree().triangle_count(), 36);
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let config = DoorConfig::default();
        let result = HouseBuilder::new(OctreeConfig::default())
            .with_door(Door::new("twin", Vec3::zeros(), 0.0, &config))
            .with_switch(LightSwitch::new("twin", Vec3::zeros(), 0.0, CeilingLight::new(Vec3::zeros())))
            .build();
        assert_eq!(result.unwrap_err(), HouseError::DuplicateInteractable("twin".into()));
    }

    #[test]
    fn test_interact_by_name() {
        let mut house = standard_house();
        assert!(house.interact("bedroom_switch"));
        assert!(house.switch("bedroom_switch").unwrap().light().is_on());
        assert!(!house.interact("porch_light"));
    }

    #[test]
    fn test_rebuild_happens_once_per_completed_swing() {
        let mut house = standard_house();
        house.interact("front_door");

        let mut completed = Vec::new();
        for _ in 0..200 {
            house.animate_doors(0.01);
            completed.extend(house.process_door_events());
        }

        assert_eq!(completed, vec![DoorEvent::Opened("front_door".into())]);
        assert_eq!(house.registry().rebuild_count(), 2);
        assert_eq!(house.door("front_door").unwrap().state(), DoorState::Open);
    }
}
