//! Hinged doors and their swing animation
//!
//! A door is a panel hung on a vertical pivot. Each door has its own
//! closed reference yaw; the open pose is `closed_angle - swing_angle`.
//! Finished swings are reported as [`DoorEvent`]s so the owner can rebuild
//! the door collision geometry exactly once per transition.

use log::debug;

use crate::core::DoorConfig;
use crate::events::EventQueue;
use crate::foundation::math::{Transform, Vec3};
use crate::physics::collision::Triangle;
use crate::scene::TriangleMesh;

use super::interactable::Interactable;

/// Completed door transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DoorEvent {
    /// The named door reached its fully open pose
    Opened(String),
    /// The named door reached its closed pose
    Closed(String),
}

impl DoorEvent {
    /// Name of the door that finished moving
    pub fn door_name(&self) -> &str {
        match self {
            DoorEvent::Opened(name) | DoorEvent::Closed(name) => name,
        }
    }
}

/// Observable door state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorState {
    /// At rest in the closed pose
    Closed,
    /// Swinging toward the open pose
    Opening,
    /// At rest in the open pose
    Open,
    /// Swinging toward the closed pose
    Closing,
}

/// Door panel hung on a pivot
#[derive(Debug, Clone)]
pub struct Door {
    name: String,
    pivot: Vec3,
    closed_angle: f64,
    rotation: f64,
    is_opening: bool,
    is_closing: bool,
    angular_speed: f64,
    swing_angle: f64,
    panel: TriangleMesh,
    panel_offset: Vec3,
}

impl Door {
    /// Standard panel size (width, height, thickness)
    pub const PANEL_SIZE: [f64; 3] = [1.0, 2.1, 0.1];

    /// Offset of the panel center from the pivot
    pub const PANEL_OFFSET: [f64; 3] = [-0.6, 0.0, 0.0];

    /// Create a closed door with the standard panel
    pub fn new(name: impl Into<String>, pivot: Vec3, closed_angle: f64, config: &DoorConfig) -> Self {
        Self {
            name: name.into(),
            pivot,
            closed_angle,
            rotation: closed_angle,
            is_opening: false,
            is_closing: false,
            angular_speed: config.angular_speed,
            swing_angle: config.swing_angle,
            panel: TriangleMesh::cuboid(Vec3::from(Self::PANEL_SIZE)),
            panel_offset: Vec3::from(Self::PANEL_OFFSET),
        }
    }

    /// Pivot position
    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    /// Current yaw of the pivot
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Yaw of the closed pose
    pub fn closed_angle(&self) -> f64 {
        self.closed_angle
    }

    /// Yaw of the fully open pose
    pub fn open_angle(&self) -> f64 {
        self.closed_angle - self.swing_angle
    }

    /// Rotation relative to the closed pose (0 closed, `-swing_angle` open)
    pub fn swing_offset(&self) -> f64 {
        self.rotation - self.closed_angle
    }

    /// Whether the door is swinging open
    pub fn is_opening(&self) -> bool {
        self.is_opening
    }

    /// Whether the door is swinging shut
    pub fn is_closing(&self) -> bool {
        self.is_closing
    }

    /// Current state
    pub fn state(&self) -> DoorState {
        if self.is_opening {
            DoorState::Opening
        } else if self.is_closing {
            DoorState::Closing
        } else if self.swing_offset() <= -self.swing_angle * 0.5 {
            DoorState::Open
        } else {
            DoorState::Closed
        }
    }

    /// Toggle the swing direction
    ///
    /// A swing in progress is reversed. A door at rest starts opening when
    /// it sits on the closed side of the midpoint, otherwise it starts closing.
    pub fn toggle(&mut self) {
        let open = if self.is_opening || self.is_closing {
            !self.is_opening
        } else {
            self.swing_offset() > -self.swing_angle * 0.5
        };
        self.is_opening = open;
        self.is_closing = !open;
        debug!(
            "Door '{}' {} at offset {:.3}",
            self.name,
            if open { "opening" } else { "closing" },
            self.swing_offset()
        );
    }

    /// Advance the swing by `delta_time` seconds
    ///
    /// On reaching a bound the rotation is clamped to it, the motion flag is
    /// cleared and exactly one [`DoorEvent`] is sent.
    pub fn animate(&mut self, delta_time: f64, events: &mut EventQueue<DoorEvent>) {
        let step = self.angular_speed * delta_time;
        if self.is_opening {
            self.rotation -= step;
            if self.swing_offset() <= -self.swing_angle {
                self.rotation = self.open_angle();
                self.is_opening = false;
                events.send(DoorEvent::Opened(self.name.clone()));
            }
        } else if self.is_closing {
            self.rotation += step;
            if self.swing_offset() >= 0.0 {
                self.rotation = self.closed_angle;
                self.is_closing = false;
                events.send(DoorEvent::Closed(self.name.clone()));
            }
        }
    }

    /// World transform of the panel
    pub fn panel_transform(&self) -> Transform {
        Transform::from_position_yaw(self.pivot, self.rotation)
            .combine(&Transform::from_position(self.panel_offset))
    }

    /// Panel triangles in the current pose
    pub fn world_triangles(&self) -> Vec<Triangle> {
        self.panel.world_triangles(&self.panel_transform())
    }
}

impl Interactable for Door {
    fn name(&self) -> &str {
        &self.name
    }

    fn interact(&mut self) {
        self.toggle();
    }

    fn pick_triangles(&self) -> Vec<Triangle> {
        self.world_triangles()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::{HALF_PI, PI};
    use approx::assert_relative_eq;

    const DT: f64 = 0.01;

    fn front_door() -> Door {
        Door::new("front_door", Vec3::new(3.1, 1.65, 0.0), 0.0, &DoorConfig::default())
    }

    fn run_until_idle(door: &mut Door, events: &mut EventQueue<DoorEvent>) -> usize {
        let mut steps = 0;
        while door.is_opening() || door.is_closing() {
            door.animate(DT, events);
            steps += 1;
            assert!(steps < 10_000, "door never settled");
        }
        steps
    }

    #[test]
    fn test_full_open_emits_single_event() {
        let mut door = front_door();
        let mut events = EventQueue::new();
        assert_eq!(door.state(), DoorState::Closed);

        door.interact();
        assert_eq!(door.state(), DoorState::Opening);
        let steps = run_until_idle(&mut door, &mut events);
        // pi/2 at pi/3 rad/s takes 1.5 s
        assert!((149..=151).contains(&steps));

        assert_eq!(events.drain(), vec![DoorEvent::Opened("front_door".into())]);
        assert_eq!(door.state(), DoorState::Open);
        assert_relative_eq!(door.rotation(), -HALF_PI);

        // Idle doors stay silent
        for _ in 0..100 {
            door.animate(DT, &mut events);
        }
        assert!(events.is_empty());
    }

    #[test]
    fn test_mid_swing_interact_reverses_without_event() {
        let mut door = front_door();
        let mut events = EventQueue::new();

        door.interact();
        for _ in 0..30 {
            door.animate(DT, &mut events);
        }
        assert!(events.is_empty());
        assert!(door.swing_offset() < 0.0);

        door.interact();
        assert_eq!(door.state(), DoorState::Closing);
        assert!(!door.is_opening());
        run_until_idle(&mut door, &mut events);

        assert_eq!(events.drain(), vec![DoorEvent::Closed("front_door".into())]);
        assert_relative_eq!(door.rotation(), 0.0);
        assert_eq!(door.state(), DoorState::Closed);
    }

    #[test]
    fn test_open_door_closes_on_interact() {
        let config = DoorConfig::default();
        let mut door = Door::new("bedroom_door", Vec3::new(-1.1, 1.65, 0.0), PI, &config);
        let mut events = EventQueue::new();

        door.interact();
        run_until_idle(&mut door, &mut events);
        assert_relative_eq!(door.rotation(), PI - HALF_PI);

        door.interact();
        assert_eq!(door.state(), DoorState::Closing);
        run_until_idle(&mut door, &mut events);
        assert_relative_eq!(door.rotation(), PI);
        assert_eq!(events.total_sent(), 2);
    }

    #[test]
    fn test_panel_swings_around_pivot() {
        let mut door = front_door();
        let closed: Vec<Triangle> = door.world_triangles();
        let center = closed.iter().map(Triangle::centroid).sum::<Vec3>() / closed.len() as f64;
        // Closed panel spans x in [2.0, 3.0] around the pivot at x = 3.1
        assert!(center.x < 3.1 && center.x > 2.0);
        assert!(center.z.abs() < 1e-9);

        let mut events = EventQueue::new();
        door.interact();
        run_until_idle(&mut door, &mut events);
        let open = door.world_triangles();
        let center = open.iter().map(Triangle::centroid).sum::<Vec3>() / open.len() as f64;
        // Rotated -pi/2 about Y the panel now extends toward -Z
        assert!(center.z < -0.5);
        assert!((center.x - 3.1).abs() < 1e-9);
    }
}
