//! Ceiling lights, their wall switches and the player's flashlight

use log::debug;

use crate::foundation::math::{constants::QUARTER_PI, Transform, Vec3};
use crate::physics::collision::Triangle;
use crate::scene::TriangleMesh;

use super::interactable::Interactable;

/// Point light hanging from a ceiling
#[derive(Debug, Clone, PartialEq)]
pub struct CeilingLight {
    /// Light position
    pub position: Vec3,
    power: f64,
}

impl CeilingLight {
    /// Power of a lit bulb
    pub const ON_POWER: f64 = 150.0;

    /// Create a light that starts switched off
    pub fn new(position: Vec3) -> Self {
        Self { position, power: 0.0 }
    }

    /// Current emitted power
    pub fn power(&self) -> f64 {
        self.power
    }

    /// Whether the bulb is lit
    pub fn is_on(&self) -> bool {
        self.power > 0.0
    }

    /// Switch between off and [`Self::ON_POWER`]
    pub fn toggle(&mut self) {
        self.power = if self.is_on() { 0.0 } else { Self::ON_POWER };
    }
}

/// Wall switch driving one ceiling light
#[derive(Debug, Clone)]
pub struct LightSwitch {
    name: String,
    transform: Transform,
    lever_angle: f64,
    light: CeilingLight,
    plate: TriangleMesh,
}

impl LightSwitch {
    /// Size of the switch plate (width, height, depth)
    pub const PLATE_SIZE: [f64; 3] = [0.2, 0.2, 0.05];

    /// Create a switch on a wall; `yaw` turns the plate to face away from the wall
    pub fn new(name: impl Into<String>, position: Vec3, yaw: f64, light: CeilingLight) -> Self {
        Self {
            name: name.into(),
            transform: Transform::from_position_yaw(position, yaw),
            lever_angle: -QUARTER_PI,
            light,
            plate: TriangleMesh::cuboid(Vec3::from(Self::PLATE_SIZE)),
        }
    }

    /// Tilt of the lever about the plate's horizontal axis
    pub fn lever_angle(&self) -> f64 {
        self.lever_angle
    }

    /// Light driven by this switch
    pub fn light(&self) -> &CeilingLight {
        &self.light
    }

    /// Plate position
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }
}

impl Interactable for LightSwitch {
    fn name(&self) -> &str {
        &self.name
    }

    fn interact(&mut self) {
        self.lever_angle = -self.lever_angle;
        self.light.toggle();
        debug!(
            "Switch '{}' turned light {}",
            self.name,
            if self.light.is_on() { "on" } else { "off" }
        );
    }

    fn pick_triangles(&self) -> Vec<Triangle> {
        self.plate.world_triangles(&self.transform)
    }
}

/// Hand-held light carried by the player
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flashlight {
    power: f64,
}

impl Flashlight {
    /// Power when switched on
    pub const ON_POWER: f64 = 20.0;

    /// Current emitted power
    pub fn power(&self) -> f64 {
        self.power
    }

    /// Whether the flashlight is on
    pub fn is_on(&self) -> bool {
        self.power > 0.0
    }

    /// Switch between off and [`Self::ON_POWER`]
    pub fn toggle(&mut self) {
        self.power = if self.is_on() { 0.0 } else { Self::ON_POWER };
    }
}
