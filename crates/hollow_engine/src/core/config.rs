//! # Simulation Configuration
//!
//! All tunables of the walking simulation in one serializable tree. Defaults
//! hold the hand-tuned constants of the haunted-house demo; a host may load an
//! override file in TOML or RON through the [`Config`] trait and must call
//! [`SimulationConfig::validate`] before handing it to the world.
//!
//! ## Configuration Categories
//!
//! - **Physics**: gravity, substepping, speeds and damping
//! - **Player**: spawn capsule and out-of-bounds recovery
//! - **Interaction**: raycast reach
//! - **Doors**: swing speed and angle
//! - **Octree**: spatial partition tuning shared by the static world and the door registry

use serde::{Deserialize, Serialize};

use crate::foundation::math::{constants, Vec3};
use crate::physics::collision::Capsule;
use crate::spatial::OctreeConfig;

pub use crate::config::{Config, ConfigError};

/// Integrator constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Vertical acceleration applied while airborne (negative is down)
    pub gravity: f64,
    /// Fixed number of substeps per rendered frame
    pub steps_per_frame: u32,
    /// Raw frame deltas are clamped to this before being split into substeps
    pub max_frame_delta: f64,
    /// Acceleration from movement keys while grounded
    pub ground_speed: f64,
    /// Acceleration from movement keys while airborne
    pub air_speed: f64,
    /// Vertical speed set by a jump
    pub jump_speed: f64,
    /// Exponential velocity decay rate per second
    pub damping_rate: f64,
    /// Damping multiplier while airborne (less air resistance)
    pub air_damping_scale: f64,
    /// A contact counts as floor when `normal.y >= 1 - floor_normal_tolerance`
    pub floor_normal_tolerance: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: -9.81,
            steps_per_frame: 5,
            max_frame_delta: 0.05,
            ground_speed: 15.0,
            air_speed: 8.0,
            jump_speed: 5.0,
            damping_rate: 4.0,
            air_damping_scale: 0.1,
            floor_normal_tolerance: 1e-6,
        }
    }
}

/// Serializable capsule description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapsuleConfig {
    /// Bottom of the central segment
    pub start: Vec3,
    /// Top of the central segment (eye position)
    pub end: Vec3,
    /// Capsule radius
    pub radius: f64,
}

impl CapsuleConfig {
    /// Build the capsule this config describes
    pub fn to_capsule(&self) -> Capsule {
        Capsule::new(self.start, self.end, self.radius)
    }
}

/// Player spawn and recovery settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Capsule the player is created with; its position is restored when out of bounds
    pub spawn: CapsuleConfig,
    /// Radius the capsule is given when reset after falling out of bounds
    pub respawn_radius: f64,
    /// Camera heights at or below this reset the player to spawn
    pub out_of_bounds_y: f64,
    /// Offset of the orthographic follow camera from the capsule end
    pub follow_camera_offset: Vec3,
    /// Vertical field of view of the first-person camera
    pub vertical_fov_degrees: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: CapsuleConfig {
                start: Vec3::new(0.0, 0.5, 10.0),
                end: Vec3::new(0.0, 2.0, 10.0),
                radius: 0.2,
            },
            respawn_radius: 0.35,
            out_of_bounds_y: -5.0,
            follow_camera_offset: Vec3::new(1.0, 0.0, 2.0),
            vertical_fov_degrees: 75.0,
        }
    }
}

/// Interaction raycast settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Hits at or beyond this distance are ignored
    pub range: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self { range: 5.0 }
    }
}

/// Door animation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorConfig {
    /// Swing speed in radians per second
    pub angular_speed: f64,
    /// Angle between the closed and the fully open pose
    pub swing_angle: f64,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            angular_speed: constants::THIRD_PI,
            swing_angle: constants::HALF_PI,
        }
    }
}

/// Root configuration of the walking simulation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Integrator constants
    pub physics: PhysicsConfig,
    /// Player spawn and recovery
    pub player: PlayerConfig,
    /// Interaction raycast
    pub interaction: InteractionConfig,
    /// Door animation
    pub doors: DoorConfig,
    /// Spatial partition tuning
    pub octree: OctreeConfig,
}

impl Config for SimulationConfig {}

impl SimulationConfig {
    /// Check every precondition the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let physics = &self.physics;
        if physics.steps_per_frame == 0 {
            return Err(ConfigError::Invalid("steps_per_frame must be at least 1".into()));
        }
        if !(physics.max_frame_delta.is_finite() && physics.max_frame_delta > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_frame_delta must be positive, got {}",
                physics.max_frame_delta
            )));
        }
        if !(physics.gravity.is_finite() && physics.gravity < 0.0) {
            return Err(ConfigError::Invalid(format!(
                "gravity must point down (negative), got {}",
                physics.gravity
            )));
        }
        if physics.damping_rate < 0.0 || physics.air_damping_scale < 0.0 {
            return Err(ConfigError::Invalid("damping must not be negative".into()));
        }

        let spawn = &self.player.spawn;
        if !(spawn.radius.is_finite() && spawn.radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "spawn capsule radius must be positive, got {}",
                spawn.radius
            )));
        }
        let respawn_radius = self.player.respawn_radius;
        if !(respawn_radius.is_finite() && respawn_radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "respawn radius must be positive, got {}",
                respawn_radius
            )));
        }
        if spawn.end.y <= self.player.out_of_bounds_y {
            return Err(ConfigError::Invalid(
                "spawn capsule must start above the out-of-bounds height".into(),
            ));
        }

        let fov = self.player.vertical_fov_degrees;
        if !(fov > 0.0 && fov < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "vertical field of view must be within (0, 180) degrees, got {}",
                fov
            )));
        }

        if self.interaction.range <= 0.0 {
            return Err(ConfigError::Invalid("interaction range must be positive".into()));
        }
        if self.doors.angular_speed <= 0.0 || self.doors.swing_angle <= 0.0 {
            return Err(ConfigError::Invalid("door speed and swing angle must be positive".into()));
        }
        if self.octree.max_triangles_per_node == 0 {
            return Err(ConfigError::Invalid("octree nodes must hold at least one triangle".into()));
        }

        Ok(())
    }
}
