//! Camera poses published to the renderer
//!
//! Yaw 0 looks down -Z with +Y up. Yaw turns counter-clockwise seen from
//! above; positive pitch looks up.

use crate::foundation::math::{constants::HALF_PI, Vec2, Vec3};
use crate::physics::collision::Ray;

/// Largest allowed pitch magnitude
pub const MAX_PITCH: f64 = HALF_PI - 0.01;

/// Which camera the renderer should use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// First-person camera at the capsule's eye point
    #[default]
    Perspective,
    /// Follow camera looking down at the player
    Orthographic,
}

impl ViewMode {
    /// The other view mode
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Perspective => ViewMode::Orthographic,
            ViewMode::Orthographic => ViewMode::Perspective,
        }
    }
}

/// Position and orientation of a camera
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraPose {
    /// Eye position
    pub position: Vec3,
    /// Rotation about +Y in radians
    pub yaw: f64,
    /// Rotation about the camera's right axis in radians
    pub pitch: f64,
}

impl CameraPose {
    /// Camera at `position` looking down -Z
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Camera at `position` looking toward `target`
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let direction = target - position;
        let horizontal = direction.x.hypot(direction.z);
        Self {
            position,
            yaw: (-direction.x).atan2(-direction.z),
            pitch: direction.y.atan2(horizontal),
        }
    }

    /// Unit view direction
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }

    /// Unit view direction flattened onto the ground plane
    pub fn horizontal_forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(-sin_yaw, 0.0, -cos_yaw)
    }

    /// Unit right vector on the ground plane (`horizontal_forward × up`)
    pub fn horizontal_right(&self) -> Vec3 {
        self.horizontal_forward().cross(&Vec3::y())
    }

    /// Turn the camera; pitch is clamped short of straight up or down
    pub fn rotate(&mut self, delta_yaw: f64, delta_pitch: f64) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Zero the rotation
    pub fn reset_rotation(&mut self) {
        self.yaw = 0.0;
        self.pitch = 0.0;
    }

    /// Ray from the eye through a point given in normalized device coordinates
    pub fn ray_through(&self, ndc: Vec2, vertical_fov: f64, aspect: f64) -> Option<Ray> {
        let half_height = (vertical_fov * 0.5).tan();
        let local = Vec3::new(ndc.x * half_height * aspect, ndc.y * half_height, -1.0);

        // Rotate by pitch about X, then by yaw about Y
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let pitched = Vec3::new(
            local.x,
            cos_pitch * local.y - sin_pitch * local.z,
            sin_pitch * local.y + cos_pitch * local.z,
        );
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let direction = Vec3::new(
            cos_yaw * pitched.x + sin_yaw * pitched.z,
            pitched.y,
            -sin_yaw * pitched.x + cos_yaw * pitched.z,
        );
        Ray::new(self.position, direction)
    }
}
