//! Math utilities and types
//!
//! Double-precision math types for collision and movement. Everything in the
//! physics path works in `f64` so that repeated push-out and substepping do
//! not accumulate visible drift.

pub use nalgebra::{
    Vector2, Vector3,
    Matrix4,
};

/// 2D vector type
pub type Vec2 = Vector2<f64>;

/// 3D vector type
pub type Vec3 = Vector3<f64>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f64>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f64>;

/// Quaternion type for rotations
pub type Quat = nalgebra::UnitQuaternion<f64>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with a position and a rotation about the Y axis
    pub fn from_position_yaw(position: Vec3, yaw: f64) -> Self {
        Self {
            position,
            rotation: Quat::from_axis_angle(&Vec3::y_axis(), yaw),
            ..Default::default()
        }
    }

    /// Set the scale factors (builder style)
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: &Vec3) -> Vec3 {
        self.position + self.rotation * point.component_mul(&self.scale)
    }

    /// Combine this transform with a child transform (parent * child)
    pub fn combine(&self, other: &Transform) -> Transform {
        Transform {
            position: self.position + self.rotation * (self.scale.component_mul(&other.position)),
            rotation: self.rotation * other.rotation,
            scale: self.scale.component_mul(&other.scale),
        }
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f64 = std::f64::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f64 = PI * 0.5;

    /// Pi / 3
    pub const THIRD_PI: f64 = PI / 3.0;

    /// Pi / 4
    pub const QUARTER_PI: f64 = PI * 0.25;

    /// Tolerance used to reject degenerate geometry
    pub const GEOMETRY_EPSILON: f64 = 1e-12;
}
