//! Physics module for collision detection and response
//!
//! Collision primitives live in [`collision`]; the movement integrator that
//! consumes them lives in [`crate::player`].

pub mod collision;

pub use collision::{
    Capsule,
    CollisionResult,
    Ray,
    RayHit,
    Triangle,
};
