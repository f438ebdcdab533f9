//! Collision detection primitives
//!
//! Narrow-phase tests used by the octree and the movement integrator.
//!
//! # Module Organization
//!
//! - [`primitives`] - Basic geometric primitives (rays, planes, triangles)
//! - [`capsule`] - The player's capsule volume and capsule-vs-triangle contacts
//!
//! # Key Types
//!
//! - [`Capsule`] - Segment with a radius, translated in place by the integrator
//! - [`CollisionResult`] - Unit push-out normal with a non-negative depth
//! - [`Ray`], [`Triangle`] - Primitive geometric types

pub mod primitives;
pub mod capsule;

// Re-export commonly used types
pub use primitives::{Plane, Ray, RayHit, Triangle};
pub use capsule::{closest_points_between_segments, Capsule, CollisionResult, CONTACT_SLOP};
