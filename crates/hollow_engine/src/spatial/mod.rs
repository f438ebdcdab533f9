//! Spatial partitioning data structures
//!
//! Provides the bounding boxes and the triangle octree used for capsule
//! collision and ray casting against static geometry.

mod aabb;
mod octree;
pub mod spatial_query;

pub use aabb::AABB;
pub use octree::{OctreeConfig, OctreeNode, TriangleOctree, MAX_RESOLVE_PASSES};
pub use spatial_query::{resolve_capsule_layers, CollisionQuery};
