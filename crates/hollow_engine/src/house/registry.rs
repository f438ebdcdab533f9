//! Collision geometry of movable doors
//!
//! Doors are few and small, so instead of updating the index while they
//! swing, the whole octree is rebuilt from the doors' current poses each
//! time a swing completes. Between rebuilds the registry keeps answering
//! with the geometry captured at the last rebuild.

use log::info;

use crate::physics::collision::{Capsule, CollisionResult, Ray, RayHit};
use crate::spatial::{CollisionQuery, OctreeConfig, TriangleOctree};

use super::door::Door;

/// Rebuildable octree over every door panel
#[derive(Debug, Clone)]
pub struct DoorColliderRegistry {
    octree: TriangleOctree,
    config: OctreeConfig,
    rebuild_count: u64,
}

impl DoorColliderRegistry {
    /// Create a registry with no door geometry
    pub fn new(config: OctreeConfig) -> Self {
        Self {
            octree: TriangleOctree::build(Vec::new(), config.clone()),
            config,
            rebuild_count: 0,
        }
    }

    /// Discard the current geometry and index every door in its current pose
    pub fn rebuild<'a>(&mut self, doors: impl IntoIterator<Item = &'a Door>) {
        let triangles: Vec<_> = doors
            .into_iter()
            .flat_map(|door| door.world_triangles())
            .collect();
        self.octree = TriangleOctree::build(triangles, self.config.clone());
        self.rebuild_count += 1;
        info!(
            "Rebuilt door colliders: {} triangles (rebuild #{})",
            self.octree.triangle_count(),
            self.rebuild_count
        );
    }

    /// Number of rebuilds since creation
    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }

    /// Octree built by the last rebuild
    pub fn octree(&self) -> &TriangleOctree {
        &self.octree
    }
}

impl CollisionQuery for DoorColliderRegistry {
    fn capsule_intersect(&self, capsule: &Capsule) -> Option<CollisionResult> {
        self.octree.capsule_intersect(capsule)
    }

    fn ray_intersect(&self, ray: &Ray, max_distance: f64) -> Option<RayHit> {
        self.octree.ray_intersect(ray, max_distance)
    }
}
