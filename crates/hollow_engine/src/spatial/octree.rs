//! Triangle octree for static collision geometry
//!
//! Bulk-loaded from a triangle list and never mutated afterwards; adding
//! geometry means building a new tree. Each node subdivides into 8 octants
//! while it holds more triangles than the configured threshold. A triangle
//! is stored in every octant its surface overlaps, so queries deduplicate
//! candidates before the narrow phase.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::foundation::math::{constants::GEOMETRY_EPSILON, Vec3};
use crate::physics::collision::{Capsule, CollisionResult, Ray, RayHit, Triangle, CONTACT_SLOP};
use crate::spatial::spatial_query::CollisionQuery;
use crate::spatial::AABB;

/// Upper bound on push-out passes per capsule query
pub const MAX_RESOLVE_PASSES: usize = 64;

/// Configuration for octree behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OctreeConfig {
    /// Maximum triangles per node before subdivision
    pub max_triangles_per_node: usize,

    /// Maximum subdivision depth
    pub max_depth: u32,

    /// Minimum node size (prevents excessive subdivision)
    pub min_node_size: f64,

    /// Margin added around the root bounds
    pub bounds_margin: f64,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            max_triangles_per_node: 8,
            max_depth: 16,
            min_node_size: 0.01,
            bounds_margin: 0.01,
        }
    }
}

/// Single node in the octree hierarchy
#[derive(Debug, Clone)]
pub struct OctreeNode {
    /// World-space bounds of this node
    pub bounds: AABB,

    /// Indices of the triangles stored in this node (empty for branches)
    pub triangles: Vec<usize>,

    /// Child nodes (8 octants), None if this is a leaf
    pub children: Option<Box<[OctreeNode; 8]>>,

    /// Depth in the tree (0 = root)
    pub depth: u32,
}

impl OctreeNode {
    /// Create a new leaf node
    pub fn new(bounds: AABB, depth: u32) -> Self {
        Self {
            bounds,
            triangles: Vec::new(),
            children: None,
            depth,
        }
    }

    /// Check if this node is a leaf (has no children)
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Bounds of one of the 8 octants
    ///
    /// Octant layout:
    /// 0: -X, -Y, -Z (back-bottom-left)
    /// 1: +X, -Y, -Z (back-bottom-right)
    /// 2: -X, +Y, -Z (back-top-left)
    /// 3: +X, +Y, -Z (back-top-right)
    /// 4: -X, -Y, +Z (front-bottom-left)
    /// 5: +X, -Y, +Z (front-bottom-right)
    /// 6: -X, +Y, +Z (front-top-left)
    /// 7: +X, +Y, +Z (front-top-right)
    fn octant_bounds(&self, octant: usize) -> AABB {
        let center = self.bounds.center();
        let quarter_extents = self.bounds.extents() * 0.5;

        let x_sign = if octant & 1 != 0 { 1.0 } else { -1.0 };
        let y_sign = if octant & 2 != 0 { 1.0 } else { -1.0 };
        let z_sign = if octant & 4 != 0 { 1.0 } else { -1.0 };

        let child_center = Vec3::new(
            center.x + quarter_extents.x * x_sign,
            center.y + quarter_extents.y * y_sign,
            center.z + quarter_extents.z * z_sign,
        );
        AABB::from_center_extents(child_center, quarter_extents)
    }

    /// Recursively split this node until the configured limits are reached
    fn split(&mut self, triangles: &[Triangle], config: &OctreeConfig) {
        let largest_side = self.bounds.extents().max() * 2.0;
        if self.triangles.len() <= config.max_triangles_per_node
            || self.depth >= config.max_depth
            || largest_side <= config.min_node_size
        {
            return;
        }

        let mut children: [OctreeNode; 8] = std::array::from_fn(|octant| {
            let bounds = self.octant_bounds(octant);
            let mut child = OctreeNode::new(bounds, self.depth + 1);
            child.triangles = self
                .triangles
                .iter()
                .copied()
                .filter(|&index| bounds.intersects_triangle(&triangles[index]))
                .collect();
            child
        });

        // No octant separated anything, deeper levels would only copy the list
        let parent_count = self.triangles.len();
        if children
            .iter()
            .all(|child| child.triangles.is_empty() || child.triangles.len() == parent_count)
        {
            return;
        }

        for child in children.iter_mut() {
            child.split(triangles, config);
        }
        self.triangles.clear();
        self.children = Some(Box::new(children));
    }

    /// Collect triangle indices of every node whose bounds overlap `region`
    fn collect_in_region(&self, region: &AABB, results: &mut Vec<usize>) {
        if !self.bounds.intersects(region) {
            return;
        }

        results.extend_from_slice(&self.triangles);

        if let Some(ref children) = self.children {
            for child in children.iter() {
                child.collect_in_region(region, results);
            }
        }
    }

    /// Collect triangle indices of every node the ray enters before `max_distance`
    fn collect_along_ray(&self, ray: &Ray, max_distance: f64, results: &mut Vec<usize>) {
        match self.bounds.intersect_ray(ray) {
            Some(entry) if entry <= max_distance => {}
            _ => return,
        }

        results.extend_from_slice(&self.triangles);

        if let Some(ref children) = self.children {
            for child in children.iter() {
                child.collect_along_ray(ray, max_distance, results);
            }
        }
    }

    /// Count this node and all of its descendants
    pub fn count_nodes(&self) -> usize {
        1 + self
            .children
            .as_ref()
            .map_or(0, |children| children.iter().map(OctreeNode::count_nodes).sum())
    }

    /// Get all leaf nodes (for visualization)
    pub fn get_all_leaves<'a>(&'a self, leaves: &mut Vec<&'a OctreeNode>) {
        if self.is_leaf() {
            leaves.push(self);
        } else if let Some(ref children) = self.children {
            for child in children.iter() {
                child.get_all_leaves(leaves);
            }
        }
    }
}

/// Static triangle octree answering capsule and ray queries
#[derive(Debug, Clone)]
pub struct TriangleOctree {
    /// Root node covering every stored triangle
    pub root: OctreeNode,

    triangles: Vec<Triangle>,
    config: OctreeConfig,
}

impl Default for TriangleOctree {
    fn default() -> Self {
        Self::build(Vec::new(), OctreeConfig::default())
    }
}

impl TriangleOctree {
    /// Build an octree with the default configuration
    pub fn from_triangles(triangles: impl IntoIterator<Item = Triangle>) -> Self {
        Self::build(triangles, OctreeConfig::default())
    }

    /// Bulk-load an octree from a triangle list
    ///
    /// Degenerate triangles are dropped with a warning.
    pub fn build(triangles: impl IntoIterator<Item = Triangle>, config: OctreeConfig) -> Self {
        let mut skipped = 0usize;
        let triangles: Vec<Triangle> = triangles
            .into_iter()
            .filter(|triangle| {
                let degenerate = triangle.is_degenerate();
                if degenerate {
                    skipped += 1;
                }
                !degenerate
            })
            .collect();

        if skipped > 0 {
            warn!("Skipped {} degenerate triangles while building octree", skipped);
        }

        let mut bounds = AABB::empty();
        for triangle in &triangles {
            bounds = bounds.union(&triangle.bounds());
        }
        if bounds.is_empty() {
            bounds = AABB::new(Vec3::zeros(), Vec3::zeros());
        }

        let mut root = OctreeNode::new(bounds.expanded(config.bounds_margin), 0);
        root.triangles = (0..triangles.len()).collect();
        root.split(&triangles, &config);

        let octree = Self { root, triangles, config };
        debug!(
            "Built octree: {} triangles in {} nodes",
            octree.triangle_count(),
            octree.node_count()
        );
        octree
    }

    /// Configuration the tree was built with
    pub fn config(&self) -> &OctreeConfig {
        &self.config
    }

    /// Stored (non-degenerate) triangles
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Number of stored triangles
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the tree holds no triangles
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Total number of nodes
    pub fn node_count(&self) -> usize {
        self.root.count_nodes()
    }

    /// Bounds of the root node
    pub fn bounds(&self) -> AABB {
        self.root.bounds
    }

    /// Get all leaf nodes (for visualization)
    pub fn get_all_leaves(&self) -> Vec<&OctreeNode> {
        let mut leaves = Vec::new();
        self.root.get_all_leaves(&mut leaves);
        leaves
    }

    /// Sorted, deduplicated candidate triangles near `region`
    fn candidates_in(&self, region: &AABB) -> Vec<usize> {
        let mut candidates = Vec::new();
        self.root.collect_in_region(region, &mut candidates);
        candidates.sort_unstable();
        candidates.dedup();
        candidates
    }

    /// Combined push-out of a capsule against every overlapping triangle
    ///
    /// Contacts are resolved one after another in triangle index order on a
    /// scratch copy of the capsule, and the pass is repeated until no
    /// contact is deeper than [`CONTACT_SLOP`] (at most
    /// [`MAX_RESOLVE_PASSES`] passes). Opposing surfaces such as a narrow
    /// valley therefore settle on the same position whatever the triangle
    /// order. The result is the total displacement of the copy: `normal` is
    /// its direction and `depth` its length. When the capsule only touches
    /// (zero total displacement) the normal is the averaged contact normal
    /// with depth 0.
    pub fn capsule_intersect(&self, capsule: &Capsule) -> Option<CollisionResult> {
        if self.triangles.is_empty() {
            return None;
        }

        let mut scratch = *capsule;
        let mut contacts = 0usize;
        let mut normal_sum = Vec3::zeros();

        for pass in 1..=MAX_RESOLVE_PASSES {
            let mut deepest = 0.0_f64;
            for index in self.candidates_in(&scratch.bounds()) {
                if let Some(contact) = scratch.intersect_triangle(&self.triangles[index]) {
                    contacts += 1;
                    normal_sum += contact.normal;
                    deepest = deepest.max(contact.depth);
                    scratch.translate(&contact.correction());
                }
            }

            if deepest <= CONTACT_SLOP {
                break;
            }
            if pass == MAX_RESOLVE_PASSES {
                debug!(
                    "Capsule push-out stopped after {} passes with depth {:e}",
                    pass, deepest
                );
            }
        }

        if contacts == 0 {
            return None;
        }

        let displacement = scratch.start - capsule.start;
        match displacement.try_normalize(GEOMETRY_EPSILON) {
            Some(normal) => Some(CollisionResult::new(normal, displacement.norm())),
            None => normal_sum
                .try_normalize(GEOMETRY_EPSILON)
                .map(|normal| CollisionResult::new(normal, 0.0)),
        }
    }

    /// Nearest triangle hit along a ray, no farther than `max_distance`
    pub fn ray_intersect(&self, ray: &Ray, max_distance: f64) -> Option<RayHit> {
        if self.triangles.is_empty() {
            return None;
        }

        let mut candidates = Vec::new();
        self.root.collect_along_ray(ray, max_distance, &mut candidates);
        candidates.sort_unstable();
        candidates.dedup();

        candidates
            .into_iter()
            .filter_map(|index| {
                self.triangles[index]
                    .intersect_ray(ray)
                    .filter(|&distance| distance <= max_distance)
                    .map(|distance| RayHit {
                        triangle: index,
                        distance,
                        point: ray.point_at(distance),
                    })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

impl CollisionQuery for TriangleOctree {
    fn capsule_intersect(&self, capsule: &Capsule) -> Option<CollisionResult> {
        TriangleOctree::capsule_intersect(self, capsule)
    }

    fn ray_intersect(&self, ray: &Ray, max_distance: f64) -> Option<RayHit> {
        TriangleOctree::ray_intersect(self, ray, max_distance)
    }
}
