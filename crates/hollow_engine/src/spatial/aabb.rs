//! Axis-aligned bounding boxes

use crate::foundation::math::Vec3;
use crate::physics::collision::{Ray, Triangle};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl AABB {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Inverted box that any `include_point` call will snap to
    pub fn empty() -> Self {
        Self {
            min: Vec3::repeat(f64::INFINITY),
            max: Vec3::repeat(f64::NEG_INFINITY),
        }
    }

    /// Smallest box holding every point
    pub fn from_points(points: &[Vec3]) -> Self {
        let mut bounds = Self::empty();
        for point in points {
            bounds.include_point(point);
        }
        bounds
    }

    /// Whether no point has been added yet
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow the box to hold `point`
    pub fn include_point(&mut self, point: &Vec3) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Grow the box to hold `other`
    pub fn union(&self, other: &AABB) -> AABB {
        AABB::new(self.min.inf(&other.min), self.max.sup(&other.max))
    }

    /// Copy of the box grown by `margin` on every side
    pub fn expanded(&self, margin: f64) -> AABB {
        let margin = Vec3::repeat(margin);
        AABB::new(self.min - margin, self.max + margin)
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: &Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check if this AABB intersects another AABB
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Separating axis test between this box and a triangle
    ///
    /// Tests the three box face normals, the triangle normal and the nine
    /// edge cross products (Akenine-Möller). Touching counts as overlap.
    pub fn intersects_triangle(&self, triangle: &Triangle) -> bool {
        let center = self.center();
        let extents = self.extents();
        let v0 = triangle.v0 - center;
        let v1 = triangle.v1 - center;
        let v2 = triangle.v2 - center;
        let edges = [v1 - v0, v2 - v1, v0 - v2];

        let separated_on = |axis: Vec3| -> bool {
            let p0 = v0.dot(&axis);
            let p1 = v1.dot(&axis);
            let p2 = v2.dot(&axis);
            let radius = extents.x * axis.x.abs() + extents.y * axis.y.abs() + extents.z * axis.z.abs();
            p0.min(p1).min(p2) > radius || p0.max(p1).max(p2) < -radius
        };

        for axis in [Vec3::x(), Vec3::y(), Vec3::z()] {
            if separated_on(axis) {
                return false;
            }
        }

        // Zero axes (parallel edges, degenerate triangles) never separate
        if separated_on(edges[0].cross(&edges[1])) {
            return false;
        }

        for unit in [Vec3::x(), Vec3::y(), Vec3::z()] {
            for edge in &edges {
                if separated_on(unit.cross(edge)) {
                    return false;
                }
            }
        }

        true
    }

    /// Test ray intersection with this AABB using slab method
    /// Returns the distance to the entry point if the ray intersects, None otherwise
    /// Based on "An Efficient and Robust Ray–Box Intersection Algorithm"
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f64> {
        let inv_dir = ray.direction.map(|d| if d != 0.0 { 1.0 / d } else { f64::INFINITY });

        let t1 = (self.min.x - ray.origin.x) * inv_dir.x;
        let t2 = (self.max.x - ray.origin.x) * inv_dir.x;
        let t3 = (self.min.y - ray.origin.y) * inv_dir.y;
        let t4 = (self.max.y - ray.origin.y) * inv_dir.y;
        let t5 = (self.min.z - ray.origin.z) * inv_dir.z;
        let t6 = (self.max.z - ray.origin.z) * inv_dir.z;

        // f64::min/max skip NaN from 0 * inf on a slab face
        let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
        let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

        // Ray intersects if tmax >= tmin and tmax >= 0
        if tmax >= tmin && tmax >= 0.0 {
            // Return entry point distance (or 0 if we're inside the box)
            Some(tmin.max(0.0))
        } else {
            None
        }
    }
}
