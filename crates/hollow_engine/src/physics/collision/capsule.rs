//! Capsule primitive and capsule-vs-triangle contact generation
//!
//! A capsule is a sphere swept along a segment. The player is a vertical
//! capsule whose `end` is the eye point and whose `start` sits one radius
//! above the feet.

use crate::foundation::math::{constants::GEOMETRY_EPSILON, Vec3};
use crate::spatial::AABB;
use super::primitives::Triangle;

/// Distances within this skin of the surface count as touching
pub const CONTACT_SLOP: f64 = 1e-9;

/// Push-out answer of a capsule query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Unit direction pointing away from the surface
    pub normal: Vec3,
    /// Distance to move along `normal` to resolve the penetration (never negative)
    pub depth: f64,
}

impl CollisionResult {
    /// Create a result, clamping negative depths to zero
    pub fn new(normal: Vec3, depth: f64) -> Self {
        Self {
            normal,
            depth: depth.max(0.0),
        }
    }

    /// Translation that resolves this contact
    pub fn correction(&self) -> Vec3 {
        self.normal * self.depth
    }
}

/// Line segment with a radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    /// Bottom end of the central segment
    pub start: Vec3,
    /// Top end of the central segment
    pub end: Vec3,
    /// Radius around the segment
    pub radius: f64,
}

impl Capsule {
    /// Create a capsule from its segment and radius
    pub fn new(start: Vec3, end: Vec3, radius: f64) -> Self {
        debug_assert!(radius > 0.0, "capsule radius must be positive");
        Self { start, end, radius }
    }

    /// Move both segment ends by `delta`
    pub fn translate(&mut self, delta: &Vec3) {
        self.start += delta;
        self.end += delta;
    }

    /// Midpoint of the central segment
    pub fn center(&self) -> Vec3 {
        (self.start + self.end) * 0.5
    }

    /// Axis-aligned box enclosing the whole capsule
    pub fn bounds(&self) -> AABB {
        let r = Vec3::new(self.radius, self.radius, self.radius);
        AABB::new(
            self.start.inf(&self.end) - r,
            self.start.sup(&self.end) + r,
        )
    }

    /// Contact between this capsule and a single triangle
    ///
    /// The triangle's plane is oriented toward the capsule center, so the
    /// winding order of authored geometry does not matter. Zero-area
    /// triangles never produce a contact.
    pub fn intersect_triangle(&self, triangle: &Triangle) -> Option<CollisionResult> {
        let mut plane = triangle.plane()?;
        if plane.distance_to_point(&self.center()) < 0.0 {
            plane = plane.flipped();
        }

        let d1 = plane.distance_to_point(&self.start) - self.radius;
        let d2 = plane.distance_to_point(&self.end) - self.radius;

        if (d1 > CONTACT_SLOP && d2 > CONTACT_SLOP)
            || (d1 < -self.radius && d2 < -self.radius)
        {
            return None;
        }

        // Point of the segment closest to the plane contact
        let span = d1.abs() + d2.abs();
        let t = if span > GEOMETRY_EPSILON { (d1 / span).abs() } else { 0.5 };
        let nearest = self.start.lerp(&self.end, t);

        if triangle.contains_point(&nearest) {
            return Some(CollisionResult::new(plane.normal, -d1.min(d2)));
        }

        // Outside the face: test the segment against each edge
        let radius_sq = self.radius * self.radius;
        for (a, b) in triangle.edges() {
            let (on_capsule, on_edge) = closest_points_between_segments(self.start, self.end, a, b);
            let separation = on_capsule - on_edge;
            let distance_sq = separation.norm_squared();
            if distance_sq < radius_sq {
                let distance = distance_sq.sqrt();
                let normal = separation
                    .try_normalize(GEOMETRY_EPSILON)
                    .unwrap_or(plane.normal);
                return Some(CollisionResult::new(normal, self.radius - distance));
            }
        }

        None
    }
}

/// Closest points between segments `p1-q1` and `p2-q2`
///
/// Returns `(point on first segment, point on second segment)`. Handles
/// degenerate (point) segments and parallel segments.
pub fn closest_points_between_segments(p1: Vec3, q1: Vec3, p2: Vec3, q2: Vec3) -> (Vec3, Vec3) {
    let d1 = q1 - p1;
    let d2 = q2 - p2;
    let r = p1 - p2;
    let a = d1.norm_squared();
    let e = d2.norm_squared();
    let f = d2.dot(&r);

    if a <= GEOMETRY_EPSILON && e <= GEOMETRY_EPSILON {
        return (p1, p2);
    }

    let (s, t) = if a <= GEOMETRY_EPSILON {
        (0.0, (f / e).clamp(0.0, 1.0))
    } else {
        let c = d1.dot(&r);
        if e <= GEOMETRY_EPSILON {
            ((-c / a).clamp(0.0, 1.0), 0.0)
        } else {
            let b = d1.dot(&d2);
            let denom = a * e - b * b;
            let s = if denom > GEOMETRY_EPSILON {
                ((b * f - c * e) / denom).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let t = (b * s + f) / e;
            if t < 0.0 {
                ((-c / a).clamp(0.0, 1.0), 0.0)
            } else if t > 1.0 {
                (((b - c) / a).clamp(0.0, 1.0), 1.0)
            } else {
                (s, t)
            }
        }
    };

    (p1 + d1 * s, p2 + d2 * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn player_capsule(bottom: f64) -> Capsule {
        Capsule::new(
            Vec3::new(0.0, bottom + 0.2, 0.0),
            Vec3::new(0.0, bottom + 1.7, 0.0),
            0.2,
        )
    }

    fn floor_triangle() -> Triangle {
        Triangle::new(
            Vec3::new(-5.0, 0.0, 5.0),
            Vec3::new(5.0, 0.0, 5.0),
            Vec3::new(0.0, 0.0, -5.0),
        )
    }

    #[test]
    fn test_translate_moves_both_ends() {
        let mut capsule = player_capsule(0.0);
        capsule.translate(&Vec3::new(1.0, -0.5, 2.0));
        assert_relative_eq!(capsule.start, Vec3::new(1.0, -0.3, 2.0));
        assert_relative_eq!(capsule.end, Vec3::new(1.0, 1.2, 2.0));
        assert_relative_eq!(capsule.radius, 0.2);
    }

    #[test]
    fn test_bounds_cover_radius() {
        let bounds = player_capsule(0.0).bounds();
        assert_relative_eq!(bounds.min, Vec3::new(-0.2, 0.0, -0.2));
        assert_relative_eq!(bounds.max, Vec3::new(0.2, 1.9, 0.2));
    }

    #[test]
    fn test_penetrating_floor_reports_up_normal() {
        let contact = player_capsule(-0.05).intersect_triangle(&floor_triangle()).unwrap();
        assert_relative_eq!(contact.normal, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(contact.depth, 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_winding_does_not_flip_normal() {
        let floor = floor_triangle();
        let reversed = Triangle::new(floor.v0, floor.v2, floor.v1);
        let contact = player_capsule(-0.05).intersect_triangle(&reversed).unwrap();
        assert_relative_eq!(contact.normal, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_resting_contact_has_zero_depth() {
        let contact = player_capsule(0.0).intersect_triangle(&floor_triangle()).unwrap();
        assert_relative_eq!(contact.depth, 0.0, epsilon = 1e-12);
        assert!(player_capsule(0.01).intersect_triangle(&floor_triangle()).is_none());
    }

    #[test]
    fn test_edge_contact_pushes_sideways() {
        // Wall edge running along Z at x = 0.1, the capsule overlaps it from the side
        let triangle = Triangle::new(
            Vec3::new(0.1, 0.5, -1.0),
            Vec3::new(0.1, 0.5, 1.0),
            Vec3::new(2.0, 0.5, 0.0),
        );
        let capsule = Capsule::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), 0.2);
        let contact = capsule.intersect_triangle(&triangle).unwrap();
        assert_relative_eq!(contact.normal, Vec3::new(-1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(contact.depth, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_triangle_is_skipped() {
        let sliver = Triangle::new(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0));
        assert!(player_capsule(-0.05).intersect_triangle(&sliver).is_none());
    }

    #[test]
    fn test_closest_points_crossing_segments() {
        let (a, b) = closest_points_between_segments(
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.5),
            Vec3::new(1.0, 0.0, 0.5),
        );
        assert_relative_eq!(a, Vec3::new(0.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(b, Vec3::new(0.0, 0.0, 0.5), epsilon = 1e-12);
    }

    #[test]
    fn test_closest_points_parallel_and_point_segments() {
        let (a, b) = closest_points_between_segments(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        );
        assert_relative_eq!((a - b).norm(), 1.0, epsilon = 1e-12);

        let point = Vec3::new(0.5, 0.5, 0.0);
        let (a, b) = closest_points_between_segments(point, point, Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(a, point);
        assert_relative_eq!(b, Vec3::new(0.5, 0.0, 0.0), epsilon = 1e-12);
    }
}
