//! Primitive collision shapes and intersection algorithms
//!
//! Provides basic geometric primitives (rays, planes, triangles) with
//! efficient intersection testing algorithms.

use crate::foundation::math::{constants::GEOMETRY_EPSILON, Transform, Vec3};
use crate::spatial::AABB;

/// A ray for ray casting and picking
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    ///
    /// Returns `None` for a zero-length direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        direction
            .try_normalize(GEOMETRY_EPSILON)
            .map(|direction| Self { origin, direction })
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Result of a ray intersection test against triangle geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Index of the triangle that was hit inside the queried structure
    pub triangle: usize,
    /// The distance from the ray origin to the hit point
    pub distance: f64,
    /// The point of intersection in world space
    pub point: Vec3,
}

/// An infinite plane `normal · p = constant`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal
    pub normal: Vec3,
    /// Signed offset from the origin along the normal
    pub constant: f64,
}

impl Plane {
    /// Signed distance from a point to the plane
    pub fn distance_to_point(&self, point: &Vec3) -> f64 {
        self.normal.dot(point) - self.constant
    }

    /// The same plane with its normal reversed
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            constant: -self.constant,
        }
    }
}

/// A triangle for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex
    pub v0: Vec3,
    /// Second vertex
    pub v1: Vec3,
    /// Third vertex
    pub v2: Vec3,
}

impl Triangle {
    /// Creates a new triangle
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    /// Unit normal (right-hand rule), `None` for zero-area triangles
    pub fn normal(&self) -> Option<Vec3> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        edge1
            .cross(&edge2)
            .try_normalize(GEOMETRY_EPSILON)
            .filter(|normal| normal.iter().all(|c| c.is_finite()))
    }

    /// Whether the triangle has (numerically) zero area or non-finite vertices
    pub fn is_degenerate(&self) -> bool {
        self.normal().is_none()
    }

    /// Supporting plane, `None` for degenerate triangles
    pub fn plane(&self) -> Option<Plane> {
        self.normal().map(|normal| Plane {
            normal,
            constant: normal.dot(&self.v0),
        })
    }

    /// Calculates the centroid (center point) of the triangle
    pub fn centroid(&self) -> Vec3 {
        (self.v0 + self.v1 + self.v2) / 3.0
    }

    /// Axis-aligned bounds of the triangle
    pub fn bounds(&self) -> AABB {
        AABB::from_points(&[self.v0, self.v1, self.v2])
    }

    /// The triangle's edges as vertex pairs
    pub fn edges(&self) -> [(Vec3, Vec3); 3] {
        [(self.v0, self.v1), (self.v1, self.v2), (self.v2, self.v0)]
    }

    /// Apply a transform to every vertex
    pub fn transformed(&self, transform: &Transform) -> Self {
        Self::new(
            transform.transform_point(&self.v0),
            transform.transform_point(&self.v1),
            transform.transform_point(&self.v2),
        )
    }

    /// Whether the projection of `point` onto the triangle's plane lies inside it
    ///
    /// Uses barycentric coordinates, so points off the plane are tested by
    /// their orthogonal projection.
    pub fn contains_point(&self, point: &Vec3) -> bool {
        let edge0 = self.v1 - self.v0;
        let edge1 = self.v2 - self.v0;
        let to_point = point - self.v0;

        let d00 = edge0.dot(&edge0);
        let d01 = edge0.dot(&edge1);
        let d11 = edge1.dot(&edge1);
        let d20 = to_point.dot(&edge0);
        let d21 = to_point.dot(&edge1);

        let denom = d00 * d11 - d01 * d01;
        if denom.abs() < GEOMETRY_EPSILON {
            return false;
        }

        let v = (d11 * d20 - d01 * d21) / denom;
        let w = (d00 * d21 - d01 * d20) / denom;
        v >= 0.0 && w >= 0.0 && v + w <= 1.0
    }

    /// Möller-Trumbore ray-triangle intersection algorithm
    /// Returns the distance along the ray if hit, None otherwise
    ///
    /// See: "Fast, Minimum Storage Ray/Triangle Intersection" by Möller & Trumbore
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f64> {
        const EPSILON: f64 = 1e-12;

        // Calculate edges from v0
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        // Calculate determinant
        let h = ray.direction.cross(&edge2);
        let a = edge1.dot(&h);

        // Ray parallel to triangle (or degenerate triangle)?
        if a.abs() < EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin - self.v0;
        let u = f * s.dot(&h);

        // Hit outside triangle on u axis?
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(&edge1);
        let v = f * ray.direction.dot(&q);

        // Hit outside triangle on v axis?
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(&q);
        if t >= 0.0 {
            Some(t)
        } else {
            None // Behind ray origin
        }
    }
}
