//! Indexed triangle meshes
//!
//! Meshes are stored in model space and turned into world-space triangles
//! on demand, when a structure that indexes them is (re)built.

use crate::foundation::math::{Transform, Vec3};
use crate::physics::collision::Triangle;

use super::SceneError;

/// Indexed triangle mesh in model space
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    vertices: Vec<Vec3>,
    indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Creates a mesh from model-space vertices and index triples
    ///
    /// Fails when an index points past the vertex list.
    pub fn new(vertices: Vec<Vec3>, indices: Vec<[u32; 3]>) -> Result<Self, SceneError> {
        let vertex_count = vertices.len();
        if let Some(&index) = indices
            .iter()
            .flatten()
            .find(|&&index| index as usize >= vertex_count)
        {
            return Err(SceneError::IndexOutOfRange { index, vertex_count });
        }
        Ok(Self { vertices, indices })
    }

    /// Creates a mesh from a flat index list (three indices per triangle)
    ///
    /// A trailing partial triangle is ignored.
    pub fn from_vertices(vertices: &[Vec3], indices: &[u32]) -> Result<Self, SceneError> {
        let triples = indices
            .chunks_exact(3)
            .map(|chunk| [chunk[0], chunk[1], chunk[2]])
            .collect();
        Self::new(vertices.to_vec(), triples)
    }

    /// Axis-aligned box of the given full size, centered on the origin
    pub fn cuboid(size: Vec3) -> Self {
        let h = size * 0.5;
        let vertices = vec![
            Vec3::new(-h.x, -h.y, -h.z),
            Vec3::new(h.x, -h.y, -h.z),
            Vec3::new(h.x, h.y, -h.z),
            Vec3::new(-h.x, h.y, -h.z),
            Vec3::new(-h.x, -h.y, h.z),
            Vec3::new(h.x, -h.y, h.z),
            Vec3::new(h.x, h.y, h.z),
            Vec3::new(-h.x, h.y, h.z),
        ];
        // Outward-facing, counter-clockwise
        let indices = vec![
            [0, 3, 2], [0, 2, 1], // -Z
            [4, 5, 6], [4, 6, 7], // +Z
            [0, 4, 7], [0, 7, 3], // -X
            [1, 2, 6], [1, 6, 5], // +X
            [0, 1, 5], [0, 5, 4], // -Y
            [3, 7, 6], [3, 6, 2], // +Y
        ];
        Self { vertices, indices }
    }

    /// Horizontal rectangle in the XZ plane facing +Y, centered on the origin
    pub fn plane(width: f64, depth: f64) -> Self {
        let (hw, hd) = (width * 0.5, depth * 0.5);
        let vertices = vec![
            Vec3::new(-hw, 0.0, -hd),
            Vec3::new(hw, 0.0, -hd),
            Vec3::new(hw, 0.0, hd),
            Vec3::new(-hw, 0.0, hd),
        ];
        let indices = vec![[0, 3, 2], [0, 2, 1]];
        Self { vertices, indices }
    }

    /// Model-space vertices
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Model-space triangles
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices.iter().map(move |&[a, b, c]| {
            Triangle::new(
                self.vertices[a as usize],
                self.vertices[b as usize],
                self.vertices[c as usize],
            )
        })
    }

    /// Triangles moved into world space by `transform`
    pub fn world_triangles(&self, transform: &Transform) -> Vec<Triangle> {
        self.triangles()
            .map(|triangle| triangle.transformed(transform))
            .collect()
    }
}
