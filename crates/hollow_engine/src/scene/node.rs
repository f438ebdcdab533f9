//! Plain data scene nodes
//!
//! A node holds a local transform, an optional mesh and its children. There
//! is no behavior attached to nodes; interactive objects live in
//! [`crate::house`] and only borrow meshes from here.

use crate::foundation::math::{Transform, Vec3};
use crate::physics::collision::Triangle;

use super::mesh::TriangleMesh;

/// Source of world-space collision triangles
pub trait GeometryProvider {
    /// Flatten the geometry into world-space triangles
    fn extract_triangles(&self) -> Vec<Triangle>;
}

/// Node in a static scene hierarchy
#[derive(Debug, Clone, Default)]
pub struct SceneNode {
    /// Node name, used for logging only
    pub name: String,
    /// Transform relative to the parent node
    pub transform: Transform,
    /// Geometry attached to this node
    pub mesh: Option<TriangleMesh>,
    /// Child nodes
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Create an empty group node
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create a node carrying a mesh
    pub fn with_mesh(name: impl Into<String>, mesh: TriangleMesh, transform: Transform) -> Self {
        Self {
            name: name.into(),
            transform,
            mesh: Some(mesh),
            children: Vec::new(),
        }
    }

    /// Set the local position (builder style)
    pub fn at(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    /// Append a child node
    pub fn add_child(&mut self, child: SceneNode) -> &mut Self {
        self.children.push(child);
        self
    }

    /// Number of triangles in this subtree
    pub fn triangle_count(&self) -> usize {
        self.mesh.as_ref().map_or(0, TriangleMesh::triangle_count)
            + self.children.iter().map(SceneNode::triangle_count).sum::<usize>()
    }

    fn collect_triangles(&self, parent: &Transform, out: &mut Vec<Triangle>) {
        let world = parent.combine(&self.transform);
        if let Some(ref mesh) = self.mesh {
            out.extend(mesh.world_triangles(&world));
        }
        for child in &self.children {
            child.collect_triangles(&world, out);
        }
    }
}

impl GeometryProvider for SceneNode {
    fn extract_triangles(&self) -> Vec<Triangle> {
        let mut triangles = Vec::with_capacity(self.triangle_count());
        self.collect_triangles(&Transform::identity(), &mut triangles);
        triangles
    }
}

impl GeometryProvider for TriangleMesh {
    fn extract_triangles(&self) -> Vec<Triangle> {
        self.triangles().collect()
    }
}

impl GeometryProvider for Vec<Triangle> {
    fn extract_triangles(&self) -> Vec<Triangle> {
        self.clone()
    }
}
