//! Scene description consumed by the collision core
//!
//! Static house geometry is described as a tree of plain [`SceneNode`]s and
//! flattened into triangle soup through [`GeometryProvider`] when the world
//! octree is built.

pub mod mesh;
pub mod node;

pub use mesh::TriangleMesh;
pub use node::{GeometryProvider, SceneNode};

/// Errors raised while assembling scene geometry
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// A mesh index points past the end of its vertex list
    #[error("Mesh index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// Offending index
        index: u32,
        /// Number of vertices in the mesh
        vertex_count: usize,
    },
}
