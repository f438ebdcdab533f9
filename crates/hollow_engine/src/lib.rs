//! # Hollow Engine
//!
//! Movement and collision core of a first-person haunted-house walking
//! simulator. A capsule-shaped player is integrated in fixed substeps
//! through a static triangle octree and a small set of swinging doors;
//! a view ray picks doors and light switches to interact with.
//!
//! ## Features
//!
//! - **Capsule Collision**: capsule-vs-triangle contacts with sequential multi-contact push-out
//! - **Triangle Octree**: bulk-loaded spatial index with capsule and ray queries
//! - **Doors**: animated swing state machine with edge-triggered collider rebuilds
//! - **Interaction**: nearest-hit picking against doors and light switches
//! - **Host Driven**: no owned loop, the host calls [`World::advance`] once per frame
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hollow_engine::prelude::*;
//!
//! fn main() -> Result<(), WorldError> {
//!     let ground = TriangleMesh::plane(40.0, 40.0);
//!     let mut world = WorldBuilder::new(SimulationConfig::default())
//!         .with_geometry(&ground)
//!         .build()?;
//!
//!     world.input_mut().hold(KeyCode::W);
//!     for _ in 0..60 {
//!         world.advance(1.0 / 60.0);
//!     }
//!     println!("camera at {:?}", world.active_view().position);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Shared configuration
pub mod core;
pub mod config;

pub mod foundation;
pub mod events;
pub mod physics;
pub mod spatial;
pub mod scene;
pub mod house;
pub mod input;
pub mod player;
pub mod interaction;

mod world;

pub use world::{World, WorldBuilder, WorldError};

#[cfg(test)]
mod tests;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        World, WorldBuilder, WorldError,
        core::{Config, ConfigError, SimulationConfig},
        foundation::{
            math::{Transform, Vec3},
            time::{SubstepClock, Timer},
        },
        house::{Door, DoorEvent, DoorState, House, HouseBuilder, Interactable, LightSwitch},
        input::{InputState, KeyCode, PointerState},
        physics::{Capsule, CollisionResult, Triangle},
        player::{CameraPose, ViewMode},
        scene::{GeometryProvider, SceneNode, TriangleMesh},
        spatial::{CollisionQuery, OctreeConfig, TriangleOctree},
    };
}
