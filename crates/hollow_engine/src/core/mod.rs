//! # Core Engine Module
//!
//! Shared configuration for every subsystem of the walking simulation.

pub mod config;

// Re-export commonly used config types
pub use config::{
    SimulationConfig,
    PhysicsConfig,
    PlayerConfig,
    CapsuleConfig,
    InteractionConfig,
    DoorConfig,
    Config,
    ConfigError,
};
