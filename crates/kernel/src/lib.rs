//! World Kernel: time-indexed simulations producing 3D dots and polylines.
//!
//! # Invariants
//! - `transition_to_state_at(t)` depends only on `t`, construction-time
//!   configuration and seed, and the state integrated so far. Never on wall-clock time.
//! - Time advances by exactly one per tick; every tick publishes one frame.
//! - Worlds never write the camera. Suggested motion travels as a `CameraNudge`.

pub mod config;
pub mod kinds;
pub mod ode;
pub mod registry;
pub mod world;

pub use config::{PendulumConfig, ParticleConfig, RandomWalkConfig, TableConfig, WorldSettings};
pub use kinds::WorldKind;
pub use registry::WorldId;
pub use world::{World, WorldFrame, WorldState};

/// Errors from building worlds.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KernelError {
    #[error("invalid configuration for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
    #[error("unknown world `{0}`")]
    UnknownWorld(String),
}
