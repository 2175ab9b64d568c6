//! Shared types for the pointstage pipeline: space coordinates, polylines,
//! camera poses, homogeneous transforms, and the synchronous signal used to
//! chain World → Projector → render sink.
//!
//! # Invariants
//! - Every transform handed to the projector is invertible, or an error.
//! - Signals deliver values in emission order, synchronously.

pub mod signal;
pub mod transform;
pub mod types;

pub use signal::{Signal, SubscriptionId};
pub use transform::{CameraTransform, TransformError};
pub use types::{CameraNudge, CameraPose, PathError, SpaceCoord, SpacePath, ONE_DEGREE};
