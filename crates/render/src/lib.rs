//! Projection and render sinks.
//!
//! # Invariants
//! - The projector never mutates world state or the camera.
//! - A failed projection leaves the last published shape set in place.
//! - Shape ids are assigned once and survive every later frame.

mod camera;
pub mod projector;
mod renderer;

pub use camera::Camera;
pub use projector::{DotShape, PathShape, ProjectionError, Projector, ShapeSet, ShapeSetId};
pub use renderer::{DebugTextRenderer, Renderer, SvgRenderer};
