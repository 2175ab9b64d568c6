//! The closed set of simulation variants.
//!
//! Each variant exposes `advance(t)` (move its internal state to tick `t`)
//! and a geometry read-out; [`WorldKind`] dispatches by `match`.

pub mod bell_curve;
pub mod cube;
pub mod lattice;
pub mod particles;
pub mod pendulum;
pub mod random_walk;

use pointstage_common::{CameraNudge, SpaceCoord, SpacePath};

pub use bell_curve::BellCurve;
pub use cube::PulsingCube;
pub use lattice::Lattice;
pub use particles::{Particle, ParticleBox};
pub use pendulum::{PendulumGrid, PendulumReplay};

#[derive(Debug, Clone, PartialEq)]
pub enum WorldKind {
    /// Axes, grid, table chart and random walk: geometry frozen at construction.
    Static(Lattice),
    Cube(PulsingCube),
    BellCurve(BellCurve),
    Particles(ParticleBox),
    PendulumLive(PendulumGrid),
    PendulumBatch(PendulumReplay),
}

impl WorldKind {
    /// Move internal state to tick `t`.
    pub fn advance(&mut self, t: u64) {
        match self {
            Self::Static(_) => {}
            Self::Cube(cube) => cube.advance(t),
            Self::BellCurve(bell) => bell.advance(t),
            Self::Particles(particles) => particles.advance(),
            Self::PendulumLive(grid) => grid.advance(t),
            Self::PendulumBatch(replay) => replay.advance(t),
        }
    }

    /// Current geometry as dots and paths.
    pub fn geometry(&self) -> (Vec<SpaceCoord>, Vec<SpacePath>) {
        match self {
            Self::Static(lattice) => (lattice.dots().to_vec(), Vec::new()),
            Self::Cube(cube) => (cube.dots(), Vec::new()),
            Self::BellCurve(bell) => (bell.dots(), Vec::new()),
            Self::Particles(particles) => (particles.dots(), Vec::new()),
            Self::PendulumLive(grid) => grid.geometry(),
            Self::PendulumBatch(replay) => replay.geometry(),
        }
    }

    /// Camera motion this variant suggests after advancing to tick `t`.
    pub fn camera_nudge(&self, t: u64) -> Option<CameraNudge> {
        match self {
            Self::Particles(particles) if t > 0 => Some(particles.camera_nudge()),
            _ => None,
        }
    }
}
