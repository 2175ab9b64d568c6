//! Double-pendulum dynamics and the two worlds built on them.
//!
//! State layout is `[θ1, θ2, ω1, ω2]`, angles measured from the downward
//! vertical.

use glam::DVec3;
use pointstage_common::{SpaceCoord, SpacePath};
use std::f64::consts::PI;

use crate::config::PendulumConfig;
use crate::ode::{Sample, rk4_step, rk4_trajectory};

/// Gravitational acceleration.
pub const GRAVITY: f64 = 9.81;

/// Integration step of the live world, per tick.
pub const LIVE_DT: f64 = 0.025;

const BATCH_T0: f64 = 0.0;
const BATCH_TF: f64 = 30.0;
const BATCH_DT: f64 = 0.01;
/// Trajectory samples consumed per tick.
const BATCH_SAMPLES_PER_TICK: u64 = 2;

pub type PendulumState = [f64; 4];

/// Time derivative of the coupled double-pendulum equations.
pub fn derivative(p: &PendulumConfig, y: &PendulumState) -> PendulumState {
    let [theta1, theta2, omega1, omega2] = *y;
    let delta = theta2 - theta1;
    let (sin_d, cos_d) = delta.sin_cos();
    let total = p.m1 + p.m2;
    let denom = total - p.m2 * cos_d * cos_d;

    let d_omega1 = (p.m2 * p.l1 * omega1 * omega1 * sin_d * cos_d
        + p.m2 * GRAVITY * theta2.sin() * cos_d
        + p.m2 * p.l2 * omega2 * omega2 * sin_d
        - total * GRAVITY * theta1.sin())
        / (p.l1 * denom);

    let d_omega2 = (-p.m2 * p.l2 * omega2 * omega2 * sin_d * cos_d
        + total * (GRAVITY * theta1.sin() * cos_d - p.l1 * omega1 * omega1 * sin_d)
        - total * GRAVITY * theta2.sin())
        / (p.l2 * denom);

    [omega1, omega2, d_omega1, d_omega2]
}

/// Joint offsets `(x1, y1, x2, y2)` relative to the pivot.
pub fn to_cartesian(p: &PendulumConfig, theta1: f64, theta2: f64) -> [f64; 4] {
    let x1 = p.l1 * theta1.sin();
    let y1 = -p.l1 * theta1.cos();
    let x2 = x1 + p.l2 * theta2.sin();
    let y2 = y1 - p.l2 * theta2.cos();
    [x1, y1, x2, y2]
}

/// Kinetic plus potential energy, zero potential at the pivot height.
pub fn energy(p: &PendulumConfig, y: &PendulumState) -> f64 {
    let [theta1, theta2, omega1, omega2] = *y;
    let [_, y1, _, y2] = to_cartesian(p, theta1, theta2);
    let kinetic = 0.5 * p.m1 * p.l1 * p.l1 * omega1 * omega1
        + 0.5
            * p.m2
            * (p.l1 * p.l1 * omega1 * omega1
                + p.l2 * p.l2 * omega2 * omega2
                + 2.0 * p.l1 * p.l2 * omega1 * omega2 * (theta1 - theta2).cos());
    let potential = p.m1 * GRAVITY * y1 + p.m2 * GRAVITY * y2;
    kinetic + potential
}

/// Pivot, first joint, second joint.
fn arm(p: &PendulumConfig, origin: SpaceCoord, state: &PendulumState) -> [SpaceCoord; 3] {
    let [x1, y1, x2, y2] = to_cartesian(p, state[0], state[1]);
    [
        origin,
        origin + DVec3::new(x1, y1, 0.0),
        origin + DVec3::new(x2, y2, 0.0),
    ]
}

fn geometry(arms: impl Iterator<Item = [SpaceCoord; 3]>) -> (Vec<SpaceCoord>, Vec<SpacePath>) {
    let mut dots = Vec::new();
    let mut paths = Vec::new();
    for [pivot, joint1, joint2] in arms {
        dots.extend([pivot, joint1, joint2]);
        paths.push(SpacePath::starting_at(pivot, [joint1, joint2], false));
    }
    (dots, paths)
}

/// A grid of independent pendulums integrated one RK4 step per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct PendulumGrid {
    config: PendulumConfig,
    origins: Vec<SpaceCoord>,
    states: Vec<PendulumState>,
}

impl PendulumGrid {
    /// Config must already be validated.
    pub fn new(config: PendulumConfig) -> Self {
        const Z_DISTANCE: f64 = 5.0;
        let mut origins = Vec::new();
        let mut states = Vec::new();
        for x in (-17..18).step_by(4) {
            for y in (-9..10).step_by(4) {
                origins.push(DVec3::new(x as f64, y as f64, Z_DISTANCE));
                states.push([x as f64 / PI / 2.0, y as f64 / PI / 2.0, 0.0, 0.0]);
            }
        }
        Self {
            config,
            origins,
            states,
        }
    }

    pub fn states(&self) -> &[PendulumState] {
        &self.states
    }

    pub fn advance(&mut self, t: u64) {
        let config = self.config;
        let ode = |_t: f64, y: &PendulumState| derivative(&config, y);
        let time = LIVE_DT * t as f64;

        let mut diverged = 0usize;
        for state in &mut self.states {
            let mut next = rk4_step(&ode, time, state, LIVE_DT);
            next[2] *= config.friction;
            next[3] *= config.friction;
            if next.iter().all(|v| v.is_finite()) {
                *state = next;
            } else {
                diverged += 1;
            }
        }
        if diverged > 0 {
            tracing::warn!(t, diverged, "pendulum step went non-finite, keeping previous state");
        }
    }

    pub fn geometry(&self) -> (Vec<SpaceCoord>, Vec<SpacePath>) {
        geometry(
            self.origins
                .iter()
                .zip(&self.states)
                .map(|(origin, state)| arm(&self.config, *origin, state)),
        )
    }
}

/// Three trajectories integrated up front and replayed two samples per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct PendulumReplay {
    config: PendulumConfig,
    trajectories: [Vec<Sample<4>>; 3],
    index: usize,
}

impl Default for PendulumReplay {
    fn default() -> Self {
        Self::new()
    }
}

impl PendulumReplay {
    const Z_OFFSETS: [f64; 3] = [1.0, 0.0, -1.0];
    const START_ANGLES: [f64; 3] = [PI / 8.0, PI / 4.0, PI / 2.0];

    pub fn new() -> Self {
        let config = PendulumConfig::default();
        let ode = |_t: f64, y: &PendulumState| derivative(&config, y);
        let trajectories = Self::START_ANGLES.map(|theta| {
            rk4_trajectory(&ode, [theta, theta, 0.0, 0.0], BATCH_T0, BATCH_DT, BATCH_TF)
        });
        tracing::debug!(samples = trajectories[0].len(), "pendulum trajectories integrated");
        Self {
            config,
            trajectories,
            index: 0,
        }
    }

    pub fn sample_count(&self) -> usize {
        self.trajectories[0].len()
    }

    /// Index of the sample currently drawn.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Select sample `2t`, clamped to the end of the precomputed horizon.
    pub fn advance(&mut self, t: u64) {
        let last = self.sample_count().saturating_sub(1);
        let wanted = t.saturating_mul(BATCH_SAMPLES_PER_TICK);
        self.index = usize::try_from(wanted).map_or(last, |i| i.min(last));
    }

    pub fn geometry(&self) -> (Vec<SpaceCoord>, Vec<SpacePath>) {
        geometry(
            self.trajectories
                .iter()
                .zip(Self::Z_OFFSETS)
                .map(|(trajectory, z)| {
                    let state = &trajectory[self.index].y;
                    arm(&self.config, DVec3::new(0.0, 0.0, z), state)
                }),
        )
    }
}
