use glam::DVec3;
use pointstage_common::{CameraNudge, ONE_DEGREE, SpaceCoord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::ParticleConfig;

const GRAVITY: f64 = 0.01;
const BOUNCE: f64 = 0.7;
const BOX_HALF_WIDTH: f64 = 3.0;
const WALL_MARGIN: f64 = 0.1;
const REST_EPSILON: f64 = 0.001;

/// A particle with per-axis freeze flags. A frozen axis never moves again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: DVec3,
    pub velocity: DVec3,
    pub frozen: [bool; 3],
}

impl Particle {
    fn at_rest(&self) -> bool {
        self.frozen.iter().all(|f| *f)
    }

    /// One explicit Euler step inside the box.
    fn step(&mut self) {
        if self.at_rest() {
            return;
        }
        let [fx, fy, fz] = self.frozen;

        if self.position.y <= 0.0 && self.velocity.y < 0.0 {
            if !fx {
                self.velocity.x *= BOUNCE;
            }
            if !fy {
                self.velocity.y *= -BOUNCE;
            }
            if !fz {
                self.velocity.z *= BOUNCE;
            }
        } else if !fy {
            self.velocity.y -= GRAVITY;
        }

        let wall = BOX_HALF_WIDTH - WALL_MARGIN;
        if !fx && self.position.x.abs() >= wall {
            self.velocity.x = -self.velocity.x;
        }
        if !fz && self.position.z.abs() >= wall {
            self.velocity.z = -self.velocity.z;
        }

        if self.velocity.x.abs() < REST_EPSILON {
            self.frozen[0] = true;
        }
        if self.velocity.y.abs() < REST_EPSILON && self.position.y.abs() < REST_EPSILON {
            self.frozen[1] = true;
        }
        if self.velocity.z.abs() < REST_EPSILON {
            self.frozen[2] = true;
        }

        if !self.frozen[0] {
            self.position.x += self.velocity.x;
        }
        if !self.frozen[1] {
            self.position.y += self.velocity.y;
        }
        if !self.frozen[2] {
            self.position.z += self.velocity.z;
        }
    }
}

/// Particles thrown from the origin, bouncing on the floor and box walls.
///
/// The camera slowly orbits while this world runs; that motion is offered as
/// a [`CameraNudge`] rather than applied here.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleBox {
    particles: Vec<Particle>,
}

impl ParticleBox {
    pub fn new(config: &ParticleConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let particles = (0..config.count)
            .map(|_| {
                let heading = std::f64::consts::TAU * rng.gen_range(0.0..1.0);
                let speed = 0.2 * rng.gen_range(0.0..1.0);
                let lift = 0.3 * rng.gen_range(0.0..1.0);
                Particle {
                    position: DVec3::new(0.0, 0.01, 0.0),
                    velocity: DVec3::new(speed * heading.sin(), lift, speed * heading.cos()),
                    frozen: [false; 3],
                }
            })
            .collect();
        Self { particles }
    }

    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn advance(&mut self) {
        for particle in &mut self.particles {
            particle.step();
        }
    }

    pub fn dots(&self) -> Vec<SpaceCoord> {
        self.particles.iter().map(|p| p.position).collect()
    }

    /// One degree of yaw per tick.
    pub fn camera_nudge(&self) -> CameraNudge {
        CameraNudge::rotate_y(ONE_DEGREE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(position: DVec3, velocity: DVec3) -> Particle {
        Particle {
            position,
            velocity,
            frozen: [false; 3],
        }
    }

    #[test]
    fn same_seed_same_particles() {
        let cfg = ParticleConfig { count: 50, seed: 3 };
        assert_eq!(ParticleBox::new(&cfg), ParticleBox::new(&cfg));
        let other = ParticleConfig { count: 50, seed: 4 };
        assert_ne!(ParticleBox::new(&cfg), ParticleBox::new(&other));
    }

    #[test]
    fn gravity_pulls_down_in_flight() {
        let mut p = particle(DVec3::new(0.0, 1.0, 0.0), DVec3::new(0.05, 0.0, 0.05));
        p.step();
        assert!((p.velocity.y + GRAVITY).abs() < 1e-12);
        assert!((p.position.y - (1.0 - GRAVITY)).abs() < 1e-12);
    }

    #[test]
    fn floor_reflects_and_damps() {
        let mut p = particle(DVec3::new(0.0, -0.01, 0.0), DVec3::new(0.1, -0.2, -0.1));
        p.step();
        assert!((p.velocity.x - 0.07).abs() < 1e-12);
        assert!((p.velocity.y - 0.14).abs() < 1e-12);
        assert!((p.velocity.z + 0.07).abs() < 1e-12);
    }

    #[test]
    fn walls_reflect_horizontal_velocity() {
        let mut p = particle(DVec3::new(2.95, 1.0, -2.95), DVec3::new(0.1, 0.0, -0.1));
        p.step();
        assert!(p.velocity.x < 0.0);
        assert!(p.velocity.z > 0.0);
    }

    #[test]
    fn slow_axis_freezes() {
        let mut p = particle(DVec3::new(0.5, 1.0, 0.5), DVec3::new(0.0005, 0.0, 0.1));
        p.step();
        assert!(p.frozen[0]);
        assert!(!p.frozen[2]);
        assert_eq!(p.position.x, 0.5);
    }

    #[test]
    fn frozen_axis_position_never_changes() {
        let mut world = ParticleBox::new(&ParticleConfig { count: 300, seed: 11 });
        let mut pinned: Vec<Option<[f64; 3]>> = vec![None; 300];
        for _ in 0..2000 {
            world.advance();
            for (slot, p) in pinned.iter_mut().zip(world.particles()) {
                let now = p.position.to_array();
                match slot {
                    Some(before) => {
                        for axis in 0..3 {
                            if p.frozen[axis] {
                                assert_eq!(before[axis], now[axis], "axis {axis} moved after freezing");
                            }
                        }
                        *before = now;
                    }
                    None => *slot = Some(now),
                }
            }
        }
        // Bounces damp energy; after a long run some axes must have come to rest.
        assert!(world.particles().iter().any(|p| p.frozen.iter().any(|f| *f)));
    }

    #[test]
    fn frozen_flags_are_monotonic() {
        let mut world = ParticleBox::new(&ParticleConfig { count: 100, seed: 5 });
        let mut prev: Vec<[bool; 3]> = world.particles().iter().map(|p| p.frozen).collect();
        for _ in 0..1500 {
            world.advance();
            for (old, p) in prev.iter_mut().zip(world.particles()) {
                for axis in 0..3 {
                    assert!(!old[axis] || p.frozen[axis]);
                }
                *old = p.frozen;
            }
        }
    }

    #[test]
    fn nudge_is_one_degree_of_yaw() {
        let world = ParticleBox::from_particles(Vec::new());
        assert_eq!(world.camera_nudge(), CameraNudge::rotate_y(ONE_DEGREE));
    }
}
