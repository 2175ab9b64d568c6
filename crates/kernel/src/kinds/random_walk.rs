use glam::DVec3;
use pointstage_common::SpaceCoord;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::RandomWalkConfig;

const DIRECTIONS: [DVec3; 6] = [
    DVec3::Y,
    DVec3::NEG_Y,
    DVec3::X,
    DVec3::NEG_X,
    DVec3::NEG_Z,
    DVec3::Z,
];

/// Seeded lattice walk from the origin, confined to a cube.
///
/// Each attempt picks one of six axis directions; steps that would leave the
/// cube are dropped and the walk continues from the last accepted point.
pub fn generate(config: &RandomWalkConfig) -> Vec<SpaceCoord> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut points = vec![DVec3::ZERO];
    let mut current = DVec3::ZERO;
    let mut rejected = 0usize;

    for _ in 0..config.attempts {
        let direction = DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())];
        let candidate = current + direction * config.step;
        if candidate.abs().max_element() > config.half_width {
            rejected += 1;
            continue;
        }
        current = candidate;
        points.push(current);
    }

    tracing::debug!(accepted = points.len() - 1, rejected, "random walk generated");
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(half_width: f64) -> RandomWalkConfig {
        RandomWalkConfig {
            attempts: 1500,
            step: 0.15,
            half_width,
            seed: 99,
        }
    }

    #[test]
    fn starts_at_origin() {
        assert_eq!(generate(&config(20.0))[0], DVec3::ZERO);
    }

    #[test]
    fn stays_inside_the_cube() {
        for half_width in [20.0, 0.5, 0.0] {
            let points = generate(&config(half_width));
            assert!(points.iter().all(|p| p.abs().max_element() <= half_width + 1e-9));
        }
    }

    #[test]
    fn consecutive_points_differ_by_one_step_on_one_axis() {
        let cfg = config(0.6);
        let points = generate(&cfg);
        assert!(points.len() > 100);
        for pair in points.windows(2) {
            let delta = pair[1] - pair[0];
            let moved: Vec<f64> = [delta.x, delta.y, delta.z]
                .into_iter()
                .filter(|c| c.abs() > 1e-12)
                .collect();
            assert_eq!(moved.len(), 1, "{delta:?}");
            assert!((moved[0].abs() - cfg.step).abs() < 1e-9);
        }
    }

    #[test]
    fn zero_width_cube_rejects_everything() {
        assert_eq!(generate(&config(0.0)), vec![DVec3::ZERO]);
    }

    #[test]
    fn seed_makes_walk_reproducible() {
        assert_eq!(generate(&config(20.0)), generate(&config(20.0)));
    }
}
