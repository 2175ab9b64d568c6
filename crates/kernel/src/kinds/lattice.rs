use glam::DVec3;
use pointstage_common::SpaceCoord;

use crate::config::TableConfig;

/// Geometry fixed at construction. Ticking never changes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    dots: Vec<SpaceCoord>,
}

impl Lattice {
    pub fn new(dots: Vec<SpaceCoord>) -> Self {
        Self { dots }
    }

    pub fn dots(&self) -> &[SpaceCoord] {
        &self.dots
    }

    /// Origin plus points every 0.15 along both directions of each axis, up to 5.
    pub fn axes() -> Self {
        const SIZE: f64 = 5.0;
        const DIST: f64 = 0.15;
        let steps = (SIZE / DIST + 1e-9).floor() as usize;

        let mut dots = Vec::with_capacity(1 + 6 * steps);
        dots.push(DVec3::ZERO);
        for k in 1..=steps {
            let i = k as f64 * DIST;
            dots.extend([
                DVec3::new(-i, 0.0, 0.0),
                DVec3::new(i, 0.0, 0.0),
                DVec3::new(0.0, -i, 0.0),
                DVec3::new(0.0, i, 0.0),
                DVec3::new(0.0, 0.0, -i),
                DVec3::new(0.0, 0.0, i),
            ]);
        }
        Self::new(dots)
    }

    /// Cube lattice from −1 to 1 with spacing 0.2.
    pub fn grid() -> Self {
        const HALF_STEPS: i32 = 5;
        const DIST: f64 = 0.2;
        let range = -HALF_STEPS..=HALF_STEPS;

        let mut dots = Vec::new();
        for i in range.clone() {
            for j in range.clone() {
                for k in range.clone() {
                    dots.push(DVec3::new(i as f64, j as f64, k as f64) * DIST);
                }
            }
        }
        Self::new(dots)
    }

    /// Height field of a tabulated dataset, centred on the origin.
    pub fn table(config: &TableConfig) -> Self {
        let rows = &config.rows;
        let cols = rows.first().map_or(0, Vec::len);
        let half_x = rows.len() as f64 * config.spacing / 2.0;
        let half_z = cols as f64 * config.spacing / 2.0;

        let dots = rows
            .iter()
            .enumerate()
            .flat_map(|(i, row)| {
                row.iter().enumerate().map(move |(j, value)| {
                    DVec3::new(
                        -half_x + config.spacing * i as f64,
                        0.1 * value,
                        -half_z + config.spacing * j as f64,
                    )
                })
            })
            .collect();
        Self::new(dots)
    }
}
