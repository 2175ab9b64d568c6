use glam::DVec3;
use pointstage_common::SpaceCoord;

const CORNERS: [DVec3; 8] = [
    DVec3::new(-1.0, -1.0, -1.0),
    DVec3::new(-1.0, -1.0, 1.0),
    DVec3::new(-1.0, 1.0, -1.0),
    DVec3::new(-1.0, 1.0, 1.0),
    DVec3::new(1.0, -1.0, -1.0),
    DVec3::new(1.0, -1.0, 1.0),
    DVec3::new(1.0, 1.0, -1.0),
    DVec3::new(1.0, 1.0, 1.0),
];

/// Eight cube corners breathing with `cos(5·t°)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PulsingCube {
    scale: f64,
}

impl Default for PulsingCube {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl PulsingCube {
    pub fn advance(&mut self, t: u64) {
        self.scale = (5.0 * t as f64 * std::f64::consts::PI / 180.0).cos();
    }

    pub fn dots(&self) -> Vec<SpaceCoord> {
        CORNERS.iter().map(|c| *c * self.scale).collect()
    }
}
