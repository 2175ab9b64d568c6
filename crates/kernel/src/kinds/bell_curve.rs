use glam::DVec3;
use pointstage_common::SpaceCoord;

const HALF_STEPS: i32 = 15;
const DIST: f64 = 0.15;
const PEAK: f64 = 3.0;

/// Gaussian bump over a planar lattice whose amplitude follows `3·sin(t°)`.
#[derive(Debug, Clone, PartialEq)]
pub struct BellCurve {
    base: Vec<SpaceCoord>,
    amplitude: f64,
}

impl Default for BellCurve {
    fn default() -> Self {
        let mut base = Vec::with_capacity((2 * HALF_STEPS * 2 * HALF_STEPS) as usize);
        for i in -HALF_STEPS..HALF_STEPS {
            for j in -HALF_STEPS..HALF_STEPS {
                base.push(DVec3::new(DIST * i as f64, 0.0, DIST * j as f64));
            }
        }
        Self {
            base,
            amplitude: 0.0,
        }
    }
}

impl BellCurve {
    pub fn advance(&mut self, t: u64) {
        self.amplitude = PEAK * (t as f64 * std::f64::consts::PI / 180.0).sin();
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn dots(&self) -> Vec<SpaceCoord> {
        self.base
            .iter()
            .map(|p| DVec3::new(p.x, self.amplitude * (-(p.x * p.x + p.z * p.z)).exp(), p.z))
            .collect()
    }
}
