//! Tunable parameters for the simulation variants.
//!
//! Each record is plain data with a `Default`; callers load or edit them
//! elsewhere and pass them into world construction.

use pointstage_common::CameraPose;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::KernelError;
use crate::registry::WorldId;

/// Masses, arm lengths and friction of the live double pendulum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendulumConfig {
    pub m1: f64,
    pub m2: f64,
    pub l1: f64,
    pub l2: f64,
    /// Multiplier applied to angular velocities after each step; 1 is frictionless.
    pub friction: f64,
}

impl Default for PendulumConfig {
    fn default() -> Self {
        Self {
            m1: 1.0,
            m2: 1.0,
            l1: 1.0,
            l2: 1.0,
            friction: 1.0,
        }
    }
}

impl PendulumConfig {
    /// Reject parameters that would divide by zero or blow up the ODE.
    pub fn validate(&self) -> Result<(), KernelError> {
        for (field, value) in [
            ("m1", self.m1),
            ("m2", self.m2),
            ("l1", self.l1),
            ("l2", self.l2),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(KernelError::InvalidConfig {
                    field,
                    reason: format!("must be positive and finite, got {value}"),
                });
            }
        }
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(KernelError::InvalidConfig {
                field: "friction",
                reason: format!("must lie in [0, 1], got {}", self.friction),
            });
        }
        Ok(())
    }
}

/// Bouncing particle population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleConfig {
    pub count: usize,
    pub seed: u64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 1500,
            seed: 42,
        }
    }
}

/// Random walk construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RandomWalkConfig {
    pub attempts: usize,
    /// Length of one axis-aligned step.
    pub step: f64,
    /// Half-width of the bounding cube centred on the origin.
    pub half_width: f64,
    pub seed: u64,
}

impl Default for RandomWalkConfig {
    fn default() -> Self {
        Self {
            attempts: 1500,
            step: 0.15,
            half_width: 20.0,
            seed: 7,
        }
    }
}

impl RandomWalkConfig {
    pub fn validate(&self) -> Result<(), KernelError> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(KernelError::InvalidConfig {
                field: "step",
                reason: format!("must be positive and finite, got {}", self.step),
            });
        }
        if !self.half_width.is_finite() || self.half_width < 0.0 {
            return Err(KernelError::InvalidConfig {
                field: "half_width",
                reason: format!("must be non-negative and finite, got {}", self.half_width),
            });
        }
        Ok(())
    }
}

/// Tabulated dataset drawn as a height field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Distance between neighbouring cells on the xz plane.
    pub spacing: f64,
    /// Row-major values; `y = 0.1 · value`.
    pub rows: Vec<Vec<f64>>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            spacing: 0.1,
            rows: sample_table(),
        }
    }
}

/// A 20×12 sample surface used when no dataset is configured.
fn sample_table() -> Vec<Vec<f64>> {
    (0..20)
        .map(|i| {
            (0..12)
                .map(|j| {
                    let decline = 1.0 - i as f64 / 20.0;
                    let ridge = (j as f64 * 0.5).sin().abs();
                    (8.0 * decline + 2.0 * ridge).round()
                })
                .collect()
        })
        .collect()
}

/// Everything world construction may need, bundled for the registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldSettings {
    pub pendulum: PendulumConfig,
    pub particles: ParticleConfig,
    pub random_walk: RandomWalkConfig,
    pub table: TableConfig,
    /// Home camera poses that replace a world's built-in one.
    #[serde(default)]
    pub perspectives: BTreeMap<WorldId, CameraPose>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pendulum_is_valid() {
        assert!(PendulumConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_length_arm_is_rejected() {
        let cfg = PendulumConfig {
            l2: 0.0,
            ..PendulumConfig::default()
        };
        match cfg.validate() {
            Err(KernelError::InvalidConfig { field, .. }) => assert_eq!(field, "l2"),
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn zero_mass_and_nan_are_rejected() {
        let massless = PendulumConfig {
            m1: 0.0,
            ..PendulumConfig::default()
        };
        assert!(massless.validate().is_err());
        let nan = PendulumConfig {
            l1: f64::NAN,
            ..PendulumConfig::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn friction_above_one_is_rejected() {
        let cfg = PendulumConfig {
            friction: 1.01,
            ..PendulumConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn settings_round_trip_through_json() {
        let mut settings = WorldSettings::default();
        settings
            .perspectives
            .insert(WorldId::Grid, CameraPose::with_angles(0.1, 0.2, 0.3));
        let json = serde_json::to_string(&settings).unwrap();
        let back: WorldSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn sample_table_is_rectangular() {
        let table = TableConfig::default();
        assert_eq!(table.rows.len(), 20);
        assert!(table.rows.iter().all(|r| r.len() == 12));
    }
}
