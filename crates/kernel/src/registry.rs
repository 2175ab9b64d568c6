use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::KernelError;

/// Identifier of every simulation the kernel can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorldId {
    Axes,
    Grid,
    Cube,
    Table,
    BellCurve,
    BouncingParticles,
    PendulumLive,
    PendulumBatch,
    RandomWalk,
}

impl WorldId {
    /// Registry order; also the order of the world-switch keys.
    pub const ALL: [WorldId; 9] = [
        WorldId::Axes,
        WorldId::Grid,
        WorldId::Cube,
        WorldId::Table,
        WorldId::BellCurve,
        WorldId::BouncingParticles,
        WorldId::PendulumLive,
        WorldId::PendulumBatch,
        WorldId::RandomWalk,
    ];

    /// Variant used when a requested id is unknown.
    pub const DEFAULT: WorldId = WorldId::BellCurve;

    pub fn slug(self) -> &'static str {
        match self {
            Self::Axes => "axes",
            Self::Grid => "grid",
            Self::Cube => "cube",
            Self::Table => "table",
            Self::BellCurve => "bell-curve",
            Self::BouncingParticles => "bouncing-particles",
            Self::PendulumLive => "pendulum-live",
            Self::PendulumBatch => "pendulum-batch",
            Self::RandomWalk => "random-walk",
        }
    }

    /// Human-readable display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Axes => "Cartesian Axes",
            Self::Grid => "Grid",
            Self::Cube => "Cube",
            Self::Table => "Table Chart",
            Self::BellCurve => "Bell Curve",
            Self::BouncingParticles => "Bouncing Particles",
            Self::PendulumLive => "Double Pendulum Live",
            Self::PendulumBatch => "Double Pendulum",
            Self::RandomWalk => "Random Points",
        }
    }

    /// Storage key for this world's persisted configuration.
    pub fn config_key(self) -> String {
        format!("{}-config", self.slug())
    }

    /// Parse an id, falling back to [`WorldId::DEFAULT`] with a warning.
    pub fn parse_or_default(input: &str) -> WorldId {
        input.parse().unwrap_or_else(|err: KernelError| {
            tracing::warn!(%err, fallback = Self::DEFAULT.slug(), "unknown world, using default");
            Self::DEFAULT
        })
    }

    /// World bound to the n-th switch key (1-based).
    pub fn from_index(n: usize) -> Option<WorldId> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

impl FromStr for WorldId {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|id| id.slug() == wanted)
            .ok_or_else(|| KernelError::UnknownWorld(s.to_string()))
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_parse_back() {
        for id in WorldId::ALL {
            assert_eq!(id.slug().parse::<WorldId>().unwrap(), id);
        }
    }

    #[test]
    fn parsing_is_lenient_about_case_and_underscores() {
        assert_eq!("Pendulum_Live".parse::<WorldId>().unwrap(), WorldId::PendulumLive);
    }

    #[test]
    fn unknown_id_errors() {
        assert!(matches!(
            "teapot".parse::<WorldId>(),
            Err(KernelError::UnknownWorld(_))
        ));
    }

    #[test]
    fn unknown_id_falls_back_to_default() {
        assert_eq!(WorldId::parse_or_default("teapot"), WorldId::BellCurve);
        assert_eq!(WorldId::parse_or_default("grid"), WorldId::Grid);
    }

    #[test]
    fn switch_keys_are_one_based() {
        assert_eq!(WorldId::from_index(1), Some(WorldId::Axes));
        assert_eq!(WorldId::from_index(9), Some(WorldId::RandomWalk));
        assert_eq!(WorldId::from_index(0), None);
        assert_eq!(WorldId::from_index(10), None);
    }

    #[test]
    fn serde_uses_slugs() {
        let json = serde_json::to_string(&WorldId::BouncingParticles).unwrap();
        assert_eq!(json, "\"bouncing-particles\"");
    }
}
