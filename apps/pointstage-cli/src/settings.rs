//! World settings assembled from stored configuration records.

use std::collections::BTreeMap;

use pointstage_common::CameraPose;
use pointstage_kernel::{
    ParticleConfig, PendulumConfig, RandomWalkConfig, TableConfig, WorldId, WorldSettings,
};
use pointstage_persist::{ConfigError, ConfigStore, ModuleConfig};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const PERSPECTIVES_KEY: &str = "perspectives";

/// Every record key the CLI knows about.
pub fn known_keys() -> Vec<String> {
    let mut keys: Vec<String> = [
        WorldId::PendulumLive,
        WorldId::BouncingParticles,
        WorldId::RandomWalk,
        WorldId::Table,
    ]
    .into_iter()
    .map(WorldId::config_key)
    .collect();
    keys.push(PERSPECTIVES_KEY.to_string());
    keys
}

fn loaded<T>(store: &dyn ConfigStore, key: String) -> T
where
    T: Serialize + DeserializeOwned + Clone + Default,
{
    let mut config = ModuleConfig::<T>::with_defaults(key);
    config.load(store);
    config.data().clone()
}

pub fn load(store: &dyn ConfigStore) -> WorldSettings {
    WorldSettings {
        pendulum: loaded(store, WorldId::PendulumLive.config_key()),
        particles: loaded(store, WorldId::BouncingParticles.config_key()),
        random_walk: loaded(store, WorldId::RandomWalk.config_key()),
        table: loaded(store, WorldId::Table.config_key()),
        perspectives: loaded(store, PERSPECTIVES_KEY.to_string()),
    }
}

fn show_or_reset<T>(store: &mut dyn ConfigStore, key: &str, reset: bool) -> Result<String, ConfigError>
where
    T: Serialize + DeserializeOwned + Clone + Default,
{
    let mut config = ModuleConfig::<T>::with_defaults(key);
    if reset {
        config.reset(store)?;
    } else {
        config.load(store);
    }
    Ok(serde_json::to_string_pretty(config.data())?)
}

/// Print (or reset, then print) one record. `None` for an unknown key.
pub fn record(
    store: &mut dyn ConfigStore,
    key: &str,
    reset: bool,
) -> Option<Result<String, ConfigError>> {
    let id = key
        .strip_suffix("-config")
        .and_then(|slug| slug.parse::<WorldId>().ok());
    let result = match id {
        Some(WorldId::PendulumLive) => show_or_reset::<PendulumConfig>(store, key, reset),
        Some(WorldId::BouncingParticles) => show_or_reset::<ParticleConfig>(store, key, reset),
        Some(WorldId::RandomWalk) => show_or_reset::<RandomWalkConfig>(store, key, reset),
        Some(WorldId::Table) => show_or_reset::<TableConfig>(store, key, reset),
        _ if key == PERSPECTIVES_KEY => {
            show_or_reset::<BTreeMap<WorldId, CameraPose>>(store, key, reset)
        }
        _ => return None,
    };
    Some(result)
}
