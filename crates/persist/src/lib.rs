//! Persistence: typed configuration records over a key-value store port.
//!
//! # Invariants
//! - A record that cannot be read or parsed never fails a load; defaults apply.
//! - Store keys are plain identifiers and never escape the store directory.

pub mod module;
pub mod store;

pub use module::{ConfigError, ConfigSource, ModuleConfig};
pub use store::{ConfigStore, JsonDirStore, MemoryConfigStore, StoreError};
