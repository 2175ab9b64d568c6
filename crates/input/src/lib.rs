//! Keyboard input mapped to shared actions.
//!
//! # Invariants
//! - Raw key names never reach the camera; only [`Action`]s do.
//! - Unrecognised keys are reported as unhandled, never as an error.

pub mod action;
pub mod keymap;

pub use action::Action;
pub use keymap::{MOVE_STEP, action_for_key, handle_key};
