use glam::DVec3;
use pointstage_common::ONE_DEGREE;
use pointstage_render::Camera;

use crate::action::Action;

/// Camera translation per key press.
pub const MOVE_STEP: f64 = 0.1;

/// Map a named key (`"w"`, `"ArrowUp"`, `"Escape"`, `"3"`) to an action.
pub fn action_for_key(key: &str) -> Option<Action> {
    let action = match key {
        "Escape" => Action::ResetCamera,
        "w" => Action::Move(DVec3::new(0.0, 0.0, MOVE_STEP)),
        "s" => Action::Move(DVec3::new(0.0, 0.0, -MOVE_STEP)),
        "a" => Action::Move(DVec3::new(-MOVE_STEP, 0.0, 0.0)),
        "d" => Action::Move(DVec3::new(MOVE_STEP, 0.0, 0.0)),
        "r" => Action::Move(DVec3::new(0.0, MOVE_STEP, 0.0)),
        "f" => Action::Move(DVec3::new(0.0, -MOVE_STEP, 0.0)),
        "ArrowUp" => Action::Rotate(DVec3::new(ONE_DEGREE, 0.0, 0.0)),
        "ArrowDown" => Action::Rotate(DVec3::new(-ONE_DEGREE, 0.0, 0.0)),
        "ArrowLeft" => Action::Rotate(DVec3::new(0.0, ONE_DEGREE, 0.0)),
        "ArrowRight" => Action::Rotate(DVec3::new(0.0, -ONE_DEGREE, 0.0)),
        "," => Action::Rotate(DVec3::new(0.0, 0.0, -ONE_DEGREE)),
        "." => Action::Rotate(DVec3::new(0.0, 0.0, ONE_DEGREE)),
        _ => match key.parse::<usize>() {
            Ok(n @ 1..=9) if key.len() == 1 => Action::SwitchWorld(n),
            _ => return None,
        },
    };
    Some(action)
}

/// Apply a camera key. Returns false if the key is not a camera key.
pub fn handle_key(key: &str, camera: &mut Camera) -> bool {
    match action_for_key(key) {
        Some(action) if action.is_camera() => {
            tracing::trace!(key, ?action, "camera key");
            action.apply(camera)
        }
        _ => false,
    }
}
