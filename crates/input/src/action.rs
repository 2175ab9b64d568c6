use glam::DVec3;
use pointstage_render::Camera;

/// A high-level action produced by input.
///
/// The driver consumes actions, never raw key events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Translate the camera by a delta.
    Move(DVec3),
    /// Rotate the camera by per-axis deltas in radians.
    Rotate(DVec3),
    /// Return the camera to its home pose.
    ResetCamera,
    /// Mount the world at this 1-based position in the registry.
    SwitchWorld(usize),
}

impl Action {
    /// Whether this action is carried out by the camera alone.
    pub fn is_camera(&self) -> bool {
        !matches!(self, Self::SwitchWorld(_))
    }

    /// Apply a camera action. Returns false for actions the camera does not handle.
    pub fn apply(&self, camera: &mut Camera) -> bool {
        match *self {
            Self::Move(delta) => {
                if delta.x != 0.0 {
                    camera.move_x(delta.x);
                }
                if delta.y != 0.0 {
                    camera.move_y(delta.y);
                }
                if delta.z != 0.0 {
                    camera.move_z(delta.z);
                }
                true
            }
            Self::Rotate(delta) => {
                if delta.x != 0.0 {
                    camera.rotate_x(delta.x);
                }
                if delta.y != 0.0 {
                    camera.rotate_y(delta.y);
                }
                if delta.z != 0.0 {
                    camera.rotate_z(delta.z);
                }
                true
            }
            Self::ResetCamera => {
                camera.reset();
                true
            }
            Self::SwitchWorld(_) => false,
        }
    }
}
