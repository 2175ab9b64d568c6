use glam::{DMat4, DVec3};

use crate::types::CameraPose;

/// Smallest determinant magnitude accepted as invertible.
const MIN_DETERMINANT: f64 = 1e-12;

/// Errors from building or inverting transforms.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    #[error("camera transform is singular (determinant {determinant})")]
    Singular { determinant: f64 },
}

/// The camera's world transform together with its inverse (world → camera space).
///
/// Composite is `translate(position) · rotate_x · rotate_y · rotate_z`,
/// applied to column vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransform {
    world_from_camera: DMat4,
    camera_from_world: DMat4,
}

impl CameraTransform {
    /// Compose the camera transform for a pose and invert it.
    ///
    /// Fails when the composite is singular, which for a finite pose cannot
    /// happen; non-finite poses land here.
    pub fn from_pose(pose: &CameraPose) -> Result<Self, TransformError> {
        let world_from_camera = compose(pose);
        let camera_from_world = checked_inverse(&world_from_camera)?;
        Ok(Self {
            world_from_camera,
            camera_from_world,
        })
    }

    /// World-space point into camera space.
    pub fn to_camera(&self, point: DVec3) -> DVec3 {
        self.camera_from_world.transform_point3(point)
    }

    /// Camera-space point back into world space.
    pub fn to_world(&self, point: DVec3) -> DVec3 {
        self.world_from_camera.transform_point3(point)
    }
}

/// Composite camera matrix for a pose.
pub fn compose(pose: &CameraPose) -> DMat4 {
    DMat4::from_translation(pose.position)
        * DMat4::from_rotation_x(pose.angle_x)
        * DMat4::from_rotation_y(pose.angle_y)
        * DMat4::from_rotation_z(pose.angle_z)
}

/// Invert a matrix, refusing singular or non-finite input.
pub fn checked_inverse(m: &DMat4) -> Result<DMat4, TransformError> {
    let determinant = m.determinant();
    if !determinant.is_finite() || determinant.abs() < MIN_DETERMINANT {
        return Err(TransformError::Singular { determinant });
    }
    let inverse = m.inverse();
    if !inverse.is_finite() {
        return Err(TransformError::Singular { determinant });
    }
    Ok(inverse)
}
