use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A point in world space.
pub type SpaceCoord = DVec3;

/// One degree in radians.
pub const ONE_DEGREE: f64 = std::f64::consts::PI / 180.0;

/// Errors from building geometry values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathError {
    #[error("a path needs at least one point")]
    Empty,
}

/// Polyline in world space. Holds at least one point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSpacePath")]
pub struct SpacePath {
    coords: Vec<SpaceCoord>,
    /// Whether the last point connects back to the first.
    pub close: bool,
}

#[derive(Deserialize)]
struct RawSpacePath {
    coords: Vec<SpaceCoord>,
    close: bool,
}

impl TryFrom<RawSpacePath> for SpacePath {
    type Error = PathError;

    fn try_from(raw: RawSpacePath) -> Result<Self, Self::Error> {
        Self::new(raw.coords, raw.close)
    }
}

impl SpacePath {
    pub fn new(coords: Vec<SpaceCoord>, close: bool) -> Result<Self, PathError> {
        if coords.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self { coords, close })
    }

    /// Open polyline through the given points.
    pub fn open(coords: Vec<SpaceCoord>) -> Result<Self, PathError> {
        Self::new(coords, false)
    }

    /// Polyline starting at `first`; cannot fail since it is never empty.
    pub fn starting_at(
        first: SpaceCoord,
        rest: impl IntoIterator<Item = SpaceCoord>,
        close: bool,
    ) -> Self {
        let mut coords = vec![first];
        coords.extend(rest);
        Self { coords, close }
    }

    pub fn coords(&self) -> &[SpaceCoord] {
        &self.coords
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// False for every constructed path.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

/// Camera position and orientation. Angles are radians and are never wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: DVec3,
    pub angle_x: f64,
    pub angle_y: f64,
    pub angle_z: f64,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: DVec3::new(0.0, 0.0, -5.0),
            angle_x: 0.0,
            angle_y: 0.0,
            angle_z: 0.0,
        }
    }
}

impl CameraPose {
    /// The default pose with the given angles.
    pub fn with_angles(angle_x: f64, angle_y: f64, angle_z: f64) -> Self {
        Self {
            angle_x,
            angle_y,
            angle_z,
            ..Self::default()
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.angle_x.is_finite()
            && self.angle_y.is_finite()
            && self.angle_z.is_finite()
    }

    /// Angles as a vector `(x, y, z)`.
    pub fn angles(&self) -> DVec3 {
        DVec3::new(self.angle_x, self.angle_y, self.angle_z)
    }
}

/// Relative camera motion suggested by a world for one tick.
///
/// Worlds never write the camera themselves; whoever binds the camera to the
/// world applies the nudge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraNudge {
    pub translate: DVec3,
    /// Rotation deltas in radians around x, y, z.
    pub rotate: DVec3,
}

impl CameraNudge {
    pub fn rotate_y(delta: f64) -> Self {
        Self {
            rotate: DVec3::new(0.0, delta, 0.0),
            ..Self::default()
        }
    }

    pub fn is_finite(&self) -> bool {
        self.translate.is_finite() && self.rotate.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_is_rejected() {
        assert_eq!(SpacePath::open(Vec::new()), Err(PathError::Empty));
    }

    #[test]
    fn path_keeps_points_and_close_flag() {
        let path = SpacePath::new(vec![DVec3::ZERO, DVec3::X, DVec3::Y], true).unwrap();
        assert_eq!(path.len(), 3);
        assert!(path.close);
        assert_eq!(path.coords()[1], DVec3::X);
    }

    #[test]
    fn starting_at_prepends_first_point() {
        let path = SpacePath::starting_at(DVec3::Z, [DVec3::X], false);
        assert_eq!(path.coords(), &[DVec3::Z, DVec3::X]);
        assert!(!path.is_empty());
    }

    #[test]
    fn empty_path_does_not_deserialize() {
        let err = serde_json::from_str::<SpacePath>(r#"{"coords":[],"close":false}"#).unwrap_err();
        assert!(err.to_string().contains("at least one point"));
    }

    #[test]
    fn path_deserializes_through_constructor() {
        let path: SpacePath =
            serde_json::from_str(r#"{"coords":[[1.0,2.0,3.0]],"close":true}"#).unwrap();
        assert_eq!(path.coords(), &[DVec3::new(1.0, 2.0, 3.0)]);
        assert!(path.close);
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(serde_json::from_str::<SpacePath>(&json).unwrap(), path);
    }

    #[test]
    fn default_pose_sits_behind_origin() {
        let pose = CameraPose::default();
        assert_eq!(pose.position, DVec3::new(0.0, 0.0, -5.0));
        assert_eq!(pose.angles(), DVec3::ZERO);
        assert!(pose.is_finite());
    }

    #[test]
    fn nan_pose_is_not_finite() {
        let pose = CameraPose::with_angles(f64::NAN, 0.0, 0.0);
        assert!(!pose.is_finite());
    }

    #[test]
    fn nudge_rotate_y_only_touches_y() {
        let n = CameraNudge::rotate_y(ONE_DEGREE);
        assert_eq!(n.translate, DVec3::ZERO);
        assert_eq!(n.rotate.y, ONE_DEGREE);
        assert_eq!(n.rotate.x, 0.0);
    }
}
