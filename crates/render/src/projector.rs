//! Camera-space transform, perspective division, depth sort.

use glam::{DVec2, DVec3};
use pointstage_common::{
    CameraPose, CameraTransform, Signal, SpacePath, SubscriptionId, TransformError,
};
use pointstage_kernel::WorldState;
use uuid::Uuid;

pub const NEAR: f64 = 1.0;
pub const FAR: f64 = 30.0;
pub const SCREEN_WIDTH: f64 = 1280.0;
pub const SCREEN_HEIGHT: f64 = 720.0;
/// Dot radius in pixels at `dist == 1`.
pub const RADIUS_SCALE: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProjectionError {
    #[error(transparent)]
    Transform(#[from] TransformError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeSetId(pub Uuid);

/// One projected point.
#[derive(Debug, Clone, PartialEq)]
pub struct DotShape {
    pub id: String,
    pub left: f64,
    pub top: f64,
    /// Normalised depth: 1 at the near plane, 0 at the far plane, -1 behind.
    pub dist: f64,
    pub radius: f64,
}

impl DotShape {
    pub fn is_visible(&self) -> bool {
        self.dist > 0.0
    }
}

/// One projected polyline, as an SVG path command string.
#[derive(Debug, Clone, PartialEq)]
pub struct PathShape {
    pub id: String,
    pub d: String,
    /// Smallest vertex depth.
    pub dist: f64,
    pub visible: bool,
}

/// Render-ready primitives for one frame. Dots are ordered by ascending `dist`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeSet {
    pub id: ShapeSetId,
    pub dots: Vec<DotShape>,
    pub paths: Vec<PathShape>,
}

impl ShapeSet {
    fn empty() -> Self {
        Self {
            id: ShapeSetId(Uuid::new_v4()),
            dots: Vec::new(),
            paths: Vec::new(),
        }
    }

    pub fn visible_dots(&self) -> usize {
        self.dots.iter().filter(|d| d.is_visible()).count()
    }

    pub fn visible_paths(&self) -> usize {
        self.paths.iter().filter(|p| p.visible).count()
    }
}

/// Screen position and depth of a camera-space point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub left: f64,
    pub top: f64,
    pub dist: f64,
}

/// Normalised depth of camera-space `z`; -1 in front of the near plane.
pub fn depth(z: f64) -> f64 {
    if z < NEAR {
        -1.0
    } else {
        NEAR * (FAR - z) / (z * (FAR - NEAR))
    }
}

/// Perspective-divide a camera-space point and map it to pixels.
pub fn to_screen(p: DVec3) -> ScreenPoint {
    let dist = depth(p.z);
    let plane = if p.z < NEAR {
        DVec2::ZERO
    } else {
        DVec2::new(p.x / p.z, p.y / p.z)
    };
    let (w, h) = (SCREEN_WIDTH, SCREEN_HEIGHT);
    ScreenPoint {
        left: w / 2.0 * plane.x * (h / w) + w / 2.0,
        top: -h / 2.0 * plane.y + h / 2.0,
        dist,
    }
}

pub fn radius(dist: f64) -> f64 {
    if dist > 0.0 { dist * RADIUS_SCALE } else { 0.0 }
}

fn path_command(points: &[ScreenPoint], close: bool) -> String {
    let mut d = String::with_capacity(points.len() * 16);
    for (i, p) in points.iter().enumerate() {
        d.push_str(if i == 0 { "M " } else { " L " });
        d.push_str(&format!("{},{}", p.left, p.top));
    }
    if close {
        d.push_str(" Z");
    }
    d
}

fn short_id(prefix: &str) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{prefix}_{}", &hex[..8])
}

/// Projects one world's frames through one camera pose.
///
/// The shape set is built on the first successful projection and updated in
/// place afterwards, so element ids stay stable for the render sink.
#[derive(Debug, Default)]
pub struct Projector {
    shapes: Option<ShapeSet>,
    published: Signal<ShapeSet>,
}

impl Projector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shapes(&self) -> Option<&ShapeSet> {
        self.shapes.as_ref()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&ShapeSet) + 'static) -> SubscriptionId {
        self.published.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.published.unsubscribe(id)
    }

    /// Project `state` as seen from `pose`, then publish.
    ///
    /// On a singular camera transform the previous shape set is kept and
    /// nothing is published.
    pub fn project(
        &mut self,
        state: &WorldState,
        pose: &CameraPose,
    ) -> Result<&ShapeSet, ProjectionError> {
        let _span = tracing::info_span!(
            "project",
            dots = state.dots.len(),
            paths = state.paths.len()
        )
        .entered();
        let transform = CameraTransform::from_pose(pose)?;

        let mut dots: Vec<ScreenPoint> = state
            .dots
            .iter()
            .map(|&c| to_screen(transform.to_camera(c)))
            .collect();
        dots.sort_by(|a, b| a.dist.total_cmp(&b.dist));

        let paths: Vec<(String, f64)> = state
            .paths
            .iter()
            .map(|path| project_path(&transform, path))
            .collect();

        let shapes = self.shapes.get_or_insert_with(|| {
            tracing::debug!("building shape set");
            ShapeSet::empty()
        });
        fill_dots(&mut shapes.dots, &dots);
        fill_paths(&mut shapes.paths, paths);
        tracing::trace!(
            set = %shapes.id.0,
            visible_dots = shapes.visible_dots(),
            visible_paths = shapes.visible_paths(),
            "projected"
        );

        self.published.emit(shapes.clone());
        Ok(shapes)
    }
}

fn project_path(transform: &CameraTransform, path: &SpacePath) -> (String, f64) {
    let points: Vec<ScreenPoint> = path
        .coords()
        .iter()
        .map(|&c| to_screen(transform.to_camera(c)))
        .collect();
    let dist = points
        .iter()
        .map(|p| p.dist)
        .fold(f64::INFINITY, f64::min);
    (path_command(&points, path.close), dist)
}

fn fill_dots(slots: &mut Vec<DotShape>, points: &[ScreenPoint]) {
    slots.truncate(points.len());
    for (i, p) in points.iter().enumerate() {
        let shape = DotShape {
            id: String::new(),
            left: p.left,
            top: p.top,
            dist: p.dist,
            radius: radius(p.dist),
        };
        match slots.get_mut(i) {
            Some(slot) => {
                slot.left = shape.left;
                slot.top = shape.top;
                slot.dist = shape.dist;
                slot.radius = shape.radius;
            }
            None => slots.push(DotShape {
                id: short_id("circle"),
                ..shape
            }),
        }
    }
}

fn fill_paths(slots: &mut Vec<PathShape>, paths: Vec<(String, f64)>) {
    slots.truncate(paths.len());
    for (i, (d, dist)) in paths.into_iter().enumerate() {
        let visible = dist > 0.0;
        match slots.get_mut(i) {
            Some(slot) => {
                slot.d = d;
                slot.dist = dist;
                slot.visible = visible;
            }
            None => slots.push(PathShape {
                id: short_id("path"),
                d,
                dist,
                visible,
            }),
        }
    }
}
