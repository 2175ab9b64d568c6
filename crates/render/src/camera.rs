use glam::DVec3;
use pointstage_common::{CameraNudge, CameraPose, Signal, SubscriptionId};

/// Viewer position and orientation.
///
/// The only writer of its pose. Every mutation publishes a one-line
/// description to subscribers, in mutation order.
#[derive(Debug)]
pub struct Camera {
    pose: CameraPose,
    home: CameraPose,
    display: Signal<String>,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraPose::default())
    }
}

impl Camera {
    pub fn new(home: CameraPose) -> Self {
        let mut camera = Self {
            pose: home,
            home,
            display: Signal::new(),
        };
        camera.publish();
        camera
    }

    pub fn position(&self) -> DVec3 {
        self.pose.position
    }

    pub fn angle_x(&self) -> f64 {
        self.pose.angle_x
    }

    pub fn angle_y(&self) -> f64 {
        self.pose.angle_y
    }

    pub fn angle_z(&self) -> f64 {
        self.pose.angle_z
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn home(&self) -> CameraPose {
        self.home
    }

    pub fn move_x(&mut self, delta: f64) {
        self.translate(DVec3::new(delta, 0.0, 0.0));
    }

    pub fn move_y(&mut self, delta: f64) {
        self.translate(DVec3::new(0.0, delta, 0.0));
    }

    pub fn move_z(&mut self, delta: f64) {
        self.translate(DVec3::new(0.0, 0.0, delta));
    }

    pub fn rotate_x(&mut self, delta: f64) {
        self.rotate(DVec3::new(delta, 0.0, 0.0));
    }

    pub fn rotate_y(&mut self, delta: f64) {
        self.rotate(DVec3::new(0.0, delta, 0.0));
    }

    pub fn rotate_z(&mut self, delta: f64) {
        self.rotate(DVec3::new(0.0, 0.0, delta));
    }

    /// Back to the home pose.
    pub fn reset(&mut self) {
        self.pose = self.home;
        self.publish();
    }

    /// Change the pose `reset` returns to. Does not move the camera.
    pub fn set_home(&mut self, home: CameraPose) {
        if !home.is_finite() {
            tracing::warn!(?home, "ignoring non-finite home pose");
            return;
        }
        self.home = home;
    }

    /// Jump to `pose`.
    pub fn restore(&mut self, pose: CameraPose) {
        if !pose.is_finite() {
            tracing::warn!(?pose, "ignoring non-finite camera pose");
            return;
        }
        self.pose = pose;
        self.publish();
    }

    /// Apply a world's suggested motion as a single mutation.
    pub fn apply_nudge(&mut self, nudge: &CameraNudge) {
        if !nudge.is_finite() {
            tracing::warn!(?nudge, "ignoring non-finite camera nudge");
            return;
        }
        self.pose.position += nudge.translate;
        self.pose.angle_x += nudge.rotate.x;
        self.pose.angle_y += nudge.rotate.y;
        self.pose.angle_z += nudge.rotate.z;
        self.publish();
    }

    /// Current description; subscribers get it immediately.
    pub fn subscribe(&mut self, callback: impl FnMut(&String) + 'static) -> SubscriptionId {
        self.display.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.display.unsubscribe(id)
    }

    pub fn describe(&self) -> String {
        describe(&self.pose)
    }

    fn translate(&mut self, delta: DVec3) {
        if !delta.is_finite() {
            tracing::warn!(?delta, "ignoring non-finite camera move");
            return;
        }
        self.pose.position += delta;
        self.publish();
    }

    fn rotate(&mut self, delta: DVec3) {
        if !delta.is_finite() {
            tracing::warn!(?delta, "ignoring non-finite camera rotation");
            return;
        }
        self.pose.angle_x += delta.x;
        self.pose.angle_y += delta.y;
        self.pose.angle_z += delta.z;
        self.publish();
    }

    fn publish(&mut self) {
        self.display.emit(describe(&self.pose));
    }
}

fn degrees(radians: f64) -> i64 {
    radians.to_degrees().round() as i64
}

fn describe(pose: &CameraPose) -> String {
    let p = pose.position;
    format!(
        "Camera: Position (X {:.1}, Y {:.1}, Z {:.1}), Angle-X {}°, Angle-Y {}°, Angle-Z {}°",
        p.x,
        p.y,
        p.z,
        degrees(pose.angle_x),
        degrees(pose.angle_y),
        degrees(pose.angle_z)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointstage_common::ONE_DEGREE;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorded(camera: &mut Camera) -> Rc<RefCell<Vec<String>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        camera.subscribe(move |s| sink.borrow_mut().push(s.clone()));
        log
    }

    #[test]
    fn default_pose_description() {
        let camera = Camera::default();
        assert_eq!(
            camera.describe(),
            "Camera: Position (X 0.0, Y 0.0, Z -5.0), Angle-X 0°, Angle-Y 0°, Angle-Z 0°"
        );
    }

    #[test]
    fn new_subscriber_gets_current_description() {
        let mut camera = Camera::default();
        camera.move_x(1.0);
        let log = recorded(&mut camera);
        assert_eq!(log.borrow().len(), 1);
        assert!(log.borrow()[0].contains("X 1.0"));
    }

    #[test]
    fn mutations_publish_in_order() {
        let mut camera = Camera::default();
        let log = recorded(&mut camera);
        camera.move_z(0.1);
        camera.rotate_y(ONE_DEGREE);
        camera.rotate_x(-ONE_DEGREE);
        let log = log.borrow();
        assert_eq!(log.len(), 4);
        assert!(log[1].contains("Z -4.9"));
        assert!(log[2].contains("Angle-Y 1°"));
        assert!(log[3].contains("Angle-X -1°"));
    }

    #[test]
    fn moves_are_additive() {
        let mut camera = Camera::default();
        camera.move_x(0.1);
        camera.move_x(0.1);
        camera.move_y(-0.3);
        assert!((camera.position().x - 0.2).abs() < 1e-12);
        assert!((camera.position().y + 0.3).abs() < 1e-12);
    }

    #[test]
    fn angles_are_not_wrapped() {
        let mut camera = Camera::default();
        for _ in 0..400 {
            camera.rotate_z(ONE_DEGREE);
        }
        assert!((camera.angle_z() - 400.0 * ONE_DEGREE).abs() < 1e-9);
        assert!(camera.describe().ends_with("Angle-Z 400°"));
    }

    #[test]
    fn reset_returns_home() {
        let home = CameraPose::with_angles(0.2, 0.3, 0.0);
        let mut camera = Camera::new(home);
        camera.move_z(2.0);
        camera.rotate_x(1.0);
        camera.reset();
        assert_eq!(camera.pose(), home);
    }

    #[test]
    fn set_home_changes_reset_target_only() {
        let mut camera = Camera::default();
        let home = CameraPose::with_angles(0.5, 0.0, 0.0);
        camera.set_home(home);
        assert_eq!(camera.pose(), CameraPose::default());
        camera.reset();
        assert_eq!(camera.pose(), home);
    }

    #[test]
    fn nudge_is_one_publication() {
        let mut camera = Camera::default();
        let log = recorded(&mut camera);
        camera.apply_nudge(&CameraNudge {
            translate: DVec3::new(0.0, 1.0, 0.0),
            rotate: DVec3::new(0.0, ONE_DEGREE, 0.0),
        });
        assert_eq!(log.borrow().len(), 2);
        assert!((camera.position().y - 1.0).abs() < 1e-12);
        assert!((camera.angle_y() - ONE_DEGREE).abs() < 1e-12);
    }

    #[test]
    fn non_finite_deltas_are_ignored() {
        let mut camera = Camera::default();
        let log = recorded(&mut camera);
        camera.move_x(f64::NAN);
        camera.rotate_y(f64::INFINITY);
        camera.apply_nudge(&CameraNudge::rotate_y(f64::NAN));
        assert_eq!(camera.pose(), CameraPose::default());
        assert_eq!(log.borrow().len(), 1);
    }
}
