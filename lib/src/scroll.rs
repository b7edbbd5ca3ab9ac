use crate::{CatmullRomCurve, InitError, PerspectiveCam};
use cgmath::Point3;

/// Converts a scroll offset into the progress along the page, in `[0.0, 1.0]`.
///
/// The progress is `offset / (scroll_height - viewport_height)`. Pages that cannot scroll, and
/// `NaN` offsets, map to `0.0`. Offsets past the end, infinite ones included, map to `1.0`.
pub fn scroll_fraction(offset: f32, scroll_height: f32, viewport_height: f32) -> f32 {
    let scrollable = scroll_height - viewport_height;
    if !scrollable.is_finite() || scrollable <= 0.0 || offset.is_nan() {
        return 0.0;
    }
    (offset / scrollable).clamp(0.0, 1.0)
}

/// Position and look-at target of the camera at a given progress along the path.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraPose {
    /// Normalized progress the pose was sampled at.
    pub t: f32,
    pub position: Point3<f32>,
    pub target: Point3<f32>,
}

impl CameraPose {
    /// Moves the camera to this pose.
    pub fn apply(&self, camera: &mut PerspectiveCam) {
        camera.position = self.position;
        camera.look_at(self.target);
    }
}

/// The curve followed by the camera while the page scrolls.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraPath {
    curve: CatmullRomCurve,
    look_ahead: f32,
}

impl CameraPath {
    /// Creates a path through the given waypoints.
    ///
    /// `look_ahead` is how far along the path, as a fraction of its length, the camera looks.
    pub fn new(waypoints: Vec<Point3<f32>>, look_ahead: f32) -> Result<Self, InitError> {
        let count = waypoints.len();
        let curve = CatmullRomCurve::new(waypoints).ok_or(InitError::Path(count))?;
        log::debug!(
            "Camera path through {} waypoints, {:.0} units long",
            count,
            curve.length()
        );
        Ok(CameraPath { curve, look_ahead })
    }

    pub fn curve(&self) -> &CatmullRomCurve {
        &self.curve
    }

    pub fn look_ahead(&self) -> f32 {
        self.look_ahead
    }

    /// Samples the camera pose at the normalized progress `t`.
    ///
    /// The target is sampled `look_ahead` further along, never past the end of the path.
    pub fn pose(&self, t: f32) -> CameraPose {
        let t = t.clamp(0.0, 1.0);
        let position = self.curve.point_at(t);
        let target = self.curve.point_at((t + self.look_ahead).min(1.0));
        CameraPose {
            t,
            position,
            target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{scroll_fraction, CameraPath};
    use crate::{InitError, PerspectiveCam};
    use cgmath::Point3;
    use float_cmp::assert_approx_eq;

    fn path() -> CameraPath {
        CameraPath::new(
            vec![
                Point3::new(0.0, 0.0, 1000.0),
                Point3::new(300.0, -200.0, -1500.0),
                Point3::new(-600.0, 400.0, -4500.0),
            ],
            0.01,
        )
        .unwrap()
    }

    #[test]
    fn fraction_is_normalized() {
        assert_eq!(scroll_fraction(0.0, 5000.0, 1000.0), 0.0);
        assert_eq!(scroll_fraction(2000.0, 5000.0, 1000.0), 0.5);
        assert_eq!(scroll_fraction(4000.0, 5000.0, 1000.0), 1.0);
    }

    #[test]
    fn fraction_clamps_past_the_end() {
        for offset in [4000.0, 4000.5, 9000.0, f32::MAX, f32::INFINITY] {
            assert_eq!(scroll_fraction(offset, 5000.0, 1000.0), 1.0);
        }
        assert_eq!(scroll_fraction(-120.0, 5000.0, 1000.0), 0.0);
        assert_eq!(scroll_fraction(f32::NEG_INFINITY, 5000.0, 1000.0), 0.0);
    }

    #[test]
    fn fraction_without_scrollable_height() {
        assert_eq!(scroll_fraction(0.0, 1000.0, 1000.0), 0.0);
        assert_eq!(scroll_fraction(300.0, 1000.0, 1000.0), 0.0);
        assert_eq!(scroll_fraction(300.0, 800.0, 1000.0), 0.0);
        assert_eq!(scroll_fraction(f32::NAN, 5000.0, 1000.0), 0.0);
        assert_eq!(scroll_fraction(10.0, f32::INFINITY, 1000.0), 0.0);
        assert!(!scroll_fraction(0.0, 1000.0, 1000.0).is_nan());
    }

    #[test]
    fn pose_matches_curve_exactly() {
        let path = path();
        for i in 0..=50 {
            let t = i as f32 / 50.0;
            let pose = path.pose(t);
            assert_eq!(pose.position, path.curve().point_at(t));
        }
    }

    #[test]
    fn look_ahead_clamped_at_end() {
        let path = path();
        let pose = path.pose(0.995);
        assert_eq!(pose.target, path.curve().point_at(1.0));
        let end = path.pose(1.0);
        assert_eq!(end.target, end.position);
        let start = path.pose(0.0);
        assert_eq!(start.target, path.curve().point_at(0.01));
    }

    #[test]
    fn apply_moves_camera() {
        let path = path();
        let mut cam = PerspectiveCam::new(75.0, 1.0, 0.1, 20000.0);
        let pose = path.pose(0.25);
        pose.apply(&mut cam);
        assert_eq!(cam.position, pose.position);
        let to_target = pose.target - pose.position;
        let expected = cgmath::InnerSpace::normalize(to_target);
        assert_approx_eq!(f32, cam.forward.x, expected.x, epsilon = 1e-6);
        assert_approx_eq!(f32, cam.forward.z, expected.z, epsilon = 1e-6);
    }

    #[test]
    fn path_needs_two_waypoints() {
        let err = CameraPath::new(vec![Point3::new(0.0, 0.0, 0.0)], 0.01).unwrap_err();
        assert!(matches!(err, InitError::Path(1)));
    }
}
