use cgmath::{MetricSpace, Point3};

/// Number of subdivisions used to approximate the arc length of the curve.
pub const ARC_LENGTH_DIVISIONS: usize = 200;

/// An open centripetal Catmull-Rom spline passing through a list of points.
///
/// The curve is parametrized in two ways:
/// - [CatmullRomCurve::point] takes the raw spline parameter, where each segment between two
/// consecutive points spans the same parameter interval;
/// - [CatmullRomCurve::point_at] takes the normalized arc length, so equal increments move the
/// same distance along the curve.
///
/// The arc length table is computed once on construction, as the curve is immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRomCurve {
    points: Vec<Point3<f32>>,
    arc_lengths: Vec<f32>,
}

/// Cubic polynomial `c0 + c1*t + c2*t² + c3*t³` for a single coordinate.
struct CubicPoly {
    c0: f32,
    c1: f32,
    c2: f32,
    c3: f32,
}

impl CubicPoly {
    /// Hermite form with the tangents of a non-uniform Catmull-Rom spline.
    fn nonuniform_catmull_rom(x: [f32; 4], dt0: f32, dt1: f32, dt2: f32) -> Self {
        let [x0, x1, x2, x3] = x;
        let mut t1 = (x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1;
        let mut t2 = (x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2;
        // rescale tangents for parametrization in [0,1]
        t1 *= dt1;
        t2 *= dt1;
        CubicPoly {
            c0: x1,
            c1: t1,
            c2: -3.0 * x1 + 3.0 * x2 - 2.0 * t1 - t2,
            c3: 2.0 * x1 - 2.0 * x2 + t1 + t2,
        }
    }

    fn calc(&self, t: f32) -> f32 {
        let t2 = t * t;
        let t3 = t2 * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t3
    }
}

impl CatmullRomCurve {
    /// Creates a new curve passing through the given points.
    ///
    /// Returns None if less than two points are given.
    pub fn new(points: Vec<Point3<f32>>) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let mut curve = CatmullRomCurve {
            points,
            arc_lengths: Vec::with_capacity(ARC_LENGTH_DIVISIONS + 1),
        };
        curve.arc_lengths = curve.compute_lengths(ARC_LENGTH_DIVISIONS);
        Some(curve)
    }

    /// Returns the points the curve passes through.
    pub fn points(&self) -> &[Point3<f32>] {
        &self.points
    }

    /// Returns the approximated total length of the curve.
    pub fn length(&self) -> f32 {
        self.arc_lengths[self.arc_lengths.len() - 1]
    }

    /// Samples the curve at the spline parameter `t` in `[0.0, 1.0]`.
    pub fn point(&self, t: f32) -> Point3<f32> {
        let points = &self.points;
        let len = points.len();
        let p = (len - 1) as f32 * t.clamp(0.0, 1.0);
        let mut segment = p.floor() as usize;
        let mut weight = p - segment as f32;
        if segment >= len - 1 {
            segment = len - 2;
            weight = 1.0;
        }
        // the first and last points have no neighbour: extrapolate one
        let p0 = if segment > 0 {
            points[segment - 1]
        } else {
            points[0] + (points[0] - points[1])
        };
        let p1 = points[segment];
        let p2 = points[segment + 1];
        let p3 = if segment + 2 < len {
            points[segment + 2]
        } else {
            points[len - 1] + (points[len - 1] - points[len - 2])
        };
        // centripetal: knot spacing is the square root of the distance
        let mut dt0 = p0.distance2(p1).powf(0.25);
        let mut dt1 = p1.distance2(p2).powf(0.25);
        let mut dt2 = p2.distance2(p3).powf(0.25);
        // coincident points
        if dt1 < 1E-4 {
            dt1 = 1.0;
        }
        if dt0 < 1E-4 {
            dt0 = dt1;
        }
        if dt2 < 1E-4 {
            dt2 = dt1;
        }
        let px = CubicPoly::nonuniform_catmull_rom([p0.x, p1.x, p2.x, p3.x], dt0, dt1, dt2);
        let py = CubicPoly::nonuniform_catmull_rom([p0.y, p1.y, p2.y, p3.y], dt0, dt1, dt2);
        let pz = CubicPoly::nonuniform_catmull_rom([p0.z, p1.z, p2.z, p3.z], dt0, dt1, dt2);
        Point3::new(px.calc(weight), py.calc(weight), pz.calc(weight))
    }

    /// Samples the curve at the normalized arc length `u` in `[0.0, 1.0]`.
    pub fn point_at(&self, u: f32) -> Point3<f32> {
        self.point(self.u_to_t(u))
    }

    /// Converts a normalized arc length into the spline parameter.
    pub fn u_to_t(&self, u: f32) -> f32 {
        let lengths = &self.arc_lengths;
        let last = lengths.len() - 1;
        let target = u.clamp(0.0, 1.0) * lengths[last];
        // index of the last cumulative length not greater than the target
        let i = lengths.partition_point(|&l| l <= target).saturating_sub(1);
        if lengths[i] == target || i == last {
            return i as f32 / last as f32;
        }
        let before = lengths[i];
        let after = lengths[i + 1];
        let fraction = (target - before) / (after - before);
        (i as f32 + fraction) / last as f32
    }

    fn compute_lengths(&self, divisions: usize) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut last = self.point(0.0);
        let mut sum = 0.0;
        lengths.push(sum);
        for i in 1..=divisions {
            let current = self.point(i as f32 / divisions as f32);
            sum += current.distance(last);
            lengths.push(sum);
            last = current;
        }
        lengths
    }
}

#[cfg(test)]
mod tests {
    use super::CatmullRomCurve;
    use cgmath::{MetricSpace, Point3};
    use float_cmp::assert_approx_eq;

    fn zigzag() -> CatmullRomCurve {
        CatmullRomCurve::new(vec![
            Point3::new(0.0, 0.0, 1000.0),
            Point3::new(-500.0, 300.0, -1500.0),
            Point3::new(800.0, -200.0, -4500.0),
            Point3::new(100.0, 600.0, -7000.0),
        ])
        .unwrap()
    }

    #[test]
    fn needs_two_points() {
        assert!(CatmullRomCurve::new(vec![]).is_none());
        assert!(CatmullRomCurve::new(vec![Point3::new(0.0, 0.0, 0.0)]).is_none());
        assert!(
            CatmullRomCurve::new(vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)])
                .is_some()
        );
    }

    #[test]
    fn passes_through_control_points() {
        let curve = zigzag();
        let n = curve.points().len();
        for (i, expected) in curve.points().iter().enumerate() {
            let t = i as f32 / (n - 1) as f32;
            let p = curve.point(t);
            assert_approx_eq!(f32, p.x, expected.x, epsilon = 1e-2);
            assert_approx_eq!(f32, p.y, expected.y, epsilon = 1e-2);
            assert_approx_eq!(f32, p.z, expected.z, epsilon = 1e-2);
        }
    }

    #[test]
    fn endpoints_by_arc_length() {
        let curve = zigzag();
        let first = curve.point_at(0.0);
        let last = curve.point_at(1.0);
        assert_approx_eq!(f32, first.z, 1000.0, epsilon = 1e-3);
        assert_approx_eq!(f32, last.x, 100.0, epsilon = 1e-2);
        assert_approx_eq!(f32, last.y, 600.0, epsilon = 1e-2);
        assert_approx_eq!(f32, last.z, -7000.0, epsilon = 1e-2);
    }

    #[test]
    fn straight_line_is_uniform() {
        let curve =
            CatmullRomCurve::new(vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, -100.0)])
                .unwrap();
        assert_approx_eq!(f32, curve.length(), 100.0, epsilon = 1e-3);
        let mid = curve.point_at(0.5);
        assert_approx_eq!(f32, mid.x, 0.0, epsilon = 1e-4);
        assert_approx_eq!(f32, mid.z, -50.0, epsilon = 1e-2);
    }

    #[test]
    fn arc_length_mapping_is_monotonic() {
        let curve = zigzag();
        let mut previous = curve.u_to_t(0.0);
        assert_eq!(previous, 0.0);
        for i in 1..=100 {
            let t = curve.u_to_t(i as f32 / 100.0);
            assert!(t >= previous);
            previous = t;
        }
        assert_approx_eq!(f32, previous, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn equal_steps_travel_equal_distances() {
        let curve = zigzag();
        let step = curve.length() / 10.0;
        for i in 0..10 {
            let a = curve.point_at(i as f32 / 10.0);
            let b = curve.point_at((i + 1) as f32 / 10.0);
            // chord is at most the arc
            assert!(a.distance(b) <= step * 1.01);
            assert!(a.distance(b) >= step * 0.9);
        }
    }

    #[test]
    fn out_of_range_parameters_are_clamped() {
        let curve = zigzag();
        assert_eq!(curve.point_at(-0.5), curve.point_at(0.0));
        assert_eq!(curve.point_at(1.5), curve.point_at(1.0));
    }

    #[test]
    fn coincident_points_do_not_produce_nan() {
        let p = Point3::new(10.0, 20.0, 30.0);
        let curve = CatmullRomCurve::new(vec![p, p, p]).unwrap();
        assert_eq!(curve.length(), 0.0);
        let sample = curve.point_at(0.3);
        assert!(sample.x.is_finite() && sample.y.is_finite() && sample.z.is_finite());
        assert_approx_eq!(f32, sample.x, 10.0, epsilon = 1e-4);
    }
}
