use cgmath::{Matrix3, Matrix4, Point3, Rad, SquareMatrix, Transform, Vector3 as Vec3};

/// Rotation expressed as three angles in radians, applied in `XYZ` order.
///
/// The resulting matrix is `Rx * Ry * Rz`, so a vector is rotated around `z` first.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Euler {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Euler {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Euler { x, y, z }
    }

    pub fn to_matrix3(self) -> Matrix3<f32> {
        Matrix3::from_angle_x(Rad(self.x))
            * Matrix3::from_angle_y(Rad(self.y))
            * Matrix3::from_angle_z(Rad(self.z))
    }

    /// Returns the rigid transform of an object with this rotation placed at `position`.
    pub fn to_matrix4(self, position: Point3<f32>) -> Matrix4<f32> {
        Matrix4::from_translation(position - Point3::new(0.0, 0.0, 0.0))
            * Matrix4::from(self.to_matrix3())
    }
}

/// Inverts a rigid transform.
///
/// Returns the identity for degenerate matrices, which cannot be produced by
/// [Euler::to_matrix4].
pub fn invert_rigid(matrix: &Matrix4<f32>) -> Matrix4<f32> {
    matrix.invert().unwrap_or_else(Matrix4::identity)
}

/// Transforms a point with a 4x4 affine matrix.
pub fn transform_point(matrix: &Matrix4<f32>, point: Point3<f32>) -> Point3<f32> {
    matrix.transform_point(point)
}

/// Transforms a direction with a 4x4 affine matrix, ignoring the translation.
pub fn transform_vector(matrix: &Matrix4<f32>, vector: Vec3<f32>) -> Vec3<f32> {
    matrix.transform_vector(vector)
}

#[cfg(test)]
mod tests {
    use super::{invert_rigid, transform_point, transform_vector, Euler};
    use cgmath::{Point3, Vector3 as Vec3};
    use float_cmp::assert_approx_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn rotation_order_is_xyz() {
        // rotating x around z by 90 gives y, then rotating y around x by 90 gives z
        let euler = Euler::new(FRAC_PI_2, 0.0, FRAC_PI_2);
        let v = euler.to_matrix3() * Vec3::unit_x();
        assert_approx_eq!(f32, v.x, 0.0, epsilon = 1e-6);
        assert_approx_eq!(f32, v.y, 0.0, epsilon = 1e-6);
        assert_approx_eq!(f32, v.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn ring_tilt_lays_xy_plane_flat() {
        // a flat ring built in the XY plane ends up in the XZ plane
        let euler = Euler::new(FRAC_PI_2, 0.0, 0.0);
        let v = euler.to_matrix3() * Vec3::unit_y();
        assert_approx_eq!(f32, v.y, 0.0, epsilon = 1e-6);
        assert_approx_eq!(f32, v.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn rigid_inverse_roundtrip() {
        let m = Euler::new(0.3, -1.2, 2.0).to_matrix4(Point3::new(10.0, -20.0, 30.0));
        let inv = invert_rigid(&m);
        let p = Point3::new(1.0, 2.0, 3.0);
        let back = transform_point(&inv, transform_point(&m, p));
        assert_approx_eq!(f32, back.x, 1.0, epsilon = 1e-4);
        assert_approx_eq!(f32, back.y, 2.0, epsilon = 1e-4);
        assert_approx_eq!(f32, back.z, 3.0, epsilon = 1e-4);
        let v = transform_vector(&m, Vec3::unit_x());
        assert_approx_eq!(f32, cgmath::InnerSpace::magnitude(v), 1.0, epsilon = 1e-5);
    }
}
