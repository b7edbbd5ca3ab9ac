use cgmath::{InnerSpace, Point3, Vector3 as Vec3};

/// A semi-infinite line, defined by an `origin` and a `direction`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vec3<f32>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, direction: Vec3<f32>) -> Ray {
        Ray { origin, direction }
    }

    /// Returns the point at the given distance from the ray origin.
    pub fn point_along(&self, distance: f32) -> Point3<f32> {
        self.origin + self.direction * distance
    }

    /// Returns the distance of the closest intersection in front of the origin with the sphere
    /// of the given `center` and `radius`.
    ///
    /// The ray direction is expected to be normalized.
    pub fn intersect_sphere(&self, center: Point3<f32>, radius: f32) -> Option<f32> {
        // |o + t*d - c|² = r² with |d| = 1 gives t² + 2bt + c = 0
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.magnitude2() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrt_d = discriminant.sqrt();
        let near = -b - sqrt_d;
        let far = -b + sqrt_d;
        if near > 0.0 {
            Some(near)
        } else if far > 0.0 {
            // origin inside the sphere
            Some(far)
        } else {
            None
        }
    }

    /// Intersects the ray with the plane `z = 0` and returns the distance and the hit point.
    ///
    /// Used with rays already transformed into the object space of a flat primitive.
    pub fn intersect_xy_plane(&self) -> Option<(f32, Point3<f32>)> {
        if self.direction.z.abs() <= f32::EPSILON {
            return None;
        }
        let distance = -self.origin.z / self.direction.z;
        if distance > 0.0 {
            Some((distance, self.point_along(distance)))
        } else {
            None
        }
    }
}
