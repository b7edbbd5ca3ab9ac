use super::Ray;
use cgmath::{perspective, Deg, InnerSpace, Matrix4, Point3, Vector3 as Vec3};

/// A perspective camera.
///
/// Orientation is stored as a forward direction and an up vector. The projection matrix is
/// cached and recomputed only by [PerspectiveCam::update_projection_matrix].
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCam {
    pub position: Point3<f32>,
    /// Unit vector the camera is looking towards.
    pub forward: Vec3<f32>,
    pub up: Vec3<f32>,
    /// Vertical field of view, in degrees.
    pub fovy: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    projection: Matrix4<f32>,
}

impl PerspectiveCam {
    /// Creates a camera at the origin looking down the negative z axis.
    pub fn new(fovy: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = PerspectiveCam {
            position: Point3::new(0.0, 0.0, 0.0),
            forward: -Vec3::unit_z(),
            up: Vec3::unit_y(),
            fovy,
            aspect,
            near,
            far,
            projection: Matrix4::from_scale(1.0),
        };
        cam.update_projection_matrix();
        cam
    }

    /// Rotates the camera so it faces `target`.
    ///
    /// If the target coincides with the camera position the camera looks down the negative z
    /// axis.
    pub fn look_at(&mut self, target: Point3<f32>) {
        let dir = target - self.position;
        if dir.magnitude2() <= f32::EPSILON {
            self.forward = -Vec3::unit_z();
        } else {
            self.forward = dir.normalize();
        }
    }

    /// Point located one unit in front of the camera.
    pub fn target(&self) -> Point3<f32> {
        self.position + self.forward
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    /// Recomputes the projection matrix after changing fov, aspect or clipping planes.
    pub fn update_projection_matrix(&mut self) {
        self.projection = perspective(Deg(self.fovy), self.aspect, self.near, self.far);
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.forward, self.stable_up())
    }

    /// Returns the orthonormal basis `(right, up, forward)` of the camera.
    pub fn basis(&self) -> (Vec3<f32>, Vec3<f32>, Vec3<f32>) {
        let right = self.forward.cross(self.stable_up()).normalize();
        let up = right.cross(self.forward);
        (right, up, self.forward)
    }

    /// Generates the primary ray passing through the given normalized device coordinates.
    ///
    /// Both `ndc_x` and `ndc_y` are in `[-1.0, 1.0]`, with `ndc_y` pointing up.
    pub fn ray(&self, ndc_x: f32, ndc_y: f32) -> Ray {
        let tan_half = (self.fovy.to_radians() * 0.5).tan();
        let (right, up, forward) = self.basis();
        let direction =
            forward + right * (ndc_x * tan_half * self.aspect) + up * (ndc_y * tan_half);
        Ray::new(self.position, direction.normalize())
    }

    /// Up vector guaranteed not to be parallel to the forward direction.
    fn stable_up(&self) -> Vec3<f32> {
        if self.forward.cross(self.up).magnitude2() <= f32::EPSILON {
            // looking straight up or down
            Vec3::unit_z()
        } else {
            self.up
        }
    }
}
