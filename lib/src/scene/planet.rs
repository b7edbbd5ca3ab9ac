use crate::config::{PlanetSpec, RingSpec};
use crate::{BasicMaterial, Euler, StandardMaterial};
use cgmath::{Matrix4, Point3, Vector3 as Vec3};
use std::f32::consts::{FRAC_PI_2, PI};

/// A textured sphere spinning around its y axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    pub name: String,
    pub position: Point3<f32>,
    pub radius: f32,
    pub rotation: Euler,
    /// Rotation around the y axis, per frame, in radians.
    pub spin: f32,
    pub material: StandardMaterial,
    pub ring: Option<Ring>,
    /// Index, in the scene lights, of the glow placed at the planet center.
    pub glow: Option<usize>,
    /// Offset of the camera waypoint passing near this planet.
    pub path_offset: Vec3<f32>,
}

/// A flat annulus attached to a planet.
///
/// The ring lies in the `z = 0` plane of its own frame, which is relative to the parent planet.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub segments: u32,
    /// Rotation relative to the parent planet.
    pub rotation: Euler,
    /// Rotation around the ring z axis, per frame, in radians.
    pub spin: f32,
    pub material: BasicMaterial,
}

impl Planet {
    /// Creates a planet from its description, at the given position.
    ///
    /// The material map and the ring map start as placeholders.
    pub fn new(spec: &PlanetSpec, position: Point3<f32>) -> Self {
        Planet {
            name: spec.name.clone(),
            position,
            radius: spec.radius,
            rotation: Euler::default(),
            spin: spec.spin,
            material: StandardMaterial::with_pending_map(&spec.texture),
            ring: spec.ring.as_ref().map(|ring| Ring::new(ring, spec.radius)),
            glow: None,
            path_offset: spec.path_offset,
        }
    }

    /// Position of the camera waypoint associated with this planet.
    pub fn waypoint(&self) -> Point3<f32> {
        self.position + self.path_offset
    }

    pub fn world_matrix(&self) -> Matrix4<f32> {
        self.rotation.to_matrix4(self.position)
    }

    /// Texture coordinates of a point on the unit sphere, given in the planet frame.
    ///
    /// `u` grows with the longitude, starting from the negative x axis. `v` is `0.0` at the north
    /// pole (positive y) and `1.0` at the south pole.
    pub fn surface_uv(local_normal: Vec3<f32>) -> (f32, f32) {
        let theta = local_normal.y.clamp(-1.0, 1.0).acos();
        let mut phi = local_normal.z.atan2(-local_normal.x);
        if phi < 0.0 {
            phi += 2.0 * PI;
        }
        (phi / (2.0 * PI), theta / PI)
    }
}

impl Ring {
    pub fn new(spec: &RingSpec, planet_radius: f32) -> Self {
        Ring {
            inner_radius: planet_radius + spec.inner_gap,
            outer_radius: planet_radius + spec.outer_gap,
            segments: spec.segments,
            rotation: Euler::new(FRAC_PI_2, 0.0, 0.0),
            spin: spec.spin,
            material: BasicMaterial::with_pending_map(&spec.texture),
        }
    }

    /// World transform of the ring, given the world transform of its planet.
    pub fn world_matrix(&self, parent: &Matrix4<f32>) -> Matrix4<f32> {
        parent * self.rotation.to_matrix4(Point3::new(0.0, 0.0, 0.0))
    }

    /// Whether a point of the `z = 0` plane, in ring space, belongs to the ring.
    pub fn contains(&self, local: Point3<f32>) -> bool {
        let r2 = local.x * local.x + local.y * local.y;
        r2 >= self.inner_radius * self.inner_radius && r2 <= self.outer_radius * self.outer_radius
    }

    /// Planar texture coordinates of a point in ring space, `v = 0.0` being the top row.
    pub fn uv(&self, local: Point3<f32>) -> (f32, f32) {
        let u = (local.x / self.outer_radius + 1.0) * 0.5;
        let v = (local.y / self.outer_radius + 1.0) * 0.5;
        (u, 1.0 - v)
    }
}
