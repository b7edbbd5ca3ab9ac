use crate::{Euler, PointsMaterial};
use cgmath::{Matrix4, Point3};
use rand::Rng;

/// A cloud of points rotating slowly around the y axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Starfield {
    positions: Vec<Point3<f32>>,
    pub rotation: Euler,
    /// Rotation around the y axis, per frame, in radians.
    pub spin: f32,
    pub material: PointsMaterial,
}

impl Starfield {
    /// Scatters `count` stars uniformly in a cube of side `spread` centered in the origin.
    pub fn generate<R: Rng>(rng: &mut R, count: usize, spread: f32, spin: f32) -> Self {
        let mut positions = Vec::with_capacity(count);
        for _ in 0..count {
            let x = spread * (0.5 - rng.gen::<f32>());
            let y = spread * (0.5 - rng.gen::<f32>());
            let z = spread * (0.5 - rng.gen::<f32>());
            positions.push(Point3::new(x, y, z));
        }
        Starfield::from_positions(positions, spin)
    }

    /// Creates a starfield with the given positions, in object space.
    pub fn from_positions(positions: Vec<Point3<f32>>, spin: f32) -> Self {
        Starfield {
            positions,
            rotation: Euler::default(),
            spin,
            material: PointsMaterial::default(),
        }
    }

    /// Star positions, in object space.
    pub fn positions(&self) -> &[Point3<f32>] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn world_matrix(&self) -> Matrix4<f32> {
        self.rotation.to_matrix4(Point3::new(0.0, 0.0, 0.0))
    }
}
