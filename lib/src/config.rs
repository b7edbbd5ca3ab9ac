use crate::ColorRGB;
use cgmath::{Point3, Vector3 as Vec3};

/// Ring attached to a planet.
#[derive(Debug, Clone, PartialEq)]
pub struct RingSpec {
    pub texture: String,
    /// Gap between the planet surface and the inner edge of the ring.
    pub inner_gap: f32,
    /// Distance between the planet surface and the outer edge of the ring.
    pub outer_gap: f32,
    pub segments: u32,
    /// Rotation around the ring local z axis, per frame, in radians.
    pub spin: f32,
}

/// Point light placed at the center of a planet.
#[derive(Debug, Clone, PartialEq)]
pub struct GlowSpec {
    pub color: u32,
    pub intensity: f32,
    pub range: f32,
}

/// Description of a single planet.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetSpec {
    pub name: String,
    pub texture: String,
    pub radius: f32,
    /// Offset from the planet center of the camera path waypoint passing near this planet.
    pub path_offset: Vec3<f32>,
    /// Rotation around the planet y axis, per frame, in radians.
    pub spin: f32,
    pub ring: Option<RingSpec>,
    pub glow: Option<GlowSpec>,
}

impl PlanetSpec {
    fn plain(name: &str, texture: &str, radius: f32, path_offset: Vec3<f32>) -> Self {
        PlanetSpec {
            name: name.to_string(),
            texture: texture.to_string(),
            radius,
            path_offset,
            spin: 0.001,
            ring: None,
            glow: None,
        }
    }
}

/// Point light in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct OmniSpec {
    pub color: u32,
    pub intensity: f32,
    pub range: f32,
    pub position: Point3<f32>,
}

/// Parameters of the perspective camera.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSpec {
    /// Vertical field of view, in degrees.
    pub fovy: f32,
    pub near: f32,
    pub far: f32,
}

/// Every constant needed to build the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub star_count: usize,
    /// Stars are placed uniformly in a cube with this side, centered in the origin.
    pub star_spread: f32,
    /// Rotation of the starfield around the y axis, per frame, in radians.
    pub star_spin: f32,
    /// Planets are spread in `[-x/2, x/2)` and `[-y/2, y/2)`.
    pub planet_spread: (f32, f32),
    /// Depth of the first planet.
    pub planet_first_z: f32,
    /// Depth distance between consecutive planets.
    pub planet_step_z: f32,
    pub planets: Vec<PlanetSpec>,
    pub sun: OmniSpec,
    pub ambient: u32,
    pub camera: CameraSpec,
    /// First waypoint of the camera path, before any planet.
    pub path_start: Point3<f32>,
    /// How far along the path the camera looks, as a fraction of the path.
    pub look_ahead: f32,
    /// Seed for the random placement. Uses entropy if None.
    pub seed: Option<u64>,
}

impl SceneConfig {
    pub fn ambient_color(&self) -> ColorRGB {
        ColorRGB::from_hex(self.ambient)
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        let mut venus = PlanetSpec::plain(
            "venus",
            "8k_venus_surface.jpg",
            180.0,
            Vec3::new(100.0, 50.0, 500.0),
        );
        venus.glow = Some(GlowSpec {
            color: 0xffdd44,
            intensity: 1.0,
            range: 1000.0,
        });
        let mut saturn =
            PlanetSpec::plain("saturn", "8k_saturn.jpg", 300.0, Vec3::new(0.0, 0.0, 1000.0));
        saturn.spin = 0.002;
        saturn.ring = Some(RingSpec {
            texture: "8k_saturn_ring_alpha.png".to_string(),
            inner_gap: 20.0,
            outer_gap: 150.0,
            segments: 64,
            spin: 0.0005,
        });
        SceneConfig {
            star_count: 50_000,
            star_spread: 20_000.0,
            star_spin: 0.0005,
            planet_spread: (4000.0, 3000.0),
            planet_first_z: -2000.0,
            planet_step_z: -3000.0,
            planets: vec![
                PlanetSpec::plain(
                    "mercury",
                    "8k_mercury.jpg",
                    120.0,
                    Vec3::new(0.0, 0.0, 500.0),
                ),
                venus,
                PlanetSpec::plain(
                    "earth",
                    "8k_earth_daymap.jpg",
                    250.0,
                    Vec3::new(-200.0, -100.0, 500.0),
                ),
                PlanetSpec::plain("mars", "8k_mars.jpg", 200.0, Vec3::new(150.0, 100.0, 500.0)),
                saturn,
            ],
            sun: OmniSpec {
                color: 0xffffff,
                intensity: 2.0,
                range: 30_000.0,
                position: Point3::new(0.0, 2000.0, 4000.0),
            },
            ambient: 0x404040,
            camera: CameraSpec {
                fovy: 75.0,
                near: 0.1,
                far: 20_000.0,
            },
            path_start: Point3::new(0.0, 0.0, 1000.0),
            look_ahead: 0.01,
            seed: None,
        }
    }
}
