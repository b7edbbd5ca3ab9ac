mod planet;
pub use self::planet::{Planet, Ring};
mod starfield;
pub use self::starfield::Starfield;

use crate::config::SceneConfig;
use crate::{ColorRGB, Light};
use cgmath::Point3;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Struct representing the renderable scene: lights, stars and planets.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub lights: Vec<Light>,
    pub starfield: Starfield,
    pub planets: Vec<Planet>,
}

impl Scene {
    /// Populates the scene described by `config`.
    ///
    /// Stars and planets are placed randomly. If the config has a seed the placement is
    /// reproducible.
    pub fn build(config: &SceneConfig) -> Scene {
        let mut rng = match config.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_entropy(),
        };
        Scene::build_with_rng(config, &mut rng)
    }

    pub fn build_with_rng<R: Rng>(config: &SceneConfig, rng: &mut R) -> Scene {
        let mut lights = vec![
            Light::new_omni(
                "sun".to_string(),
                ColorRGB::from_hex(config.sun.color),
                config.sun.position,
                config.sun.intensity,
                config.sun.range,
            ),
            Light::new_ambient("ambient".to_string(), config.ambient_color(), 1.0),
        ];
        let starfield = Starfield::generate(
            rng,
            config.star_count,
            config.star_spread,
            config.star_spin,
        );
        let (spread_x, spread_y) = config.planet_spread;
        let mut planets = Vec::with_capacity(config.planets.len());
        for (i, spec) in config.planets.iter().enumerate() {
            let x = (rng.gen::<f32>() - 0.5) * spread_x;
            let y = (rng.gen::<f32>() - 0.5) * spread_y;
            let z = config.planet_first_z + i as f32 * config.planet_step_z;
            let mut planet = Planet::new(spec, Point3::new(x, y, z));
            if let Some(glow) = &spec.glow {
                planet.glow = Some(lights.len());
                lights.push(Light::new_omni(
                    format!("{} glow", spec.name),
                    ColorRGB::from_hex(glow.color),
                    planet.position,
                    glow.intensity,
                    glow.range,
                ));
            }
            planets.push(planet);
        }
        for light in &lights {
            log::debug!("{} light \"{}\"", light.ltype().name(), light.name());
        }
        log::info!(
            "Scene populated with {} stars, {} planets and {} lights",
            starfield.len(),
            planets.len(),
            lights.len()
        );
        Scene {
            lights,
            starfield,
            planets,
        }
    }

    /// Ordered camera waypoints: `start` followed by the waypoint of each planet.
    pub fn waypoints(&self, start: Point3<f32>) -> Vec<Point3<f32>> {
        std::iter::once(start)
            .chain(self.planets.iter().map(Planet::waypoint))
            .collect()
    }

    /// Number of materials still waiting for their texture.
    pub fn pending_maps(&self) -> usize {
        self.planets
            .iter()
            .map(|p| {
                p.material.map.is_pending() as usize
                    + p.ring
                        .as_ref()
                        .map_or(0, |r| r.material.map.is_pending() as usize)
            })
            .sum()
    }
}
