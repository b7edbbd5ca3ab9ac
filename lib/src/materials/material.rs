use super::Texture;
use crate::{ColorRGB, TextureError};
use std::sync::Arc;

/// State of the texture map assigned to a material.
#[derive(Debug, Clone, PartialEq)]
pub enum MapSlot {
    /// No map is assigned.
    Empty,
    /// A map was requested but is not available yet.
    Placeholder(String),
    Loaded(Arc<Texture>),
    /// The map could not be loaded. Contains the reason.
    Failed(String),
}

impl MapSlot {
    pub fn texture(&self) -> Option<&Texture> {
        match self {
            MapSlot::Loaded(tex) => Some(tex),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, MapSlot::Placeholder(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, MapSlot::Failed(_))
    }

    /// Resolves a placeholder with the outcome of a texture load.
    pub fn resolve(&mut self, result: Result<Texture, TextureError>) {
        *self = match result {
            Ok(texture) => MapSlot::Loaded(Arc::new(texture)),
            Err(e) => MapSlot::Failed(e.to_string()),
        };
    }

    /// Samples the map, returning opaque white if no texture is available.
    fn sample(&self, u: f32, v: f32) -> [f32; 4] {
        match self {
            MapSlot::Loaded(tex) => tex.sample(u, v),
            _ => [1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// Lit material, used for planets.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardMaterial {
    pub color: ColorRGB,
    pub map: MapSlot,
}

impl StandardMaterial {
    /// Creates a white material waiting for the given texture.
    pub fn with_pending_map(texture: &str) -> Self {
        StandardMaterial {
            color: ColorRGB::white(),
            map: MapSlot::Placeholder(texture.to_string()),
        }
    }

    /// Returns the albedo at the given texture coordinates.
    pub fn albedo(&self, u: f32, v: f32) -> ColorRGB {
        self.color * ColorRGB::from(self.map.sample(u, v))
    }
}

/// Unlit material, used for rings.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicMaterial {
    pub color: ColorRGB,
    pub map: MapSlot,
    /// Whether the alpha channel of the map is used for blending.
    pub transparent: bool,
    /// Whether the back face is visible.
    pub double_sided: bool,
}

impl BasicMaterial {
    pub fn with_pending_map(texture: &str) -> Self {
        BasicMaterial {
            color: ColorRGB::white(),
            map: MapSlot::Placeholder(texture.to_string()),
            transparent: true,
            double_sided: true,
        }
    }

    /// Returns the color and the opacity at the given texture coordinates.
    pub fn shade(&self, u: f32, v: f32) -> (ColorRGB, f32) {
        let texel = self.map.sample(u, v);
        let alpha = if self.transparent { texel[3] } else { 1.0 };
        (self.color * ColorRGB::from(texel), alpha)
    }
}

/// Material for point clouds.
#[derive(Debug, Clone, PartialEq)]
pub struct PointsMaterial {
    pub color: ColorRGB,
    /// Size of each point, in pixels.
    pub size: u32,
}

impl Default for PointsMaterial {
    fn default() -> Self {
        PointsMaterial {
            color: ColorRGB::white(),
            size: 1,
        }
    }
}
