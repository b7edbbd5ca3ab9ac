mod animation;
pub mod config;
mod context;
mod error;
mod geometry;
mod materials;
mod render;
mod scene;
mod scroll;

pub use animation::{advance, FrameLoop, LoopState};
pub use context::{Skyscroll, TextureReport, TextureTarget};
pub use error::{InitError, TextureError};
pub use geometry::{
    AmbientLight, CatmullRomCurve, ColorRGB, Euler, Light, LightType, OmniLight, PerspectiveCam,
    Ray, ARC_LENGTH_DIVISIONS,
};
pub use materials::{
    BasicMaterial, MapSlot, PointsMaterial, StandardMaterial, Texture, TextureFormat, TextureGray,
    TextureInfo, TextureLoader, TextureRGBA, TextureRequest, TextureState,
};
pub use render::{Renderer, RendererOptions, SoftwareRenderer};
pub use scene::{Planet, Ring, Scene, Starfield};
pub use scroll::{scroll_fraction, CameraPath, CameraPose};
