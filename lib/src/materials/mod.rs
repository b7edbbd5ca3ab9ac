mod loader;
pub use self::loader::{TextureLoader, TextureRequest, TextureState};
mod material;
pub use self::material::{BasicMaterial, MapSlot, PointsMaterial, StandardMaterial};
mod texture;
pub use self::texture::{Texture, TextureFormat, TextureGray, TextureInfo, TextureRGBA};
