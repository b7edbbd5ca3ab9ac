mod camera;
pub use self::camera::PerspectiveCam;
mod color;
pub use self::color::ColorRGB;
mod curve;
pub use self::curve::{CatmullRomCurve, ARC_LENGTH_DIVISIONS};
mod light;
pub use self::light::{AmbientLight, Light, LightType, OmniLight};
mod ray;
pub use self::ray::Ray;
mod transform;
pub use self::transform::{invert_rigid, transform_point, transform_vector, Euler};
