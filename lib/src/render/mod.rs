mod software;
pub use self::software::{RendererOptions, SoftwareRenderer};

use crate::{PerspectiveCam, Scene};

/// A surface the scene can be drawn to.
pub trait Renderer {
    /// Resizes the output, in logical pixels.
    ///
    /// The backing storage is scaled by the [Renderer::pixel_ratio].
    fn set_size(&mut self, width: u32, height: u32);

    /// Returns the output size in logical pixels, as `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Ratio between physical and logical pixels.
    fn pixel_ratio(&self) -> f32;

    /// Draws the scene as seen by the given camera.
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCam);
}
