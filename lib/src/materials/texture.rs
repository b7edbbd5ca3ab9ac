use image::{DynamicImage, GrayImage, RgbaImage};

/// Information about the texture.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TextureInfo {
    /// Name of the texture.
    /// Usually the file name it was requested with, but don't rely on it being a valid path.
    pub name: String,
    /// Width of the texture, in pixels.
    pub width: u32,
    /// Height of the texture, in pixels.
    pub height: u32,
    /// Format of the texture.
    pub format: TextureFormat,
}

/// A RGBA texture stored in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureRGBA {
    pub info: TextureInfo,
    pub data: RgbaImage,
}

/// A Grayscale (single channel) texture stored in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureGray {
    pub info: TextureInfo,
    pub data: GrayImage,
}

/// Enum listing the type of textures available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    /// A grayscale texture.
    /// 8 bit per channel, single channel.
    Gray,
    /// A color texture with alpha channel.
    /// 8 bit per channel, 4 channels.
    /// The channels are ordered as Red, Green, Blue, Alpha.
    Rgba,
}

/// A texture stored in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Texture {
    Rgba(TextureRGBA),
    Gray(TextureGray),
}

impl Texture {
    /// Creates a new grayscale texture from the given name and image.
    pub fn new_gray(name: String, data: GrayImage) -> Self {
        let info = TextureInfo {
            name,
            width: data.width(),
            height: data.height(),
            format: TextureFormat::Gray,
        };
        Texture::Gray(TextureGray { info, data })
    }

    /// Creates a new color texture from the given name and image.
    pub fn new_rgba(name: String, data: RgbaImage) -> Self {
        let info = TextureInfo {
            name,
            width: data.width(),
            height: data.height(),
            format: TextureFormat::Rgba,
        };
        Texture::Rgba(TextureRGBA { info, data })
    }

    /// Wraps a decoded image, keeping single channel images as grayscale.
    pub fn from_image(name: String, image: DynamicImage) -> Self {
        match image {
            DynamicImage::ImageLuma8(gray) => Texture::new_gray(name, gray),
            other => Texture::new_rgba(name, other.to_rgba8()),
        }
    }

    /// Returns the information about the texture.
    pub fn info(&self) -> &TextureInfo {
        match self {
            Texture::Rgba(t) => &t.info,
            Texture::Gray(t) => &t.info,
        }
    }

    /// Returns the name of the texture.
    pub fn name(&self) -> &str {
        &self.info().name
    }

    /// Returns (width, height) of the texture in pixel.
    pub fn dimensions(&self) -> (u32, u32) {
        let info = self.info();
        (info.width, info.height)
    }

    /// Returns the format of the texture.
    pub const fn format(&self) -> TextureFormat {
        match self {
            Texture::Rgba(_) => TextureFormat::Rgba,
            Texture::Gray(_) => TextureFormat::Gray,
        }
    }

    /// Returns the number of bytes per pixel in the texture.
    pub const fn bytes_per_pixel(&self) -> usize {
        match self {
            Texture::Gray(_) => 1,
            Texture::Rgba(_) => 4,
        }
    }

    /// Samples the texture with nearest filtering.
    ///
    /// `u` wraps around, `v` is clamped. `v = 0.0` is the top row of the image.
    /// The returned channels are in `[0.0, 1.0]`, ordered as RGBA. Grayscale textures replicate
    /// the single channel and are fully opaque. Empty textures sample as opaque white.
    pub fn sample(&self, u: f32, v: f32) -> [f32; 4] {
        const INV_255: f32 = 1.0 / 255.0;
        let (w, h) = self.dimensions();
        if w == 0 || h == 0 {
            return [1.0; 4];
        }
        let u = u - u.floor();
        let v = v.clamp(0.0, 1.0);
        let x = ((u * w as f32) as u32).min(w - 1);
        let y = ((v * h as f32) as u32).min(h - 1);
        match self {
            Texture::Rgba(t) => {
                let px = t.data.get_pixel(x, y).0;
                [
                    px[0] as f32 * INV_255,
                    px[1] as f32 * INV_255,
                    px[2] as f32 * INV_255,
                    px[3] as f32 * INV_255,
                ]
            }
            Texture::Gray(t) => {
                let l = t.data.get_pixel(x, y).0[0] as f32 * INV_255;
                [l, l, l, 1.0]
            }
        }
    }
}

impl Default for Texture {
    /// A single opaque white pixel.
    fn default() -> Self {
        let data = RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 255]));
        Texture::new_rgba("default".to_string(), data)
    }
}
