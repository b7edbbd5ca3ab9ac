use std::ops::{AddAssign, Mul, MulAssign};

/// Representation of a visible color in the sRGB color space.
///
/// Each channel ranges from `0.0` to `1.0`. Values outside this range are allowed while
/// accumulating light contributions and are clamped only when converted to bytes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorRGB {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl ColorRGB {
    /// Creates a new color with the given `r`, `g` and `b` values.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        ColorRGB { r, g, b }
    }

    /// Creates a color from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        const INV_255: f32 = 1.0 / 255.0;
        ColorRGB {
            r: ((hex >> 16) & 0xFF) as f32 * INV_255,
            g: ((hex >> 8) & 0xFF) as f32 * INV_255,
            b: (hex & 0xFF) as f32 * INV_255,
        }
    }

    pub fn white() -> Self {
        ColorRGB::new(1.0, 1.0, 1.0)
    }

    pub fn black() -> Self {
        ColorRGB::new(0.0, 0.0, 0.0)
    }

    /// Converts the color to 8 bit per channel, clamping each channel to `[0.0, 1.0]`.
    pub fn to_bytes(self) -> [u8; 3] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }
}

impl From<[f32; 4]> for ColorRGB {
    fn from(rgba: [f32; 4]) -> Self {
        ColorRGB::new(rgba[0], rgba[1], rgba[2])
    }
}

impl AddAssign for ColorRGB {
    fn add_assign(&mut self, rhs: Self) {
        self.r += rhs.r;
        self.g += rhs.g;
        self.b += rhs.b;
    }
}

impl Mul for ColorRGB {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        ColorRGB::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

impl Mul<f32> for ColorRGB {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        ColorRGB::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

impl MulAssign<f32> for ColorRGB {
    fn mul_assign(&mut self, rhs: f32) {
        self.r *= rhs;
        self.g *= rhs;
        self.b *= rhs;
    }
}
