use crate::ColorRGB;
use cgmath::{InnerSpace, MetricSpace, Point3, Vector3 as Vec3};

#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    Ambient(AmbientLight),
    Omni(OmniLight),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[allow(non_camel_case_types)]
pub enum LightType {
    AMBIENT,
    OMNI,
}

impl LightType {
    pub fn name(&self) -> &'static str {
        match self {
            LightType::AMBIENT => "Ambient",
            LightType::OMNI => "Omni",
        }
    }
}

impl Light {
    pub fn new_ambient(name: String, color: ColorRGB, intensity: f32) -> Self {
        Light::Ambient(AmbientLight {
            name,
            color,
            intensity,
        })
    }

    /// Creates a point light.
    ///
    /// A `range` of `0.0` means the light never fades out.
    pub fn new_omni(
        name: String,
        color: ColorRGB,
        position: Point3<f32>,
        intensity: f32,
        range: f32,
    ) -> Self {
        Light::Omni(OmniLight {
            name,
            color,
            position,
            intensity,
            range,
        })
    }

    pub fn ltype(&self) -> LightType {
        match self {
            Light::Ambient(_) => LightType::AMBIENT,
            Light::Omni(_) => LightType::OMNI,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Light::Ambient(l) => &l.name,
            Light::Omni(l) => &l.name,
        }
    }

    pub fn position(&self) -> Point3<f32> {
        match self {
            Light::Omni(l) => l.position,
            _ => Point3::<f32>::new(0.0, 0.0, 0.0),
        }
    }

    /// Diffuse radiance reaching a surface at `point` with the given unit `normal`.
    pub fn irradiance(&self, point: Point3<f32>, normal: Vec3<f32>) -> ColorRGB {
        match self {
            Light::Ambient(l) => l.color * l.intensity,
            Light::Omni(l) => {
                let to_light = l.position - point;
                let distance = point.distance(l.position);
                if distance <= f32::EPSILON {
                    return l.color * l.intensity;
                }
                let cos = normal.dot(to_light / distance).max(0.0);
                l.color * (l.intensity * cos * l.falloff(distance))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AmbientLight {
    pub name: String,
    pub color: ColorRGB,
    pub intensity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OmniLight {
    pub name: String,
    pub color: ColorRGB,
    pub position: Point3<f32>,
    pub intensity: f32,
    /// Distance at which the light contribution reaches zero.
    pub range: f32,
}

impl OmniLight {
    /// Smooth range attenuation, `(1 - d/range)²` clamped to `[0, 1]`.
    pub fn falloff(&self, distance: f32) -> f32 {
        if self.range <= 0.0 {
            1.0
        } else {
            let f = (1.0 - distance / self.range).clamp(0.0, 1.0);
            f * f
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{ColorRGB, Light, LightType};
    use cgmath::{Point3, Vector3 as Vec3};
    use float_cmp::assert_approx_eq;

    #[test]
    fn ambient_ignores_geometry() {
        let light = Light::new_ambient("ambient".to_string(), ColorRGB::from_hex(0x404040), 1.0);
        assert_eq!(light.ltype(), LightType::AMBIENT);
        let a = light.irradiance(Point3::new(0.0, 0.0, 0.0), Vec3::unit_y());
        let b = light.irradiance(Point3::new(100.0, 5.0, -3.0), -Vec3::unit_y());
        assert_eq!(a, b);
    }

    #[test]
    fn omni_lambert() {
        let light = Light::new_omni(
            "sun".to_string(),
            ColorRGB::white(),
            Point3::new(0.0, 10.0, 0.0),
            2.0,
            0.0,
        );
        let facing = light.irradiance(Point3::new(0.0, 0.0, 0.0), Vec3::unit_y());
        assert_approx_eq!(f32, facing.r, 2.0, epsilon = 1e-6);
        let away = light.irradiance(Point3::new(0.0, 0.0, 0.0), -Vec3::unit_y());
        assert_eq!(away.r, 0.0);
    }

    #[test]
    fn omni_range() {
        let light = Light::new_omni(
            "glow".to_string(),
            ColorRGB::white(),
            Point3::new(0.0, 0.0, 0.0),
            1.0,
            1000.0,
        );
        let half = light.irradiance(Point3::new(500.0, 0.0, 0.0), -Vec3::unit_x());
        assert_approx_eq!(f32, half.g, 0.25, epsilon = 1e-6);
        let outside = light.irradiance(Point3::new(1500.0, 0.0, 0.0), -Vec3::unit_x());
        assert_eq!(outside.g, 0.0);
    }
}
