use super::Renderer;
use crate::geometry::{invert_rigid, transform_point, transform_vector};
use crate::{ColorRGB, InitError, Light, PerspectiveCam, Planet, Ray, Ring, Scene};
use crate::{StandardMaterial, Starfield};
use cgmath::{Matrix, Matrix3, Matrix4, MetricSpace, Point3, Vector4};
use image::{Rgba, RgbaImage};
use rayon::prelude::*;

/// Parameters used to create a [SoftwareRenderer].
#[derive(Debug, Clone, PartialEq)]
pub struct RendererOptions {
    /// Width of the output, in logical pixels.
    pub width: u32,
    /// Height of the output, in logical pixels.
    pub height: u32,
    /// Ratio between physical and logical pixels.
    pub pixel_ratio: f32,
    /// Color used to clear the frame, RGBA.
    pub clear_color: [u8; 4],
}

impl Default for RendererOptions {
    fn default() -> Self {
        RendererOptions {
            width: 800,
            height: 600,
            pixel_ratio: 1.0,
            clear_color: [0, 0, 0, 0],
        }
    }
}

/// Renderer running entirely on the CPU.
///
/// Planets and rings are ray-cast, rows in parallel, while stars are projected as points.
/// Drawing order is opaque planets, stars, then transparent rings blended over the rest.
pub struct SoftwareRenderer {
    width: u32,
    height: u32,
    pixel_ratio: f32,
    clear_color: Rgba<u8>,
    frame: RgbaImage,
    /// Distance from the camera of the closest opaque surface for each pixel.
    depth: Vec<f32>,
    rendered: u64,
}

/// Planet data precomputed once per frame.
struct PlanetView<'a> {
    center: Point3<f32>,
    radius: f32,
    /// Rotation from world space to the planet frame.
    to_local: Matrix3<f32>,
    material: &'a StandardMaterial,
}

/// Ring data precomputed once per frame.
struct RingView<'a> {
    to_local: Matrix4<f32>,
    ring: &'a Ring,
}

impl SoftwareRenderer {
    /// Acquires the framebuffer.
    ///
    /// Fails if the surface would be empty or the pixel ratio is not a positive number.
    pub fn new(options: RendererOptions) -> Result<Self, InitError> {
        if options.width == 0 || options.height == 0 {
            return Err(InitError::Surface(format!(
                "surface size {}x{} is empty",
                options.width, options.height
            )));
        }
        if !options.pixel_ratio.is_finite() || options.pixel_ratio <= 0.0 {
            return Err(InitError::Surface(format!(
                "unsupported pixel ratio {}",
                options.pixel_ratio
            )));
        }
        let (pw, ph) = physical_size(options.width, options.height, options.pixel_ratio);
        log::debug!(
            "Software renderer {}x{} ({}x{} physical)",
            options.width,
            options.height,
            pw,
            ph
        );
        Ok(SoftwareRenderer {
            width: options.width,
            height: options.height,
            pixel_ratio: options.pixel_ratio,
            clear_color: Rgba(options.clear_color),
            frame: RgbaImage::from_pixel(pw, ph, Rgba(options.clear_color)),
            depth: vec![f32::INFINITY; pixel_count(pw, ph)],
            rendered: 0,
        })
    }

    /// Returns the last rendered frame.
    pub fn frame(&self) -> &RgbaImage {
        &self.frame
    }

    pub fn into_frame(self) -> RgbaImage {
        self.frame
    }

    /// Returns the framebuffer size in physical pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        self.frame.dimensions()
    }

    /// Number of frames rendered since creation.
    pub fn frames_rendered(&self) -> u64 {
        self.rendered
    }

    fn clear(&mut self) {
        let clear = self.clear_color;
        self.frame
            .par_chunks_mut(4)
            .for_each(|px| px.copy_from_slice(&clear.0));
        self.depth.par_iter_mut().for_each(|d| *d = f32::INFINITY);
    }

    fn draw_planets(&mut self, planets: &[PlanetView], lights: &[Light], camera: &PerspectiveCam) {
        let (fw, fh) = self.frame.dimensions();
        let (inv_w, inv_h) = (1.0 / fw as f32, 1.0 / fh as f32);
        let width = fw as usize;
        self.frame
            .par_chunks_mut(width * 4)
            .zip(self.depth.par_chunks_mut(width))
            .enumerate()
            .for_each(|(py, (row, depth_row))| {
                let ndc_y = 1.0 - 2.0 * (py as f32 + 0.5) * inv_h;
                for px in 0..width {
                    let ndc_x = 2.0 * (px as f32 + 0.5) * inv_w - 1.0;
                    let ray = camera.ray(ndc_x, ndc_y);
                    if let Some((distance, color)) = trace_planets(&ray, planets, lights, camera.far)
                    {
                        let [r, g, b] = color.to_bytes();
                        row[px * 4..px * 4 + 4].copy_from_slice(&[r, g, b, 255]);
                        depth_row[px] = distance;
                    }
                }
            });
    }

    fn draw_stars(&mut self, stars: &Starfield, camera: &PerspectiveCam) {
        let (fw, fh) = self.frame.dimensions();
        let model = stars.world_matrix();
        let mvp = camera.projection_matrix() * camera.view_matrix() * model;
        let [r, g, b] = stars.material.color.to_bytes();
        let size = ((stars.material.size as f32 * self.pixel_ratio).round() as i64).max(1);
        let half = size / 2;
        for star in stars.positions() {
            let clip = mvp * Vector4::new(star.x, star.y, star.z, 1.0);
            if clip.w <= camera.near {
                continue;
            }
            let (x, y, z) = (clip.x / clip.w, clip.y / clip.w, clip.z / clip.w);
            if !(-1.0..=1.0).contains(&x) || !(-1.0..=1.0).contains(&y) || z > 1.0 {
                continue;
            }
            let distance = transform_point(&model, *star).distance(camera.position);
            let sx = ((x + 1.0) * 0.5 * fw as f32) as i64;
            let sy = ((1.0 - y) * 0.5 * fh as f32) as i64;
            for dy in 0..size {
                for dx in 0..size {
                    let tx = sx + dx - half;
                    let ty = sy + dy - half;
                    if tx < 0 || ty < 0 || tx >= fw as i64 || ty >= fh as i64 {
                        continue;
                    }
                    let index = ty as usize * fw as usize + tx as usize;
                    if distance < self.depth[index] {
                        self.depth[index] = distance;
                        self.frame.put_pixel(tx as u32, ty as u32, Rgba([r, g, b, 255]));
                    }
                }
            }
        }
    }

    fn draw_rings(&mut self, rings: &[RingView], camera: &PerspectiveCam) {
        if rings.is_empty() {
            return;
        }
        let (fw, fh) = self.frame.dimensions();
        let (inv_w, inv_h) = (1.0 / fw as f32, 1.0 / fh as f32);
        let width = fw as usize;
        self.frame
            .par_chunks_mut(width * 4)
            .zip(self.depth.par_chunks(width))
            .enumerate()
            .for_each(|(py, (row, depth_row))| {
                let ndc_y = 1.0 - 2.0 * (py as f32 + 0.5) * inv_h;
                let mut hits = Vec::with_capacity(rings.len());
                for px in 0..width {
                    let ndc_x = 2.0 * (px as f32 + 0.5) * inv_w - 1.0;
                    let ray = camera.ray(ndc_x, ndc_y);
                    hits.clear();
                    for view in rings {
                        let local = Ray::new(
                            transform_point(&view.to_local, ray.origin),
                            transform_vector(&view.to_local, ray.direction),
                        );
                        if !view.ring.material.double_sided && local.direction.z > 0.0 {
                            continue;
                        }
                        if let Some((distance, hit)) = local.intersect_xy_plane() {
                            if distance < depth_row[px]
                                && distance <= camera.far
                                && view.ring.contains(hit)
                            {
                                let (u, v) = view.ring.uv(hit);
                                hits.push((distance, view.ring.material.shade(u, v)));
                            }
                        }
                    }
                    // back to front
                    hits.sort_by(|a, b| b.0.total_cmp(&a.0));
                    for (_, (color, alpha)) in hits.iter() {
                        blend_over(&mut row[px * 4..px * 4 + 4], *color, *alpha);
                    }
                }
            });
    }
}

impl Renderer for SoftwareRenderer {
    fn set_size(&mut self, width: u32, height: u32) {
        let (pw, ph) = physical_size(width, height, self.pixel_ratio);
        self.width = width;
        self.height = height;
        if self.frame.dimensions() != (pw, ph) {
            self.frame = RgbaImage::from_pixel(pw, ph, self.clear_color);
            self.depth = vec![f32::INFINITY; pixel_count(pw, ph)];
        }
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCam) {
        let planets = scene
            .planets
            .iter()
            .map(|p| PlanetView {
                center: p.position,
                radius: p.radius,
                to_local: p.rotation.to_matrix3().transpose(),
                material: &p.material,
            })
            .collect::<Vec<_>>();
        let rings = scene
            .planets
            .iter()
            .filter_map(|p| {
                p.ring.as_ref().map(|ring| RingView {
                    to_local: invert_rigid(&ring.world_matrix(&p.world_matrix())),
                    ring,
                })
            })
            .collect::<Vec<_>>();
        self.clear();
        self.draw_planets(&planets, &scene.lights, camera);
        self.draw_stars(&scene.starfield, camera);
        self.draw_rings(&rings, camera);
        self.rendered += 1;
    }
}

/// Size of the framebuffer backing a surface of the given logical size.
fn physical_size(width: u32, height: u32, pixel_ratio: f32) -> (u32, u32) {
    let pw = (width as f32 * pixel_ratio).round() as u32;
    let ph = (height as f32 * pixel_ratio).round() as u32;
    (pw.max(1), ph.max(1))
}

/// Number of pixels in a `pw`×`ph` framebuffer, computed without `u32` overflow.
fn pixel_count(pw: u32, ph: u32) -> usize {
    pw as usize * ph as usize
}

/// Finds the closest planet along the ray and shades it.
fn trace_planets(
    ray: &Ray,
    planets: &[PlanetView],
    lights: &[Light],
    far: f32,
) -> Option<(f32, ColorRGB)> {
    let mut nearest: Option<(f32, &PlanetView)> = None;
    for planet in planets {
        if let Some(distance) = ray.intersect_sphere(planet.center, planet.radius) {
            if distance <= far && nearest.map_or(true, |(closest, _)| distance < closest) {
                nearest = Some((distance, planet));
            }
        }
    }
    let (distance, planet) = nearest?;
    let point = ray.point_along(distance);
    let normal = (point - planet.center) / planet.radius;
    let (u, v) = Planet::surface_uv(planet.to_local * normal);
    let albedo = planet.material.albedo(u, v);
    let mut irradiance = ColorRGB::black();
    for light in lights {
        irradiance += light.irradiance(point, normal);
    }
    Some((distance, albedo * irradiance))
}

/// Composites a color with straight alpha over the pixel.
fn blend_over(dst: &mut [u8], color: ColorRGB, alpha: f32) {
    const INV_255: f32 = 1.0 / 255.0;
    let alpha = alpha.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    let dst_alpha = dst[3] as f32 * INV_255;
    let out_alpha = alpha + dst_alpha * (1.0 - alpha);
    let src = color.to_bytes();
    for c in 0..3 {
        let value =
            (src[c] as f32 * alpha + dst[c] as f32 * dst_alpha * (1.0 - alpha)) / out_alpha;
        dst[c] = value.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_alpha * 255.0).round() as u8;
}
