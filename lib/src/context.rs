use crate::animation::FrameLoop;
use crate::config::SceneConfig;
use crate::render::Renderer;
use crate::scroll::{scroll_fraction, CameraPath, CameraPose};
use crate::{InitError, MapSlot, PerspectiveCam, Scene, TextureLoader, TextureRequest};
use crate::{TextureError, TextureState};

/// Material slot a pending texture request will be assigned to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextureTarget {
    /// Surface map of the planet with the given index.
    Planet(usize),
    /// Map of the ring of the planet with the given index.
    Ring(usize),
}

/// Summary of the texture loading progress.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct TextureReport {
    pub pending: usize,
    pub loaded: usize,
    pub failed: usize,
}

/// The application: owns the scene, the camera, the camera path and the renderer, and reacts to
/// scroll, resize, visibility and frame events.
pub struct Skyscroll<R: Renderer> {
    scene: Scene,
    camera: PerspectiveCam,
    path: CameraPath,
    renderer: R,
    frames: FrameLoop,
    viewport: (u32, u32),
    scroll_t: f32,
    requests: Vec<(TextureTarget, TextureRequest)>,
    report: TextureReport,
}

impl<R: Renderer> Skyscroll<R> {
    /// Builds the scene, requests every texture and starts the frame loop.
    ///
    /// `viewport` is the visible area in logical pixels. The renderer is resized to match it.
    pub fn new(
        config: &SceneConfig,
        mut renderer: R,
        viewport: (u32, u32),
        loader: &TextureLoader,
    ) -> Result<Self, InitError> {
        let (width, height) = viewport;
        if width == 0 || height == 0 {
            return Err(InitError::Viewport { width, height });
        }
        let scene = Scene::build(config);
        let path = CameraPath::new(scene.waypoints(config.path_start), config.look_ahead)?;
        let mut camera = PerspectiveCam::new(
            config.camera.fovy,
            width as f32 / height as f32,
            config.camera.near,
            config.camera.far,
        );
        path.pose(0.0).apply(&mut camera);
        renderer.set_size(width, height);
        let mut requests = Vec::new();
        for (i, planet) in scene.planets.iter().enumerate() {
            if let MapSlot::Placeholder(name) = &planet.material.map {
                requests.push((TextureTarget::Planet(i), loader.request(name)));
            }
            if let Some(ring) = &planet.ring {
                if let MapSlot::Placeholder(name) = &ring.material.map {
                    requests.push((TextureTarget::Ring(i), loader.request(name)));
                }
            }
        }
        let report = TextureReport {
            pending: requests.len(),
            ..Default::default()
        };
        log::info!(
            "Initialized {}x{} view, {} textures requested from {}",
            width,
            height,
            requests.len(),
            loader.root().display()
        );
        let mut frames = FrameLoop::new();
        frames.start();
        Ok(Skyscroll {
            scene,
            camera,
            path,
            renderer,
            frames,
            viewport,
            scroll_t: 0.0,
            requests,
            report,
        })
    }

    /// Moves the camera along the path according to the page scroll.
    ///
    /// `offset` is the vertical scroll offset and `scroll_height` the full height of the page.
    /// Returns the camera pose that was applied.
    pub fn on_scroll(&mut self, offset: f32, scroll_height: f32) -> CameraPose {
        let t = scroll_fraction(offset, scroll_height, self.viewport.1 as f32);
        let pose = self.path.pose(t);
        pose.apply(&mut self.camera);
        self.scroll_t = t;
        log::debug!("Scroll offset {} of {} -> t = {:.4}", offset, scroll_height, t);
        pose
    }

    /// Adapts camera projection and render size to a new viewport.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("Ignoring resize to {}x{}", width, height);
            return;
        }
        self.viewport = (width, height);
        self.renderer.set_size(width, height);
        self.camera.set_aspect(width, height);
        self.camera.update_projection_matrix();
        log::debug!("Resized to {}x{}", width, height);
    }

    /// Starts or stops the frame loop.
    pub fn on_visibility_change(&mut self, visible: bool) {
        self.frames.set_visible(visible);
    }

    /// Runs one iteration of the frame loop: applies loaded textures, advances the animation and
    /// renders.
    ///
    /// Returns false, without rendering, if the loop is stopped.
    pub fn frame(&mut self) -> bool {
        if !self.frames.is_running() {
            return false;
        }
        self.poll_textures();
        self.frames.tick(&mut self.scene);
        self.renderer.render(&self.scene, &self.camera);
        true
    }

    /// Runs `n` iterations of the frame loop and returns how many actually ran.
    pub fn step(&mut self, n: u64) -> u64 {
        (0..n).filter(|_| self.frame()).count() as u64
    }

    /// Advances the animation by `n` frames without rendering them.
    ///
    /// Returns how many frames actually advanced: none if the loop is stopped.
    pub fn advance(&mut self, n: u64) -> u64 {
        self.poll_textures();
        (0..n).filter(|_| self.frames.tick(&mut self.scene)).count() as u64
    }

    /// Assigns every texture finished loading to its material, without blocking.
    pub fn poll_textures(&mut self) -> TextureReport {
        let mut still_pending = Vec::with_capacity(self.requests.len());
        for (target, request) in self.requests.drain(..) {
            match request.poll() {
                TextureState::Pending => still_pending.push((target, request)),
                TextureState::Ready(texture) => {
                    resolve(&mut self.scene, &mut self.report, target, Ok(texture))
                }
                TextureState::Failed(e) => {
                    resolve(&mut self.scene, &mut self.report, target, Err(e))
                }
            }
        }
        self.requests = still_pending;
        self.report
    }

    /// Blocks until every requested texture is either loaded or failed.
    pub fn wait_for_textures(&mut self) -> TextureReport {
        for (target, request) in std::mem::take(&mut self.requests) {
            let result = request.wait();
            resolve(&mut self.scene, &mut self.report, target, result);
        }
        self.report
    }

    pub fn texture_report(&self) -> TextureReport {
        self.report
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &PerspectiveCam {
        &self.camera
    }

    pub fn path(&self) -> &CameraPath {
        &self.path
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frames
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Progress along the camera path set by the last scroll event.
    pub fn scroll_t(&self) -> f32 {
        self.scroll_t
    }

    /// Releases the renderer.
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

fn resolve(
    scene: &mut Scene,
    report: &mut TextureReport,
    target: TextureTarget,
    result: Result<crate::Texture, TextureError>,
) {
    report.pending = report.pending.saturating_sub(1);
    match &result {
        Ok(texture) => {
            report.loaded += 1;
            log::debug!("Loaded texture {}", texture.name());
        }
        Err(e) => {
            report.failed += 1;
            log::warn!("{e}. Rendering without it");
        }
    }
    let slot = match target {
        TextureTarget::Planet(i) => scene.planets.get_mut(i).map(|p| &mut p.material.map),
        TextureTarget::Ring(i) => scene
            .planets
            .get_mut(i)
            .and_then(|p| p.ring.as_mut())
            .map(|r| &mut r.material.map),
    };
    if let Some(slot) = slot {
        slot.resolve(result);
    }
}

#[cfg(test)]
mod tests {
    use super::{Skyscroll, TextureReport};
    use crate::config::SceneConfig;
    use crate::render::Renderer;
    use crate::{InitError, PerspectiveCam, Scene, TextureLoader};
    use float_cmp::assert_approx_eq;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    /// Renderer recording what it was asked to do.
    #[derive(Default)]
    struct Recorder {
        size: (u32, u32),
        renders: u64,
        last_camera: Option<PerspectiveCam>,
    }

    impl Renderer for Recorder {
        fn set_size(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }

        fn size(&self) -> (u32, u32) {
            self.size
        }

        fn pixel_ratio(&self) -> f32 {
            1.0
        }

        fn render(&mut self, _: &Scene, camera: &PerspectiveCam) {
            self.renders += 1;
            self.last_camera = Some(camera.clone());
        }
    }

    fn config() -> SceneConfig {
        SceneConfig {
            star_count: 100,
            seed: Some(11),
            ..Default::default()
        }
    }

    fn empty_assets() -> (TempDir, TextureLoader) {
        let dir = tempfile::tempdir().unwrap();
        let loader = TextureLoader::new(dir.path());
        (dir, loader)
    }

    fn app(viewport: (u32, u32)) -> (TempDir, Skyscroll<Recorder>) {
        let (dir, loader) = empty_assets();
        let app = Skyscroll::new(&config(), Recorder::default(), viewport, &loader).unwrap();
        (dir, app)
    }

    #[test]
    fn rejects_empty_viewport() {
        let (_dir, loader) = empty_assets();
        let res = Skyscroll::new(&config(), Recorder::default(), (0, 720), &loader);
        assert!(matches!(
            res,
            Err(InitError::Viewport {
                width: 0,
                height: 720
            })
        ));
    }

    #[test]
    fn rejects_path_without_planets() {
        let (_dir, loader) = empty_assets();
        let config = SceneConfig {
            planets: Vec::new(),
            ..config()
        };
        let res = Skyscroll::new(&config, Recorder::default(), (1280, 720), &loader);
        assert!(matches!(res, Err(InitError::Path(1))));
    }

    #[test]
    fn starts_at_path_start() {
        let (_dir, app) = app((1280, 720));
        assert_eq!(app.camera().position, app.path().curve().point_at(0.0));
        assert_eq!(app.renderer().size(), (1280, 720));
        assert!(app.frame_loop().is_running());
    }

    #[test]
    fn scroll_places_camera_on_curve() {
        let (_dir, mut app) = app((1280, 720));
        let scroll_height = 720.0 + 4000.0;
        for i in 0..=20 {
            let offset = 200.0 * i as f32;
            let pose = app.on_scroll(offset, scroll_height);
            let t = offset / 4000.0;
            assert_eq!(pose.t, t);
            assert_eq!(app.camera().position, app.path().curve().point_at(t));
            assert_eq!(app.scroll_t(), t);
        }
    }

    #[test]
    fn scroll_past_end_clamps() {
        let (_dir, mut app) = app((1280, 720));
        let end = app.path().curve().point_at(1.0);
        for offset in [4000.0, 4500.0, 1e9] {
            let pose = app.on_scroll(offset, 4720.0);
            assert_eq!(pose.t, 1.0);
            assert_eq!(app.camera().position, end);
            assert_eq!(pose.target, end);
            assert!(app.camera().forward.z.is_finite());
        }
    }

    #[test]
    fn scroll_without_scrollable_page() {
        let (_dir, mut app) = app((1280, 720));
        let pose = app.on_scroll(50.0, 720.0);
        assert_eq!(pose.t, 0.0);
        let p = app.camera().position;
        assert!(!p.x.is_nan() && !p.y.is_nan() && !p.z.is_nan());
        assert_eq!(p, app.path().curve().point_at(0.0));
    }

    #[test]
    fn resize_updates_camera_and_surface() {
        let (_dir, mut app) = app((1280, 720));
        app.on_resize(800, 1000);
        assert_eq!(app.renderer().size(), (800, 1000));
        assert_eq!(app.viewport(), (800, 1000));
        assert_eq!(app.camera().aspect, 800.0 / 1000.0);
        let proj = app.camera().projection_matrix();
        assert_approx_eq!(f32, proj.x.x * 0.8, proj.y.y, epsilon = 1e-5);
        app.on_resize(0, 10);
        assert_eq!(app.viewport(), (800, 1000));
    }

    #[test]
    fn resize_changes_scroll_range() {
        let (_dir, mut app) = app((1280, 720));
        app.on_resize(1280, 1000);
        // 3000 scrollable pixels left
        assert_eq!(app.on_scroll(1500.0, 4000.0).t, 0.5);
    }

    #[test]
    fn frames_advance_and_render() {
        let (_dir, mut app) = app((1280, 720));
        assert_eq!(app.step(10), 10);
        assert_eq!(app.renderer().renders, 10);
        assert_eq!(app.frame_loop().frames(), 10);
        assert_approx_eq!(f32, app.scene().starfield.rotation.y, 0.005, epsilon = 1e-6);
        app.on_visibility_change(false);
        assert_eq!(app.step(5), 0);
        assert_eq!(app.renderer().renders, 10);
        app.on_visibility_change(true);
        assert!(app.frame());
        assert_eq!(app.renderer().renders, 11);
    }

    #[test]
    fn advance_skips_rendering() {
        let (_dir, mut app) = app((1280, 720));
        assert_eq!(app.advance(9), 9);
        assert_eq!(app.renderer().renders, 0);
        assert!(app.frame());
        assert_eq!(app.renderer().renders, 1);
        assert_eq!(app.frame_loop().frames(), 10);
        assert_approx_eq!(f32, app.scene().starfield.rotation.y, 0.005, epsilon = 1e-6);
        app.on_visibility_change(false);
        assert_eq!(app.advance(3), 0);
        assert_eq!(app.frame_loop().frames(), 10);
    }

    #[test]
    fn render_uses_current_camera() {
        let (_dir, mut app) = app((1280, 720));
        app.on_scroll(1000.0, 4720.0);
        app.frame();
        let seen = app.renderer().last_camera.as_ref().unwrap();
        assert_eq!(seen.position, app.camera().position);
    }

    #[test]
    fn missing_textures_degrade() {
        let (_dir, mut app) = app((1280, 720));
        assert_eq!(app.texture_report().pending, 6);
        let report = app.wait_for_textures();
        assert_eq!(
            report,
            TextureReport {
                pending: 0,
                loaded: 0,
                failed: 6
            }
        );
        assert!(app.scene().planets.iter().all(|p| p.material.map.is_failed()));
        assert_eq!(app.scene().pending_maps(), 0);
        // still renders
        assert!(app.frame());
    }

    #[test]
    fn available_textures_are_applied() {
        let (dir, loader) = empty_assets();
        let img = RgbaImage::from_pixel(4, 2, Rgba([200, 100, 50, 255]));
        img.save(dir.path().join("8k_mars.png")).unwrap();
        std::fs::rename(dir.path().join("8k_mars.png"), dir.path().join("8k_mars.jpg")).unwrap();
        let mut app = Skyscroll::new(&config(), Recorder::default(), (640, 480), &loader).unwrap();
        let report = app.wait_for_textures();
        assert_eq!(report.loaded, 1);
        assert_eq!(report.failed, 5);
        let mars = &app.scene().planets[3];
        assert_eq!(mars.name, "mars");
        assert!(mars.material.map.texture().is_some());
    }

    #[test]
    fn poll_eventually_resolves() {
        let (_dir, mut app) = app((1280, 720));
        let mut report = app.poll_textures();
        while report.pending > 0 {
            std::thread::yield_now();
            report = app.poll_textures();
        }
        assert_eq!(report.failed, 6);
    }
}
