use crate::Scene;

/// Lifecycle of the [FrameLoop].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Schedules the per-frame animation of the scene.
///
/// The loop does not own a timer: the host calls [FrameLoop::tick] once per display refresh
/// (or as many times as needed in tests). A stopped loop ignores ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLoop {
    state: LoopState,
    frames: u64,
}

impl Default for FrameLoop {
    fn default() -> Self {
        FrameLoop::new()
    }
}

impl FrameLoop {
    /// Creates a stopped loop.
    pub fn new() -> Self {
        FrameLoop {
            state: LoopState::Stopped,
            frames: 0,
        }
    }

    pub fn start(&mut self) {
        if self.state != LoopState::Running {
            log::debug!("Frame loop started at frame {}", self.frames);
        }
        self.state = LoopState::Running;
    }

    pub fn stop(&mut self) {
        if self.state != LoopState::Stopped {
            log::debug!("Frame loop stopped at frame {}", self.frames);
        }
        self.state = LoopState::Stopped;
    }

    /// Starts the loop when the output becomes visible and stops it when hidden.
    pub fn set_visible(&mut self, visible: bool) {
        if visible {
            self.start()
        } else {
            self.stop()
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Number of frames advanced so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advances the scene by one frame if the loop is running.
    ///
    /// Returns true if the scene was advanced.
    pub fn tick(&mut self, scene: &mut Scene) -> bool {
        if !self.is_running() {
            return false;
        }
        advance(scene);
        self.frames += 1;
        log::trace!("Frame {}", self.frames);
        true
    }
}

/// Rotates every object of the scene by its per-frame amount.
pub fn advance(scene: &mut Scene) {
    let stars = &mut scene.starfield;
    stars.rotation.y += stars.spin;
    for planet in scene.planets.iter_mut() {
        planet.rotation.y += planet.spin;
        if let Some(ring) = planet.ring.as_mut() {
            ring.rotation.z += ring.spin;
        }
    }
}
