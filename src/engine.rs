use std::path::Path;
use std::time::Duration;

use log::{debug, info, warn};

use crate::config::{delay_from_secs, Config, Viewport};
use crate::error::{Result, SlideshowError};
use crate::image_source::load_image;
use crate::renderer::Renderer;
use crate::scheduler::{Scheduler, Step};
use crate::state::{PlaybackState, PlaybackStatus};

/// Outcome of a successful `load`.
#[derive(Debug)]
pub struct LoadReport {
    pub loaded: usize,
    /// One `DecodeFailure` per skipped path.
    pub warnings: Vec<SlideshowError>,
}

impl LoadReport {
    pub fn failed(&self) -> usize {
        self.warnings.len()
    }
}

/// Outcome of `resume`.
#[derive(Debug)]
pub struct ResumeReport {
    /// Index shown by the resume, `None` when there was nothing left to show.
    pub resumed_at: Option<usize>,
    pub warning: Option<SlideshowError>,
}

/// Drives a batch of images through a renderer, one deferred step per delay.
///
/// The engine never blocks: the host calls [`PlaybackEngine::tick`] from its
/// own loop with the time elapsed since the previous call, and at most one
/// image change happens per tick.
pub struct PlaybackEngine<R: Renderer> {
    state: PlaybackState,
    renderer: R,
    scheduler: Scheduler,
    status: PlaybackStatus,
    viewport: Viewport,
    default_viewport: Viewport,
}

impl<R: Renderer> PlaybackEngine<R> {
    pub fn new(config: &Config, renderer: R) -> Self {
        Self {
            state: PlaybackState::new(config.delay),
            renderer,
            scheduler: Scheduler::new(),
            status: PlaybackStatus::Idle,
            viewport: config.viewport,
            default_viewport: config.viewport,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Decodes `paths` and starts playing them from `start_index`.
    ///
    /// Paths that fail to decode are skipped and reported in the returned
    /// [`LoadReport`]. If none decodes, or `start_index` is out of range, the
    /// call fails and the current batch keeps playing untouched.
    pub fn load<P: AsRef<Path>>(&mut self, paths: &[P], start_index: usize) -> Result<LoadReport> {
        let previous = self.status;
        self.status = PlaybackStatus::Loading;

        let mut images = Vec::with_capacity(paths.len());
        let mut warnings = Vec::new();
        for path in paths {
            match load_image(path.as_ref(), &self.viewport) {
                Ok(image) => images.push(image),
                Err(e) => {
                    warn!("skipping image: {}", e);
                    warnings.push(e);
                }
            }
        }

        if images.is_empty() {
            self.status = previous;
            let error = SlideshowError::EmptyBatch { attempted: paths.len() };
            warn!("{}", error);
            return Err(error);
        }
        if start_index >= images.len() {
            self.status = previous;
            return Err(SlideshowError::InvalidConfiguration(format!(
                "start index {} is out of range for a batch of {}",
                start_index,
                images.len()
            )));
        }

        // Whatever the previous batch had pending must never fire.
        self.scheduler.cancel();
        let loaded = images.len();
        self.state.replace_batch(images, start_index);
        self.state.set_running(true);
        self.renderer.prepare(self.state.images(), &self.viewport);
        info!(
            "batch {} loaded: {} image(s), {} failure(s), {} renderer",
            self.state.batch(),
            loaded,
            warnings.len(),
            self.renderer.strategy()
        );

        self.play(start_index);
        Ok(LoadReport { loaded, warnings })
    }

    /// Feeds elapsed host time to the scheduler and runs the step that
    /// becomes due, if any.
    pub fn tick(&mut self, elapsed: Duration) -> PlaybackStatus {
        if let Some(step) = self.scheduler.advance(elapsed) {
            if step.batch != self.state.batch() {
                debug!("dropping step {} of superseded batch {}", step.index, step.batch);
            } else if !self.state.is_running() {
                debug!("paused, step {} not shown", step.index);
            } else {
                self.play(step.index);
            }
        }
        self.status
    }

    /// Stops advancing after the image currently on screen. Idempotent.
    pub fn pause(&mut self) {
        self.state.set_running(false);
        if self.status == PlaybackStatus::Playing {
            self.status = PlaybackStatus::Paused;
            debug!("paused at {:?}", self.state.position());
        }
    }

    /// Continues from where the renderer says playback stopped.
    ///
    /// Each renderer applies its own convention for the next index (see
    /// [`Renderer::resume_point`]). When the renderer cannot tell, playback
    /// restarts from the first image and a `RendererDesync` warning is returned.
    pub fn resume(&mut self) -> ResumeReport {
        let idle = ResumeReport { resumed_at: None, warning: None };
        if self.state.is_empty() {
            return idle;
        }
        if self.status == PlaybackStatus::Playing && self.state.is_running() {
            debug!("resume ignored, already playing");
            return idle;
        }

        self.state.set_running(true);
        let (next, warning) = match self.renderer.resume_point(&self.state) {
            Some(point) => {
                debug!("{} renderer resumes after {} at {}", self.renderer.strategy(), point.visible, point.next);
                (point.next, None)
            }
            None => {
                let desync = SlideshowError::RendererDesync;
                warn!("{}", desync);
                (0, Some(desync))
            }
        };

        self.play(next);
        ResumeReport { resumed_at: (next < self.state.len()).then_some(next), warning }
    }

    /// Goes back to the default viewport recorded at start-up.
    pub fn reset(&mut self) {
        self.viewport = self.default_viewport;
        self.renderer.reset_viewport(&self.viewport);
    }

    /// The host window was resized; later batches are fitted to the new size.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.renderer.resize(&viewport);
    }

    /// Changes the delay used for the next scheduled step. A negative or
    /// non-finite value is rejected and the previous delay kept.
    pub fn set_delay(&mut self, seconds: f64) -> Result<()> {
        match delay_from_secs(seconds) {
            Ok(delay) => {
                self.state.set_delay(delay);
                Ok(())
            }
            Err(e) => {
                warn!("{}", e);
                Err(e)
            }
        }
    }

    fn play(&mut self, start: usize) {
        if !self.state.is_running() {
            return;
        }
        if start >= self.state.len() {
            // Past the end: the last image stays on screen.
            self.scheduler.cancel();
            self.status = PlaybackStatus::Finished;
            return;
        }

        self.renderer.show(start, self.state.images());
        self.state.mark_shown(start);
        let caption = self.state.caption(start);
        self.renderer.caption(&caption);
        debug!("showing {}", caption);

        if start + 1 < self.state.len() {
            let step = Step { batch: self.state.batch(), index: start + 1 };
            self.scheduler.schedule(step, self.state.delay());
            self.status = PlaybackStatus::Playing;
        } else {
            self.scheduler.cancel();
            self.status = PlaybackStatus::Finished;
        }
    }
}
