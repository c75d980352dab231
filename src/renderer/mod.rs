//! Renderer capability: makes one image of the batch visible at a time.
//!
//! Two strategies implement it. They disagree on how a resume position is
//! derived, so each reports a [`ResumePoint`] carrying its own convention and
//! the engine never has to know which one it talks to.

pub mod declarative;
pub mod surface;

pub use declarative::{DeclarativeRenderer, LogLine, LogSection, PlotArea, PlotFrame, SessionLog};
pub use surface::{SurfaceElement, SurfaceRenderer, Visibility};

use crate::config::{Strategy, Viewport};
use crate::image_source::Image;
use crate::state::PlaybackState;

/// Where playback stands from the renderer's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResumePoint {
    /// Index believed to be on screen.
    pub visible: usize,
    /// Index `resume` should show first.
    pub next: usize,
}

pub trait Renderer {
    fn strategy(&self) -> Strategy;

    /// Drops whatever the previous batch left behind and gets ready for `images`.
    fn prepare(&mut self, images: &[Image], viewport: &Viewport);

    /// Makes `index` the only visible image.
    fn show(&mut self, index: usize, images: &[Image]);

    /// Best-effort answer to "what is on screen", `None` when unknown.
    fn resume_point(&self, state: &PlaybackState) -> Option<ResumePoint>;

    fn caption(&mut self, text: &str);

    fn current_caption(&self) -> &str;

    /// The host window was resized by the user.
    fn resize(&mut self, viewport: &Viewport);

    /// The host asked to go back to the default window size.
    fn reset_viewport(&mut self, viewport: &Viewport);
}
