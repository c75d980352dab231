//! Image slideshow playback.
//!
//! A [`PlaybackEngine`] owns the loaded batch and advances through it one
//! deferred step per delay, driven by the host's frame loop. What "showing an
//! image" means is up to the [`Renderer`]: a surface keeping one element per
//! image, or a declarative plot area redrawn per step.

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod image_source;
pub mod renderer;
pub mod scheduler;
pub mod state;

pub use config::{Config, Strategy, Viewport};
pub use engine::{LoadReport, PlaybackEngine, ResumeReport};
pub use error::{Result, SlideshowError};
pub use image_source::{collect_image_paths, load_image, Image};
pub use renderer::{DeclarativeRenderer, Renderer, ResumePoint, SessionLog, SurfaceRenderer};
pub use state::{PlaybackState, PlaybackStatus};
