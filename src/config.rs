use std::fmt;
use std::time::Duration;

use clap::ValueEnum;

use crate::constants::*;
use crate::error::{Result, SlideshowError};

/// Size of the area images are drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub gutter: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, gutter: VIEWPORT_GUTTER }
    }

    /// Largest box a fitted image may occupy.
    pub fn inner_size(&self) -> (u32, u32) {
        (
            self.width.saturating_sub(2 * self.gutter).max(1),
            self.height.saturating_sub(2 * self.gutter).max(1),
        )
    }

    /// Top-left corner that centres a `width` x `height` box.
    pub fn centered_origin(&self, width: u32, height: u32) -> (i32, i32) {
        (
            (self.width as i32 - width as i32) / 2,
            (self.height as i32 - height as i32) / 2,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT)
    }
}

/// Which renderer drives the display. Chosen once, at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Strategy {
    /// One persistent element per image, toggled visible/hidden.
    #[default]
    Surface,
    /// A single plot area redrawn per image, plus a session log list.
    Declarative,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Surface => f.write_str("surface"),
            Strategy::Declarative => f.write_str("declarative"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub delay: Duration,
    pub strategy: Strategy,
    pub viewport: Viewport,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(DEFAULT_DELAY_SECS),
            strategy: Strategy::default(),
            viewport: Viewport::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(SlideshowError::InvalidConfiguration(format!(
                "viewport must not be empty, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        Ok(())
    }
}

/// Turns a user supplied number of seconds into a delay.
pub fn delay_from_secs(seconds: f64) -> Result<Duration> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(SlideshowError::InvalidConfiguration(format!(
            "delay must be a non-negative number of seconds, got {seconds}"
        )));
    }
    Duration::try_from_secs_f64(seconds).map_err(|e| {
        SlideshowError::InvalidConfiguration(format!("delay of {seconds} seconds is out of range: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = Config::default();
        assert_eq!(config.delay, Duration::from_secs(3));
        assert_eq!(config.strategy, Strategy::Surface);
        assert_eq!(config.viewport, Viewport { width: 400, height: 300, gutter: 10 });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn delay_rejects_negative_and_non_finite_values() {
        assert!(matches!(delay_from_secs(-1.0), Err(SlideshowError::InvalidConfiguration(_))));
        assert!(delay_from_secs(f64::NAN).is_err());
        assert!(delay_from_secs(f64::INFINITY).is_err());
        assert!(matches!(delay_from_secs(1e20), Err(SlideshowError::InvalidConfiguration(_))));
        assert_eq!(delay_from_secs(0.0).unwrap(), Duration::ZERO);
        assert_eq!(delay_from_secs(1.5).unwrap(), Duration::from_millis(1500));
    }

    #[test]
    fn empty_viewport_is_rejected() {
        let config = Config { viewport: Viewport::new(0, 300), ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn centred_origin_can_be_negative_for_oversized_boxes() {
        let viewport = Viewport::new(400, 300);
        assert_eq!(viewport.centered_origin(200, 100), (100, 100));
        assert_eq!(viewport.centered_origin(500, 300), (-50, 0));
        assert_eq!(viewport.inner_size(), (380, 280));
    }
}
