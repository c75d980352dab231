use std::time::Duration;

use crate::constants::DEFAULT_DELAY_SECS;
use crate::image_source::Image;

/// Where the engine is in its lifecycle.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PlaybackStatus {
    Idle,     // Nothing loaded yet
    Loading,  // Decoding a batch
    Playing,  // Advancing one image per delay
    Paused,   // Holding the last shown image
    Finished, // Last image shown
}

/// The loaded batch and the playback cursor. Only the engine mutates it.
#[derive(Debug)]
pub struct PlaybackState {
    images: Vec<Image>,
    selected_labels: Vec<String>,
    position: Option<usize>,
    running: bool,
    delay: Duration,
    batch: u64,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_DELAY_SECS))
    }
}

impl PlaybackState {
    pub fn new(delay: Duration) -> Self {
        Self {
            images: Vec::new(),
            selected_labels: Vec::new(),
            position: None,
            running: false,
            delay,
            batch: 0,
        }
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// File names of the images shown so far, parallel to `images`.
    pub fn selected_labels(&self) -> &[String] {
        &self.selected_labels
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Identity of the current batch, bumped by every successful load.
    pub fn batch(&self) -> u64 {
        self.batch
    }

    pub(crate) fn replace_batch(&mut self, images: Vec<Image>, start: usize) {
        // Images before the start count as already passed.
        self.selected_labels = images[..start].iter().map(Image::file_name).collect();
        self.images = images;
        self.position = Some(start);
        self.batch += 1;
    }

    pub(crate) fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub(crate) fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Marks `index` as the visible image and records its label the first
    /// time it is reached.
    pub(crate) fn mark_shown(&mut self, index: usize) {
        self.position = Some(index);
        if self.selected_labels.len() == index {
            self.selected_labels.push(self.images[index].file_name());
        }
    }

    pub(crate) fn caption(&self, index: usize) -> String {
        format!("{} of {}: {}", index + 1, self.images.len(), self.images[index].file_name())
    }
}
