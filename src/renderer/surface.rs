use log::warn;

use crate::config::{Strategy, Viewport};
use crate::image_source::Image;
use crate::renderer::{Renderer, ResumePoint};
use crate::state::PlaybackState;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// One persistent drawable per image of the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceElement {
    pub index: usize,
    pub origin: (i32, i32),
    pub size: (u32, u32),
    pub visibility: Visibility,
}

impl SurfaceElement {
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }
}

/// Keeps every image of the batch on a single drawing surface and flips
/// their visibility. The visible element is the source of truth on resume.
#[derive(Debug, Default)]
pub struct SurfaceRenderer {
    surface: Viewport,
    elements: Vec<SurfaceElement>,
    caption: String,
}

impl SurfaceRenderer {
    pub fn new(viewport: Viewport) -> Self {
        Self { surface: viewport, ..Self::default() }
    }

    pub fn surface(&self) -> &Viewport {
        &self.surface
    }

    pub fn elements(&self) -> &[SurfaceElement] {
        &self.elements
    }

    pub fn visible_count(&self) -> usize {
        self.elements.iter().filter(|element| element.is_visible()).count()
    }

    fn recentre(&mut self) {
        for element in self.elements.iter_mut() {
            element.origin = self.surface.centered_origin(element.size.0, element.size.1);
        }
    }
}

impl Renderer for SurfaceRenderer {
    fn strategy(&self) -> Strategy {
        Strategy::Surface
    }

    fn prepare(&mut self, images: &[Image], viewport: &Viewport) {
        self.surface = *viewport;
        self.elements = images
            .iter()
            .enumerate()
            .map(|(index, image)| {
                let (width, height) = image.display_size();
                SurfaceElement {
                    index,
                    origin: viewport.centered_origin(width, height),
                    size: (width, height),
                    visibility: Visibility::Hidden,
                }
            })
            .collect();
        self.caption.clear();
    }

    fn show(&mut self, index: usize, _images: &[Image]) {
        if index >= self.elements.len() {
            warn!("surface has no element {} (batch of {})", index, self.elements.len());
            return;
        }
        for element in self.elements.iter_mut() {
            element.visibility = if element.index == index { Visibility::Visible } else { Visibility::Hidden };
        }
    }

    // Exclusive convention: the visible image was fully shown, continue after it.
    fn resume_point(&self, _state: &PlaybackState) -> Option<ResumePoint> {
        self.elements
            .iter()
            .find(|element| element.is_visible())
            .map(|element| ResumePoint { visible: element.index, next: element.index + 1 })
    }

    fn caption(&mut self, text: &str) {
        self.caption = text.to_string();
    }

    fn current_caption(&self) -> &str {
        &self.caption
    }

    fn resize(&mut self, viewport: &Viewport) {
        self.surface = *viewport;
        self.recentre();
    }

    fn reset_viewport(&mut self, viewport: &Viewport) {
        self.resize(viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_source::{load_image, tests::write_png};

    fn batch(count: usize) -> (tempfile::TempDir, Vec<Image>) {
        let dir = tempfile::tempdir().unwrap();
        let images = (0..count)
            .map(|i| {
                let path = write_png(dir.path(), &format!("{i}.png"), 20, 10);
                load_image(&path, &Viewport::default()).unwrap()
            })
            .collect();
        (dir, images)
    }

    #[test]
    fn prepare_creates_hidden_centred_elements() {
        let (_dir, images) = batch(3);
        let mut renderer = SurfaceRenderer::new(Viewport::default());
        renderer.prepare(&images, &Viewport::default());

        assert_eq!(renderer.elements().len(), 3);
        assert_eq!(renderer.visible_count(), 0);
        assert!(renderer.elements().iter().all(|e| e.origin == (190, 145)));
    }

    #[test]
    fn show_leaves_exactly_one_element_visible() {
        let (_dir, images) = batch(4);
        let mut renderer = SurfaceRenderer::new(Viewport::default());
        renderer.prepare(&images, &Viewport::default());

        renderer.show(1, &images);
        renderer.show(2, &images);
        assert_eq!(renderer.visible_count(), 1);
        assert!(renderer.elements()[2].is_visible());

        renderer.show(9, &images);
        assert!(renderer.elements()[2].is_visible());
    }

    #[test]
    fn resume_point_continues_after_the_visible_element() {
        let (_dir, images) = batch(5);
        let state = PlaybackState::default();
        let mut renderer = SurfaceRenderer::new(Viewport::default());
        renderer.prepare(&images, &Viewport::default());
        assert_eq!(renderer.resume_point(&state), None);

        renderer.show(1, &images);
        assert_eq!(renderer.resume_point(&state), Some(ResumePoint { visible: 1, next: 2 }));
    }

    #[test]
    fn reset_resizes_the_surface_and_recentres() {
        let (_dir, images) = batch(1);
        let mut renderer = SurfaceRenderer::new(Viewport::default());
        renderer.prepare(&images, &Viewport::default());

        renderer.resize(&Viewport::new(800, 600));
        assert_eq!(renderer.elements()[0].origin, (390, 295));

        renderer.reset_viewport(&Viewport::default());
        assert_eq!(renderer.surface(), &Viewport::default());
        assert_eq!(renderer.elements()[0].origin, (190, 145));
    }
}
