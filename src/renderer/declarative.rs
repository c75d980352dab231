use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::config::{Strategy, Viewport};
use crate::image_source::Image;
use crate::renderer::{Renderer, ResumePoint};
use crate::state::PlaybackState;

/// Entries logged by one slideshow session under its `Figure <n>` heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSection {
    pub figure: u32,
    pub entries: Vec<String>,
}

impl LogSection {
    pub fn heading(&self) -> String {
        format!("Figure {}", self.figure)
    }
}

/// A line of the stacked log list, `row` counted from the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub row: usize,
    pub text: String,
    pub heading: bool,
}

#[derive(Debug, Default)]
struct LogBoard {
    sections: Vec<LogSection>,
    figures_opened: u32,
}

/// Process-wide list of every declarative session, shared by all renderers
/// of that strategy. Sessions are stacked: a later session always sits below
/// every earlier one, however much the earlier ones grow afterwards.
///
/// Nothing is ever removed, the list grows for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct SessionLog {
    board: Rc<RefCell<LogBoard>>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new section and returns its figure number, starting at 1.
    pub fn open_session(&self) -> u32 {
        let mut board = self.board.borrow_mut();
        board.figures_opened += 1;
        let figure = board.figures_opened;
        board.sections.push(LogSection { figure, entries: Vec::new() });
        figure
    }

    pub fn entry_count(&self, figure: u32) -> usize {
        self.board
            .borrow()
            .sections
            .iter()
            .find(|section| section.figure == figure)
            .map_or(0, |section| section.entries.len())
    }

    pub fn append(&self, figure: u32, entry: String) {
        let mut board = self.board.borrow_mut();
        if let Some(section) = board.sections.iter_mut().find(|section| section.figure == figure) {
            section.entries.push(entry);
        }
    }

    pub fn sections(&self) -> Vec<LogSection> {
        self.board.borrow().sections.clone()
    }

    pub fn lines(&self) -> Vec<LogLine> {
        let board = self.board.borrow();
        let mut lines = Vec::new();
        for section in &board.sections {
            lines.push(LogLine { row: lines.len(), text: section.heading(), heading: true });
            for entry in &section.entries {
                lines.push(LogLine { row: lines.len(), text: entry.clone(), heading: false });
            }
        }
        lines
    }
}

/// What the plot area currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotFrame {
    pub index: usize,
    pub title: String,
}

/// The single shared drawing area; the only primitive is clear + redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotArea {
    pub size: (u32, u32),
    pub frame: Option<PlotFrame>,
}

impl PlotArea {
    fn clear(&mut self) {
        self.frame = None;
    }
}

/// Redraws one plot area per step and keeps no per-image elements, so it
/// cannot tell what is on screen. Resume is derived from the labels recorded
/// in the playback state instead.
#[derive(Debug)]
pub struct DeclarativeRenderer {
    log: SessionLog,
    figure: Option<u32>,
    plot: PlotArea,
    caption: String,
}

impl DeclarativeRenderer {
    pub fn new(log: SessionLog, viewport: Viewport) -> Self {
        Self {
            log,
            figure: None,
            plot: PlotArea { size: (viewport.width, viewport.height), frame: None },
            caption: String::new(),
        }
    }

    pub fn plot(&self) -> &PlotArea {
        &self.plot
    }

    /// Figure number of the current session, `None` before the first batch.
    pub fn figure(&self) -> Option<u32> {
        self.figure
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }
}

impl Renderer for DeclarativeRenderer {
    fn strategy(&self) -> Strategy {
        Strategy::Declarative
    }

    // Every batch gets a fresh figure, the previous one stays in the log.
    fn prepare(&mut self, _images: &[Image], viewport: &Viewport) {
        self.figure = Some(self.log.open_session());
        self.plot = PlotArea { size: (viewport.width, viewport.height), frame: None };
        self.caption.clear();
    }

    fn show(&mut self, index: usize, images: &[Image]) {
        let Some(image) = images.get(index) else {
            return;
        };
        self.plot.clear();
        self.plot.frame = Some(PlotFrame { index, title: format!("image {}", index + 1) });

        if let Some(figure) = self.figure {
            if self.log.entry_count(figure) <= index {
                self.log.append(figure, format!("{}: {}", index + 1, image.file_name()));
            }
        }
    }

    // Count convention: the number of labels is already the next index.
    fn resume_point(&self, state: &PlaybackState) -> Option<ResumePoint> {
        let shown = state.selected_labels().len();
        if shown == 0 {
            return None;
        }
        Some(ResumePoint { visible: shown - 1, next: shown })
    }

    fn caption(&mut self, text: &str) {
        self.caption = text.to_string();
    }

    fn current_caption(&self) -> &str {
        &self.caption
    }

    fn resize(&mut self, viewport: &Viewport) {
        self.plot.size = (viewport.width, viewport.height);
    }

    fn reset_viewport(&mut self, _viewport: &Viewport) {
        // A figure resized by hand cannot be brought back, only the chrome is reset.
        debug!("plot area keeps its size {:?} on reset", self.plot.size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_source::{load_image, tests::write_png};

    fn batch(names: &[&str]) -> (tempfile::TempDir, Vec<Image>) {
        let dir = tempfile::tempdir().unwrap();
        let images = names
            .iter()
            .map(|name| load_image(&write_png(dir.path(), name, 6, 6), &Viewport::default()).unwrap())
            .collect();
        (dir, images)
    }

    #[test]
    fn show_redraws_the_plot_and_logs_once_per_image() {
        let (_dir, images) = batch(&["a.png", "b.png"]);
        let log = SessionLog::new();
        let mut renderer = DeclarativeRenderer::new(log.clone(), Viewport::default());
        renderer.prepare(&images, &Viewport::default());

        renderer.show(0, &images);
        renderer.show(1, &images);
        renderer.show(1, &images);

        assert_eq!(renderer.plot().frame, Some(PlotFrame { index: 1, title: "image 2".to_string() }));
        let sections = log.sections();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading(), "Figure 1");
        assert_eq!(sections[0].entries, ["1: a.png", "2: b.png"]);
    }

    #[test]
    fn concurrent_sessions_are_stacked_not_interleaved() {
        let (_dir, images) = batch(&["a.png", "b.png", "c.png"]);
        let log = SessionLog::new();
        let mut first = DeclarativeRenderer::new(log.clone(), Viewport::default());
        let mut second = DeclarativeRenderer::new(log.clone(), Viewport::default());

        first.prepare(&images, &Viewport::default());
        first.show(0, &images);
        second.prepare(&images, &Viewport::default());
        second.show(0, &images);
        first.show(1, &images);

        assert_eq!(first.figure(), Some(1));
        assert_eq!(second.figure(), Some(2));
        let lines: Vec<_> = log.lines().into_iter().map(|line| (line.row, line.text, line.heading)).collect();
        assert_eq!(
            lines,
            [
                (0, "Figure 1".to_string(), true),
                (1, "1: a.png".to_string(), false),
                (2, "2: b.png".to_string(), false),
                (3, "Figure 2".to_string(), true),
                (4, "1: a.png".to_string(), false),
            ]
        );
    }

    #[test]
    fn a_new_batch_opens_a_new_figure_below_the_old_one() {
        let (_dir, images) = batch(&["a.png"]);
        let log = SessionLog::new();
        let mut renderer = DeclarativeRenderer::new(log.clone(), Viewport::default());

        renderer.prepare(&images, &Viewport::default());
        renderer.show(0, &images);
        renderer.prepare(&images, &Viewport::default());

        assert_eq!(renderer.figure(), Some(2));
        assert_eq!(renderer.plot().frame, None);
        let heading = log.lines().into_iter().find(|line| line.text == "Figure 2").unwrap();
        assert_eq!(heading.row, 2);
    }

    #[test]
    fn reset_leaves_a_resized_plot_alone() {
        let mut renderer = DeclarativeRenderer::new(SessionLog::new(), Viewport::default());
        renderer.resize(&Viewport::new(960, 500));
        renderer.reset_viewport(&Viewport::default());
        assert_eq!(renderer.plot().size, (960, 500));
    }
}
