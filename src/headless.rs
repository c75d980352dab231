use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;

use slideshow::constants::FRAME_TIME;
use slideshow::{DeclarativeRenderer, PlaybackEngine, PlaybackStatus, Renderer, SurfaceRenderer};

/// Text printed once playback is over.
pub trait Transcript: Renderer {
    fn transcript(&self) -> Vec<String> {
        Vec::new()
    }
}

impl Transcript for SurfaceRenderer {}

impl Transcript for DeclarativeRenderer {
    fn transcript(&self) -> Vec<String> {
        self.log()
            .lines()
            .into_iter()
            .map(|line| if line.heading { line.text } else { format!("  {}", line.text) })
            .collect()
    }
}

// --- Frame loop without a window: one tick per frame, captions to stdout ---
pub fn run<R: Transcript>(mut engine: PlaybackEngine<R>) -> Result<()> {
    let frame = Duration::from_secs_f32(FRAME_TIME);
    let mut shown = String::new();
    let mut previous = Instant::now();

    loop {
        let now = Instant::now();
        let status = engine.tick(now - previous);
        previous = now;

        let caption = engine.renderer().current_caption();
        if caption != shown {
            println!("{}", caption);
            shown = caption.to_string();
        }
        if status == PlaybackStatus::Finished {
            break;
        }
        thread::sleep(frame);
    }

    for line in engine.renderer().transcript() {
        println!("{}", line);
    }
    Ok(())
}
