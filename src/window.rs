use std::io::Cursor;
use std::time::Duration;

use anyhow::{anyhow, Result};
use log::info;
use raylib::prelude::*;

use slideshow::constants::FPS;
use slideshow::{DeclarativeRenderer, PlaybackEngine, Renderer, SurfaceRenderer, Viewport};

const CAPTION_HEIGHT: i32 = 36; // Strip below the image area holding the caption
const LOG_WIDTH: i32 = 220;     // Column right of the plot holding the session log
const LINE_HEIGHT: i32 = 18;
const FONT_SIZE: i32 = 16;

/// How a renderer's state is put on the raylib window.
pub trait Draw: Renderer {
    fn draw(&self, d: &mut RaylibDrawHandle, textures: &[Texture2D]);

    /// Extra width the window needs besides the viewport.
    fn chrome_width(&self) -> i32 {
        0
    }
}

impl Draw for SurfaceRenderer {
    fn draw(&self, d: &mut RaylibDrawHandle, textures: &[Texture2D]) {
        for element in self.elements().iter().filter(|element| element.is_visible()) {
            if let Some(texture) = textures.get(element.index) {
                d.draw_texture(texture, element.origin.0, element.origin.1, Color::WHITE);
            }
        }
    }
}

impl Draw for DeclarativeRenderer {
    fn draw(&self, d: &mut RaylibDrawHandle, textures: &[Texture2D]) {
        let (plot_width, plot_height) = (self.plot().size.0 as f32, self.plot().size.1 as f32);

        if let Some(frame) = &self.plot().frame {
            if let Some(texture) = textures.get(frame.index) {
                // Fit the image under the title, keeping its aspect ratio.
                let area_height = plot_height - LINE_HEIGHT as f32 * 2.0;
                let scale = (plot_width / texture.width() as f32).min(area_height / texture.height() as f32);
                let position = Vector2::new(
                    (plot_width - texture.width() as f32 * scale) * 0.5,
                    LINE_HEIGHT as f32 * 2.0 + (area_height - texture.height() as f32 * scale) * 0.5,
                );
                d.draw_texture_ex(texture, position, 0.0, scale, Color::WHITE);
            }
            d.draw_text(&frame.title, 10, 8, FONT_SIZE + 4, Color::WHITE);
        }

        let log_x = plot_width as i32 + 10;
        for line in self.log().lines() {
            let (indent, color) = if line.heading { (0, Color::YELLOW) } else { (12, Color::LIGHTGRAY) };
            d.draw_text(&line.text, log_x + indent, 8 + line.row as i32 * LINE_HEIGHT, FONT_SIZE, color);
        }
    }

    fn chrome_width(&self) -> i32 {
        LOG_WIDTH
    }
}

// --- Upload the display-sized copies of the batch as textures ---
fn load_textures<R: Renderer>(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    engine: &PlaybackEngine<R>,
) -> Result<Vec<Texture2D>> {
    let mut textures = Vec::with_capacity(engine.state().len());
    for slide in engine.state().images() {
        let mut bytes = Vec::new();
        slide
            .display()
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        let pixels = Image::load_image_from_mem(".png", &bytes)
            .map_err(|e| anyhow!("failed to load pixels of {:?}: {}", slide.path(), e))?;
        let texture = rl
            .load_texture_from_image(thread, &pixels)
            .map_err(|e| anyhow!("failed to create texture for {:?}: {}", slide.path(), e))?;
        textures.push(texture);
    }
    Ok(textures)
}

fn window_size(viewport: &Viewport, chrome_width: i32) -> (i32, i32) {
    (viewport.width as i32 + chrome_width, viewport.height as i32 + CAPTION_HEIGHT)
}

pub fn run<R: Draw>(mut engine: PlaybackEngine<R>) -> Result<()> {
    let chrome_width = engine.renderer().chrome_width();
    let (width, height) = window_size(engine.viewport(), chrome_width);

    let (mut rl, thread) = raylib::init()
        .size(width, height)
        .title("Slideshow")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let textures = load_textures(&mut rl, &thread, &engine)?;
    info!("P pauses, R resumes, Up/Down change the delay, Z resets the window size");

    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        if rl.is_key_pressed(KeyboardKey::KEY_P) {
            engine.pause();
        }
        if rl.is_key_pressed(KeyboardKey::KEY_R) {
            engine.resume();
        }
        if rl.is_key_pressed(KeyboardKey::KEY_UP) || rl.is_key_pressed(KeyboardKey::KEY_DOWN) {
            let step = if rl.is_key_pressed(KeyboardKey::KEY_UP) { 1.0 } else { -1.0 };
            let delay = engine.state().delay().as_secs_f64() + step;
            if engine.set_delay(delay).is_ok() {
                info!("delay is now {}s", delay);
            }
        }
        if rl.is_key_pressed(KeyboardKey::KEY_Z) {
            engine.reset();
            let (width, height) = window_size(engine.viewport(), chrome_width);
            rl.set_window_size(width, height);
        } else if rl.is_window_resized() {
            let width = (rl.get_screen_width() - chrome_width).max(1) as u32;
            let height = (rl.get_screen_height() - CAPTION_HEIGHT).max(1) as u32;
            engine.resize(Viewport::new(width, height));
        }

        engine.tick(Duration::from_secs_f32(dt.max(0.0)));

        let caption_y = rl.get_screen_height() - CAPTION_HEIGHT + 8;
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::DARKGREEN);
        engine.renderer().draw(&mut d, &textures);
        d.draw_text(engine.renderer().current_caption(), 10, caption_y, FONT_SIZE + 4, Color::WHITE);
    }
    Ok(())
}
