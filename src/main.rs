use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use rand::seq::SliceRandom;

use slideshow::config::delay_from_secs;
use slideshow::constants::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
use slideshow::{
    collect_image_paths, Config, DeclarativeRenderer, PlaybackEngine, SessionLog, Strategy, SurfaceRenderer,
    Viewport,
};

mod headless;
#[cfg(feature = "window")]
mod window;

/// Show images one after another.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Image files, or directories to take images from
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Seconds between two images
    #[arg(short, long, default_value_t = 3.0)]
    delay: f64,

    /// How images are put on screen
    #[arg(short, long, value_enum, default_value_t = Strategy::Surface)]
    strategy: Strategy,

    /// Index of the first image to show
    #[arg(long, default_value_t = 0)]
    start: usize,

    /// Play the batch in random order
    #[arg(long)]
    shuffle: bool,

    #[arg(long, default_value_t = DEFAULT_VIEWPORT_WIDTH)]
    width: u32,

    #[arg(long, default_value_t = DEFAULT_VIEWPORT_HEIGHT)]
    height: u32,

    /// Print captions to stdout instead of opening a window
    #[arg(long)]
    headless: bool,
}

#[cfg(feature = "window")]
trait Scene: headless::Transcript + window::Draw {}
#[cfg(feature = "window")]
impl<T: headless::Transcript + window::Draw> Scene for T {}

#[cfg(not(feature = "window"))]
trait Scene: headless::Transcript {}
#[cfg(not(feature = "window"))]
impl<T: headless::Transcript> Scene for T {}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = Config {
        delay: delay_from_secs(args.delay)?,
        strategy: args.strategy,
        viewport: Viewport::new(args.width, args.height),
    };
    config.validate()?;

    let mut paths = collect_image_paths(&args.paths).context("failed to collect input images")?;
    if paths.is_empty() {
        bail!("no image found in {:?}", args.paths);
    }
    if args.shuffle {
        paths.shuffle(&mut rand::rng());
    }
    info!("{} path(s), {} renderer, {:?} between images", paths.len(), config.strategy, config.delay);

    match config.strategy {
        Strategy::Surface => {
            let renderer = SurfaceRenderer::new(config.viewport);
            run(PlaybackEngine::new(&config, renderer), &paths, &args)
        }
        Strategy::Declarative => {
            let renderer = DeclarativeRenderer::new(SessionLog::new(), config.viewport);
            run(PlaybackEngine::new(&config, renderer), &paths, &args)
        }
    }
}

fn run<R: Scene>(mut engine: PlaybackEngine<R>, paths: &[PathBuf], args: &Args) -> Result<()> {
    let report = engine.load(paths, args.start).context("failed to start the slideshow")?;
    info!("{} image(s) loaded, {} skipped", report.loaded, report.failed());

    if !args.headless {
        return open_window(engine);
    }
    headless::run(engine)
}

#[cfg(feature = "window")]
fn open_window<R: Scene>(engine: PlaybackEngine<R>) -> Result<()> {
    window::run(engine)
}

#[cfg(not(feature = "window"))]
fn open_window<R: Scene>(engine: PlaybackEngine<R>) -> Result<()> {
    info!("built without the window feature, printing captions instead");
    headless::run(engine)
}
