use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the playback core.
pub type Result<T> = std::result::Result<T, SlideshowError>;

/// Everything that can go wrong while loading or driving a slideshow.
///
/// None of these are fatal to the host: decode failures and renderer
/// desyncs are recovered locally and reported as warnings, the others
/// reject a single call and leave the previous state in place.
#[derive(Debug, Error)]
pub enum SlideshowError {
    /// A path could not be opened or decoded as an image.
    #[error("failed to decode {}: {source}", path.display())]
    DecodeFailure {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Every path of a `load` call failed, nothing to play.
    #[error("no image could be loaded out of {attempted} path(s)")]
    EmptyBatch { attempted: usize },

    /// A configuration value was rejected at the boundary.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The renderer could not tell which image is currently visible.
    #[error("renderer cannot report the visible image, restarting from the first one")]
    RendererDesync,

    /// A directory given as input could not be listed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
