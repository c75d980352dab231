pub const DEFAULT_VIEWPORT_WIDTH: u32 = 400;  // Initial drawing surface width
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 300; // Initial drawing surface height
pub const VIEWPORT_GUTTER: u32 = 10;          // Margin kept free around a fitted image

pub const DEFAULT_DELAY_SECS: u64 = 3;        // Pause between two images (seconds)

pub const FPS: u32 = 60;                      // Host frames per second
pub const FRAME_TIME: f32 = 1.0 / FPS as f32; // Time per frame (seconds)

pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];
