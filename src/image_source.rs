use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use exif::{In, Reader, Tag, Value};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageError, ImageReader, RgbaImage};
use log::debug;

use crate::config::Viewport;
use crate::constants::IMAGE_EXTENSIONS;
use crate::error::{Result, SlideshowError};

/// A decoded image together with the copy sized for the viewport.
#[derive(Debug, Clone)]
pub struct Image {
    path: PathBuf,
    decoded: DynamicImage,
    display: RgbaImage,
}

impl Image {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full resolution pixels, orientation already applied.
    pub fn decoded(&self) -> &DynamicImage {
        &self.decoded
    }

    /// Pixels scaled to fit the viewport the image was loaded for.
    pub fn display(&self) -> &RgbaImage {
        &self.display
    }

    pub fn display_size(&self) -> (u32, u32) {
        self.display.dimensions()
    }

    /// Last path component, used for captions and log entries.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }
}

// --- Expand directories into sorted image paths ---
pub fn collect_image_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            // Files are passed through whatever their extension, decoding decides.
            paths.push(input.clone());
            continue;
        }

        paths.extend(list_images(input)?);
    }
    Ok(paths)
}

fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let io_error = |source| SlideshowError::Io { path: dir.to_path_buf(), source };
    let mut found = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && has_image_extension(&path) {
            found.push(path);
        }
    }
    found.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!("{} image(s) found in {}", found.len(), dir.display());
    Ok(found)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

// --- Load image, apply EXIF orientation, fit to viewport ---
pub fn load_image(path: &Path, viewport: &Viewport) -> Result<Image> {
    let decode_failure = |source| SlideshowError::DecodeFailure { path: path.to_path_buf(), source };

    let file_bytes = fs::read(path).map_err(|e| decode_failure(ImageError::IoError(e)))?;
    let orientation = read_orientation(path, &file_bytes);

    // The format is sniffed from the content, the extension is only a hint.
    let decoded = ImageReader::new(Cursor::new(&file_bytes))
        .with_guessed_format()
        .map_err(|e| decode_failure(ImageError::IoError(e)))?
        .decode()
        .map_err(decode_failure)?;
    let decoded = apply_orientation(decoded, orientation);

    let (width, height) = fit_to_viewport(decoded.width(), decoded.height(), viewport);
    let display = if (width, height) == (decoded.width(), decoded.height()) {
        decoded.to_rgba8()
    } else {
        imageops::resize(&decoded, width, height, FilterType::Triangle)
    };

    Ok(Image { path: path.to_path_buf(), decoded, display })
}

fn read_orientation(path: &Path, file_bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Value::Short(values) = &field.value {
                    if let Some(&orientation) = values.first() {
                        return orientation;
                    }
                }
            }
            1
        }
        Err(e) => {
            // Most PNGs carry no EXIF block at all.
            debug!("no EXIF orientation for {}: {}", path.display(), e);
            1
        }
    }
}

// 1 = normal, 2/4 = mirrored, 3 = 180 deg, 6 = 90 deg CW, 8 = 90 deg CCW,
// 5/7 = transposed.
fn apply_orientation(image: DynamicImage, orientation: u16) -> DynamicImage {
    match orientation {
        2 => image.fliph(),
        3 => image.rotate180(),
        4 => image.flipv(),
        5 => image.rotate90().fliph(),
        6 => image.rotate90(),
        7 => image.rotate270().fliph(),
        8 => image.rotate270(),
        _ => image,
    }
}

/// Scale factor keeps the aspect ratio and never enlarges.
fn fit_to_viewport(width: u32, height: u32, viewport: &Viewport) -> (u32, u32) {
    let (max_width, max_height) = viewport.inner_size();
    let scale = (max_width as f32 / width as f32)
        .min(max_height as f32 / height as f32)
        .min(1.0);
    (
        ((width as f32 * scale).round() as u32).max(1),
        ((height as f32 * scale).round() as u32).max(1),
    )
}
