//! Convenience helpers for loading inputs and writing the transient result.

use crate::util::{StyleSwapError, StyleSwapResult};
use image::{ImageFormat, RgbImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Loads an image from disk and converts it to 8-bit RGB.
pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> StyleSwapResult<RgbImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|err| StyleSwapError::ImageDecode {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;
    Ok(img.to_rgb8())
}

/// A PNG written to a named temporary file.
///
/// The file is removed when this handle is dropped. Callers keep the handle
/// alive for as long as they read from [`path`](Self::path), or call
/// [`persist`](Self::persist) to move it somewhere permanent.
#[derive(Debug)]
pub struct TransientImage {
    file: NamedTempFile,
    width: u32,
    height: u32,
}

impl TransientImage {
    /// Encodes `image` as PNG into a fresh temporary file.
    pub fn write_png(image: &RgbImage) -> StyleSwapResult<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("styleswap-")
            .suffix(".png")
            .tempfile()
            .map_err(|err| resource("create temporary file", &err))?;
        {
            let mut writer = BufWriter::new(file.as_file_mut());
            image
                .write_to(&mut writer, ImageFormat::Png)
                .map_err(|err| resource("encode png", &err))?;
            writer
                .flush()
                .map_err(|err| resource("flush temporary file", &err))?;
        }
        Ok(Self {
            file,
            width: image.width(),
            height: image.height(),
        })
    }

    /// Path of the temporary file; valid while `self` is alive.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Width of the encoded image.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the encoded image.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reopens the file for reading.
    pub fn reopen(&self) -> StyleSwapResult<File> {
        self.file
            .reopen()
            .map_err(|err| resource("reopen temporary file", &err))
    }

    /// Moves the file to `target`; it is no longer deleted automatically.
    ///
    /// Falls back to copying when `target` is on another filesystem; the
    /// temporary file is then removed as usual.
    pub fn persist<P: AsRef<Path>>(self, target: P) -> StyleSwapResult<PathBuf> {
        let target = target.as_ref().to_path_buf();
        if let Err(err) = self.file.persist(&target) {
            std::fs::copy(err.file.path(), &target)
                .map_err(|copy_err| resource("persist output", &copy_err))?;
        }
        Ok(target)
    }
}

fn resource(operation: &str, err: &dyn std::fmt::Display) -> StyleSwapError {
    StyleSwapError::Resource {
        reason: format!("{operation}: {err}"),
    }
}
