// File: crates/strata-core/src/output.rs
// Summary: Encoding rendered pixels and writing image files.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::error::{ChartError, ChartResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Bmp,
}

impl OutputFormat {
    /// Format implied by a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "bmp" => Some(Self::Bmp),
            _ => None,
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Bmp => ImageFormat::Bmp,
        }
    }
}

/// Unpremultiplied RGBA8 pixels of a finished chart.
#[derive(Clone, Debug)]
pub struct RenderedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub stride: usize,
}

impl RenderedImage {
    pub fn encode(&self, format: OutputFormat) -> ChartResult<Vec<u8>> {
        let rgba = RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or_else(|| ChartError::Encode("pixel buffer does not match image size".into()))?;
        let img = match format {
            OutputFormat::Png => DynamicImage::ImageRgba8(rgba),
            // no alpha channel in these encoders
            OutputFormat::Jpeg | OutputFormat::Bmp => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(rgba).to_rgb8()),
        };
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format.image_format())?;
        Ok(buf.into_inner())
    }
}

/// Write through a sibling temp file and rename into place. The temp file is
/// removed on failure.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> ChartResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = temp_path(path);
    let result = std::fs::write(&tmp, bytes).and_then(|_| std::fs::rename(&tmp, path));
    if let Err(err) = result {
        if let Err(cleanup) = std::fs::remove_file(&tmp) {
            tracing::debug!(path = %tmp.display(), %cleanup, "temp file cleanup failed");
        }
        tracing::error!(path = %path.display(), %err, "writing chart failed");
        return Err(err.into());
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
