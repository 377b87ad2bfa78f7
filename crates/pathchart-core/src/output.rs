// File: crates/pathchart-core/src/output.rs
// Summary: Output format detection, raster encoding and atomic file writes.

use std::io::{Cursor, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{ChartError, Result};

/// Image formats accepted by the static file backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Bmp,
    Webp,
    Tiff,
    Svg,
}

impl ImageFormat {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| ChartError::backend(path.display().to_string(), "missing file extension"))?;
        match ext.as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "bmp" => Ok(Self::Bmp),
            "webp" => Ok(Self::Webp),
            "tif" | "tiff" => Ok(Self::Tiff),
            "svg" => Ok(Self::Svg),
            other => Err(ChartError::backend(
                path.display().to_string(),
                format!("unsupported image format '.{other}'"),
            )),
        }
    }

    /// Encode a tightly packed RGBA8 buffer.
    pub fn encode_rgba8(self, pixels: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>> {
        let target = format!("{self:?} encoder");
        let format = match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Bmp => image::ImageFormat::Bmp,
            Self::Webp => image::ImageFormat::WebP,
            Self::Tiff => image::ImageFormat::Tiff,
            Self::Svg => return Err(ChartError::backend(target, "SVG is not a raster format")),
        };
        let img = image::RgbaImage::from_raw(width, height, pixels)
            .ok_or_else(|| ChartError::backend(target.clone(), "pixel buffer does not match dimensions"))?;

        let mut out = Cursor::new(Vec::new());
        let written = if self == Self::Jpeg {
            // JPEG has no alpha channel
            image::DynamicImage::ImageRgba8(img).to_rgb8().write_to(&mut out, format)
        } else {
            img.write_to(&mut out, format)
        };
        written.map_err(|e| ChartError::backend(target, e))?;
        Ok(out.into_inner())
    }
}

/// Write `bytes` to `path` through a temporary sibling file that is renamed
/// into place. An existing file is replaced; on failure nothing is left behind.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let target = path.display().to_string();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| ChartError::backend(target.clone(), e))?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| ChartError::backend(target.clone(), e))?;
    tmp.write_all(bytes).map_err(|e| ChartError::backend(target.clone(), e))?;
    tmp.flush().map_err(|e| ChartError::backend(target.clone(), e))?;
    tmp.persist(path).map_err(|e| ChartError::backend(target, e.error))?;
    Ok(())
}
