use anyhow::Context;
use image::{GenericImageView, ImageFormat};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Last non-empty path segment of `url`, used as the file name on disk.
pub fn file_name_for(url: &Url) -> Option<String> {
    url.path_segments()?
        .last()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Fetched bytes that decoded as an image. The bytes are written as served,
/// never re-encoded.
pub struct DownloadedImage {
    pub file_name: String,
    format: ImageFormat,
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl DownloadedImage {
    /// Decodes `bytes` fetched from `src`. Fails when the bytes are not an
    /// image format the `image` crate can read.
    pub fn decode(file_name: String, src: &Url, bytes: Vec<u8>) -> anyhow::Result<Self> {
        let format = image::guess_format(&bytes)
            .with_context(|| format!("unrecognised image format at {}", src))?;
        let image = image::load_from_memory_with_format(&bytes, format)
            .with_context(|| format!("failed to decode {}", src))?;
        Ok(DownloadedImage {
            file_name,
            format,
            width: image.width(),
            height: image.height(),
            bytes,
        })
    }

    /// Writes the image into `directory`, replacing any file of the same name.
    pub fn save(&self, directory: &Path) -> anyhow::Result<PathBuf> {
        let path = directory.join(&self.file_name);
        debug!(
            "Writing {}x{} {:?} to {}",
            self.width,
            self.height,
            self.format,
            path.display()
        );
        fs::write(&path, &self.bytes)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }
}
