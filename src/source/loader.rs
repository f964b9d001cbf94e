use std::{
    io::Cursor,
    path::{Path, PathBuf},
};

use bytes::Bytes;

use crate::foundation::error::{MaskError, MaskResult};

/// Encoded format of the source image, as detected from its header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceFormat(pub image::ImageFormat);

impl SourceFormat {
    /// Short lowercase format name (`png`, `jpeg`, `gif`, ...).
    pub fn name(self) -> &'static str {
        use image::ImageFormat as F;
        match self.0 {
            F::Png => "png",
            F::Jpeg => "jpeg",
            F::Gif => "gif",
            F::WebP => "webp",
            F::Bmp => "bmp",
            F::Tiff => "tiff",
            F::Ico => "ico",
            F::Avif => "avif",
            F::Qoi => "qoi",
            other => other.extensions_str().first().copied().unwrap_or("octet-stream"),
        }
    }

    /// MIME type served as `Content-Type` for the raw image bytes.
    pub fn mime_type(self) -> String {
        format!("image/{}", self.name())
    }
}

/// Immutable record of the source image: geometry, format and the original encoded bytes.
#[derive(Clone, Debug)]
pub struct ImageDescriptor {
    /// Width in pixels, always non-zero.
    pub width: u32,
    /// Height in pixels, always non-zero.
    pub height: u32,
    /// Encoded file contents, re-served verbatim.
    pub raw_bytes: Bytes,
    /// Path the image was loaded from, as supplied on the command line.
    pub source_path: PathBuf,
    /// Detected encoding.
    pub format: SourceFormat,
}

/// Read `path` fully and decode only its header.
///
/// Pixel data is not decoded; the loader only needs the geometry and the format to validate
/// masks and to label responses.
pub fn load_image(path: impl AsRef<Path>) -> MaskResult<ImageDescriptor> {
    let path = path.as_ref();
    let raw = std::fs::read(path)
        .map_err(|e| MaskError::io(format!("read image '{}': {e}", path.display())))?;
    let descriptor = describe_image(path, Bytes::from(raw))?;

    tracing::info!(
        width = descriptor.width,
        height = descriptor.height,
        format = descriptor.format.name(),
        path = %path.display(),
        "image loaded"
    );
    Ok(descriptor)
}

/// Build a descriptor from bytes already in memory.
pub fn describe_image(path: impl Into<PathBuf>, raw_bytes: Bytes) -> MaskResult<ImageDescriptor> {
    let source_path = path.into();
    let reader = image::ImageReader::new(Cursor::new(raw_bytes.as_ref()))
        .with_guessed_format()
        .map_err(|e| MaskError::io(format!("sniff image format: {e}")))?;
    let format = reader.format().ok_or_else(|| {
        MaskError::decode(format!(
            "unrecognized image format '{}'",
            source_path.display()
        ))
    })?;
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| MaskError::decode(format!("read image dimensions: {e}")))?;

    if width == 0 || height == 0 {
        return Err(MaskError::decode(format!(
            "image has empty dimensions {width}x{height}"
        )));
    }

    Ok(ImageDescriptor {
        width,
        height,
        raw_bytes,
        source_path,
        format: SourceFormat(format),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/source/loader.rs"]
mod tests;
