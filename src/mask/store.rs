use std::{
    io::Write as _,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::Context;

use crate::{
    foundation::{
        error::{MaskError, MaskResult},
        key::mask_file_name,
    },
    mask::{
        codec::{decode_mask_sized, encode_mask, validate_dimensions},
        raster::MaskRaster,
    },
    source::loader::ImageDescriptor,
};

/// On-disk mask persistence for source images.
///
/// The store holds no pixel data: every read goes back to disk, so the file is the single
/// source of truth. Writes from this process are serialized and land via rename, so readers
/// see either the previous file or the new one.
#[derive(Debug)]
pub struct MaskStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl MaskStore {
    /// Store mask files inside `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Deterministic mask file location for `descriptor`.
    pub fn mask_path(&self, descriptor: &ImageDescriptor) -> PathBuf {
        self.dir.join(mask_file_name(&descriptor.source_path))
    }

    /// Load and validate the persisted mask.
    ///
    /// A missing file is [`MaskError::NotFound`]; a file that does not decode or whose
    /// dimensions differ from the source image is reported as corrupt ([`MaskError::Decode`]).
    #[tracing::instrument(skip(self, descriptor), fields(path = %descriptor.source_path.display()))]
    pub fn read(&self, descriptor: &ImageDescriptor) -> MaskResult<MaskRaster> {
        let path = self.mask_path(descriptor);
        let bytes = match std::fs::read(&path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(MaskError::not_found(format!(
                    "no mask at '{}'",
                    path.display()
                )));
            }
            Err(e) => {
                return Err(MaskError::io(format!(
                    "read mask '{}': {e}",
                    path.display()
                )));
            }
        };

        let mask = decode_mask_sized(&bytes, descriptor.width, descriptor.height)
            .map_err(|e| MaskError::decode(format!("corrupt mask file '{}': {e}", path.display())))?;

        tracing::debug!(bytes = bytes.len(), "mask read");
        Ok(mask)
    }

    /// Decode an uploaded PNG and persist it as the mask for `descriptor`.
    #[tracing::instrument(skip(self, descriptor, uploaded), fields(bytes = uploaded.len()))]
    pub fn write(&self, descriptor: &ImageDescriptor, uploaded: &[u8]) -> MaskResult<()> {
        let mask = decode_mask_sized(uploaded, descriptor.width, descriptor.height)?;
        self.write_raster(descriptor, &mask)
    }

    /// Validate `mask` against the source geometry and persist it.
    pub fn write_raster(&self, descriptor: &ImageDescriptor, mask: &MaskRaster) -> MaskResult<()> {
        if !validate_dimensions(mask, descriptor.width, descriptor.height) {
            return Err(MaskError::decode(format!(
                "mask is {}x{} but image is {}x{}",
                mask.width(),
                mask.height(),
                descriptor.width,
                descriptor.height
            )));
        }

        let encoded = encode_mask(mask)?;
        let path = self.mask_path(descriptor);

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow::anyhow!("mask write lock poisoned"))?;
        persist_atomic(&path, &encoded)?;

        tracing::info!(
            path = %path.display(),
            bytes = encoded.len(),
            "mask written"
        );
        Ok(())
    }

    /// Persist the fully opaque default mask unless one already exists.
    ///
    /// Returns `true` when a new file was written.
    pub fn ensure_default(&self, descriptor: &ImageDescriptor) -> MaskResult<bool> {
        match self.read(descriptor) {
            Ok(_) => Ok(false),
            Err(MaskError::NotFound(_)) => {
                self.write_raster(
                    descriptor,
                    &MaskRaster::opaque(descriptor.width, descriptor.height),
                )?;
                Ok(true)
            }
            Err(e) => Err(e),
        }
    }
}

fn persist_atomic(path: &Path, bytes: &[u8]) -> MaskResult<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)
        .map_err(|e| MaskError::io(format!("create mask dir '{}': {e}", parent.display())))?;

    let file_name = path
        .file_name()
        .context("mask path has no file name")?
        .to_string_lossy();
    let tmp = parent.join(format!(".{file_name}.{}.tmp", std::process::id()));

    let result = (|| -> std::io::Result<()> {
        let mut f = std::fs::File::create(&tmp)?;
        f.write_all(bytes)?;
        f.sync_all()?;
        std::fs::rename(&tmp, path)
    })();

    result.map_err(|e| {
        std::fs::remove_file(&tmp).ok();
        MaskError::io(format!("write mask '{}': {e}", path.display()))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/mask/store.rs"]
mod tests;
