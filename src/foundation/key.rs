use std::path::Path;

/// 64-bit FNV-1a hasher used to derive stable on-disk keys.
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    pub(crate) const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new_default() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

/// Derive the mask file name for a source image path.
///
/// The result is `mask.<name>.<hash>.png` where `<name>` is the source file name restricted
/// to `[A-Za-z0-9._-]` and `<hash>` is the FNV-1a hash of the full path as given. The name
/// never contains a path separator, so it always lands directly inside the mask directory.
pub fn mask_file_name(source_path: &Path) -> String {
    let name = source_path
        .file_name()
        .map(|n| sanitize_component(&n.to_string_lossy()))
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "image".to_string());

    let mut h = Fnv1a64::new_default();
    h.write_bytes(source_path.as_os_str().as_encoded_bytes());
    format!("mask.{name}.{:016x}.png", h.finish())
}

fn sanitize_component(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/key.rs"]
mod tests;
