use crate::foundation::error::{MaskError, MaskResult};

/// Single-channel 8-bit alpha raster in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskRaster {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
}

impl MaskRaster {
    /// Wrap `alpha` as a `width` x `height` raster.
    ///
    /// Fails if the buffer length does not match the geometry.
    pub fn new(width: u32, height: u32, alpha: Vec<u8>) -> MaskResult<Self> {
        let expected = width as usize * height as usize;
        if alpha.len() != expected {
            return Err(MaskError::decode(format!(
                "alpha buffer has {} bytes, expected {expected} for {width}x{height}",
                alpha.len()
            )));
        }
        Ok(Self {
            width,
            height,
            alpha,
        })
    }

    /// Fully opaque mask: every pixel selected.
    pub fn opaque(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            alpha: vec![u8::MAX; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Alpha value at (`x`, `y`), or `None` outside the raster.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.alpha
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.alpha
    }
}
