use std::io::Cursor;

use anyhow::Context;

use crate::{
    foundation::error::{MaskError, MaskResult},
    mask::raster::MaskRaster,
};

/// Decode PNG bytes into an alpha raster.
///
/// Input is always parsed as PNG regardless of its content. When the PNG carries an alpha
/// channel that channel becomes the mask; otherwise the luminance is used as alpha.
pub fn decode_mask(bytes: &[u8]) -> MaskResult<MaskRaster> {
    let img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .map_err(|e| MaskError::decode(format!("decode mask png: {e}")))?;
    let (width, height) = (img.width(), img.height());

    let alpha = if img.color().has_alpha() {
        img.to_luma_alpha8()
            .pixels()
            .map(|px| px.0[1])
            .collect::<Vec<u8>>()
    } else {
        img.to_luma8().into_raw()
    };

    MaskRaster::new(width, height, alpha)
}

/// Width and height from the PNG header, without decoding pixel data.
pub fn mask_dimensions(bytes: &[u8]) -> MaskResult<(u32, u32)> {
    image::ImageReader::with_format(Cursor::new(bytes), image::ImageFormat::Png)
        .into_dimensions()
        .map_err(|e| MaskError::decode(format!("read mask png header: {e}")))
}

/// Decode a mask only after its header matches `width` x `height`.
///
/// A mismatched upload is rejected before any pixel buffer is allocated.
pub fn decode_mask_sized(bytes: &[u8], width: u32, height: u32) -> MaskResult<MaskRaster> {
    let (w, h) = mask_dimensions(bytes)?;
    if (w, h) != (width, height) {
        return Err(MaskError::decode(format!(
            "mask is {w}x{h} but image is {width}x{height}"
        )));
    }
    decode_mask(bytes)
}

/// Encode a raster as a grey+alpha PNG with zero luminance.
///
/// The result renders as a black overlay whose opacity is the mask.
pub fn encode_mask(mask: &MaskRaster) -> MaskResult<Vec<u8>> {
    let mut la = Vec::with_capacity(mask.as_bytes().len() * 2);
    for &a in mask.as_bytes() {
        la.push(0);
        la.push(a);
    }
    let buf = image::GrayAlphaImage::from_raw(mask.width(), mask.height(), la)
        .context("build grey+alpha buffer")?;

    let mut out = Vec::new();
    image::DynamicImage::ImageLumaA8(buf)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .context("encode mask png")?;
    Ok(out)
}

/// Whether `mask` has exactly the expected geometry.
pub fn validate_dimensions(mask: &MaskRaster, width: u32, height: u32) -> bool {
    mask.width() == width && mask.height() == height
}

#[cfg(test)]
#[path = "../../tests/unit/mask/codec.rs"]
mod tests;
