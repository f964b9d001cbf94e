//! maskserve serves one image over HTTP and persists a paintable alpha mask for it.
//!
//! # Pipeline overview
//!
//! 1. **Load**: `path -> ImageDescriptor` once at startup (header-only decode, raw bytes kept)
//! 2. **Decode**: uploaded PNG `-> MaskRaster` (single 8-bit alpha channel)
//! 3. **Validate**: mask geometry must equal the source image geometry
//! 4. **Persist**: `MaskRaster -> PNG` written atomically next to the other masks
//!
//! The HTTP layer (`/image`, `/mask`, `/join` and a static fallback) is a thin translation
//! of [`MaskStore`] results into status codes.
#![forbid(unsafe_code)]

mod foundation;
mod http;
mod mask;
mod source;

pub use foundation::error::{MaskError, MaskResult};
pub use foundation::key::mask_file_name;
pub use http::routes::{AppState, JOIN_BODY, RouterOpts, build_routes};
pub use http::server::{ServerOpts, serve};
pub use mask::codec::{
    decode_mask, decode_mask_sized, encode_mask, mask_dimensions, validate_dimensions,
};
pub use mask::raster::MaskRaster;
pub use mask::store::MaskStore;
pub use source::loader::{ImageDescriptor, SourceFormat, describe_image, load_image};
