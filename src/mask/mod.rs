//! Alpha mask raster, its PNG codec, and on-disk persistence.

pub(crate) mod codec;
pub(crate) mod raster;
pub(crate) mod store;
