//! Decoding of DPX (Digital Picture Exchange) images into opaque RGBA8 rasters.

pub mod image_pipeline;
pub mod logger;
