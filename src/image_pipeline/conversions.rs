//! Pipeline conversions module
//!
//! This module contains orchestration logic for DPX conversions.

mod dpx_to_tiff;


pub use dpx_to_tiff::DpxToTiffPipeline;
