use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::dpx::types::DpxFrame;

pub trait DpxImageReader {
    fn read_dpx(&self, data: &[u8]) -> Result<DpxFrame>;
}
