use std::io::Write;
use tracing::debug;
use ::tiff::encoder::{colortype, compression::DeflateLevel, Compression, TiffEncoder};
use ::tiff::tags::Predictor;
use crate::image_pipeline::common::error::{Result, DpxError};
use crate::image_pipeline::dpx::DecodedRaster;
use crate::image_pipeline::tiff::types::{ConversionConfig, TiffCompression};
use crate::image_pipeline::tiff::writer::RasterWriter;

/// Writes a decoded raster as an 8-bit RGBA TIFF.
pub struct StandardTiffWriter;

impl RasterWriter for StandardTiffWriter {
    fn write_raster(&self, raster: &DecodedRaster, output: &mut dyn Write, config: &ConversionConfig) -> Result<()> {
        debug!("Encoding TIFF image: {}x{}", raster.width(), raster.height());

        // TiffEncoder needs Seek, so encode into memory first.
        let mut buffer = Vec::new();

        let compression = match config.compression {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
            TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
        };

        let mut encoder = TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| DpxError::Encode(e.to_string()))?
            .with_compression(compression);

        if let Some(predictor_val) = config.predictor {
            let predictor = match predictor_val {
                2 => Predictor::Horizontal,
                _ => Predictor::None,
            };
            encoder = encoder.with_predictor(predictor);
        }

        encoder.write_image::<colortype::RGBA8>(
            raster.width(),
            raster.height(),
            raster.pixels(),
        ).map_err(|e| DpxError::Encode(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
