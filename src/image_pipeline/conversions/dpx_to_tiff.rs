use tracing::{info, instrument, warn};
use std::io::Write;
use std::path::Path;

use crate::image_pipeline::{
    common::error::{DpxError, Result},
    dpx::{DpxFrame, DpxImageReader, ImageMetadata, StandardDpxReader},
    tiff::{RasterWriter, StandardTiffWriter, ConversionConfig},
};

pub struct DpxToTiffPipeline<R: DpxImageReader, W: RasterWriter> {
    reader: R,
    writer: W,
    config: ConversionConfig,
}

impl DpxToTiffPipeline<StandardDpxReader, StandardTiffWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            reader: StandardDpxReader,
            writer: StandardTiffWriter,
            config,
        }
    }
}

impl<R: DpxImageReader, W: RasterWriter> DpxToTiffPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ConversionConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn verify_data_length(&self, input_data: &[u8]) -> Result<()> {
        if !self.config.verify_data_length {
            return Ok(());
        }

        let metadata = ImageMetadata::parse(input_data)?;
        metadata.check_data_length(input_data.len()).inspect_err(|e| {
            warn!("{}", e);
        })
    }

    fn validate_dimensions(&self, width: u32, height: u32) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(DpxError::InvalidDimensions(width, height));
        }

        Ok(())
    }

    /// Decodes a DPX file held in memory and writes it to `output` as TIFF.
    ///
    /// Returns the decoded frame so callers can report on it.
    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<DpxFrame> {
        info!("Starting DPX to TIFF conversion");

        {
            let _span = tracing::info_span!("verify_data_length").entered();
            self.verify_data_length(input_data)?;
        }

        let frame = {
            let _span = tracing::info_span!("decode_dpx").entered();
            self.reader.read_dpx(input_data)?
        };

        {
            let _span = tracing::info_span!("validate_dimensions",
                width = frame.raster.width(),
                height = frame.raster.height()
            ).entered();
            self.validate_dimensions(frame.raster.width(), frame.raster.height())?;
        }

        {
            let _span = tracing::info_span!("encode_tiff").entered();
            self.writer.write_raster(&frame.raster, output, &self.config)?;
        }

        info!(
            width = frame.raster.width(),
            height = frame.raster.height(),
            bit_size = frame.metadata.bit_size(),
            components = %frame.metadata.component_type(),
            "Conversion complete"
        );
        Ok(frame)
    }

    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<DpxFrame> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                DpxError::BufferRead(format!("{}: {}", input_path.display(), e))
            })?
        };

        // The output file is only created once the conversion has succeeded.
        let mut encoded = Vec::new();
        let frame = self.convert(&input_data, &mut encoded)?;

        {
            let _span = tracing::info_span!("write_output_file").entered();
            std::fs::write(output_path, &encoded).map_err(|e| {
                DpxError::OutputWrite(format!("{}: {}", output_path.display(), e))
            })?;
        }

        Ok(frame)
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}
