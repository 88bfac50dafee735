//! dpx2tiff - inspect DPX headers and convert DPX frames to RGBA TIFF

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use dpx_raster_rs::image_pipeline::{
    ConversionConfig, DpxToTiffPipeline, ImageMetadata, TiffCompression, read_dpx_file,
};
use dpx_raster_rs::logger;

use tracing::{error, info};

#[derive(Parser)]
#[command(name = "dpx2tiff")]
#[command(author, version, about = "Decode DPX images to 8-bit RGBA")]
#[command(long_about = "
Decodes 8, 10, 12 and 16-bit DPX images into 8-bit RGBA.

Examples:
  dpx2tiff info frame.0001.dpx
  dpx2tiff convert frame.0001.dpx frame.0001.tif
  dpx2tiff convert frame.0001.dpx out.tif -c lzw --predictor --verify-length
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Display DPX header information
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Convert a DPX file to an RGBA TIFF
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input DPX file
    input: PathBuf,
}

#[derive(Args)]
struct ConvertArgs {
    /// Input DPX file
    input: PathBuf,

    /// Output TIFF file
    output: PathBuf,

    /// TIFF compression
    #[arg(short, long, value_enum, default_value_t = CompressionArg::None)]
    compression: CompressionArg,

    /// Use horizontal differencing predictor
    #[arg(long)]
    predictor: bool,

    /// Skip the zero-size image check
    #[arg(long)]
    no_validate: bool,

    /// Reject files too short to hold every sample the decoder reads
    #[arg(long)]
    verify_length: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum CompressionArg {
    None,
    Lzw,
    DeflateFast,
    DeflateBalanced,
    DeflateBest,
}

impl From<CompressionArg> for TiffCompression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::None => TiffCompression::None,
            CompressionArg::Lzw => TiffCompression::Lzw,
            CompressionArg::DeflateFast => TiffCompression::DeflateFast,
            CompressionArg::DeflateBalanced => TiffCompression::DeflateBalanced,
            CompressionArg::DeflateBest => TiffCompression::DeflateBest,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(if cli.verbose { "debug" } else { "info" });

    let result = match cli.command {
        Commands::Info(args) => run_info(&args),
        Commands::Convert(args) => run_convert(&args),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run_info(args: &InfoArgs) -> Result<()> {
    let image = read_dpx_file(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;
    print_metadata(image.metadata());
    Ok(())
}

fn print_metadata(meta: &ImageMetadata) {
    println!("Dimensions:      {}x{}", meta.width(), meta.height());
    println!("Byte order:      {:?}", meta.endianness());
    println!("Description:     {} ({})", meta.description_code(), meta.component_type());
    println!("Components:      {}", meta.num_components());
    println!("Bit size:        {}", meta.bit_size());
    println!("Packing:         {}", meta.packing());
    println!("Pixel offset:    {}", meta.pixel_data_offset());
    println!("Nominal data:    {} bytes", meta.expected_data_len());
    match meta.required_data_len() {
        Ok(len) => println!("Required data:   {} bytes", len),
        Err(e) => println!("Required data:   n/a ({})", e),
    }
}

fn run_convert(args: &ConvertArgs) -> Result<()> {
    let config = ConversionConfig::builder()
        .compression(args.compression.into())
        .predictor(args.predictor.then_some(2))
        .validate_dimensions(!args.no_validate)
        .verify_data_length(args.verify_length)
        .build();
    let pipeline = DpxToTiffPipeline::new(config);

    info!("Compression: {:?}", pipeline.config().compression);

    let frame = pipeline
        .convert_file(&args.input, &args.output)
        .with_context(|| format!("Failed to convert {}", args.input.display()))?;

    info!(
        "Wrote {} ({}x{}, {}bit {})",
        args.output.display(),
        frame.raster.width(),
        frame.raster.height(),
        frame.metadata.bit_size(),
        frame.metadata.component_type()
    );
    Ok(())
}
