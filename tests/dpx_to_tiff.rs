use dpx_raster_rs::image_pipeline::{
    ConversionConfig, DpxError, DpxImage, DpxToTiffPipeline, Endianness, TiffCompression,
    read_dpx_file,
};

const HEADER_SIZE: usize = 2048;

/// Minimal DPX file: header fields for image element 0 followed by `data`.
fn dpx_file(big_endian: bool, width: u32, height: u32, description: u8, bit_size: u8, data: &[u8]) -> Vec<u8> {
    let u32_bytes = |v: u32| if big_endian { v.to_be_bytes() } else { v.to_le_bytes() };
    let mut buf = vec![0u8; HEADER_SIZE];
    buf[0..4].copy_from_slice(&u32_bytes(0x53445058));
    buf[4..8].copy_from_slice(&u32_bytes(HEADER_SIZE as u32));
    buf[772..776].copy_from_slice(&u32_bytes(width));
    buf[776..780].copy_from_slice(&u32_bytes(height));
    buf[800] = description;
    buf[803] = bit_size;
    buf.extend_from_slice(data);
    buf
}

fn read_tiff_rgba(path: &std::path::Path) -> (u32, u32, Vec<u8>) {
    let mut decoder = tiff::decoder::Decoder::new(std::fs::File::open(path).unwrap()).unwrap();
    let (width, height) = decoder.dimensions().unwrap();
    assert_eq!(decoder.colortype().unwrap(), tiff::ColorType::RGBA(8));
    match decoder.read_image().unwrap() {
        tiff::decoder::DecodingResult::U8(data) => (width, height, data),
        _ => panic!("expected 8-bit samples"),
    }
}

#[test]
fn test_convert_file_round_trips_through_tiff() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("frame.0001.dpx");
    let output = dir.path().join("frame.0001.tif");
    std::fs::write(&input, dpx_file(true, 2, 1, 50, 8, &[10, 20, 30, 40, 50, 60])).unwrap();

    for compression in [TiffCompression::None, TiffCompression::Lzw, TiffCompression::DeflateBalanced] {
        let config = ConversionConfig::builder()
            .compression(compression)
            .predictor(Some(2))
            .build();
        let frame = DpxToTiffPipeline::new(config).convert_file(&input, &output).unwrap();
        assert_eq!(frame.metadata.endianness(), Endianness::Big);

        let (width, height, pixels) = read_tiff_rgba(&output);
        assert_eq!((width, height), (2, 1));
        assert_eq!(pixels, vec![10, 20, 30, 255, 40, 50, 60, 255]);
    }
}

#[test]
fn test_little_endian_16bit_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("le.dpx");
    let output = dir.path().join("le.tif");
    let words: [u16; 6] = [0xFFFF, 0x4000, 0x0000, 0x8000, 0x0100, 0x7F00];
    let data: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
    std::fs::write(&input, dpx_file(false, 1, 2, 50, 16, &data)).unwrap();

    let frame = DpxToTiffPipeline::new(ConversionConfig::default())
        .convert_file(&input, &output)
        .unwrap();
    assert_eq!(frame.metadata.endianness(), Endianness::Little);

    let (_, _, pixels) = read_tiff_rgba(&output);
    assert_eq!(pixels, vec![255, 64, 0, 255, 128, 1, 127, 255]);
}

#[test]
fn test_failed_decode_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("short.dpx");
    let output = dir.path().join("short.tif");
    std::fs::write(&input, dpx_file(true, 4, 4, 50, 8, &[0u8; 5])).unwrap();

    let err = DpxToTiffPipeline::new(ConversionConfig::default())
        .convert_file(&input, &output)
        .unwrap_err();
    assert!(matches!(err, DpxError::PixelRead { .. }));
    assert!(!output.exists());
}

#[test]
fn test_missing_input_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = DpxToTiffPipeline::new(ConversionConfig::default())
        .convert_file(dir.path().join("missing.dpx"), dir.path().join("out.tif"))
        .unwrap_err();
    assert!(matches!(err, DpxError::BufferRead(_)));
}

#[test]
fn test_read_dpx_file_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("rgba.dpx");
    // One RGBA pixel at 10 bits: R=0x3FF G=0x000 B=0x3FF in word 0, A in word 1.
    let words: [u32; 2] = [(0x3FF << 22) | (0x3FF << 2), 0x3FF << 22];
    let data: Vec<u8> = words.iter().flat_map(|w| w.to_be_bytes()).collect();
    std::fs::write(&input, dpx_file(true, 1, 1, 51, 10, &data)).unwrap();

    let image = read_dpx_file(&input).unwrap();
    assert!(matches!(image, DpxImage::Undecoded { .. }));
    assert_eq!(image.metadata().num_components(), 4);

    let image = image.decode().unwrap();
    let raster = image.raster().unwrap();
    assert_eq!(raster.pixels(), &[0xFF, 0x00, 0xFF, 255]);
}
