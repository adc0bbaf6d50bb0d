use png::{BitDepth, ColorType};
use spectra_dither::{DitheredImage, PixelBuffer};
use std::io::Cursor;

use crate::error::RenderError;

/// Blend one channel over a white background.
#[inline]
fn over_white(channel: u8, alpha: u8) -> u8 {
    let c = channel as u32;
    let a = alpha as u32;
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

/// Composite straight-alpha RGBA bytes over white, dropping the alpha channel.
pub fn composite_over_white(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        let a = px[3];
        rgb.extend_from_slice(&[
            over_white(px[0], a),
            over_white(px[1], a),
            over_white(px[2], a),
        ]);
    }
    rgb
}

/// Decode a PNG into an RGB pixel buffer.
///
/// Palette and sub-byte images are expanded to 8 bits first. Transparent
/// pixels are composited over white, matching the panel's blank state.
/// 16-bit images are rejected.
pub fn decode_png(data: &[u8]) -> Result<PixelBuffer, RenderError> {
    let mut decoder = png::Decoder::new(Cursor::new(data));
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader
        .next_frame(&mut buf)
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;
    buf.truncate(frame.buffer_size());

    let rgb = match (frame.color_type, frame.bit_depth) {
        (ColorType::Rgb, BitDepth::Eight) => buf,
        (ColorType::Rgba, BitDepth::Eight) => composite_over_white(&buf),
        (ColorType::Grayscale, BitDepth::Eight) => buf.iter().flat_map(|&v| [v, v, v]).collect(),
        (ColorType::GrayscaleAlpha, BitDepth::Eight) => buf
            .chunks_exact(2)
            .flat_map(|px| {
                let v = over_white(px[0], px[1]);
                [v, v, v]
            })
            .collect(),
        (color_type, bit_depth) => {
            return Err(RenderError::UnsupportedColorType {
                color_type: format!("{color_type:?}"),
                bit_depth: bit_depth as u8,
            })
        }
    };

    tracing::debug!(
        width = frame.width,
        height = frame.height,
        color_type = ?frame.color_type,
        "Decoded PNG"
    );

    Ok(PixelBuffer::from_rgb_bytes(
        rgb,
        frame.width as usize,
        frame.height as usize,
    )?)
}

/// Encode raw RGB bytes as an 8-bit RGB PNG.
pub fn encode_rgb_png(rgb: &[u8], width: usize, height: usize) -> Result<Vec<u8>, RenderError> {
    let too_large = || RenderError::PngEncode(format!("{width}x{height} exceeds PNG limits"));
    let width = u32::try_from(width).map_err(|_| too_large())?;
    let height = u32::try_from(height).map_err(|_| too_large())?;

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(ColorType::Rgb);
        encoder.set_depth(BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(rgb)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Encode a dithered image as its RGB preview PNG.
pub fn encode_png(image: &DitheredImage) -> Result<Vec<u8>, RenderError> {
    encode_rgb_png(image.as_rgb_bytes(), image.width(), image.height())
}
