//! Test fixtures: synthetic PNG images and config files.

use std::path::{Path, PathBuf};

use glance_render::rendering::encode_rgb_png;

/// Exact hardware ink triples, in controller index order 0,1,2,3,5,6
pub const INKS: [[u8; 3]; 6] = [
    [0, 0, 0],
    [255, 255, 255],
    [255, 255, 0],
    [255, 0, 0],
    [0, 0, 255],
    [0, 255, 0],
];

/// RGB bytes of a `width`x`height` image filled with one color
pub fn solid_rgb(color: [u8; 3], width: usize, height: usize) -> Vec<u8> {
    std::iter::repeat(color)
        .take(width * height)
        .flatten()
        .collect()
}

/// RGB bytes of a horizontal gradient from black to `color`
pub fn gradient_rgb(color: [u8; 3], width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * 3);
    for _ in 0..height {
        for x in 0..width {
            let t = x as u32 * 255 / (width.max(2) - 1) as u32;
            data.extend(color.map(|c| (c as u32 * t / 255) as u8));
        }
    }
    data
}

/// Encode RGB bytes as a PNG
pub fn png_from_rgb(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    encode_rgb_png(rgb, width, height).expect("fixture PNG should encode")
}

/// Encode RGBA bytes as a PNG
pub fn png_from_rgba(rgba: &[u8], width: u32, height: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().expect("PNG header");
        writer.write_image_data(rgba).expect("PNG data");
    }
    buf
}

/// Write `data` to `dir/name` and return the path
pub fn write_file(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).expect("fixture file should write");
    path
}

/// A YAML config selecting Atkinson with a mild boost
pub const ATKINSON_CONFIG: &str = r#"
algorithm: atkinson
saturation_boost: 1.2
boost_enabled: true
serpentine: true
workers: 2
"#;
