//! The panel driver's side of the output contract
//!
//! The driver does not use CIELAB. It re-classifies every RGB pixel it
//! receives with fixed channel thresholds and packs two 4-bit controller
//! indices per byte. [`classify_rgb`] reproduces that classifier so the
//! engine's output can be checked against it; [`pack_4bpp`] produces the
//! framebuffer the driver would build.

use crate::color::Rgb;
use crate::palette::PaletteColor;

/// Ink the device driver assigns to an RGB pixel.
///
/// Checked in order: near-black, near-white, then the four chromatic
/// boxes; anything left falls back to black or white by mean brightness.
///
/// ```
/// use spectra_dither::{classify_rgb, PaletteColor, Rgb};
///
/// assert_eq!(classify_rgb(Rgb::new(220, 50, 50)), PaletteColor::Red);
/// assert_eq!(classify_rgb(Rgb::new(150, 150, 150)), PaletteColor::White);
/// ```
pub fn classify_rgb(rgb: Rgb) -> PaletteColor {
    let Rgb { r, g, b } = rgb;

    if r < 32 && g < 32 && b < 32 {
        return PaletteColor::Black;
    }
    if r > 224 && g > 224 && b > 224 {
        return PaletteColor::White;
    }
    if r > 200 && g > 200 && b < 100 {
        return PaletteColor::Yellow;
    }
    if r > 200 && g < 100 && b < 100 {
        return PaletteColor::Red;
    }
    if r < 100 && g < 100 && b > 200 {
        return PaletteColor::Blue;
    }
    if r < 100 && g > 200 && b < 100 {
        return PaletteColor::Green;
    }

    let brightness = (r as u16 + g as u16 + b as u16) / 3;
    if brightness > 127 {
        PaletteColor::White
    } else {
        PaletteColor::Black
    }
}

/// Controller index the driver pads unused nibbles with (White).
const PAD_INDEX: u8 = 0x1;

/// Pack controller indices two per byte.
///
/// The even pixel goes in the high nibble, the odd pixel in the low
/// nibble. A trailing odd pixel is paired with White.
///
/// ```
/// use spectra_dither::{pack_4bpp, PaletteColor};
///
/// let packed = pack_4bpp(&[PaletteColor::Red, PaletteColor::Green, PaletteColor::Black]);
/// assert_eq!(packed, vec![0x36, 0x01]);
/// ```
pub fn pack_4bpp(colors: &[PaletteColor]) -> Vec<u8> {
    colors
        .chunks(2)
        .map(|pair| {
            let high = pair[0].hardware_index();
            let low = pair.get(1).map_or(PAD_INDEX, |c| c.hardware_index());
            (high << 4) | low
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_triples_classify_to_themselves() {
        for color in PaletteColor::ALL {
            assert_eq!(classify_rgb(color.rgb()), color, "{color}");
        }
    }

    #[test]
    fn test_chromatic_boxes() {
        assert_eq!(classify_rgb(Rgb::new(201, 99, 99)), PaletteColor::Red);
        assert_eq!(classify_rgb(Rgb::new(220, 220, 50)), PaletteColor::Yellow);
        assert_eq!(classify_rgb(Rgb::new(201, 201, 99)), PaletteColor::Yellow);
        assert_eq!(classify_rgb(Rgb::new(50, 50, 220)), PaletteColor::Blue);
        assert_eq!(classify_rgb(Rgb::new(99, 99, 201)), PaletteColor::Blue);
        assert_eq!(classify_rgb(Rgb::new(50, 220, 50)), PaletteColor::Green);
    }

    #[test]
    fn test_threshold_edges() {
        assert_eq!(classify_rgb(Rgb::new(31, 31, 31)), PaletteColor::Black);
        assert_eq!(classify_rgb(Rgb::new(32, 32, 32)), PaletteColor::Black);
        assert_eq!(classify_rgb(Rgb::new(225, 225, 225)), PaletteColor::White);
        assert_eq!(classify_rgb(Rgb::new(224, 224, 224)), PaletteColor::White);
    }

    #[test]
    fn test_brightness_fallback() {
        assert_eq!(classify_rgb(Rgb::new(150, 150, 150)), PaletteColor::White);
        assert_eq!(classify_rgb(Rgb::new(100, 100, 100)), PaletteColor::Black);
        assert_eq!(classify_rgb(Rgb::new(128, 127, 127)), PaletteColor::Black);
        assert_eq!(classify_rgb(Rgb::new(128, 128, 128)), PaletteColor::White);
    }

    #[test]
    fn test_pack_even_count() {
        let colors = [
            PaletteColor::Black,
            PaletteColor::White,
            PaletteColor::Blue,
            PaletteColor::Yellow,
        ];
        assert_eq!(pack_4bpp(&colors), vec![0x01, 0x52]);
    }

    #[test]
    fn test_pack_odd_tail_is_white() {
        assert_eq!(pack_4bpp(&[PaletteColor::Green]), vec![0x61]);
        assert!(pack_4bpp(&[]).is_empty());
    }
}
