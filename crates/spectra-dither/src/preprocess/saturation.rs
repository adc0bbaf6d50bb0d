//! HSL saturation boost

use crate::buffer::PixelBuffer;
use crate::color::{Hsl, Rgb};

/// Boost one color: scale its HSL saturation by `factor` (capped at 1.0).
#[inline]
fn boost_pixel(rgb: Rgb, factor: f32) -> Rgb {
    Hsl::from(rgb).scale_saturation(factor).to_rgb()
}

/// Return a copy of `pixels` with every pixel's HSL saturation multiplied
/// by `factor`, capped at full saturation.
///
/// Hue and lightness are kept. Greys have no saturation and come out
/// unchanged. A `factor` of 1.0 or less returns an identical copy without
/// touching any pixel.
///
/// ```
/// use spectra_dither::{boost_saturation, PixelBuffer, Rgb};
///
/// let pixels = PixelBuffer::filled(Rgb::new(150, 100, 100), 2, 2).unwrap();
/// let boosted = boost_saturation(&pixels, 2.0);
/// assert_eq!(boosted.get(0, 0), Rgb::new(175, 75, 75));
/// ```
pub fn boost_saturation(pixels: &PixelBuffer, factor: f32) -> PixelBuffer {
    if factor <= 1.0 {
        return pixels.clone();
    }
    pixels.map_pixels(|rgb| boost_pixel(rgb, factor))
}
