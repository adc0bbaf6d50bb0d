//! Floyd-Steinberg error diffusion dithering algorithm.

use crate::buffer::PixelBuffer;
use crate::output::DitheredImage;
use crate::palette::ColorMatcher;

use super::{dither_with_kernel, Dither, DitherOptions, FLOYD_STEINBERG};

/// Floyd-Steinberg error diffusion dithering.
///
/// Distributes 100% of the quantization error to 4 neighbors:
///
/// ```text
///        X   7
///    3   5   1
/// ```
///
/// On right-to-left rows the kernel is mirrored, so the 7/16 share always
/// lands on the next pixel in scan order.
///
/// # Example
///
/// ```
/// use spectra_dither::{ColorMatcher, Dither, DitherOptions, FloydSteinberg};
/// use spectra_dither::{PaletteCatalog, PixelBuffer};
///
/// let catalog = PaletteCatalog::new();
/// let mut matcher = ColorMatcher::new(&catalog);
/// let pixels = PixelBuffer::from_rgb_bytes(vec![200, 0, 0, 200, 0, 0], 2, 1).unwrap();
/// let image = FloydSteinberg.dither(pixels, &mut matcher, &DitherOptions::new());
/// assert_eq!(image.len(), 2);
/// ```
pub struct FloydSteinberg;

impl Dither for FloydSteinberg {
    fn dither(
        &self,
        pixels: PixelBuffer,
        matcher: &mut ColorMatcher<'_>,
        options: &DitherOptions,
    ) -> DitheredImage {
        dither_with_kernel(pixels, matcher, &FLOYD_STEINBERG, options.serpentine)
    }
}
