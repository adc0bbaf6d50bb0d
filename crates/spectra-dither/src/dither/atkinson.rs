//! Atkinson error diffusion dithering algorithm.

use crate::buffer::PixelBuffer;
use crate::output::DitheredImage;
use crate::palette::ColorMatcher;

use super::{dither_with_kernel, Dither, DitherOptions, ATKINSON};

/// Atkinson error diffusion dithering.
///
/// Distributes 1/8 of the error to each of 6 neighbors, 6/8 in total:
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
///
/// The kernel keeps its orientation on right-to-left rows. There the two
/// same-row entries point at pixels that are already final, so only the
/// four entries below the current row take effect.
pub struct Atkinson;

impl Dither for Atkinson {
    fn dither(
        &self,
        pixels: PixelBuffer,
        matcher: &mut ColorMatcher<'_>,
        options: &DitherOptions,
    ) -> DitheredImage {
        dither_with_kernel(pixels, matcher, &ATKINSON, options.serpentine)
    }
}
