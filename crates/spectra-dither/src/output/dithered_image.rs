//! DitheredImage: the owned result of one conversion.
//!
//! [`DitheredImage`] carries the quantized RGB buffer the caller gets back
//! plus the ink chosen for every pixel, so device indices can be produced
//! without classifying the RGB output a second time.

use crate::buffer::PixelBuffer;
use crate::color::Rgb;
use crate::palette::PaletteColor;

use super::device::pack_4bpp;

/// The output of the dithering pipeline.
///
/// Same dimensions and byte layout as the input buffer. Every RGB triple
/// is the exact triple of the ink stored for that pixel in
/// [`colors()`](DitheredImage::colors).
///
/// # Example
///
/// ```
/// use spectra_dither::{PixelBuffer, SpectraDitherer};
///
/// let ditherer = SpectraDitherer::new();
/// let pixels = PixelBuffer::from_rgb_bytes(vec![0, 0, 0, 255, 255, 0], 2, 1).unwrap();
/// let image = ditherer.dither(pixels);
///
/// assert_eq!(image.as_rgb_bytes(), &[0, 0, 0, 255, 255, 0]);
/// assert_eq!(image.hardware_indices(), vec![0, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DitheredImage {
    pixels: PixelBuffer,
    colors: Vec<PaletteColor>,
}

impl DitheredImage {
    /// Wrap a quantized buffer and its per-pixel inks.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that there is one ink per pixel.
    pub fn new(pixels: PixelBuffer, colors: Vec<PaletteColor>) -> Self {
        debug_assert_eq!(
            colors.len(),
            pixels.len(),
            "colors length ({}) must match width * height ({}x{})",
            colors.len(),
            pixels.width(),
            pixels.height(),
        );
        Self { pixels, colors }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.pixels.height()
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Ink per pixel, row-major.
    #[inline]
    pub fn colors(&self) -> &[PaletteColor] {
        &self.colors
    }

    /// Quantized pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.pixels.pixels()
    }

    /// Controller index per pixel (0, 1, 2, 3, 5 or 6).
    pub fn hardware_indices(&self) -> Vec<u8> {
        self.colors.iter().map(|c| c.hardware_index()).collect()
    }

    /// Count of pixels using `color`.
    pub fn count(&self, color: PaletteColor) -> usize {
        self.colors.iter().filter(|&&c| c == color).count()
    }

    /// Device framebuffer: two pixels per byte, see [`pack_4bpp`].
    pub fn to_packed_4bpp(&self) -> Vec<u8> {
        pack_4bpp(&self.colors)
    }

    /// The quantized RGB bytes, `width * height * 3` long.
    #[inline]
    pub fn as_rgb_bytes(&self) -> &[u8] {
        self.pixels.as_bytes()
    }

    pub fn into_rgb_bytes(self) -> Vec<u8> {
        self.pixels.into_bytes()
    }

    pub fn into_pixel_buffer(self) -> PixelBuffer {
        self.pixels
    }
}
