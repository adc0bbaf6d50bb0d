//! Owned RGB pixel buffer
//!
//! [`PixelBuffer`] is the only way pixels enter the engine. Its constructor
//! checks the length once; everything downstream relies on
//! `data.len() == width * height * 3` without checking again.

use crate::api::DitherError;
use crate::color::Rgb;

/// A row-major, top-to-bottom buffer of 8-bit RGB pixels.
///
/// ```
/// use spectra_dither::{PixelBuffer, Rgb};
///
/// let buf = PixelBuffer::from_rgb_bytes(vec![255, 0, 0, 0, 0, 255], 2, 1).unwrap();
/// assert_eq!(buf.get(1, 0), Rgb::new(0, 0, 255));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl PixelBuffer {
    /// Wrap `data` as a `width` x `height` image.
    ///
    /// # Errors
    ///
    /// - [`DitherError::DimensionOverflow`] if `width * height * 3` overflows
    /// - [`DitherError::BufferSize`] if `data.len()` differs from it
    pub fn from_rgb_bytes(data: Vec<u8>, width: usize, height: usize) -> Result<Self, DitherError> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(3))
            .ok_or(DitherError::DimensionOverflow { width, height })?;

        if data.len() != expected {
            return Err(DitherError::BufferSize {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Build a buffer from a slice of colors.
    pub fn from_pixels(pixels: &[Rgb], width: usize, height: usize) -> Result<Self, DitherError> {
        let data = pixels.iter().flat_map(|p| p.to_bytes()).collect();
        Self::from_rgb_bytes(data, width, height)
    }

    /// A `width` x `height` image filled with one color.
    pub fn filled(color: Rgb, width: usize, height: usize) -> Result<Self, DitherError> {
        let count = width
            .checked_mul(height)
            .ok_or(DitherError::DimensionOverflow { width, height })?;
        Self::from_pixels(&vec![color; count], width, height)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * 3
    }

    /// Color at `(x, y)`. Panics if out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        let i = self.offset(x, y);
        Rgb::new(self.data[i], self.data[i + 1], self.data[i + 2])
    }

    /// Overwrite the color at `(x, y)`. Panics if out of bounds.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
        let i = self.offset(x, y);
        self.data[i..i + 3].copy_from_slice(&color.to_bytes());
    }

    /// Mutable view of the three channel bytes at `(x, y)`.
    #[inline]
    pub(crate) fn channels_mut(&mut self, x: usize, y: usize) -> &mut [u8] {
        let i = self.offset(x, y);
        &mut self.data[i..i + 3]
    }

    /// Iterate over pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.data
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
    }

    /// Apply `f` to every pixel, producing a new buffer of the same size.
    pub fn map_pixels(&self, mut f: impl FnMut(Rgb) -> Rgb) -> Self {
        let data = self.pixels().flat_map(|p| f(p).to_bytes()).collect();
        Self {
            data,
            width: self.width,
            height: self.height,
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}
