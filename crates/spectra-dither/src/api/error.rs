//! Unified error type for the spectra-dither public API.

use thiserror::Error;

/// Unified error type for the spectra-dither public API.
///
/// The scan itself cannot fail. Errors only come from building a
/// [`PixelBuffer`](crate::PixelBuffer) or parsing an algorithm name.
///
/// # Example
///
/// ```
/// use spectra_dither::{DitherError, PixelBuffer};
///
/// let err = PixelBuffer::from_rgb_bytes(vec![0; 5], 1, 2).unwrap_err();
/// assert!(matches!(err, DitherError::BufferSize { expected: 6, actual: 5 }));
/// ```
#[derive(Debug, Error)]
pub enum DitherError {
    /// Buffer length is not `width * height * 3`
    #[error("pixel buffer has {actual} bytes, expected {expected} (width * height * 3)")]
    BufferSize { expected: usize, actual: usize },

    /// `width * height * 3` does not fit in `usize`
    #[error("image dimensions {width}x{height} overflow the addressable size")]
    DimensionOverflow { width: usize, height: usize },

    /// Algorithm name is not one of the supported kernels
    #[error("unknown dither algorithm '{0}' (expected 'floyd-steinberg' or 'atkinson')")]
    UnknownAlgorithm(String),
}
