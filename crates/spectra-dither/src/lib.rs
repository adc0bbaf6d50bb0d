#![allow(clippy::excessive_precision, clippy::module_inception)]

//! spectra-dither: error-diffusion dithering for six-ink Spectra 6 panels
//!
//! Converts 24-bit RGB images to the fixed Spectra 6 palette: black, white,
//! yellow, red, blue and green. Matching is perceptual (CIELAB + CIEDE2000);
//! quantization error is diffused with Floyd-Steinberg or Atkinson.
//!
//! # Quick Start
//!
//! ```
//! use spectra_dither::{DitherAlgorithm, PixelBuffer, SpectraDitherer};
//!
//! let ditherer = SpectraDitherer::new().algorithm(DitherAlgorithm::FloydSteinberg);
//!
//! let pixels = PixelBuffer::from_rgb_bytes(vec![10, 10, 10, 245, 245, 245], 2, 1).unwrap();
//! let result = ditherer.dither(pixels);
//!
//! assert_eq!(result.as_rgb_bytes(), &[0, 0, 0, 255, 255, 255]);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! PixelBuffer (RGB bytes, validated once)
//!     |
//!     +---> [saturation boost]   HSL, only if enabled and factor > 1
//!     |
//!     v
//! serpentine scan, one pixel at a time
//!     |
//!     +---> ColorMatcher         RGB -> CIELAB -> ΔE00 vs 6 inks, memoized
//!     |
//!     +---> overwrite pixel with the ink's exact RGB triple
//!     |
//!     +---> residue = current - ink, spread to unvisited neighbors
//!     v
//! DitheredImage (same layout, every pixel one of 6 triples)
//! ```
//!
//! # Sharing and ownership
//!
//! The [`PaletteCatalog`] is immutable after construction and can be shared
//! across threads behind an `Arc`. Every call gets its own [`ColorCache`].
//! The scan owns its working buffer for the duration of the call and hands
//! it back inside the [`DitheredImage`].
//!
//! # Device contract
//!
//! The panel driver re-classifies every RGB pixel with simple thresholds
//! ([`classify_rgb`]) and packs two 4-bit controller indices per byte
//! ([`pack_4bpp`]). Output triples are always exactly the hardware table,
//! so the driver and the engine agree on every pixel.

pub mod adaptive;
pub mod api;
pub mod buffer;
pub mod color;
pub mod dither;
pub mod output;
pub mod palette;
pub mod preprocess;

#[cfg(test)]
mod domain_tests;

pub use adaptive::{AdaptiveMapper, ImageStats};
pub use api::{DitherError, SpectraDitherer};
pub use buffer::PixelBuffer;
pub use color::{ciede2000, Hsl, Lab, Rgb};
pub use dither::{
    dither_image, Atkinson, Dither, DitherAlgorithm, DitherOptions, FloydSteinberg, Kernel,
};
pub use output::{classify_rgb, pack_4bpp, DitheredImage};
pub use palette::{
    CacheStats, ColorCache, ColorMatcher, PaletteCatalog, PaletteColor, PaletteEntry,
    ParseColorError, SPECTRA6_RGB,
};
pub use preprocess::boost_saturation;
