//! SpectraDitherer builder, the primary entry point for the crate.
//!
//! [`SpectraDitherer`] bundles a shared [`PaletteCatalog`] with
//! [`DitherOptions`] behind a fluent builder.

use std::sync::Arc;

use crate::buffer::PixelBuffer;
use crate::dither::{dither_image, DitherAlgorithm, DitherOptions};
use crate::output::DitheredImage;
use crate::palette::PaletteCatalog;

use super::DitherError;

/// High-level dithering builder for Spectra 6 panels.
///
/// # Design
///
/// - The catalog is held in an [`Arc`]; cloning a ditherer, or building
///   several from one catalog, never recomputes palette LAB values
/// - Configuration methods consume and return `self`
/// - [`dither()`](Self::dither) takes `&self`, so one ditherer can serve
///   many images, from many threads
///
/// # Example
///
/// ```
/// use spectra_dither::{DitherAlgorithm, PixelBuffer, Rgb, SpectraDitherer};
///
/// let ditherer = SpectraDitherer::new()
///     .algorithm(DitherAlgorithm::Atkinson)
///     .saturation(1.3);
///
/// let pixels = PixelBuffer::filled(Rgb::new(128, 128, 128), 2, 2).unwrap();
/// let result = ditherer.dither(pixels);
///
/// assert_eq!(result.width(), 2);
/// assert_eq!(result.height(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SpectraDitherer {
    catalog: Arc<PaletteCatalog>,
    options: DitherOptions,
}

impl SpectraDitherer {
    /// Ditherer with a freshly built catalog and default options.
    pub fn new() -> Self {
        Self::with_catalog(Arc::new(PaletteCatalog::new()))
    }

    /// Ditherer sharing an existing catalog.
    pub fn with_catalog(catalog: Arc<PaletteCatalog>) -> Self {
        Self {
            catalog,
            options: DitherOptions::default(),
        }
    }

    /// Replace all options at once.
    #[inline]
    pub fn options(mut self, options: DitherOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the dithering algorithm.
    #[inline]
    pub fn algorithm(mut self, algorithm: DitherAlgorithm) -> Self {
        self.options = self.options.algorithm(algorithm);
        self
    }

    /// Set the saturation boost factor (1.0 disables it).
    #[inline]
    pub fn saturation(mut self, factor: f32) -> Self {
        self.options = self.options.saturation_boost(factor);
        self
    }

    /// Enable or disable the saturation pre-pass regardless of its factor.
    #[inline]
    pub fn boost_enabled(mut self, enabled: bool) -> Self {
        self.options = self.options.boost_enabled(enabled);
        self
    }

    /// Set serpentine scanning mode.
    #[inline]
    pub fn serpentine(mut self, enabled: bool) -> Self {
        self.options = self.options.serpentine(enabled);
        self
    }

    #[inline]
    pub fn catalog(&self) -> &Arc<PaletteCatalog> {
        &self.catalog
    }

    #[inline]
    pub fn dither_options(&self) -> &DitherOptions {
        &self.options
    }

    /// Dither an owned buffer.
    ///
    /// The buffer becomes the working copy for the scan and is returned,
    /// quantized, inside the [`DitheredImage`].
    pub fn dither(&self, pixels: PixelBuffer) -> DitheredImage {
        dither_image(pixels, &self.catalog, &self.options)
    }

    /// Copy `bytes` into a fresh working buffer and dither it.
    ///
    /// # Errors
    ///
    /// Fails if `bytes.len()` is not `width * height * 3`.
    pub fn dither_bytes(
        &self,
        bytes: &[u8],
        width: usize,
        height: usize,
    ) -> Result<DitheredImage, DitherError> {
        let pixels = PixelBuffer::from_rgb_bytes(bytes.to_vec(), width, height)?;
        Ok(self.dither(pixels))
    }
}

impl Default for SpectraDitherer {
    fn default() -> Self {
        Self::new()
    }
}
