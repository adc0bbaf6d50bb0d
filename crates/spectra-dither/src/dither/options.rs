//! Dithering options and configuration.

use super::DitherAlgorithm;

/// Configuration for one conversion.
///
/// # Defaults
///
/// - Algorithm: Floyd-Steinberg
/// - Saturation boost: 1.0 (identity)
/// - Boost enabled: `true` (no effect while the factor is 1.0)
/// - Serpentine scanning: enabled
///
/// # Example
///
/// ```
/// use spectra_dither::{DitherAlgorithm, DitherOptions};
///
/// let options = DitherOptions::new()
///     .algorithm(DitherAlgorithm::Atkinson)
///     .saturation_boost(1.4);
/// assert!(options.applies_boost());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DitherOptions {
    /// Diffusion kernel.
    ///
    /// Default: [`DitherAlgorithm::FloydSteinberg`]
    pub algorithm: DitherAlgorithm,

    /// HSL saturation multiplier applied before dithering.
    ///
    /// Values at or below 1.0 leave the image untouched.
    ///
    /// Default: `1.0`
    pub saturation_boost: f32,

    /// Master switch for the saturation pre-pass.
    ///
    /// Default: `true`
    pub boost_enabled: bool,

    /// Alternate scan direction on every other row.
    ///
    /// Default: `true`
    pub serpentine: bool,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self {
            algorithm: DitherAlgorithm::default(),
            saturation_boost: 1.0,
            boost_enabled: true,
            serpentine: true,
        }
    }
}

impl DitherOptions {
    /// Create new dither options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn algorithm(mut self, algorithm: DitherAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    #[inline]
    pub fn saturation_boost(mut self, factor: f32) -> Self {
        self.saturation_boost = factor;
        self
    }

    #[inline]
    pub fn boost_enabled(mut self, enabled: bool) -> Self {
        self.boost_enabled = enabled;
        self
    }

    #[inline]
    pub fn serpentine(mut self, enabled: bool) -> Self {
        self.serpentine = enabled;
        self
    }

    /// Whether the saturation pre-pass runs with these options.
    #[inline]
    pub fn applies_boost(&self) -> bool {
        self.boost_enabled && self.saturation_boost > 1.0
    }
}
