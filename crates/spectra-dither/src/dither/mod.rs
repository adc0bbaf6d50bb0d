//! Error diffusion dithering onto the Spectra 6 palette.
//!
//! # Algorithms
//!
//! - **Floyd-Steinberg**: 100% propagation, kernel mirrored on reverse rows (default)
//! - **Atkinson**: 75% propagation, kernel never mirrored
//!
//! # Architecture
//!
//! Both algorithms implement the [`Dither`] trait and share one scan loop,
//! [`dither_with_kernel`]. The scan works in place on the byte buffer it
//! owns: each visited pixel is overwritten with its matched ink and its
//! residue is added to neighbors that have not been visited yet, rounding
//! and clamping every touched channel into `0..=255` straight away.
//!
//! Visit order is load-bearing. A pixel's observed color depends on residue
//! pushed into it by earlier pixels, so one image is always scanned on a
//! single thread.

mod atkinson;
mod floyd_steinberg;
mod kernel;
mod options;

use std::fmt;
use std::str::FromStr;

use tracing::debug;

pub use atkinson::Atkinson;
pub use floyd_steinberg::FloydSteinberg;
pub use kernel::*;
pub use options::DitherOptions;

use crate::api::DitherError;
use crate::buffer::PixelBuffer;
use crate::output::DitheredImage;
use crate::palette::{ColorCache, ColorMatcher, PaletteCatalog, PaletteColor};
use crate::preprocess::boost_saturation;

/// Dither algorithm selection.
///
/// Parses from and displays as `floyd-steinberg` / `atkinson`.
///
/// ```
/// use spectra_dither::DitherAlgorithm;
///
/// let algorithm: DitherAlgorithm = "atkinson".parse().unwrap();
/// assert_eq!(algorithm, DitherAlgorithm::Atkinson);
/// assert_eq!(DitherAlgorithm::FloydSteinberg.to_string(), "floyd-steinberg");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DitherAlgorithm {
    /// Floyd-Steinberg error diffusion (100% propagation).
    #[default]
    FloydSteinberg,

    /// Atkinson error diffusion (75% propagation).
    Atkinson,
}

impl DitherAlgorithm {
    /// Every supported algorithm.
    pub const ALL: [DitherAlgorithm; 2] = [DitherAlgorithm::FloydSteinberg, DitherAlgorithm::Atkinson];

    /// The diffusion kernel for this algorithm.
    pub fn kernel(self) -> &'static Kernel {
        match self {
            DitherAlgorithm::FloydSteinberg => &FLOYD_STEINBERG,
            DitherAlgorithm::Atkinson => &ATKINSON,
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            DitherAlgorithm::FloydSteinberg => "floyd-steinberg",
            DitherAlgorithm::Atkinson => "atkinson",
        }
    }

    fn ditherer(self) -> &'static dyn Dither {
        match self {
            DitherAlgorithm::FloydSteinberg => &FloydSteinberg,
            DitherAlgorithm::Atkinson => &Atkinson,
        }
    }
}

impl fmt::Display for DitherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DitherAlgorithm {
    type Err = DitherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "floyd-steinberg" | "floyd_steinberg" | "floydsteinberg" => {
                Ok(DitherAlgorithm::FloydSteinberg)
            }
            "atkinson" => Ok(DitherAlgorithm::Atkinson),
            _ => Err(DitherError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Trait for error diffusion dithering algorithms.
///
/// Implementors quantize an owned working buffer onto the palette using the
/// matcher they are given. Saturation boosting and cache setup happen in
/// [`dither_image`], not here.
pub trait Dither {
    /// Quantize `pixels` in place and return them as a [`DitheredImage`].
    fn dither(
        &self,
        pixels: PixelBuffer,
        matcher: &mut ColorMatcher<'_>,
        options: &DitherOptions,
    ) -> DitheredImage;
}

/// Core error diffusion loop parameterized by kernel.
///
/// Rows are visited top to bottom. With `serpentine` set, odd rows run
/// right-to-left. Residue (`current - matched`, per channel) is spread over
/// the kernel entries; targets outside the image, and same-row targets the
/// scan has already passed, are dropped.
pub fn dither_with_kernel(
    mut pixels: PixelBuffer,
    matcher: &mut ColorMatcher<'_>,
    kernel: &Kernel,
    serpentine: bool,
) -> DitheredImage {
    let width = pixels.width();
    let height = pixels.height();
    let mut colors = vec![PaletteColor::White; width * height];
    let divisor = kernel.divisor as f32;

    for y in 0..height {
        let reverse = serpentine && y % 2 == 1;

        let x_range: Box<dyn Iterator<Item = usize>> = if reverse {
            Box::new((0..width).rev())
        } else {
            Box::new(0..width)
        };

        for x in x_range {
            let current = pixels.get(x, y);
            let color = matcher.match_rgb(current);
            let matched = color.rgb();
            pixels.set(x, y, matched);
            colors[y * width + x] = color;

            let residue = [
                current.r as f32 - matched.r as f32,
                current.g as f32 - matched.g as f32,
                current.b as f32 - matched.b as f32,
            ];
            if residue == [0.0; 3] {
                continue;
            }

            for &(dx, dy, weight) in kernel.entries {
                let effective_dx = kernel.effective_dx(dx, reverse);

                // Already quantized
                if dy == 0 && (effective_dx < 0) != reverse {
                    continue;
                }

                let nx = x as i64 + effective_dx as i64;
                let ny = y + dy as usize;
                if nx < 0 || nx as usize >= width || ny >= height {
                    continue;
                }

                let factor = weight as f32 / divisor;
                for (channel, r) in pixels
                    .channels_mut(nx as usize, ny)
                    .iter_mut()
                    .zip(residue)
                {
                    *channel = (*channel as f32 + r * factor).round().clamp(0.0, 255.0) as u8;
                }
            }
        }
    }

    DitheredImage::new(pixels, colors)
}

/// Full conversion: optional saturation boost, fresh cache, scan.
///
/// `catalog` may be shared by any number of concurrent calls; the cache
/// is created here and dropped before returning.
pub fn dither_image(
    pixels: PixelBuffer,
    catalog: &PaletteCatalog,
    options: &DitherOptions,
) -> DitheredImage {
    let pixels = if options.applies_boost() {
        boost_saturation(&pixels, options.saturation_boost)
    } else {
        pixels
    };

    let width = pixels.width();
    let height = pixels.height();
    let mut matcher = ColorMatcher::with_cache(catalog, ColorCache::new());
    let image = options
        .algorithm
        .ditherer()
        .dither(pixels, &mut matcher, options);

    let stats = matcher.cache_stats();
    debug!(
        width,
        height,
        algorithm = %options.algorithm,
        boosted = options.applies_boost(),
        cache_hits = stats.hits,
        cache_misses = stats.misses,
        distinct_colors = stats.entries,
        "dither complete"
    );

    image
}
