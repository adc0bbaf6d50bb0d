//! The fixed Spectra 6 hardware palette and perceptual matching against it
//!
//! - [`PaletteCatalog`]: the six entries with their CIELAB values, computed
//!   once and immutable afterwards
//! - [`ColorMatcher`]: nearest-entry lookup by ΔE00, memoized through a
//!   per-call [`ColorCache`]

mod catalog;
mod error;
mod matcher;

pub use catalog::{PaletteCatalog, PaletteColor, PaletteEntry, SPECTRA6_RGB};
pub use error::ParseColorError;
pub use matcher::{nearest_uncached, CacheStats, ColorCache, ColorMatcher};
