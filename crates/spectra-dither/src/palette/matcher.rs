//! Nearest-ink matching by CIEDE2000, memoized per conversion

use std::collections::HashMap;

use super::catalog::{PaletteCatalog, PaletteColor};
use crate::color::{ciede2000, Lab, Rgb};

/// Hit/miss counters of a [`ColorCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

impl CacheStats {
    /// Fraction of lookups served from the cache, 0.0 when nothing was looked up.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Scratch memoization of RGB -> ink results.
///
/// Keyed by [`Rgb::packed`]. One cache belongs to one conversion call and is
/// dropped with it; results never depend on whether an entry was cached.
#[derive(Debug, Default)]
pub struct ColorCache {
    map: HashMap<u32, PaletteColor>,
    hits: u64,
    misses: u64,
}

impl ColorCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn get(&mut self, key: u32) -> Option<PaletteColor> {
        let found = self.map.get(&key).copied();
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    #[inline]
    fn insert(&mut self, key: u32, color: PaletteColor) {
        self.map.insert(key, color);
    }

    /// Number of distinct colors memoized.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Forget every entry and reset the counters.
    pub fn clear(&mut self) {
        self.map.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.map.len(),
        }
    }
}

/// Finds the nearest palette ink for an RGB color.
///
/// Borrows a shared [`PaletteCatalog`] and owns the [`ColorCache`] for the
/// call it serves.
///
/// ```
/// use spectra_dither::{ColorMatcher, PaletteCatalog, PaletteColor, Rgb};
///
/// let catalog = PaletteCatalog::new();
/// let mut matcher = ColorMatcher::new(&catalog);
/// assert_eq!(matcher.match_rgb(Rgb::new(240, 10, 20)), PaletteColor::Red);
/// assert_eq!(matcher.match_rgb(Rgb::new(240, 10, 20)), PaletteColor::Red);
/// assert_eq!(matcher.cache_stats().hits, 1);
/// ```
#[derive(Debug)]
pub struct ColorMatcher<'a> {
    catalog: &'a PaletteCatalog,
    cache: ColorCache,
}

impl<'a> ColorMatcher<'a> {
    /// Matcher with a fresh, empty cache.
    pub fn new(catalog: &'a PaletteCatalog) -> Self {
        Self::with_cache(catalog, ColorCache::new())
    }

    /// Matcher reusing a caller-supplied cache.
    pub fn with_cache(catalog: &'a PaletteCatalog, cache: ColorCache) -> Self {
        Self { catalog, cache }
    }

    #[inline]
    pub fn catalog(&self) -> &'a PaletteCatalog {
        self.catalog
    }

    /// Nearest ink to `rgb`, served from the cache when possible.
    #[inline]
    pub fn match_rgb(&mut self, rgb: Rgb) -> PaletteColor {
        let key = rgb.packed();
        if let Some(color) = self.cache.get(key) {
            return color;
        }
        let color = nearest_uncached(self.catalog, rgb);
        self.cache.insert(key, color);
        color
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Give the cache back, e.g. to inspect or reuse it.
    pub fn into_cache(self) -> ColorCache {
        self.cache
    }
}

/// Nearest ink to `rgb` by ΔE00, computed without any cache.
///
/// The search starts from White and only a strictly smaller distance
/// replaces the current best, so on an exact tie the entry declared first
/// wins.
pub fn nearest_uncached(catalog: &PaletteCatalog, rgb: Rgb) -> PaletteColor {
    let lab = Lab::from(rgb);
    let mut best = PaletteColor::White;
    let mut best_dist = f32::INFINITY;

    for entry in catalog.entries() {
        let dist = ciede2000(lab, entry.lab);
        if dist < best_dist {
            best_dist = dist;
            best = entry.color;
        }
    }

    best
}
