//! AdaptiveMapper: a cheap, LAB-free alternative to [`ColorMatcher`]
//!
//! Matching here is a weighted squared RGB distance,
//! `2·ΔR² + 4·ΔG² + 3·ΔB²`, against the six inks. The statistics pass
//! samples the image for brightness, saturation and dominant hues; the
//! numbers are for reporting only and never change what the returned
//! matcher picks.
//!
//! Nothing in the default dithering pipeline uses this module.
//!
//! [`ColorMatcher`]: crate::ColorMatcher

use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::color::{Hsl, Rgb};
use crate::output::DitheredImage;
use crate::palette::PaletteColor;

/// Every `SAMPLE_STRIDE`-th pixel contributes to [`ImageStats`].
pub const SAMPLE_STRIDE: usize = 10;

/// Saturation (percent) above which a sample counts toward a hue bucket.
pub const HUE_SATURATION_THRESHOLD: f32 = 50.0;

const WEIGHT_R: i32 = 2;
const WEIGHT_G: i32 = 4;
const WEIGHT_B: i32 = 3;

/// Min, max and mean of one sampled quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Range {
    pub min: f32,
    pub max: f32,
    pub avg: f32,
}

/// Number of strongly saturated samples per hue bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HueCounts {
    pub red: usize,
    pub yellow: usize,
    pub green: usize,
    pub blue: usize,
}

/// Global statistics of a sampled image.
///
/// - `brightness`: mean of the three channels, `0..=255`
/// - `saturation`: `(max - min) / max` of the channels, in percent
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ImageStats {
    pub samples: usize,
    pub brightness: Range,
    pub saturation: Range,
    pub hues: HueCounts,
}

struct Accumulator {
    min: f32,
    max: f32,
    sum: f64,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
            sum: 0.0,
        }
    }

    fn push(&mut self, v: f32) {
        self.min = self.min.min(v);
        self.max = self.max.max(v);
        self.sum += v as f64;
    }

    fn finish(self, count: usize) -> Range {
        if count == 0 {
            return Range::default();
        }
        Range {
            min: self.min,
            max: self.max,
            avg: (self.sum / count as f64) as f32,
        }
    }
}

fn brightness(rgb: Rgb) -> f32 {
    (rgb.r as f32 + rgb.g as f32 + rgb.b as f32) / 3.0
}

fn saturation_percent(rgb: Rgb) -> f32 {
    let max = rgb.r.max(rgb.g).max(rgb.b);
    let min = rgb.r.min(rgb.g).min(rgb.b);
    if max == 0 {
        0.0
    } else {
        (max - min) as f32 / max as f32 * 100.0
    }
}

impl HueCounts {
    /// Bucket by HSL hue: red below 30° or from 330°, yellow 30°..90°,
    /// green 90°..180°, blue 180°..300°. Magentas are not counted.
    fn record(&mut self, rgb: Rgb) {
        let degrees = Hsl::from(rgb).h * 360.0;
        match degrees {
            d if !(30.0..330.0).contains(&d) => self.red += 1,
            d if d < 90.0 => self.yellow += 1,
            d if d < 180.0 => self.green += 1,
            d if d < 300.0 => self.blue += 1,
            _ => {}
        }
    }
}

/// Squared, channel-weighted RGB distance.
#[inline]
pub fn weighted_distance(a: Rgb, b: Rgb) -> i32 {
    let dr = a.r as i32 - b.r as i32;
    let dg = a.g as i32 - b.g as i32;
    let db = a.b as i32 - b.b as i32;
    WEIGHT_R * dr * dr + WEIGHT_G * dg * dg + WEIGHT_B * db * db
}

/// Nearest ink by [`weighted_distance`]. Ties go to the ink declared first.
pub fn nearest_weighted(rgb: Rgb) -> PaletteColor {
    let mut best = PaletteColor::White;
    let mut best_dist = i32::MAX;
    for color in PaletteColor::ALL {
        let dist = weighted_distance(rgb, color.rgb());
        if dist < best_dist {
            best_dist = dist;
            best = color;
        }
    }
    best
}

/// Statistics pass plus the weighted-RGB matcher.
///
/// ```
/// use spectra_dither::{AdaptiveMapper, PaletteColor, PixelBuffer, Rgb};
///
/// let pixels = PixelBuffer::filled(Rgb::new(230, 30, 20), 10, 10).unwrap();
/// let (stats, matcher) = AdaptiveMapper::analyze(&pixels);
/// assert_eq!(stats.samples, 10);
/// assert_eq!(stats.hues.red, 10);
/// assert_eq!(matcher(Rgb::new(230, 30, 20)), PaletteColor::Red);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AdaptiveMapper;

impl AdaptiveMapper {
    /// Sample `pixels` and return the statistics with a matching function.
    pub fn analyze(pixels: &PixelBuffer) -> (ImageStats, impl Fn(Rgb) -> PaletteColor + Copy) {
        let stats = Self::stats(pixels);
        debug!(
            samples = stats.samples,
            brightness_avg = stats.brightness.avg,
            saturation_avg = stats.saturation.avg,
            red = stats.hues.red,
            yellow = stats.hues.yellow,
            green = stats.hues.green,
            blue = stats.hues.blue,
            "adaptive statistics"
        );
        (stats, nearest_weighted)
    }

    /// Statistics only.
    pub fn stats(pixels: &PixelBuffer) -> ImageStats {
        let mut brightness_acc = Accumulator::new();
        let mut saturation_acc = Accumulator::new();
        let mut hues = HueCounts::default();
        let mut samples = 0;

        for rgb in pixels.pixels().step_by(SAMPLE_STRIDE) {
            samples += 1;
            brightness_acc.push(brightness(rgb));
            let saturation = saturation_percent(rgb);
            saturation_acc.push(saturation);
            if saturation > HUE_SATURATION_THRESHOLD {
                hues.record(rgb);
            }
        }

        ImageStats {
            samples,
            brightness: brightness_acc.finish(samples),
            saturation: saturation_acc.finish(samples),
            hues,
        }
    }

    /// Map every pixel straight to its nearest ink, without diffusion.
    pub fn quantize(mut pixels: PixelBuffer) -> DitheredImage {
        let mut colors = Vec::with_capacity(pixels.len());
        for y in 0..pixels.height() {
            for x in 0..pixels.width() {
                let color = nearest_weighted(pixels.get(x, y));
                pixels.set(x, y, color.rgb());
                colors.push(color);
            }
        }
        DitheredImage::new(pixels, colors)
    }
}
