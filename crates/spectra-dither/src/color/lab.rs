//! CIELAB color space
//!
//! CIELAB is the space palette matching compares colors in. Conversion goes
//! sRGB bytes -> linear RGB -> CIE XYZ (D65) -> L*a*b*.
//!
//! The constants here are the ones the device pipeline has always used
//! (four-digit sRGB matrix, D65 white point `0.95047, 1.0, 1.08883`, and the
//! `7.787 t + 16/116` linear segment). Distances are only ever compared
//! against other points produced by this same conversion, so changing any
//! constant silently changes which palette entry wins near decision
//! boundaries.

use super::lut::SRGB8_TO_LINEAR;
use super::rgb::Rgb;

/// D65 reference white, X component.
const WHITE_X: f32 = 0.95047;
/// D65 reference white, Y component.
const WHITE_Y: f32 = 1.0;
/// D65 reference white, Z component.
const WHITE_Z: f32 = 1.08883;

/// Below this ratio `f(t)` switches from the cube root to its linear segment.
const EPSILON: f32 = 0.008856;

/// A color in CIE L*a*b* space.
///
/// # Components
///
/// - `l`: Lightness, 0.0 (black) to 100.0 (white)
/// - `a`: Green-red axis, roughly -128..127
/// - `b`: Blue-yellow axis, roughly -128..127
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// Lightness: 0.0 (black) to 100.0 (white)
    pub l: f32,
    /// Green (negative) to red (positive)
    pub a: f32,
    /// Blue (negative) to yellow (positive)
    pub b: f32,
}

impl Lab {
    /// Create a new Lab color.
    #[inline]
    pub fn new(l: f32, a: f32, b: f32) -> Self {
        Self { l, a, b }
    }

    /// Chroma: distance from the neutral axis, `sqrt(a² + b²)`.
    #[inline]
    pub fn chroma(self) -> f32 {
        (self.a * self.a + self.b * self.b).sqrt()
    }
}

/// CIELAB companding function.
#[inline]
fn lab_f(t: f32) -> f32 {
    if t > EPSILON {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

impl From<Rgb> for Lab {
    /// Convert an 8-bit sRGB color to CIELAB.
    ///
    /// ```
    /// use spectra_dither::{Lab, Rgb};
    ///
    /// let white = Lab::from(Rgb::new(255, 255, 255));
    /// assert!((white.l - 100.0).abs() < 0.01);
    ///
    /// let black = Lab::from(Rgb::new(0, 0, 0));
    /// assert!(black.l.abs() < 0.01);
    /// ```
    fn from(rgb: Rgb) -> Self {
        let r = SRGB8_TO_LINEAR[rgb.r as usize];
        let g = SRGB8_TO_LINEAR[rgb.g as usize];
        let b = SRGB8_TO_LINEAR[rgb.b as usize];

        let x = (r * 0.4124 + g * 0.3576 + b * 0.1805) / WHITE_X;
        let y = (r * 0.2126 + g * 0.7152 + b * 0.0722) / WHITE_Y;
        let z = (r * 0.0193 + g * 0.1192 + b * 0.9505) / WHITE_Z;

        let fx = lab_f(x);
        let fy = lab_f(y);
        let fz = lab_f(z);

        Self {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}
