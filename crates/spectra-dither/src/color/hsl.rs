//! HSL (hue, saturation, lightness) representation
//!
//! Only the saturation booster uses this. HSL is not perceptually uniform,
//! but scaling S leaves hue and lightness untouched, which is all the
//! booster needs.

use super::rgb::Rgb;

/// A color in HSL space, all components normalized to `0.0..=1.0`.
///
/// Hue is expressed as a fraction of a full turn (0.0 = red, 1/3 = green,
/// 2/3 = blue). Achromatic colors have `h = 0.0` and `s = 0.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue as a fraction of a turn
    pub h: f32,
    /// Saturation
    pub s: f32,
    /// Lightness
    pub l: f32,
}

impl Hsl {
    /// Create a new HSL color.
    #[inline]
    pub fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    /// Multiply saturation by `factor`, capped at 1.0.
    #[inline]
    pub fn scale_saturation(self, factor: f32) -> Self {
        Self {
            s: (self.s * factor).min(1.0),
            ..self
        }
    }

    /// Convert back to 8-bit RGB, rounding each channel to the nearest byte.
    pub fn to_rgb(self) -> Rgb {
        if self.s == 0.0 {
            let v = to_byte(self.l);
            return Rgb::new(v, v, v);
        }

        let q = if self.l < 0.5 {
            self.l * (1.0 + self.s)
        } else {
            self.l + self.s - self.l * self.s
        };
        let p = 2.0 * self.l - q;

        Rgb::new(
            to_byte(hue_to_channel(p, q, self.h + 1.0 / 3.0)),
            to_byte(hue_to_channel(p, q, self.h)),
            to_byte(hue_to_channel(p, q, self.h - 1.0 / 3.0)),
        )
    }
}

#[inline]
fn to_byte(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl From<Rgb> for Hsl {
    fn from(rgb: Rgb) -> Self {
        let r = rgb.r as f32 / 255.0;
        let g = rgb.g as f32 / 255.0;
        let b = rgb.b as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = 0.5 * (max + min);

        if max == min {
            return Self::new(0.0, 0.0, l);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Self::new(h / 6.0, s, l)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primaries() {
        let red = Hsl::from(Rgb::new(255, 0, 0));
        assert!((red.h - 0.0).abs() < 1e-6);
        assert!((red.s - 1.0).abs() < 1e-6);
        assert!((red.l - 0.5).abs() < 1e-6);

        let green = Hsl::from(Rgb::new(0, 255, 0));
        assert!((green.h - 1.0 / 3.0).abs() < 1e-6);

        let blue = Hsl::from(Rgb::new(0, 0, 255));
        assert!((blue.h - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_greys_are_achromatic() {
        for v in [0u8, 1, 127, 128, 254, 255] {
            let hsl = Hsl::from(Rgb::new(v, v, v));
            assert_eq!(hsl.s, 0.0);
            assert_eq!(hsl.to_rgb(), Rgb::new(v, v, v));
        }
    }

    #[test]
    fn test_round_trip_is_exact_on_sample_grid() {
        for r in (0..=255u8).step_by(17) {
            for g in (0..=255u8).step_by(17) {
                for b in (0..=255u8).step_by(17) {
                    let rgb = Rgb::new(r, g, b);
                    assert_eq!(Hsl::from(rgb).to_rgb(), rgb, "round trip failed for {rgb}");
                }
            }
        }
    }

    #[test]
    fn test_scale_saturation_caps_at_one() {
        let hsl = Hsl::new(0.25, 0.8, 0.4).scale_saturation(2.0);
        assert_eq!(hsl.s, 1.0);
        assert_eq!(hsl.h, 0.25);
        assert_eq!(hsl.l, 0.4);
    }

    #[test]
    fn test_scale_saturation_moves_away_from_grey() {
        let muted = Rgb::new(160, 110, 100);
        let boosted = Hsl::from(muted).scale_saturation(1.5).to_rgb();
        let spread = |c: Rgb| c.r.max(c.g).max(c.b) - c.r.min(c.g).min(c.b);
        assert!(spread(boosted) > spread(muted));
    }
}
