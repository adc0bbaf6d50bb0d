//! CIEDE2000 color difference
//!
//! Implements ΔE00 with unit weighting factors (kL = kC = kH = 1), following
//! Sharma, Wu and Dalal, "The CIEDE2000 Color-Difference Formula:
//! Implementation Notes, Supplementary Test Data, and Mathematical
//! Observations" (2005).
//!
//! The result is only used as a comparison key: smaller means perceptually
//! closer. Nothing downstream depends on its absolute scale.

use super::lab::Lab;

/// 25^7, the chroma normalization constant shared by G and R_C.
const POW25_7: f32 = 6_103_515_625.0;

/// Hue angle in degrees in `[0, 360)`. Achromatic points get 0.
#[inline]
fn hue_degrees(b: f32, a_prime: f32) -> f32 {
    if b == 0.0 && a_prime == 0.0 {
        0.0
    } else {
        b.atan2(a_prime).to_degrees().rem_euclid(360.0)
    }
}

/// `sqrt(c^7 / (c^7 + 25^7))`
#[inline]
fn chroma_ratio(c: f32) -> f32 {
    let c7 = c.powi(7);
    (c7 / (c7 + POW25_7)).sqrt()
}

/// Perceptual distance ΔE00 between two CIELAB colors.
///
/// Symmetric and non-negative; zero exactly when both inputs are equal.
///
/// ```
/// use spectra_dither::{ciede2000, Lab};
///
/// let a = Lab::new(50.0, 2.6772, -79.7751);
/// let b = Lab::new(50.0, 0.0, -82.7485);
/// assert!((ciede2000(a, b) - 2.0425).abs() < 1e-3);
/// ```
pub fn ciede2000(lab1: Lab, lab2: Lab) -> f32 {
    // Chroma rotation: G compensates a* for near-neutral colors
    let c_bar = 0.5 * (lab1.chroma() + lab2.chroma());
    let g = 0.5 * (1.0 - chroma_ratio(c_bar));

    let a1p = (1.0 + g) * lab1.a;
    let a2p = (1.0 + g) * lab2.a;
    let c1p = a1p.hypot(lab1.b);
    let c2p = a2p.hypot(lab2.b);
    let h1p = hue_degrees(lab1.b, a1p);
    let h2p = hue_degrees(lab2.b, a2p);

    let delta_lp = lab2.l - lab1.l;
    let delta_cp = c2p - c1p;

    let chroma_product = c1p * c2p;
    let delta_hp_angle = if chroma_product == 0.0 {
        0.0
    } else {
        let d = h2p - h1p;
        if d > 180.0 {
            d - 360.0
        } else if d < -180.0 {
            d + 360.0
        } else {
            d
        }
    };
    let delta_hp = 2.0 * chroma_product.sqrt() * (0.5 * delta_hp_angle).to_radians().sin();

    let l_bar_p = 0.5 * (lab1.l + lab2.l);
    let c_bar_p = 0.5 * (c1p + c2p);
    let h_bar_p = if chroma_product == 0.0 {
        h1p + h2p
    } else if (h1p - h2p).abs() <= 180.0 {
        0.5 * (h1p + h2p)
    } else if h1p + h2p < 360.0 {
        0.5 * (h1p + h2p + 360.0)
    } else {
        0.5 * (h1p + h2p - 360.0)
    };

    let t = 1.0 - 0.17 * (h_bar_p - 30.0).to_radians().cos()
        + 0.24 * (2.0 * h_bar_p).to_radians().cos()
        + 0.32 * (3.0 * h_bar_p + 6.0).to_radians().cos()
        - 0.20 * (4.0 * h_bar_p - 63.0).to_radians().cos();

    let delta_theta = 30.0 * (-((h_bar_p - 275.0) / 25.0).powi(2)).exp();
    let r_c = 2.0 * chroma_ratio(c_bar_p);
    let l_offset_sq = (l_bar_p - 50.0).powi(2);
    let s_l = 1.0 + 0.015 * l_offset_sq / (20.0 + l_offset_sq).sqrt();
    let s_c = 1.0 + 0.045 * c_bar_p;
    let s_h = 1.0 + 0.015 * c_bar_p * t;
    let r_t = -(2.0 * delta_theta).to_radians().sin() * r_c;

    let dl = delta_lp / s_l;
    let dc = delta_cp / s_c;
    let dh = delta_hp / s_h;

    (dl * dl + dc * dc + dh * dh + r_t * dc * dh).max(0.0).sqrt()
}
