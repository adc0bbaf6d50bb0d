//! Color types and conversion utilities
//!
//! - [`Rgb`]: 8-bit sRGB, the pixel format of every buffer the engine touches
//! - [`Lab`]: CIELAB, where palette matching measures distance
//! - [`Hsl`]: hue/saturation/lightness, used by the saturation booster
//! - [`ciede2000`]: the perceptual distance between two [`Lab`] points
//!
//! # Example
//!
//! ```
//! use spectra_dither::{ciede2000, Lab, Rgb};
//!
//! let orange = Lab::from(Rgb::new(255, 128, 0));
//! let red = Lab::from(Rgb::new(255, 0, 0));
//! let yellow = Lab::from(Rgb::new(255, 255, 0));
//!
//! // Both are plausible, but the distances tell them apart
//! assert!(ciede2000(orange, red) != ciede2000(orange, yellow));
//! ```

mod ciede2000;
mod hsl;
mod lab;
mod lut;
mod rgb;

pub use ciede2000::ciede2000;
pub use hsl::Hsl;
pub use lab::Lab;
pub use rgb::Rgb;
