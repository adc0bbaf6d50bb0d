//! Image preprocessing before dithering.
//!
//! Six inks cover a small part of the sRGB gamut, and dithered output looks
//! washed out next to the source. The only pre-pass is an HSL saturation
//! boost that pushes colors outward before quantization.

mod saturation;

pub use saturation::boost_saturation;
