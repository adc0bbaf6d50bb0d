//! Output types for the dithering pipeline.
//!
//! - [`DitheredImage`]: the quantized buffer handed back to the caller
//! - [`device`]: the panel driver's side of the contract, its threshold
//!   classifier and 4-bit framebuffer packing

pub mod device;
mod dithered_image;

pub use device::{classify_rgb, pack_4bpp};
pub use dithered_image::DitheredImage;
