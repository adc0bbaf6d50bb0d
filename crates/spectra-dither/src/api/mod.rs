//! Public API for the spectra-dither crate.
//!
//! This module provides the high-level API: [`SpectraDitherer`] builder and
//! [`DitherError`] unified error type.

mod builder;
mod error;

pub use builder::SpectraDitherer;
pub use error::DitherError;
