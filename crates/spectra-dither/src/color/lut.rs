//! Gamma lookup table
//!
//! The table is generated at compile time by build.rs with the exact
//! IEC 61966-2-1 formula evaluated in f64. Input is always an 8-bit channel,
//! so a 256-entry table covers every case without interpolation.

include!(concat!(env!("OUT_DIR"), "/srgb8_lut.rs"));
