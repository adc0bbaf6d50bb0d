pub mod png_io;

pub use png_io::{composite_over_white, decode_png, encode_png, encode_rgb_png};
