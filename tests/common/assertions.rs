//! Assertion helpers for tests.

use pretty_assertions::assert_eq;

use super::fixtures::INKS;

/// Assert data starts with the PNG signature
pub fn assert_png(data: &[u8]) {
    assert!(
        data.starts_with(b"\x89PNG\r\n\x1a\n"),
        "Expected PNG image, got {} bytes starting with {:?}",
        data.len(),
        &data[..8.min(data.len())]
    );
}

/// Assert every RGB triple is one of the six hardware inks
pub fn assert_palette_closed(rgb: &[u8]) {
    for (i, px) in rgb.chunks_exact(3).enumerate() {
        assert!(
            INKS.iter().any(|ink| ink == px),
            "pixel {i} is {px:?}, not a hardware ink"
        );
    }
}

/// Assert a packed buffer holds `pixels` pixels, two per byte
pub fn assert_packed_len(packed: &[u8], pixels: usize) {
    assert_eq!(packed.len(), pixels.div_ceil(2), "packed buffer length");
}

/// Assert every nibble of a packed buffer is a valid controller index
pub fn assert_valid_nibbles(packed: &[u8]) {
    for (i, byte) in packed.iter().enumerate() {
        for nibble in [byte >> 4, byte & 0x0F] {
            assert!(
                matches!(nibble, 0 | 1 | 2 | 3 | 5 | 6),
                "byte {i} ({byte:#04x}) holds invalid index {nibble}"
            );
        }
    }
}
