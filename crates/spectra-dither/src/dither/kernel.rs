//! Error diffusion kernel definitions.
//!
//! Each kernel is a small table of `(dx, dy, weight)` entries relative to the
//! pixel being quantized, plus a divisor. Offsets are written for a
//! left-to-right row; whether they flip on right-to-left rows is a property
//! of the kernel.

/// An error diffusion kernel.
///
/// Each neighbor at `(x + dx, y + dy)` receives `residue * weight / divisor`.
/// The total fraction propagated is `sum(weights) / divisor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    /// (dx, dy, weight) entries for error diffusion.
    ///
    /// - `dx`: horizontal offset (positive = right)
    /// - `dy`: vertical offset (0 = current row, positive = below)
    /// - `weight`: numerator, the divisor is separate
    pub entries: &'static [(i32, i32, u8)],

    /// Total divisor for normalizing weights.
    pub divisor: u8,

    /// Negate `dx` on rows scanned right-to-left.
    pub mirror_on_reverse: bool,
}

impl Kernel {
    /// Sum of all weights.
    pub fn weight_sum(&self) -> u32 {
        self.entries.iter().map(|&(_, _, w)| w as u32).sum()
    }

    /// Fraction of the residue this kernel propagates.
    pub fn propagation(&self) -> f32 {
        self.weight_sum() as f32 / self.divisor as f32
    }

    /// Horizontal offset to apply on a row scanned in the given direction.
    #[inline]
    pub fn effective_dx(&self, dx: i32, reverse: bool) -> i32 {
        if reverse && self.mirror_on_reverse {
            -dx
        } else {
            dx
        }
    }
}

/// Floyd-Steinberg dithering kernel.
///
/// Distributes error to 4 neighbors with 100% total propagation (16/16).
/// Mirrored on right-to-left rows so it always points forward.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
    mirror_on_reverse: true,
};

/// Atkinson dithering kernel.
///
/// Distributes error to 6 neighbors with 75% total propagation (6/8); the
/// remaining 2/8 is dropped.
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
///
/// Offsets are not mirrored on right-to-left rows. On those rows the two
/// same-row entries land on pixels already quantized and are dropped.
pub const ATKINSON: Kernel = Kernel {
    entries: &[
        (1, 0, 1),  // right
        (2, 0, 1),  // two right
        (-1, 1, 1), // bottom-left
        (0, 1, 1),  // bottom
        (1, 1, 1),  // bottom-right
        (0, 2, 1),  // two below
    ],
    divisor: 8,
    mirror_on_reverse: false,
};
