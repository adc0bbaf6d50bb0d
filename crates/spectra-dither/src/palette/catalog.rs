//! The Spectra 6 hardware palette
//!
//! The six inks and their controller indices are fixed by the panel. The
//! device driver keeps its own copy of this table, so the RGB triples here
//! must stay byte-identical to it.

use std::fmt;

use tracing::debug;

use crate::color::{Lab, Rgb};

/// One of the six inks a Spectra 6 panel can show.
///
/// Variants are listed in palette declaration order, which is also the
/// tie-break order used by nearest-color matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteColor {
    Black,
    White,
    Yellow,
    Red,
    Blue,
    Green,
}

impl PaletteColor {
    /// All inks in declaration order.
    pub const ALL: [PaletteColor; 6] = [
        PaletteColor::Black,
        PaletteColor::White,
        PaletteColor::Yellow,
        PaletteColor::Red,
        PaletteColor::Blue,
        PaletteColor::Green,
    ];

    /// Controller index of this ink. Index 4 is unused by the hardware.
    #[inline]
    pub const fn hardware_index(self) -> u8 {
        match self {
            PaletteColor::Black => 0,
            PaletteColor::White => 1,
            PaletteColor::Yellow => 2,
            PaletteColor::Red => 3,
            PaletteColor::Blue => 5,
            PaletteColor::Green => 6,
        }
    }

    /// Look up an ink by its controller index.
    pub const fn from_hardware_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(PaletteColor::Black),
            1 => Some(PaletteColor::White),
            2 => Some(PaletteColor::Yellow),
            3 => Some(PaletteColor::Red),
            5 => Some(PaletteColor::Blue),
            6 => Some(PaletteColor::Green),
            _ => None,
        }
    }

    /// Position of this ink in declaration order (0..6).
    #[inline]
    pub const fn position(self) -> usize {
        self as usize
    }

    /// Exact RGB triple the device expects for this ink.
    #[inline]
    pub const fn rgb(self) -> Rgb {
        SPECTRA6_RGB[self as usize]
    }

    /// Lowercase ink name.
    pub const fn name(self) -> &'static str {
        match self {
            PaletteColor::Black => "black",
            PaletteColor::White => "white",
            PaletteColor::Yellow => "yellow",
            PaletteColor::Red => "red",
            PaletteColor::Blue => "blue",
            PaletteColor::Green => "green",
        }
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// RGB triples of the six inks, in declaration order.
pub const SPECTRA6_RGB: [Rgb; 6] = [
    Rgb::new(0, 0, 0),
    Rgb::new(255, 255, 255),
    Rgb::new(255, 255, 0),
    Rgb::new(255, 0, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(0, 255, 0),
];

/// A palette entry with its precomputed CIELAB value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteEntry {
    pub color: PaletteColor,
    pub rgb: Rgb,
    pub lab: Lab,
    pub name: &'static str,
    pub hardware_index: u8,
}

/// The fixed hardware palette with LAB values computed once.
///
/// Build one with [`PaletteCatalog::new`] and share it (by reference or
/// `Arc`) across every conversion. It has no interior mutability, so it is
/// `Send + Sync` and can never change after construction.
///
/// ```
/// use spectra_dither::{PaletteCatalog, PaletteColor};
///
/// let catalog = PaletteCatalog::new();
/// assert_eq!(catalog.len(), 6);
/// assert_eq!(catalog.entry(PaletteColor::Blue).hardware_index, 5);
/// ```
#[derive(Debug, Clone)]
pub struct PaletteCatalog {
    entries: [PaletteEntry; 6],
}

impl PaletteCatalog {
    /// Build the catalog, converting every ink to CIELAB.
    pub fn new() -> Self {
        let entries = PaletteColor::ALL.map(|color| PaletteEntry {
            color,
            rgb: color.rgb(),
            lab: Lab::from(color.rgb()),
            name: color.name(),
            hardware_index: color.hardware_index(),
        });

        for entry in &entries {
            debug!(
                name = entry.name,
                index = entry.hardware_index,
                l = entry.lab.l,
                a = entry.lab.a,
                b = entry.lab.b,
                "palette entry"
            );
        }
        debug!(entries = entries.len(), "palette catalog initialized");

        Self { entries }
    }

    /// Entries in declaration order.
    #[inline]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// The entry for a given ink.
    #[inline]
    pub fn entry(&self, color: PaletteColor) -> &PaletteEntry {
        &self.entries[color.position()]
    }

    /// Number of entries. Always 6.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; the catalog is never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the ink whose RGB equals `rgb` exactly, if any.
    pub fn exact(&self, rgb: Rgb) -> Option<PaletteColor> {
        self.entries.iter().find(|e| e.rgb == rgb).map(|e| e.color)
    }
}

impl Default for PaletteCatalog {
    fn default() -> Self {
        Self::new()
    }
}
