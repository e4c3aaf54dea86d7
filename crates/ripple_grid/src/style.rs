//! Cell colours derived from cell values.

use crate::config::LOCK_THRESHOLD;
use crate::rules::locked_at;
use crate::types::CellValue;
use serde::{Deserialize, Serialize};

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a colour from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Visual class of a cell.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
pub enum CellTone {
    /// At or above the lock threshold.
    Locked,
    /// Odd, unlocked.
    Odd,
    /// Even, unlocked.
    Even,
}

impl CellTone {
    /// Classifies a value under an explicit lock threshold.
    ///
    /// Locking wins over parity.
    pub fn classify(value: CellValue, threshold: CellValue) -> Self {
        if locked_at(value, threshold) {
            CellTone::Locked
        } else if value % 2 != 0 {
            CellTone::Odd
        } else {
            CellTone::Even
        }
    }

    /// Background colour.
    pub fn background(self) -> Rgb {
        match self {
            CellTone::Locked => Rgb::new(0xef, 0x44, 0x44),
            CellTone::Odd => Rgb::new(0x1a, 0x23, 0x7e),
            CellTone::Even => Rgb::new(0xe0, 0xe0, 0xe0),
        }
    }

    /// Foreground (text) colour.
    pub fn text(self) -> Rgb {
        match self {
            CellTone::Locked | CellTone::Odd => Rgb::new(0xff, 0xff, 0xff),
            CellTone::Even => Rgb::new(0x17, 0x17, 0x17),
        }
    }
}

/// Background colour for a value under the default threshold.
pub fn cell_background(value: CellValue) -> Rgb {
    CellTone::classify(value, LOCK_THRESHOLD).background()
}

/// Text colour for a value under the default threshold.
pub fn cell_text_color(value: CellValue) -> Rgb {
    CellTone::classify(value, LOCK_THRESHOLD).text()
}

/// Accessible label for a cell, e.g. `Cell value 15 (locked)`.
pub fn cell_label(value: CellValue, threshold: CellValue) -> String {
    if locked_at(value, threshold) {
        format!("Cell value {} (locked)", value)
    } else {
        format!("Cell value {}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_by_value() {
        assert_eq!(cell_background(0).to_string(), "#e0e0e0");
        assert_eq!(cell_background(7).to_string(), "#1a237e");
        assert_eq!(cell_background(15).to_string(), "#ef4444");
        assert_eq!(cell_background(16).to_string(), "#ef4444");
    }

    #[test]
    fn test_text_color_by_value() {
        assert_eq!(cell_text_color(2).to_string(), "#171717");
        assert_eq!(cell_text_color(3).to_string(), "#ffffff");
        assert_eq!(cell_text_color(20).to_string(), "#ffffff");
    }

    #[test]
    fn test_locked_beats_parity() {
        assert_eq!(CellTone::classify(17, 15), CellTone::Locked);
        assert_eq!(CellTone::classify(17, 18), CellTone::Odd);
    }

    #[test]
    fn test_label() {
        assert_eq!(cell_label(4, 15), "Cell value 4");
        assert_eq!(cell_label(15, 15), "Cell value 15 (locked)");
    }
}
