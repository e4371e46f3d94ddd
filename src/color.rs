//! RGB color as stored in schematic parameter records.
//!
//! Altium packs colors into a Win32-style COLORREF integer: red in the low
//! byte, green in the middle, blue in the high byte.

use serde::{Deserialize, Serialize};

/// An RGB color value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Decode from the BGR-packed integer used in parameter records.
    pub fn from_coloref(value: i32) -> Self {
        Color {
            r: (value & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: ((value >> 16) & 0xFF) as u8,
        }
    }

    /// Encode to the BGR-packed integer used in parameter records.
    pub fn to_coloref(self) -> i32 {
        (self.r as i32) | ((self.g as i32) << 8) | ((self.b as i32) << 16)
    }
}
