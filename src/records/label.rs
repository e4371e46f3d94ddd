//! Text label record (RECORD=4).

use serde::{Deserialize, Serialize};

use super::{RecordFields, RecordKind, RecordPayload, SchPrimitive};
use crate::color::Color;
use crate::coord::{self, Coord, CoordPoint, CoordRect};
use crate::parameters::ParameterCollection;

/// Horizontal text anchoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Horizontal {
    Left,
    Center,
    Right,
}

/// Vertical text anchoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vertical {
    Bottom,
    Middle,
    Top,
}

/// Combined text anchoring, packed as the ordinal
/// `vertical * 3 + horizontal` (0-8). A pure value, never mutated after
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextJustification(i32);

impl TextJustification {
    pub const BOTTOM_LEFT: TextJustification = TextJustification(0);
    pub const BOTTOM_CENTER: TextJustification = TextJustification(1);
    pub const BOTTOM_RIGHT: TextJustification = TextJustification(2);
    pub const MIDDLE_LEFT: TextJustification = TextJustification(3);
    pub const MIDDLE_CENTER: TextJustification = TextJustification(4);
    pub const MIDDLE_RIGHT: TextJustification = TextJustification(5);
    pub const TOP_LEFT: TextJustification = TextJustification(6);
    pub const TOP_CENTER: TextJustification = TextJustification(7);
    pub const TOP_RIGHT: TextJustification = TextJustification(8);

    pub fn new(horizontal: Horizontal, vertical: Vertical) -> Self {
        TextJustification(vertical as i32 * 3 + horizontal as i32)
    }

    /// Wrap a raw ordinal as read from the JUSTIFICATION key. Out-of-range
    /// values are kept verbatim so they round-trip.
    pub fn from_ordinal(value: i32) -> Self {
        TextJustification(value)
    }

    pub fn to_ordinal(self) -> i32 {
        self.0
    }

    pub fn horizontal(self) -> Horizontal {
        match self.0.rem_euclid(3) {
            0 => Horizontal::Left,
            1 => Horizontal::Center,
            _ => Horizontal::Right,
        }
    }

    pub fn vertical(self) -> Vertical {
        match (self.0 / 3).rem_euclid(3) {
            0 => Vertical::Bottom,
            1 => Vertical::Middle,
            _ => Vertical::Top,
        }
    }
}

/// Orientation flags stored in the ORIENTATION key: bit 0 rotates the text
/// 90 degrees, bit 1 flips it. Unknown higher bits are kept for fidelity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextOrientations(i32);

impl TextOrientations {
    pub const NONE: TextOrientations = TextOrientations(0);
    pub const ROTATED: TextOrientations = TextOrientations(1);
    pub const FLIPPED: TextOrientations = TextOrientations(2);

    pub fn from_bits(bits: i32) -> Self {
        TextOrientations(bits)
    }

    pub fn bits(self) -> i32 {
        self.0
    }

    pub fn is_rotated(self) -> bool {
        self.0 & Self::ROTATED.0 != 0
    }

    pub fn is_flipped(self) -> bool {
        self.0 & Self::FLIPPED.0 != 0
    }
}

impl std::ops::BitOr for TextOrientations {
    type Output = TextOrientations;

    fn bitor(self, rhs: TextOrientations) -> TextOrientations {
        TextOrientations(self.0 | rhs.0)
    }
}

/// A free-standing text string placed on the sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStringRecord {
    pub location: CoordPoint,
    pub color: Color,
    pub justification: TextJustification,
    pub orientations: TextOrientations,
    pub font_id: i32,
    pub text: String,
    pub is_mirrored: bool,
    pub is_hidden: bool,
}

impl TextStringRecord {
    /// The text as rendered; styling never changes the stored text.
    pub fn display_text(&self) -> &str {
        &self.text
    }

    /// Unit-size rectangle at the anchor point; font metrics are not
    /// consulted.
    pub fn bounds(&self) -> CoordRect {
        CoordRect::new(self.location.x, self.location.y, Coord(1), Coord(1))
    }
}

impl RecordFields for TextStringRecord {
    const RECORD: i32 = 4;

    fn import_fields(p: &ParameterCollection) -> Self {
        TextStringRecord {
            location: coord::point_from_parameters(p, "LOCATION"),
            color: p.get("COLOR").as_color_or(Color::default()),
            justification: TextJustification::from_ordinal(
                p.get("JUSTIFICATION").as_int_or(0),
            ),
            orientations: TextOrientations::from_bits(p.get("ORIENTATION").as_int_or(0)),
            font_id: p.get("FONTID").as_int_or(0),
            text: p.get("TEXT").as_string_or(""),
            is_mirrored: p.get("ISMIRRORED").as_bool(),
            is_hidden: p.get("ISHIDDEN").as_bool(),
        }
    }

    fn export_fields(&self, p: &mut ParameterCollection) {
        coord::point_to_parameters(p, "LOCATION", self.location);
        p.add("COLOR", self.color);
        p.add("JUSTIFICATION", self.justification.to_ordinal());
        p.add("ORIENTATION", self.orientations.bits());
        p.add("FONTID", self.font_id);
        p.add("TEXT", self.text.as_str());
        p.add("ISMIRRORED", self.is_mirrored);
        p.add("ISHIDDEN", self.is_hidden);
    }
}

impl From<TextStringRecord> for RecordKind {
    fn from(record: TextStringRecord) -> RecordKind {
        RecordKind::Label(record)
    }
}

impl RecordPayload for TextStringRecord {
    fn from_primitive(primitive: &SchPrimitive) -> Option<&Self> {
        match &primitive.kind {
            RecordKind::Label(t) => Some(t),
            _ => None,
        }
    }
}
