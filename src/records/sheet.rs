//! Sheet document record (RECORD=31).
//!
//! Carries sheet-wide styling: the font table (the format's indexed-array
//! encoding worked example), border and grid settings, custom sheet extents
//! and the display unit.

use serde::{Deserialize, Serialize};

use super::{RecordFields, RecordKind, RecordPayload, SchPrimitive};
use crate::color::Color;
use crate::coord::{self, Coord};
use crate::parameters::ParameterCollection;

/// One entry in the sheet's font table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontDefinition {
    pub size: i32,
    pub font_name: String,
    pub rotation: i32,
    pub italic: bool,
    pub bold: bool,
    pub underline: bool,
}

/// The sheet document header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetRecord {
    /// Font table, referenced by 1-based id from text primitives.
    pub fonts: Vec<FontDefinition>,
    pub use_mbcs: bool,
    pub is_boc: bool,
    pub sheet_style: i32,
    pub system_font: i32,
    pub border_on: bool,
    pub sheet_number_space_size: i32,
    pub area_color: Color,
    pub snap_grid_on: bool,
    pub snap_grid_size: Coord,
    pub visible_grid_on: bool,
    pub visible_grid_size: Coord,
    pub custom_x: i32,
    pub custom_y: i32,
    pub use_custom_sheet: bool,
    pub reference_zones_on: bool,
    /// Raw DISPLAY_UNIT selector; kept numeric for fidelity.
    pub display_unit: i32,
}

impl Default for SheetRecord {
    fn default() -> Self {
        SheetRecord {
            fonts: Vec::new(),
            use_mbcs: false,
            is_boc: false,
            sheet_style: 0,
            system_font: 1,
            border_on: false,
            sheet_number_space_size: 0,
            area_color: Color::default(),
            snap_grid_on: false,
            snap_grid_size: Coord(0),
            visible_grid_on: false,
            visible_grid_size: Coord(0),
            custom_x: 0,
            custom_y: 0,
            use_custom_sheet: false,
            reference_zones_on: false,
            display_unit: 0,
        }
    }
}

impl RecordFields for SheetRecord {
    const RECORD: i32 = 31;

    fn import_fields(p: &ParameterCollection) -> Self {
        // FONTIDCOUNT drives the run; missing interior keys fall back to
        // per-field defaults without truncating the table.
        let font_count = p.get("FONTIDCOUNT").as_int_or(0).max(0);
        let fonts = (1..=font_count)
            .map(|i| FontDefinition {
                size: p.get(&format!("SIZE{i}")).as_int_or(0),
                font_name: p.get(&format!("FONTNAME{i}")).as_string_or(""),
                rotation: p.get(&format!("ROTATION{i}")).as_int_or(0),
                italic: p.get(&format!("ITALIC{i}")).as_bool(),
                bold: p.get(&format!("BOLD{i}")).as_bool(),
                underline: p.get(&format!("UNDERLINE{i}")).as_bool(),
            })
            .collect();

        SheetRecord {
            fonts,
            use_mbcs: p.get("USEMBCS").as_bool(),
            is_boc: p.get("ISBOC").as_bool(),
            sheet_style: p.get("SHEETSTYLE").as_int_or(0),
            system_font: p.get("SYSTEMFONT").as_int_or(1),
            border_on: p.get("BORDERON").as_bool(),
            sheet_number_space_size: p.get("SHEETNUMBERSPACESIZE").as_int_or(0),
            area_color: p.get("AREACOLOR").as_color_or(Color::default()),
            snap_grid_on: p.get("SNAPGRIDON").as_bool(),
            snap_grid_size: coord::coord_from_parameters(p, "SNAPGRIDSIZE"),
            visible_grid_on: p.get("VISIBLEGRIDON").as_bool(),
            visible_grid_size: coord::coord_from_parameters(p, "VISIBLEGRIDSIZE"),
            custom_x: p.get("CUSTOMX").as_int_or(0),
            custom_y: p.get("CUSTOMY").as_int_or(0),
            use_custom_sheet: p.get("USECUSTOMSHEET").as_bool(),
            reference_zones_on: p.get("REFERENCEZONESON").as_bool(),
            display_unit: p.get("DISPLAY_UNIT").as_int_or(0),
        }
    }

    fn export_fields(&self, p: &mut ParameterCollection) {
        // Indexed-array rule: count first, then every field of every entry
        // with 1-based suffixes, defaults included (no conditional omission
        // here, unlike the coordinate codec).
        p.add("FONTIDCOUNT", self.fonts.len() as i32);
        for (i, font) in self.fonts.iter().enumerate() {
            let n = i + 1;
            p.add(format!("SIZE{n}"), font.size);
            p.add(format!("FONTNAME{n}"), font.font_name.as_str());
            p.add(format!("ROTATION{n}"), font.rotation);
            p.add(format!("ITALIC{n}"), font.italic);
            p.add(format!("BOLD{n}"), font.bold);
            p.add(format!("UNDERLINE{n}"), font.underline);
        }
        p.add("USEMBCS", self.use_mbcs);
        p.add("ISBOC", self.is_boc);
        p.add("SHEETSTYLE", self.sheet_style);
        p.add("SYSTEMFONT", self.system_font);
        p.add("BORDERON", self.border_on);
        p.add("SHEETNUMBERSPACESIZE", self.sheet_number_space_size);
        p.add("AREACOLOR", self.area_color);
        p.add("SNAPGRIDON", self.snap_grid_on);
        coord::coord_to_parameters(p, "SNAPGRIDSIZE", self.snap_grid_size);
        p.add("VISIBLEGRIDON", self.visible_grid_on);
        coord::coord_to_parameters(p, "VISIBLEGRIDSIZE", self.visible_grid_size);
        p.add("CUSTOMX", self.custom_x);
        p.add("CUSTOMY", self.custom_y);
        p.add("USECUSTOMSHEET", self.use_custom_sheet);
        p.add("REFERENCEZONESON", self.reference_zones_on);
        p.add("DISPLAY_UNIT", self.display_unit);
    }
}

impl From<SheetRecord> for RecordKind {
    fn from(record: SheetRecord) -> RecordKind {
        RecordKind::Sheet(record)
    }
}

impl RecordPayload for SheetRecord {
    fn from_primitive(primitive: &SchPrimitive) -> Option<&Self> {
        match &primitive.kind {
            RecordKind::Sheet(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_table_import_in_index_order() {
        let p = ParameterCollection::from_pairs([
            ("RECORD", "31"),
            ("FONTIDCOUNT", "2"),
            ("SIZE1", "10"),
            ("FONTNAME1", "Arial"),
            ("SIZE2", "12"),
            ("FONTNAME2", "Courier"),
        ]);
        let sheet = SheetRecord::import_fields(&p);
        assert_eq!(sheet.fonts.len(), 2);
        assert_eq!(sheet.fonts[0].size, 10);
        assert_eq!(sheet.fonts[0].font_name, "Arial");
        assert_eq!(sheet.fonts[1].size, 12);
        assert_eq!(sheet.fonts[1].font_name, "Courier");
    }

    #[test]
    fn test_missing_interior_keys_do_not_truncate() {
        let p = ParameterCollection::from_pairs([
            ("FONTIDCOUNT", "3"),
            ("SIZE1", "10"),
            ("FONTNAME1", "Arial"),
            // entry 2 entirely absent
            ("SIZE3", "14"),
            ("FONTNAME3", "Times New Roman"),
        ]);
        let sheet = SheetRecord::import_fields(&p);
        assert_eq!(sheet.fonts.len(), 3);
        assert_eq!(sheet.fonts[1], FontDefinition::default());
        assert_eq!(sheet.fonts[2].font_name, "Times New Roman");
    }

    #[test]
    fn test_font_table_export_emits_every_field() {
        let sheet = SheetRecord {
            fonts: vec![
                FontDefinition {
                    size: 10,
                    font_name: "Arial".to_string(),
                    ..FontDefinition::default()
                },
                FontDefinition {
                    size: 12,
                    font_name: "Courier".to_string(),
                    bold: true,
                    ..FontDefinition::default()
                },
            ],
            ..SheetRecord::default()
        };
        let mut p = ParameterCollection::new();
        sheet.export_fields(&mut p);
        assert_eq!(p.get("FONTIDCOUNT").as_int_or(0), 2);
        for n in 1..=2 {
            for field in ["SIZE", "FONTNAME", "ROTATION", "ITALIC", "BOLD", "UNDERLINE"] {
                assert!(p.contains(&format!("{field}{n}")), "missing {field}{n}");
            }
        }
        assert_eq!(p.get("BOLD2").raw(), Some("T"));
        assert_eq!(p.get("ROTATION1").raw(), Some("0"));
    }

    #[test]
    fn test_negative_font_count_reads_as_empty_table() {
        let p = ParameterCollection::from_pairs([("FONTIDCOUNT", "-2")]);
        let sheet = SheetRecord::import_fields(&p);
        assert!(sheet.fonts.is_empty());
    }

    #[test]
    fn test_system_font_defaults_to_one() {
        let sheet = SheetRecord::import_fields(&ParameterCollection::new());
        assert_eq!(sheet.system_font, 1);
    }

    #[test]
    fn test_sheet_round_trip() {
        let sheet = SheetRecord {
            fonts: vec![FontDefinition {
                size: 10,
                font_name: "Times New Roman".to_string(),
                italic: true,
                ..FontDefinition::default()
            }],
            use_mbcs: true,
            sheet_style: 9,
            border_on: true,
            area_color: Color::new(255, 255, 204),
            snap_grid_on: true,
            snap_grid_size: coord::dxp_frac_to_coord(1, 0),
            visible_grid_on: true,
            visible_grid_size: coord::dxp_frac_to_coord(1, 50_000),
            custom_x: 1500,
            custom_y: 950,
            use_custom_sheet: true,
            reference_zones_on: true,
            display_unit: 4,
            ..SheetRecord::default()
        };
        let mut p = ParameterCollection::new();
        sheet.export_fields(&mut p);
        assert_eq!(SheetRecord::import_fields(&p), sheet);
        // fractional visible grid produced a _FRAC key, whole snap grid not
        assert!(p.contains("VISIBLEGRIDSIZE_FRAC"));
        assert!(!p.contains("SNAPGRIDSIZE_FRAC"));
    }
}
