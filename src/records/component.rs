//! Schematic component record (RECORD=1).
//!
//! Only the part/display-mode addressing and placement fields are modelled;
//! they are what child primitives consult for visibility.

use serde::{Deserialize, Serialize};

use super::{RecordFields, RecordKind, RecordPayload, SchPrimitive};
use crate::coord::{self, CoordPoint};
use crate::parameters::ParameterCollection;

/// A placed component (library part instance).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub library_reference: String,
    pub part_count: i32,
    pub display_mode_count: i32,
    /// The active display part; children whose `owner_part_display_mode`
    /// differs are not drawn.
    pub display_mode: i32,
    pub location: CoordPoint,
}

impl Default for ComponentRecord {
    fn default() -> Self {
        ComponentRecord {
            library_reference: String::new(),
            part_count: 1,
            display_mode_count: 1,
            display_mode: 0,
            location: CoordPoint::default(),
        }
    }
}

impl RecordFields for ComponentRecord {
    const RECORD: i32 = 1;

    fn import_fields(p: &ParameterCollection) -> Self {
        ComponentRecord {
            library_reference: p.get("LIBREFERENCE").as_string_or(""),
            part_count: p.get("PARTCOUNT").as_int_or(1),
            display_mode_count: p.get("DISPLAYMODECOUNT").as_int_or(1),
            display_mode: p.get("DISPLAYMODE").as_int_or(0),
            location: coord::point_from_parameters(p, "LOCATION"),
        }
    }

    fn export_fields(&self, p: &mut ParameterCollection) {
        p.add("LIBREFERENCE", self.library_reference.as_str());
        p.add("PARTCOUNT", self.part_count);
        p.add("DISPLAYMODECOUNT", self.display_mode_count);
        p.add("DISPLAYMODE", self.display_mode);
        coord::point_to_parameters(p, "LOCATION", self.location);
    }
}

impl From<ComponentRecord> for RecordKind {
    fn from(record: ComponentRecord) -> RecordKind {
        RecordKind::Component(record)
    }
}

impl RecordPayload for ComponentRecord {
    fn from_primitive(primitive: &SchPrimitive) -> Option<&Self> {
        match &primitive.kind {
            RecordKind::Component(c) => Some(c),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coord;

    #[test]
    fn test_import_defaults() {
        let component = ComponentRecord::import_fields(&ParameterCollection::new());
        assert_eq!(component, ComponentRecord::default());
        assert_eq!(component.part_count, 1);
        assert_eq!(component.display_mode, 0);
    }

    #[test]
    fn test_component_round_trip() {
        let component = ComponentRecord {
            library_reference: "RES1".to_string(),
            part_count: 2,
            display_mode_count: 3,
            display_mode: 1,
            location: CoordPoint::new(Coord(4_000_000), Coord(250_000)),
        };
        let mut p = ParameterCollection::new();
        component.export_fields(&mut p);
        assert_eq!(ComponentRecord::import_fields(&p), component);
    }
}
