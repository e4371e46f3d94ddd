//! Altium SchDoc record marshalling.
//!
//! This library converts between the flat, ordered key-value parameter
//! records stored in an Altium schematic container and a typed, owner-linked
//! tree of drawing primitives (sheets, components, text labels).
//!
//! The container/archive layer and the `KEY=VALUE` tokenizer sit outside
//! this crate: they feed [`ParameterCollection`]s in and consume them on the
//! way back out. Reading is best-effort by design — real files contain
//! partially inconsistent records, so missing or malformed individual values
//! coerce to documented defaults instead of failing the record.
//!
//! # Quick start
//!
//! ```
//! use altium_schdoc::{ParameterCollection, RecordRegistry};
//!
//! let record = ParameterCollection::from_pairs([
//!     ("RECORD", "4"),
//!     ("LOCATION.X", "100"),
//!     ("LOCATION.Y", "200"),
//!     ("TEXT", "Hello"),
//! ]);
//!
//! let registry = RecordRegistry::new();
//! let label = registry.dispatch(&record).unwrap();
//! assert_eq!(label.export().get("TEXT").as_string_or(""), "Hello");
//! ```

pub mod color;
pub mod coord;
pub mod parameters;
pub mod records;
pub mod registry;

// Re-export main types
pub use color::Color;
pub use coord::{
    coord_to_dxp_frac, dxp_frac_to_coord, Coord, CoordPoint, CoordRect, UNITS_PER_DXP,
    UNITS_PER_MIL,
};
pub use parameters::{ParameterCollection, ParameterValue, ToParameterValue};
pub use records::{
    build_primitive_tree, ComponentRecord, FontDefinition, PrimitiveBase, RecordFields,
    RecordKind, RecordPayload, SchPrimitive, SheetRecord, TextJustification, TextOrientations,
    TextStringRecord,
};
pub use registry::{RecordRegistry, RegistryError};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Color, Coord, CoordPoint, CoordRect, ParameterCollection, ParameterValue, RecordKind,
        RecordRegistry, RegistryError, SchPrimitive,
    };
}
