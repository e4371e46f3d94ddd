//! Typed schematic primitives and the ownership tree.
//!
//! Every drawable entity in a schematic is reconstructed from one parameter
//! record. The shared header fields live in [`PrimitiveBase`]; the per-type
//! payload is a [`RecordKind`] variant selected by the RECORD discriminator.
//! Containment is the only ownership edge: a [`SchPrimitive`] owns its
//! children, while `owner_index` is the weak, by-position back-reference used
//! once to rebuild the tree from a flat record stream.

pub mod component;
pub mod label;
pub mod sheet;

pub use component::ComponentRecord;
pub use label::{TextJustification, TextOrientations, TextStringRecord};
pub use sheet::{FontDefinition, SheetRecord};

use serde::{Deserialize, Serialize};

use crate::coord::CoordRect;
use crate::parameters::ParameterCollection;

/// Marshalling contract implemented by every record payload: read your own
/// keys out of a record, write them back. Base fields are always handled
/// first by the caller; these only touch the variant's own keys.
pub trait RecordFields: Sized {
    /// The RECORD discriminator this payload answers to.
    const RECORD: i32;

    /// Populate a payload from one record. Missing or malformed individual
    /// keys fall back to field defaults; this never fails.
    fn import_fields(p: &ParameterCollection) -> Self;

    /// Emit every field of the payload into `p`, in a fixed order.
    fn export_fields(&self, p: &mut ParameterCollection);
}

/// Payload extraction used by typed traversal.
pub trait RecordPayload {
    fn from_primitive(primitive: &SchPrimitive) -> Option<&Self>;
}

/// Fields shared by every schematic primitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimitiveBase {
    /// Numeric discriminator identifying the concrete type.
    pub record: i32,
    /// Suppresses interactive selection.
    pub is_not_accessible: bool,
    /// By-position back-reference to the owner within the record stream;
    /// -1 means no owner.
    pub owner_index: i32,
    /// Opaque stable identifier, empty when the file carries none.
    pub unique_id: String,
    /// Position hint within the owning sheet's primitive order; -1 if unset.
    pub index_in_sheet: i32,
    /// Active part selection for multi-part components; -1 if unset.
    pub current_part_id: i32,
    pub owner_part_id: i32,
    /// The owner display part this primitive belongs to.
    pub owner_part_display_mode: i32,
    /// Edit lock; round-tripped, no computational effect.
    pub graphically_locked: bool,
}

impl Default for PrimitiveBase {
    fn default() -> Self {
        PrimitiveBase {
            record: 0,
            is_not_accessible: false,
            owner_index: -1,
            unique_id: String::new(),
            index_in_sheet: -1,
            current_part_id: -1,
            owner_part_id: -1,
            owner_part_display_mode: 0,
            graphically_locked: false,
        }
    }
}

impl PrimitiveBase {
    /// Read the shared header fields. Note the format itself misspells
    /// ISNOTACCESIBLE; the key is kept verbatim for fidelity.
    pub fn import_fields(p: &ParameterCollection) -> Self {
        PrimitiveBase {
            record: p.get("RECORD").as_int_or(0),
            is_not_accessible: p.get("ISNOTACCESIBLE").as_bool(),
            owner_index: p.get("OWNERINDEX").as_int_or(-1),
            unique_id: p.get("UNIQUEID").as_string_or(""),
            index_in_sheet: p.get("INDEXINSHEET").as_int_or(-1),
            current_part_id: p.get("CURRENTPARTID").as_int_or(-1),
            owner_part_id: p.get("OWNERPARTID").as_int_or(-1),
            owner_part_display_mode: p.get("OWNERPARTDISPLAYMODE").as_int_or(0),
            graphically_locked: p.get("GRAPHICALLYLOCKED").as_bool(),
        }
    }

    pub fn export_fields(&self, p: &mut ParameterCollection) {
        p.add("RECORD", self.record);
        p.add("ISNOTACCESIBLE", self.is_not_accessible);
        p.add("OWNERINDEX", self.owner_index);
        p.add("UNIQUEID", self.unique_id.as_str());
        p.add("INDEXINSHEET", self.index_in_sheet);
        p.add("CURRENTPARTID", self.current_part_id);
        p.add("OWNERPARTID", self.owner_part_id);
        p.add("OWNERPARTDISPLAYMODE", self.owner_part_display_mode);
        p.add("GRAPHICALLYLOCKED", self.graphically_locked);
    }
}

/// Per-record payload selected by the RECORD discriminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecordKind {
    Component(ComponentRecord),
    Label(TextStringRecord),
    Sheet(SheetRecord),
}

/// One schematic primitive: shared header, typed payload, owned children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchPrimitive {
    pub base: PrimitiveBase,
    pub kind: RecordKind,
    pub children: Vec<SchPrimitive>,
}

impl SchPrimitive {
    /// Import a primitive with payload type `T` from one record: base
    /// fields first, then the payload's own.
    pub fn import<T>(p: &ParameterCollection) -> SchPrimitive
    where
        T: RecordFields,
        RecordKind: From<T>,
    {
        SchPrimitive {
            base: PrimitiveBase::import_fields(p),
            kind: RecordKind::from(T::import_fields(p)),
            children: Vec::new(),
        }
    }

    /// Construct a primitive directly from typed values, with no children.
    pub fn new(base: PrimitiveBase, kind: RecordKind) -> SchPrimitive {
        SchPrimitive {
            base,
            kind,
            children: Vec::new(),
        }
    }

    /// Serialize back to one record: base fields first, then the payload's.
    pub fn export(&self) -> ParameterCollection {
        let mut p = ParameterCollection::new();
        self.base.export_fields(&mut p);
        match &self.kind {
            RecordKind::Component(c) => c.export_fields(&mut p),
            RecordKind::Label(t) => t.export_fields(&mut p),
            RecordKind::Sheet(s) => s.export_fields(&mut p),
        }
        p
    }

    /// Bounding rectangle. The shared header contributes nothing; payloads
    /// with geometry override.
    pub fn bounds(&self) -> CoordRect {
        match &self.kind {
            RecordKind::Label(t) => t.bounds(),
            _ => CoordRect::EMPTY,
        }
    }

    /// The active display part this primitive presents to its children,
    /// when it is a multi-part component.
    pub fn display_mode(&self) -> i32 {
        match &self.kind {
            RecordKind::Component(c) => c.display_mode,
            _ => 0,
        }
    }

    /// Whether this primitive is visible under `owner` (`None` for roots).
    ///
    /// A child is visible only when the owner's active display part equals
    /// the child's `owner_part_display_mode`; payloads may add their own
    /// suppression on top (a hidden text label stays hidden).
    pub fn is_visible(&self, owner: Option<&SchPrimitive>) -> bool {
        let owner_mode = owner.map(SchPrimitive::display_mode).unwrap_or(0);
        if owner_mode != self.base.owner_part_display_mode {
            return false;
        }
        match &self.kind {
            RecordKind::Label(t) => !t.is_hidden,
            _ => true,
        }
    }

    /// All descendants, lazily: direct children first, then each child's
    /// own flattened sequence in child order. Every call re-walks the tree.
    pub fn descendants(&self) -> Box<dyn Iterator<Item = &SchPrimitive> + '_> {
        Box::new(
            self.children
                .iter()
                .chain(self.children.iter().flat_map(|c| c.descendants())),
        )
    }

    /// Children narrowed to payload type `T`; with `flatten`, the whole
    /// subtree in [`descendants`](Self::descendants) order.
    pub fn primitives_of_type<T: RecordPayload>(
        &self,
        flatten: bool,
    ) -> Box<dyn Iterator<Item = &T> + '_> {
        if flatten {
            Box::new(self.descendants().filter_map(T::from_primitive))
        } else {
            Box::new(self.children.iter().filter_map(T::from_primitive))
        }
    }
}

impl RecordPayload for SchPrimitive {
    fn from_primitive(primitive: &SchPrimitive) -> Option<&Self> {
        Some(primitive)
    }
}

/// Rebuild the containment tree from a flat record stream in one pass.
///
/// `owner_index` is honored only when it refers to an earlier record, which
/// is how the format nests (a sheet precedes its components, a component its
/// pins and labels) and makes the result acyclic by construction. A self,
/// forward, or out-of-range index demotes the primitive to a root. Roots are
/// returned in stream order; so is every child list.
pub fn build_primitive_tree(flat: Vec<SchPrimitive>) -> Vec<SchPrimitive> {
    let mut owner_of: Vec<Option<usize>> = Vec::with_capacity(flat.len());
    for (i, primitive) in flat.iter().enumerate() {
        let owner = primitive.base.owner_index;
        if owner >= 0 && (owner as usize) < i {
            owner_of.push(Some(owner as usize));
        } else {
            if owner >= 0 {
                tracing::warn!(
                    "owner index {} of record {} does not refer to an earlier record; treating primitive as a root",
                    owner,
                    i
                );
            }
            owner_of.push(None);
        }
    }

    // Walk back to front so each primitive's subtree is complete before the
    // primitive itself is moved into its owner.
    let mut pending: Vec<Vec<SchPrimitive>> = (0..flat.len()).map(|_| Vec::new()).collect();
    let mut roots: Vec<SchPrimitive> = Vec::new();
    for (i, mut primitive) in flat.into_iter().enumerate().rev() {
        let mut children = std::mem::take(&mut pending[i]);
        children.reverse(); // collected in reverse stream order
        primitive.children.extend(children);
        match owner_of[i] {
            Some(owner) => pending[owner].push(primitive),
            None => roots.push(primitive),
        }
    }
    roots.reverse();
    roots
}
