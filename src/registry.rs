//! RECORD-discriminator dispatch to typed primitive constructors.

use std::collections::HashMap;

use thiserror::Error;

use crate::parameters::ParameterCollection;
use crate::records::{
    build_primitive_tree, ComponentRecord, RecordFields, SchPrimitive, SheetRecord,
    TextStringRecord,
};

#[derive(Debug, Error)]
pub enum RegistryError {
    /// The RECORD key named a discriminator with no mapped constructor.
    #[error("unrecognized RECORD type {0}")]
    UnknownRecord(i32),
}

type Constructor = fn(&ParameterCollection) -> SchPrimitive;

/// Maps a numeric RECORD discriminator to the constructor for its typed
/// primitive. Dispatch is total: every discriminator either yields a typed
/// primitive or an explicit [`RegistryError::UnknownRecord`].
pub struct RecordRegistry {
    constructors: HashMap<i32, Constructor>,
}

impl RecordRegistry {
    /// A registry preloaded with every record type this crate models.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(
            ComponentRecord::RECORD,
            SchPrimitive::import::<ComponentRecord>,
        );
        registry.register(
            TextStringRecord::RECORD,
            SchPrimitive::import::<TextStringRecord>,
        );
        registry.register(SheetRecord::RECORD, SchPrimitive::import::<SheetRecord>);
        registry
    }

    /// A registry with nothing registered; callers supply their own
    /// constructors.
    pub fn empty() -> Self {
        RecordRegistry {
            constructors: HashMap::new(),
        }
    }

    pub fn register(&mut self, record: i32, constructor: Constructor) {
        self.constructors.insert(record, constructor);
    }

    pub fn recognizes(&self, record: i32) -> bool {
        self.constructors.contains_key(&record)
    }

    /// Construct the typed primitive for one record.
    pub fn dispatch(&self, p: &ParameterCollection) -> Result<SchPrimitive, RegistryError> {
        let record = p.record_id();
        match self.constructors.get(&record) {
            Some(constructor) => Ok(constructor(p)),
            None => {
                tracing::debug!("no constructor registered for RECORD {}", record);
                Err(RegistryError::UnknownRecord(record))
            }
        }
    }

    /// Dispatch an ordered record stream and assemble the ownership tree,
    /// returning root primitives in stream order.
    ///
    /// The whole stream fails on the first unrecognized record: owner
    /// indexes are positions in the stream, so silently skipping a record
    /// would corrupt every later back-reference.
    pub fn import_record_stream<'a, I>(
        &self,
        records: I,
    ) -> Result<Vec<SchPrimitive>, RegistryError>
    where
        I: IntoIterator<Item = &'a ParameterCollection>,
    {
        let mut flat = Vec::new();
        for p in records {
            flat.push(self.dispatch(p)?);
        }
        Ok(build_primitive_tree(flat))
    }
}

impl Default for RecordRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::RecordKind;

    #[test]
    fn test_new_is_preloaded_and_empty_is_not() {
        let preloaded = RecordRegistry::new();
        assert!(preloaded.recognizes(SheetRecord::RECORD));
        assert!(preloaded.recognizes(TextStringRecord::RECORD));
        assert!(preloaded.recognizes(ComponentRecord::RECORD));

        let mut bare = RecordRegistry::empty();
        assert!(!bare.recognizes(SheetRecord::RECORD));
        bare.register(SheetRecord::RECORD, SchPrimitive::import::<SheetRecord>);
        assert!(bare.recognizes(SheetRecord::RECORD));
    }

    #[test]
    fn test_dispatch_selects_by_record_id() {
        let registry = RecordRegistry::new();
        let p = ParameterCollection::from_pairs([("RECORD", "4"), ("TEXT", "hi")]);
        let primitive = registry.dispatch(&p).unwrap();
        assert!(matches!(primitive.kind, RecordKind::Label(_)));
        assert_eq!(primitive.base.record, 4);
    }

    #[test]
    fn test_dispatch_reports_unknown_record() {
        let registry = RecordRegistry::new();
        let p = ParameterCollection::from_pairs([("RECORD", "999")]);
        match registry.dispatch(&p) {
            Err(RegistryError::UnknownRecord(999)) => {}
            other => panic!("expected UnknownRecord(999), got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_missing_record_key_is_unknown_zero() {
        let registry = RecordRegistry::new();
        match registry.dispatch(&ParameterCollection::new()) {
            Err(RegistryError::UnknownRecord(0)) => {}
            other => panic!("expected UnknownRecord(0), got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_import_record_stream_builds_tree() {
        let registry = RecordRegistry::new();
        let records = vec![
            ParameterCollection::from_pairs([("RECORD", "31"), ("FONTIDCOUNT", "0")]),
            ParameterCollection::from_pairs([
                ("RECORD", "1"),
                ("OWNERINDEX", "0"),
                ("LIBREFERENCE", "CAP"),
            ]),
            ParameterCollection::from_pairs([
                ("RECORD", "4"),
                ("OWNERINDEX", "1"),
                ("TEXT", "C1"),
            ]),
        ];
        let roots = registry.import_record_stream(&records).unwrap();
        assert_eq!(roots.len(), 1);
        assert!(matches!(roots[0].kind, RecordKind::Sheet(_)));
        assert_eq!(roots[0].children.len(), 1);
        assert_eq!(roots[0].children[0].children.len(), 1);
        assert!(matches!(
            roots[0].children[0].children[0].kind,
            RecordKind::Label(_)
        ));
    }

    #[test]
    fn test_import_record_stream_fails_fast_on_unknown() {
        let registry = RecordRegistry::new();
        let records = vec![
            ParameterCollection::from_pairs([("RECORD", "31")]),
            ParameterCollection::from_pairs([("RECORD", "999")]),
        ];
        assert!(registry.import_record_stream(&records).is_err());
    }
}
