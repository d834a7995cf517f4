use crate::record::Record;
use crate::value::Value;
use smol_str::SmolStr;
use std::collections::BTreeMap;

pub type FieldMetaMap = BTreeMap<SmolStr, FieldMeta>;

// ─── FieldMeta ──────────────────────────────────────────────────────────────

/// Metadata for one field: its name and whether it is known to belong to
/// the populated field set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta {
    pub name: SmolStr,
    pub is_valid: bool,
}

impl FieldMeta {
    /// An unvalidated entry.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            is_valid: false,
        }
    }

    pub fn valid(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            is_valid: true,
        }
    }
}

// ─── FieldSource ────────────────────────────────────────────────────────────

/// An owning collection (result set, table) that supplies authoritative
/// field metadata for the records it produces.
pub trait FieldSource {
    fn fields(&self) -> &FieldMetaMap;

    #[inline]
    fn field(&self, name: &str) -> Option<&FieldMeta> {
        self.fields().get(name)
    }

    #[inline]
    fn field_count(&self) -> usize {
        self.fields().len()
    }
}

/// Plain in-memory [`FieldSource`].
#[derive(Debug, Clone, Default)]
pub struct FieldCatalog {
    fields: FieldMetaMap,
}

impl FieldCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name`, replacing any previous entry.
    pub fn insert(&mut self, meta: FieldMeta) -> &mut Self {
        self.fields.insert(meta.name.clone(), meta);
        self
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldMeta> {
        self.fields.get_mut(name)
    }
}

impl FieldSource for FieldCatalog {
    fn fields(&self) -> &FieldMetaMap {
        &self.fields
    }
}

impl<S: Into<SmolStr>> FromIterator<S> for FieldCatalog {
    /// Every name becomes a valid entry.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let fields = iter
            .into_iter()
            .map(|name| {
                let meta = FieldMeta::valid(name);
                (meta.name.clone(), meta)
            })
            .collect();
        Self { fields }
    }
}

// ─── BoundField ─────────────────────────────────────────────────────────────

/// Field metadata resolved against a record. The record reference is taken
/// fresh on every resolution call and never stored in the metadata itself.
#[derive(Debug, Clone)]
pub struct BoundField<'r> {
    pub meta: FieldMeta,
    record: &'r Record,
}

impl<'r> BoundField<'r> {
    pub(crate) fn new(meta: FieldMeta, record: &'r Record) -> Self {
        Self { meta, record }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.meta.name
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.meta.is_valid
    }

    #[inline]
    pub fn record(&self) -> &'r Record {
        self.record
    }

    /// Primary-lane value of this field in the bound record.
    pub fn value(&self) -> &'r Value {
        self.record.get_by_name(&self.meta.name, Default::default())
    }

    pub fn into_meta(self) -> FieldMeta {
        self.meta
    }
}
