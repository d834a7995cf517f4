use super::Record;
use crate::field::{BoundField, FieldMeta};

impl Record {
    /// Metadata for `name`, preferring the attached owning collection.
    ///
    /// Falls back to a transient entry, valid iff `name` is registered here,
    /// when no collection is attached, the collection does not know `name`,
    /// or its field count disagrees with [`length`](Self::length).
    pub fn field_by_name(&self, name: &str) -> BoundField<'_> {
        if let Some(dataset) = self.dataset() {
            if dataset.field_count() == self.length() {
                if let Some(meta) = dataset.field(name) {
                    return BoundField::new(meta.clone(), self);
                }
            }
        }
        let mut meta = FieldMeta::new(name);
        meta.is_valid = self.has_field(name);
        BoundField::new(meta, self)
    }

    /// Metadata for the field at `index`.
    ///
    /// `None` when `index >= length`, or when an attached collection's field
    /// count disagrees with this record's length.
    pub fn field_by_index(&self, index: usize) -> Option<BoundField<'_>> {
        let name = self.fields.get(index)?;
        if let Some(dataset) = self.dataset() {
            if dataset.field_count() != self.length() {
                tracing::debug!(
                    index,
                    dataset_fields = dataset.field_count(),
                    record_fields = self.length(),
                    "field count mismatch between record and dataset"
                );
                return None;
            }
            if let Some(meta) = dataset.field(name) {
                return Some(BoundField::new(meta.clone(), self));
            }
        }
        let mut meta = FieldMeta::new(name.clone());
        meta.is_valid = !name.is_empty();
        Some(BoundField::new(meta, self))
    }
}
