use crate::error::RecordError;
use crate::field::{FieldMeta, FieldSource};
use crate::types::{FastMap, Lane, Slot};
use crate::value::Value;
use smol_str::SmolStr;
use std::collections::BTreeMap;
use std::sync::{Arc, Weak};

pub(crate) type DatasetRef = Weak<dyn FieldSource + Send + Sync>;

// ─── Record ─────────────────────────────────────────────────────────────────

/// One row / entity: named fields in registration order, each holding a
/// primary and an optional classic value.
///
/// `fields`, `name_index` and `slots` always have the same length; a name
/// in `name_index` points at its position in the other two.
#[derive(Debug, Clone)]
pub struct Record {
    pub(crate) fields: Vec<SmolStr>,
    pub(crate) name_index: FastMap<SmolStr, usize>,
    pub(crate) slots: Vec<Slot>,
    is_empty: bool,
    dataset: Option<DatasetRef>,
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

impl Record {
    /// A record with no initial fields. [`is_empty`](Self::is_empty) stays
    /// `true` for its whole life, even if fields are added later.
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            name_index: FastMap::default(),
            slots: Vec::new(),
            is_empty: true,
            dataset: None,
        }
    }

    /// Build a record from `(name, value)` pairs, registering names in
    /// iteration order. A repeated name keeps its first position and takes
    /// the last value.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<SmolStr>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let pairs = pairs.into_iter();
        let mut rec = Self::new();
        rec.fields.reserve(pairs.size_hint().0);
        rec.slots.reserve(pairs.size_hint().0);
        for (name, value) in pairs {
            let name = name.into();
            let value = value.into();
            match rec.name_index.get(&name) {
                Some(&index) => rec.slots[index].primary = Some(value),
                None => {
                    rec.register(name, Slot::with(Lane::Primary, value));
                }
            }
        }
        rec.is_empty = rec.fields.is_empty();
        rec
    }

    /// Build a record from a sorted map; fields are registered in key order.
    pub fn from_map<K, V>(map: BTreeMap<K, V>) -> Self
    where
        K: Into<SmolStr> + Ord,
        V: Into<Value>,
    {
        Self::from_pairs(map)
    }

    /// Build a record from a JSON object, registering keys in the object's
    /// iteration order.
    pub fn from_json_value(json: serde_json::Value) -> Result<Self, RecordError> {
        match json {
            serde_json::Value::Object(obj) => Ok(Self::from_pairs(obj)),
            _ => Err(RecordError::NotAnObject),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, RecordError> {
        Self::from_json_value(serde_json::from_str(text)?)
    }

    fn register(&mut self, name: SmolStr, slot: Slot) -> usize {
        let index = self.slots.len();
        self.name_index.insert(name.clone(), index);
        self.fields.push(name);
        self.slots.push(slot);
        debug_assert_eq!(self.fields.len(), self.slots.len());
        index
    }

    // ════════════════════════════════════════════════════════════════════════
    // Field index
    // ════════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.name_index.get(name).copied()
    }

    #[inline]
    pub fn has_field(&self, name: &str) -> bool {
        self.name_index.contains_key(name)
    }

    /// All field names in registration order.
    #[inline]
    pub fn fields(&self) -> &[SmolStr] {
        &self.fields
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record was constructed without any initial field.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    #[inline]
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// `(name, primary value)` in field order; `None` for fields that only
    /// hold a classic value.
    pub fn iter(&self) -> impl Iterator<Item = (&SmolStr, Option<&Value>)> + '_ {
        self.fields
            .iter()
            .zip(self.slots.iter())
            .map(|(name, slot)| (name, slot.primary.as_ref()))
    }

    // ════════════════════════════════════════════════════════════════════════
    // Positional access
    // ════════════════════════════════════════════════════════════════════════

    /// Primary value at `index`. Positional reads always serve the primary
    /// lane; `_lane` is accepted to mirror [`set`](Self::set). Use
    /// [`classic`](Self::classic) to read the classic lane.
    #[inline]
    pub fn get(&self, index: usize, _lane: Lane) -> Option<&Value> {
        self.slots.get(index)?.primary.as_ref()
    }

    #[inline]
    pub fn classic(&self, index: usize) -> Option<&Value> {
        self.slots.get(index)?.classic.as_ref()
    }

    pub fn try_get(&self, index: usize, lane: Lane) -> Result<&Value, RecordError> {
        if index >= self.length() {
            return Err(self.out_of_range(index));
        }
        Ok(self.get(index, lane).unwrap_or(Value::null()))
    }

    /// Write `value` into `lane` at `index`. Returns `false` when `index` is
    /// not a registered position.
    #[inline]
    pub fn set(&mut self, index: usize, value: impl Into<Value>, lane: Lane) -> bool {
        self.try_set(index, value, lane).is_ok()
    }

    pub fn try_set(
        &mut self,
        index: usize,
        value: impl Into<Value>,
        lane: Lane,
    ) -> Result<(), RecordError> {
        let length = self.length();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(RecordError::IndexOutOfRange { index, length })?;
        *slot.lane_mut(lane) = Some(value.into());
        Ok(())
    }

    fn out_of_range(&self, index: usize) -> RecordError {
        RecordError::IndexOutOfRange {
            index,
            length: self.length(),
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Name-based access
    // ════════════════════════════════════════════════════════════════════════

    /// Value of `name`. An unknown name yields the neutral empty string
    /// ([`Value::empty`]); a known field without a primary value yields
    /// [`Value::Null`].
    pub fn get_by_name(&self, name: &str, lane: Lane) -> &Value {
        match self.name_index.get(name) {
            Some(&index) => self.get(index, lane).unwrap_or(Value::null()),
            None => Value::empty(),
        }
    }

    pub fn try_get_by_name(&self, name: &str, lane: Lane) -> Result<&Value, RecordError> {
        match self.name_index.get(name) {
            Some(&index) => self.try_get(index, lane),
            None => Err(RecordError::UnknownField(SmolStr::from(name))),
        }
    }

    /// Write `value` into `lane` of field `name`, registering the field at the
    /// next position if it is new. A first write in the classic lane leaves the
    /// primary lane unset.
    ///
    /// `meta`, when given, is marked valid: the field now belongs to the
    /// record's populated set.
    pub fn set_by_name(
        &mut self,
        meta: Option<&mut FieldMeta>,
        name: &str,
        value: impl Into<Value>,
        lane: Lane,
    ) -> bool {
        if let Some(meta) = meta {
            meta.is_valid = true;
        }
        let value = value.into();
        match self.name_index.get(name) {
            Some(&index) => self.set(index, value, lane),
            None => {
                let index = self.register(SmolStr::from(name), Slot::with(lane, value));
                tracing::trace!(field = name, index, ?lane, "registered field");
                true
            }
        }
    }

    /// Shorthand for a primary-lane [`set_by_name`](Self::set_by_name)
    /// without metadata.
    #[inline]
    pub fn insert(&mut self, name: &str, value: impl Into<Value>) -> bool {
        self.set_by_name(None, name, value, Lane::Primary)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Owning collection
    // ════════════════════════════════════════════════════════════════════════

    /// Associate the record with an owning collection without taking
    /// ownership of it.
    pub fn set_dataset<D>(&mut self, dataset: &Arc<D>)
    where
        D: FieldSource + Send + Sync + 'static,
    {
        let weak: Weak<D> = Arc::downgrade(dataset);
        let weak: DatasetRef = weak;
        self.dataset = Some(weak);
    }

    pub fn clear_dataset(&mut self) {
        self.dataset = None;
    }

    /// The owning collection, if one is attached and still alive.
    pub fn dataset(&self) -> Option<Arc<dyn FieldSource + Send + Sync>> {
        self.dataset.as_ref()?.upgrade()
    }

    #[inline]
    pub fn has_dataset(&self) -> bool {
        self.dataset().is_some()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<SmolStr>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
