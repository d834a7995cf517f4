use super::Record;
use crate::cast;
use crate::error::RecordError;
use crate::types::{StrMap, ValueMap};
use crate::value::Value;
use serde::ser::{Serialize, SerializeMap, Serializer};

impl Record {
    /// Every field's primary value rendered as text. Fields without a
    /// primary value map to `""`.
    pub fn as_str_map(&self) -> StrMap {
        self.merge_to_str_map(StrMap::new())
    }

    /// Every field's primary value, untransformed. Fields without a primary
    /// value map to [`Value::Null`].
    pub fn as_itf_map(&self) -> ValueMap {
        self.iter()
            .map(|(name, value)| (name.clone(), value.cloned().unwrap_or_default()))
            .collect()
    }

    /// JSON object of the primary lane, keys in field order.
    pub fn as_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Like [`as_str_map`](Self::as_str_map), but writes into `target` so
    /// several records can accumulate into one map. Existing keys are
    /// overwritten.
    pub fn merge_to_str_map(&self, mut target: StrMap) -> StrMap {
        for (name, value) in self.iter() {
            target.insert(name.clone(), value.map(cast::to_str).unwrap_or_default());
        }
        target
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut m = serializer.serialize_map(Some(self.length()))?;
        for (name, value) in self.iter() {
            m.serialize_entry(name.as_str(), value.unwrap_or(Value::null()))?;
        }
        m.end()
    }
}
