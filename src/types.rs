use crate::value::Value;
use rustc_hash::FxHasher;
use smol_str::SmolStr;
use std::collections::BTreeMap;
use std::hash::BuildHasherDefault;

pub type FastMap<K, V> = std::collections::HashMap<K, V, BuildHasherDefault<FxHasher>>;

/// Field name → textual value, as produced by `Record::as_str_map`.
pub type StrMap = BTreeMap<SmolStr, String>;
/// Field name → untouched value, as produced by `Record::as_itf_map`.
pub type ValueMap = BTreeMap<SmolStr, Value>;

// ─── Lane ───────────────────────────────────────────────────────────────────

/// Which of the two per-field value storages a read or write targets.
///
/// The classic lane keeps an alternate representation of a field (a pre-cast
/// or legacy-typed value) next to the primary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lane {
    #[default]
    Primary,
    Classic,
}

impl Lane {
    #[inline]
    pub fn is_classic(self) -> bool {
        matches!(self, Lane::Classic)
    }
}

impl From<bool> for Lane {
    /// `true` selects the classic lane.
    fn from(classic: bool) -> Self {
        if classic { Lane::Classic } else { Lane::Primary }
    }
}

// ─── Slot ───────────────────────────────────────────────────────────────────

/// Storage for one registered field. Either lane may be unset: a field first
/// written in the classic lane has no primary value until one is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slot {
    pub primary: Option<Value>,
    pub classic: Option<Value>,
}

impl Slot {
    pub(crate) fn with(lane: Lane, value: Value) -> Self {
        let mut slot = Slot::default();
        *slot.lane_mut(lane) = Some(value);
        slot
    }

    #[inline]
    pub fn lane(&self, lane: Lane) -> Option<&Value> {
        match lane {
            Lane::Primary => self.primary.as_ref(),
            Lane::Classic => self.classic.as_ref(),
        }
    }

    #[inline]
    pub(crate) fn lane_mut(&mut self, lane: Lane) -> &mut Option<Value> {
        match lane {
            Lane::Primary => &mut self.primary,
            Lane::Classic => &mut self.classic,
        }
    }
}
