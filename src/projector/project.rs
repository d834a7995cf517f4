use super::member::MemberKind;
use super::registry::{MemberRegistry, Projectable};
use crate::cast;
use crate::casing::title_cased_name;
use crate::error::RecordError;
use crate::record::Record;
use crate::types::Lane;
use crate::value::Value;
use smol_str::SmolStr;

// ─── Options ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectOptions {
    /// Lane the source values are read from.
    pub lane: Lane,
    /// Emit a `tracing` event for every diagnostic. The diagnostics are
    /// returned in the report either way.
    pub log_diagnostics: bool,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            lane: Lane::Primary,
            log_diagnostics: true,
        }
    }
}

impl ProjectOptions {
    pub fn lane(lane: Lane) -> Self {
        Self {
            lane,
            ..Self::default()
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Per-field outcome of a projection.
#[derive(Debug, Default)]
pub struct ProjectionReport {
    /// Fields whose value was written onto the target.
    pub assigned: Vec<SmolStr>,
    /// Fields skipped because the source value was nil or unset.
    pub skipped_nil: Vec<SmolStr>,
    /// `UnassignableMember` / `UnsupportedKind` entries, in field order.
    pub diagnostics: Vec<RecordError>,
}

impl ProjectionReport {
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    fn reject(&mut self, options: &ProjectOptions, err: RecordError) {
        if options.log_diagnostics {
            tracing::warn!(error = %err, "record field not projected");
        }
        self.diagnostics.push(err);
    }
}

// ─── Coercion ───────────────────────────────────────────────────────────────

/// Convert `value` for a member of `kind`. Values whose kind already matches
/// pass through untouched; `None` means no coercion rule applies.
pub(crate) fn coerce(value: &Value, kind: MemberKind) -> Option<Value> {
    if kind.native_value_kind() == Some(value.kind()) {
        return Some(value.clone());
    }
    let coerced = match kind {
        MemberKind::Bool => Value::Bool(cast::to_bool(value)),
        MemberKind::Str => Value::from(cast::to_str(value)),
        k if k.is_integer() => Value::from(cast::to_i64(value)),
        MemberKind::F32 => Value::from(cast::to_f32(value)),
        MemberKind::F64 => Value::from(cast::to_f64(value)),
        MemberKind::Timestamp => Value::Timestamp(cast::to_timestamp(value)),
        _ => return None,
    };
    Some(coerced)
}

// ─── Projection ─────────────────────────────────────────────────────────────

impl Record {
    /// Populate `target` from this record using the type's cached registry.
    /// `lane` picks the primary or classic values as source.
    pub fn as_struct<T: Projectable>(&self, target: &mut T, lane: Lane) -> ProjectionReport {
        self.project_with(target, T::registry(), &ProjectOptions::lane(lane))
    }

    /// Populate `target` through an explicit registry.
    ///
    /// Each field is handled on its own: missing or read-only members and
    /// kinds without a coercion rule are reported and skipped, nil values
    /// leave the member untouched.
    pub fn project_with<T>(
        &self,
        target: &mut T,
        registry: &MemberRegistry<T>,
        options: &ProjectOptions,
    ) -> ProjectionReport {
        let mut report = ProjectionReport::default();

        for (name, slot) in self.fields.iter().zip(&self.slots) {
            let member_name = title_cased_name(name);
            let member = match registry.member(&member_name) {
                Some(member) if member.is_writable() => member,
                _ => {
                    report.reject(
                        options,
                        RecordError::UnassignableMember {
                            field: name.clone(),
                            member: member_name.into(),
                        },
                    );
                    continue;
                }
            };

            let Some(source) = slot.lane(options.lane).filter(|v| !v.is_null()) else {
                tracing::trace!(field = %name, "nil value, member left untouched");
                report.skipped_nil.push(name.clone());
                continue;
            };

            let assigned = match coerce(source, member.kind()) {
                Some(value) => member.assign(target, value),
                None => false,
            };
            if assigned {
                report.assigned.push(name.clone());
            } else {
                report.reject(
                    options,
                    RecordError::UnsupportedKind {
                        field: name.clone(),
                        member: SmolStr::from(member.name()),
                        kind: member.kind().as_str(),
                    },
                );
            }
        }

        report
    }
}
