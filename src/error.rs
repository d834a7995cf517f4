// ─── Error ──────────────────────────────────────────────────────────────────
use smol_str::SmolStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("index {index} out of range for record of length {length}")]
    IndexOutOfRange { index: usize, length: usize },
    #[error("unknown field: {0}")]
    UnknownField(SmolStr),
    /// Target has no member for the field, or the member has no setter.
    #[error("target member `{member}` for field `{field}` is missing or not writable")]
    UnassignableMember { field: SmolStr, member: SmolStr },
    #[error("unsupported member kind `{kind}` on `{member}` for field `{field}`")]
    UnsupportedKind {
        field: SmolStr,
        member: SmolStr,
        kind: &'static str,
    },
    #[error("encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("Can't build a record from a non-object value")]
    NotAnObject,
}
