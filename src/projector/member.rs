use crate::value::{Number, ObjectMap, Value, ValueKind};
use chrono::{DateTime, NaiveDateTime, Utc};
use smol_str::SmolStr;

// ─── MemberKind ─────────────────────────────────────────────────────────────

/// Declared kind of a target member. Selects the coercion rule applied to
/// a record value before assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Bool,
    Str,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Timestamp,
    Array,
    Object,
    /// No coercion rule exists; carries the Rust type name.
    Unsupported(&'static str),
}

impl MemberKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MemberKind::Bool => "bool",
            MemberKind::Str => "string",
            MemberKind::I8 => "i8",
            MemberKind::I16 => "i16",
            MemberKind::I32 => "i32",
            MemberKind::I64 => "i64",
            MemberKind::Isize => "isize",
            MemberKind::U8 => "u8",
            MemberKind::U16 => "u16",
            MemberKind::U32 => "u32",
            MemberKind::U64 => "u64",
            MemberKind::Usize => "usize",
            MemberKind::F32 => "f32",
            MemberKind::F64 => "f64",
            MemberKind::Timestamp => "timestamp",
            MemberKind::Array => "array",
            MemberKind::Object => "object",
            MemberKind::Unsupported(name) => name,
        }
    }

    #[inline]
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            MemberKind::I8
                | MemberKind::I16
                | MemberKind::I32
                | MemberKind::I64
                | MemberKind::Isize
                | MemberKind::U8
                | MemberKind::U16
                | MemberKind::U32
                | MemberKind::U64
                | MemberKind::Usize
        )
    }

    /// The value kind that is assigned as-is, without coercion.
    pub fn native_value_kind(self) -> Option<ValueKind> {
        match self {
            MemberKind::Bool => Some(ValueKind::Bool),
            MemberKind::Str => Some(ValueKind::Str),
            MemberKind::I64 => Some(ValueKind::I64),
            MemberKind::U64 => Some(ValueKind::U64),
            MemberKind::F64 => Some(ValueKind::F64),
            MemberKind::Timestamp => Some(ValueKind::Timestamp),
            MemberKind::Array => Some(ValueKind::Array),
            MemberKind::Object => Some(ValueKind::Object),
            _ => None,
        }
    }
}

// ─── MemberValue ────────────────────────────────────────────────────────────

/// A Rust type a record value can be projected onto.
pub trait MemberValue: Sized {
    const KIND: MemberKind;

    /// Extract `Self` from a value that was already coerced for
    /// [`KIND`](Self::KIND). Integers narrow with `as`.
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! int_member {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl MemberValue for $ty {
            const KIND: MemberKind = MemberKind::$kind;

            #[inline]
            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::Number(Number::I64(i)) => Some(i as $ty),
                    Value::Number(Number::U64(u)) => Some(u as $ty),
                    _ => None,
                }
            }
        }
    )*};
}

int_member! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
}

impl MemberValue for bool {
    const KIND: MemberKind = MemberKind::Bool;

    fn from_value(value: Value) -> Option<Self> {
        value.as_bool()
    }
}

impl MemberValue for String {
    const KIND: MemberKind = MemberKind::Str;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s.to_string()),
            _ => None,
        }
    }
}

impl MemberValue for SmolStr {
    const KIND: MemberKind = MemberKind::Str;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl MemberValue for f32 {
    const KIND: MemberKind = MemberKind::F32;

    fn from_value(value: Value) -> Option<Self> {
        value.as_f64().map(|f| f as f32)
    }
}

impl MemberValue for f64 {
    const KIND: MemberKind = MemberKind::F64;

    fn from_value(value: Value) -> Option<Self> {
        value.as_f64()
    }
}

impl MemberValue for DateTime<Utc> {
    const KIND: MemberKind = MemberKind::Timestamp;

    fn from_value(value: Value) -> Option<Self> {
        value.as_timestamp()
    }
}

impl MemberValue for NaiveDateTime {
    const KIND: MemberKind = MemberKind::Timestamp;

    fn from_value(value: Value) -> Option<Self> {
        value.as_timestamp().map(|t| t.naive_utc())
    }
}

impl MemberValue for Vec<Value> {
    const KIND: MemberKind = MemberKind::Array;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }
}

impl MemberValue for ObjectMap {
    const KIND: MemberKind = MemberKind::Object;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }
}

/// Projection never writes `None`: nil values are skipped before assignment.
impl<V: MemberValue> MemberValue for Option<V> {
    const KIND: MemberKind = V::KIND;

    fn from_value(value: Value) -> Option<Self> {
        V::from_value(value).map(Some)
    }
}
