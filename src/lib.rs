//! Dynamically typed records: ordered, named fields with a primary and a
//! classic value lane, name and position lookup, map/JSON export, and
//! best-effort projection onto typed structs.
//!
//! ```
//! use spooky_recordset::{record, Lane};
//!
//! let mut rec = record! { "id" => 1i64, "name" => "Alice" };
//! rec.insert("age", 30i64);
//!
//! assert_eq!(rec.length(), 3);
//! assert_eq!(rec.get_by_name("name", Lane::Primary).as_str(), Some("Alice"));
//! assert_eq!(rec.as_str_map()["age"], "30");
//! ```

pub mod cast;
pub mod casing;
pub mod error;
pub mod field;
pub mod projector;
pub mod record;
pub mod types;
pub mod value;

pub use error::RecordError;
pub use field::{BoundField, FieldCatalog, FieldMeta, FieldSource};
pub use projector::{MemberRegistry, ProjectOptions, Projectable, ProjectionReport};
pub use record::Record;
pub use types::{Lane, StrMap, ValueMap};
pub use value::{Number, Value};
