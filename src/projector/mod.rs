//! Best-effort projection of a [`Record`](crate::record::Record) onto a
//! statically typed struct.
//!
//! A target type describes its members once in a [`MemberRegistry`], usually
//! through [`record_members!`](crate::record_members). Projection then walks
//! the record's fields, looks each one up by its title-cased name, coerces the
//! value to the member's kind and assigns it. A bad field never aborts the
//! walk; it is reported in the returned [`ProjectionReport`].

mod member;
mod project;
mod registry;

pub use member::{MemberKind, MemberValue};
pub use project::{ProjectOptions, ProjectionReport};
pub use registry::{Member, MemberRegistry, MemberRegistryBuilder, Projectable};
