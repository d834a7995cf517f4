mod export;
mod fields;
pub mod record;

pub use record::Record;
