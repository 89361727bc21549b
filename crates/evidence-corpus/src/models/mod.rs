//! Data model: bibliographic records and extracted fact sets.

mod factset;
mod record;

pub use factset::{FactCategory, FactSet, sentinel};
pub use record::{NO_DATE, Record, SourceId};
