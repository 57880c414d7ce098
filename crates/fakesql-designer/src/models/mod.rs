//! Models for the schema designer
//!
//! The schema store that owns every parsed table, and the revision-checked
//! selections views use to point into it.

mod schema_store;
mod selection;

pub use schema_store::{ClearedReference, Removed, SchemaStore};
pub use selection::{ListSelection, Revision, SelectionScope};
