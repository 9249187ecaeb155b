//! Data models for the revision board.
//!
//! Field names serialize in camelCase to match the browser client and the
//! persisted JSON document.

mod datastore;
mod revision;
pub mod timestamp;
mod visit;

pub use datastore::*;
pub use revision::*;
pub use visit::*;
