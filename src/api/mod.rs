//! REST API module.
//!
//! Handlers answer with bare JSON values: arrays for listings, the touched
//! record for create/update, and [`Ack`] for deletions.

mod access_history;
mod revisions;

pub use access_history::*;
pub use revisions::*;

use serde::{Deserialize, Serialize};

/// `{ "success": true }` acknowledgment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
