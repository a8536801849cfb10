//! Breadcrumb trail entries.

use serde::{Deserialize, Serialize};

use leadvault_core::types::FolderId;

/// One entry in a breadcrumb trail, root first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// The folder this entry points at.
    pub id: FolderId,
    /// Display name for the entry.
    pub name: String,
}
