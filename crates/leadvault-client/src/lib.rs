//! # leadvault-client
//!
//! Sync adapter between the in-memory document tree and the remote
//! document-persistence API. Boundary conversion only: snapshots become
//! trees, mutation intents become API calls. No retry, queueing, or
//! reordering happens here. Commits are optimistic and fire-and-forget,
//! and a diverged tree is reconciled by loading a fresh snapshot.
//!
//! Two [`leadvault_core::traits::DocumentStore`] implementations are
//! provided: [`HttpDocumentStore`] for the CRM REST API and
//! [`MemoryDocumentStore`] for tests and offline use.

pub mod http;
pub mod memory;
pub mod sync;

pub use http::HttpDocumentStore;
pub use memory::MemoryDocumentStore;
pub use sync::DocumentSync;
