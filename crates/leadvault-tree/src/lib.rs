//! # leadvault-tree
//!
//! The in-memory document hierarchy for one business record: the tree
//! model with its read-only queries, the navigation resolver, and the
//! pure mutation engine.
//!
//! The tree is a value. Mutations never modify a tree in place; they
//! return a new tree that shares every untouched folder with its
//! predecessor by `Arc` handle. The owning caller (a view, the CLI)
//! holds the "current" tree and replaces it with each mutation's return
//! value; all reads and mutations are synchronous within that single
//! owner.

pub mod model;
pub mod mutation;
pub mod navigation;

pub use model::DocumentTree;
pub use navigation::NavigationState;
