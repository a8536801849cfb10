//! Core type definitions used across the LeadVault workspace.

pub mod id;

pub use id::*;
