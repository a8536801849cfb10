//! # leadvault-entity
//!
//! Domain entity models for the LeadVault document subsystem. Every
//! struct in this crate is a domain value object; all entities derive
//! `Debug`, `Clone`, `Serialize`, and `Deserialize`. Entities never talk
//! to the network; boundary conversion lives in `leadvault-client`.

pub mod file;
pub mod folder;
pub mod intent;
