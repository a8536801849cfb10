//! # leadvault-core
//!
//! Core crate for the LeadVault document subsystem. Contains typed
//! identifiers, configuration schemas, the unified error system, and the
//! boundary trait for the remote document-persistence API.
//!
//! This crate has **no** internal dependencies on other LeadVault crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
