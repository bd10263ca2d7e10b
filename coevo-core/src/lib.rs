//! Coevo Core - shared data structures, error handling and logging
//!
//! This crate defines the domain types and the ambient plumbing used by the
//! analysis and discovery pipelines.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use error::*;
pub use logging::*;
pub use types::*;
