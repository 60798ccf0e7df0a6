//! Unified error types for the WordML document model.
//!
//! This module provides a unified error type that encompasses parse errors
//! and tree processing errors, presenting a consistent API to users.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
