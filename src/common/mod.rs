//! Common types and utilities shared across the document model.
//!
//! This module provides the unified error type, the node id counter and the
//! XML and text helpers used by the WordML tree.

// Submodule declarations
pub mod error;
pub mod id;
pub mod text;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
