//! Unified error type for the WordML document model.
//!
//! Parse failures (malformed input, reader errors) and processing failures
//! (invalid structural edits, ambiguous queries) share one enum so every
//! operation can return the same `Result`.
use thiserror::Error;

use crate::wml::{NodeId, NodeType};

/// Main error type for document model operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML reader error
    #[error("XML error: {0}")]
    Xml(String),

    /// Malformed event sequence
    #[error("Parse error: {0}")]
    Parse(String),

    /// A required link (parent, previous or next sibling) is absent
    #[error("Node {node} has no {relation}")]
    NoSuchRelation { node: NodeId, relation: &'static str },

    /// The node is not a child of the composite it was addressed through
    #[error("Node {node} is not a child of {parent}")]
    NotAChild { node: NodeId, parent: NodeId },

    /// A container operation was addressed to a leaf
    #[error("Node {0} is not a composite")]
    NotComposite(NodeId),

    /// A non-property node was attached as a property
    #[error("Node {0} is not a property")]
    NotAProperty(NodeId),

    /// The node was destroyed and its handle is stale
    #[error("Node {0} has been destroyed")]
    Destroyed(NodeId),

    /// The handle does not belong to this document
    #[error("Unknown node {0}")]
    UnknownNode(NodeId),

    /// Child index outside the composite's bounds
    #[error("Index {index} out of range for {node} with {len} children")]
    IndexOutOfRange {
        node: NodeId,
        index: usize,
        len: usize,
    },

    /// Attaching the node would make it its own ancestor
    #[error("Attaching {node} under {parent} would create a cycle")]
    Cycle { node: NodeId, parent: NodeId },

    /// A single match was expected but several were found
    #[error("More than one {node_type} found under {node}")]
    Ambiguous { node: NodeId, node_type: NodeType },

    /// The query cannot be answered for the requested type
    #[error("Unsupported query: {0}")]
    UnsupportedQuery(String),

    /// The arena cannot address another node
    #[error("Document is full: node index {0} does not fit a node handle")]
    TooManyNodes(usize),

    /// A structural rule was violated while editing the tree
    #[error("Processing error: {0}")]
    Processing(String),

    /// Two subtrees differ
    #[error("Documents differ: {0}")]
    Mismatch(String),
}

impl Error {
    /// Whether the error came from reading or interpreting the input stream.
    #[inline]
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Io(_) | Error::Xml(_) | Error::Parse(_))
    }
}

/// Result type for document model operations.
pub type Result<T> = std::result::Result<T, Error>;
