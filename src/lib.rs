//! wordml-dom - An in-memory document tree for WordprocessingML 2003
//!
//! This library parses the single-file XML format used by Word 2003 into a
//! mutable node tree, and provides queries and text extraction over it.
//!
//! # Features
//!
//! - **Handle-based tree**: nodes live in a [`Document`] arena and are
//!   addressed by copyable [`NodeId`] handles
//! - **Consistent links**: parent, index and sibling links are maintained by
//!   every edit
//! - **Property promotion**: paragraph alignment and first-line indentation
//!   are lifted onto their owners while the tree is built
//! - **Filtered traversal**: depth-first queries with stop-aware filters
//! - **Smart text extraction**: runs are joined with heuristic spacing
//!
//! # Example - Parsing and querying
//!
//! ```rust
//! use wordml_dom::{Align, Relation, Tag, parse};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc = parse(
//!     r#"<w:wordDocument><w:body>
//!          <w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:t>Title</w:t></w:r></w:p>
//!          <w:p><w:r><w:t>Body text</w:t></w:r></w:p>
//!        </w:body></w:wordDocument>"#,
//! )?;
//!
//! let paragraphs: Vec<_> = doc.as_stream_in(doc.root(), Tag::Para, Relation::Descendant)?.collect();
//! assert_eq!(paragraphs.len(), 2);
//! assert_eq!(doc.align(paragraphs[0])?, Align::Center);
//! assert_eq!(doc.get_text_smart(paragraphs[1])?, "Body text");
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Building a tree by hand
//!
//! ```rust
//! use wordml_dom::{Document, Tag};
//!
//! # fn main() -> wordml_dom::Result<()> {
//! let mut doc = Document::new();
//! let para = doc.create_element(Tag::Para)?;
//! let run = doc.create_element(Tag::Run)?;
//! let text = doc.create_text("Hello")?;
//! doc.add(para, run)?;
//! doc.add(run, text)?;
//!
//! let copy = doc.clone_subtree(para)?;
//! assert_eq!(doc.get_text(copy)?, "Hello");
//! assert_eq!(doc.parent(copy)?, None);
//! # Ok(())
//! # }
//! ```

/// Shared infrastructure: errors, ids, text helpers and XML escaping
pub mod common;

/// WordML 2003 node tree, parser and queries
///
/// This module contains the arena document, the closed tag set, property
/// promotion, traversal and filters, text extraction, and the helpers for
/// tables, styles and structural comparison.
pub mod wml;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use wml::{
    Align, Attr, ContinueStrategy, Direction, Document, DocumentParser, Filter, FilterResult, NodeId, NodeKind,
    NodeType, ParseOptions, Relation, StyleIndex, Tag, parse,
};
