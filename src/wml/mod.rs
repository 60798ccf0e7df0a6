//! WordML 2003 document tree.
//!
//! A parsed document lives in a [`Document`] arena and is addressed through
//! copyable [`NodeId`] handles. Every structural edit goes through the
//! document, which keeps parent links, child indices and sibling links
//! consistent.
//!
//! # Architecture
//!
//! - `tag`, `node`: the closed set of node kinds and query type selectors
//! - `document`, `composite`: the arena, links and child-list mutations
//! - `property`: formatting properties and alignment/indent promotion
//! - `query`, `filter`: filtered depth-first traversal
//! - `text`: text extraction
//! - `parser`: markup events to tree
//! - `table`, `style`, `compare`: helpers built on the public query surface
//!
//! # Example
//!
//! ```rust
//! use wordml_dom::wml::{Document, Relation, Tag};
//!
//! let mut doc = Document::new();
//! let body = doc.create_element(Tag::Body)?;
//! let para = doc.create_element(Tag::Para)?;
//! let run = doc.create_element(Tag::Run)?;
//! let text = doc.create_text("Hello")?;
//! doc.add(doc.root(), body)?;
//! doc.add(body, para)?;
//! doc.add(para, run)?;
//! doc.add(run, text)?;
//!
//! assert_eq!(doc.get_parent(text)?, run);
//! assert_eq!(doc.as_stream_in(body, Tag::Para, Relation::Child)?.count(), 1);
//! assert_eq!(doc.get_text(body)?, "Hello");
//! # Ok::<(), wordml_dom::common::Error>(())
//! ```

pub mod attr;
pub mod compare;
pub mod composite;
pub mod document;
pub mod enums;
pub mod filter;
pub mod node;
pub mod parser;
pub mod property;
pub mod query;
pub mod style;
pub mod table;
pub mod tag;
pub mod text;


pub use attr::Attr;
pub use compare::{check_property_equality, compare};
pub use document::Document;
pub use enums::{Align, ContinueStrategy, Direction, Relation};
pub use filter::{
    AllOf, AnyOf, CountFilter, ExcludeNodesFilter, Filter, FilterResult, FirstCharInRunLetterOrDigitFilter,
    InstanceFilter, InstanceFindFirstFilter, Not, PositiveFilter, StartStopNodesFilter, StartWithNodeAndCountFilter,
    TextContainsFilter, TextEndsFilter, TextEqualsFilter, TextStartsFilter,
};
pub use node::{NodeId, NodeKind, NodeType};
pub use parser::{DocumentParser, DocumentPass, ParseOptions, TreeBuilder, XmlEvent, XmlEventReader, parse};
pub use property::DARK_RED_COLOR;
pub use query::DEFAULT_SIBLING_LIMIT;
pub use style::StyleIndex;
pub use table::TWIPS_PER_CM;
pub use tag::{QName, Tag, TagCategory};
