//! WordML markup to [`Document`].
//!
//! [`XmlEventReader`] turns markup into [`XmlEvent`]s, [`TreeBuilder`]
//! folds them into a tree and [`DocumentParser`] runs any registered
//! [`DocumentPass`]es over the result.
//!
//! # Examples
//!
//! ```rust
//! use wordml_dom::wml::{Align, Tag, parser::parse};
//!
//! let xml = r#"<w:wordDocument xmlns:w="http://schemas.microsoft.com/office/word/2003/wordml">
//!   <w:body><w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:t>Title</w:t></w:r></w:p></w:body>
//! </w:wordDocument>"#;
//! let doc = parse(xml)?;
//! let para = doc.first_of(doc.root(), Tag::Para)?.unwrap();
//! assert_eq!(doc.align(para)?, Align::Center);
//! assert_eq!(doc.get_text(para)?, "Title");
//! # Ok::<(), wordml_dom::common::Error>(())
//! ```
mod builder;
mod event;
mod options;
mod pass;
mod reader;

use std::io::BufRead;

use tracing::debug;

pub use builder::TreeBuilder;
pub use event::XmlEvent;
pub use options::ParseOptions;
pub use pass::DocumentPass;
pub use reader::XmlEventReader;

use super::Document;
use crate::common::Result;

/// Parse options plus the passes run over every parsed document.
#[derive(Default)]
pub struct DocumentParser {
    options: ParseOptions,
    passes: Vec<Box<dyn DocumentPass>>,
}

impl DocumentParser {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            passes: Vec::new(),
        }
    }

    /// Register a pass; passes run in registration order.
    pub fn with_pass(mut self, pass: impl DocumentPass + 'static) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    #[inline]
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn parse_str(&self, xml: &str) -> Result<Document> {
        self.parse_reader(xml.as_bytes())
    }

    pub fn parse_reader<R: BufRead>(&self, source: R) -> Result<Document> {
        self.parse_events(XmlEventReader::new(source))
    }

    /// Build from any event source, then run the passes.
    pub fn parse_events<I>(&self, events: I) -> Result<Document>
    where
        I: IntoIterator<Item = Result<XmlEvent>>,
    {
        let mut builder = TreeBuilder::new(self.options.clone());
        for event in events {
            builder.handle(event?)?;
        }
        let mut doc = builder.finish();
        for pass in &self.passes {
            debug!(pass = pass.name(), "running document pass");
            pass.apply(&mut doc)?;
        }
        debug!(nodes = doc.node_count(), "document parsed");
        Ok(doc)
    }
}

/// Parse markup with default options and no passes.
pub fn parse(xml: &str) -> Result<Document> {
    DocumentParser::default().parse_str(xml)
}
