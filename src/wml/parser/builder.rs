//! Event-driven tree construction.
use smallvec::SmallVec;
use tracing::{trace, warn};

use super::{ParseOptions, XmlEvent};
use crate::common::{Error, Result};
use crate::wml::{Attr, Document, NodeId, NodeKind, QName, Tag};

/// Builds a [`Document`] from a stream of [`XmlEvent`]s.
///
/// The stack of open nodes starts with the document root. Structural edits
/// go through the regular `add`/`set_property` operations, so alignment and
/// indentation are promoted while the tree is being built.
#[derive(Debug)]
pub struct TreeBuilder {
    doc: Document,
    stack: SmallVec<[NodeId; 32]>,
    options: ParseOptions,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new(ParseOptions::default())
    }
}

impl TreeBuilder {
    pub fn new(options: ParseOptions) -> Self {
        let doc = Document::new();
        let mut stack = SmallVec::new();
        stack.push(doc.root());
        Self { doc, stack, options }
    }

    /// The tree built so far.
    #[inline]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Number of open elements below the document node.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len().saturating_sub(1)
    }

    pub fn handle(&mut self, event: XmlEvent) -> Result<()> {
        match event {
            XmlEvent::StartElement {
                prefix,
                local_name,
                attributes,
                namespaces,
            } => self.start_element(&prefix, &local_name, attributes, namespaces),
            XmlEvent::Characters(text) => self.characters(&text),
            XmlEvent::EndElement { prefix, local_name } => {
                self.end_element(&prefix, &local_name);
                Ok(())
            },
        }
    }

    fn prepare_attributes(&self, mut attributes: Vec<Attr>, namespaces: Vec<Attr>) -> Vec<Attr> {
        attributes.extend(namespaces);
        if self.options.sort_attributes {
            attributes.sort();
        }
        attributes
    }

    pub fn start_element(
        &mut self,
        prefix: &str,
        local_name: &str,
        attributes: Vec<Attr>,
        namespaces: Vec<Attr>,
    ) -> Result<()> {
        let top = self.stack.last().copied();
        let kind = NodeKind::from_qname(prefix, local_name);

        if kind.is(Tag::Document) {
            let root = self.doc.root();
            if top != Some(root) {
                return Err(Error::Parse(format!(
                    "<{}:{}> must be the outermost element",
                    prefix, local_name
                )));
            }
            let attributes = self.prepare_attributes(attributes, namespaces);
            return self.doc.set_attributes(root, attributes);
        }

        let Some(parent) = top.filter(|open| self.doc.is_composite(*open).unwrap_or(false)) else {
            return Err(Error::Parse(format!(
                "Can't add <{}:{}>: no open composite element",
                prefix, local_name
            )));
        };
        if let Some(max) = self.options.max_depth
            && self.depth() >= max
        {
            return Err(Error::Parse(format!(
                "Element <{}:{}> exceeds the maximum nesting depth of {}",
                prefix, local_name, max
            )));
        }

        let is_property = kind.is_property();
        let node = self.doc.create(kind)?;
        let attributes = self.prepare_attributes(attributes, namespaces);
        if !attributes.is_empty() {
            self.doc.set_attributes(node, attributes)?;
        }
        if is_property {
            self.doc.set_property(parent, node)?;
        } else {
            self.doc.add(parent, node)?;
        }
        self.stack.push(node);
        Ok(())
    }

    pub fn characters(&mut self, text: &str) -> Result<()> {
        let Some(&node) = self.stack.last() else {
            return Err(Error::Parse(format!("Character data outside of any element: {:?}", text)));
        };
        let kind = self.doc.kind(node)?;
        let text_bearing = kind.is_text_container() || kind.is(Tag::BinData);
        if self.options.ignore_whitespace_text && !text_bearing && text.trim().is_empty() {
            return Ok(());
        }

        if self.doc.append_node_text(node, text)? {
            return Ok(());
        }
        if let NodeKind::Unidentified(name) = self.doc.kind(node)? {
            let name = name.clone();
            self.upgrade_to_text(node, name, text)?;
            return Ok(());
        }
        trace!(%node, "ignoring character data");
        Ok(())
    }

    /// Swap an unidentified composite for a text-bearing node of the same
    /// name once character data shows up inside it.
    fn upgrade_to_text(&mut self, node: NodeId, name: QName, text: &str) -> Result<()> {
        let upgraded = self.doc.create(NodeKind::UnidentifiedText {
            name,
            text: text.to_owned(),
        })?;
        let attributes = self.doc.attributes(node)?.to_vec();
        if !attributes.is_empty() {
            self.doc.set_attributes(upgraded, attributes)?;
        }
        if let Some(parent) = self.doc.parent(node)? {
            self.doc.replace(parent, node, upgraded)?;
        }
        self.doc.destroy(node)?;
        if let Some(top) = self.stack.last_mut() {
            *top = upgraded;
        }
        Ok(())
    }

    pub fn end_element(&mut self, prefix: &str, local_name: &str) {
        let Some(&top) = self.stack.last() else {
            return;
        };
        let matches = self.doc.qname(top).is_ok_and(|(open_prefix, open_local)| {
            QName::matches_ignore_case(open_prefix, open_local, prefix, local_name)
        });
        if matches {
            self.stack.pop();
        } else {
            warn!(%top, prefix, local_name, "end tag does not close the open element");
        }
    }

    /// Close the builder and hand over the tree.
    pub fn finish(mut self) -> Document {
        self.stack.clear();
        self.doc
    }
}
