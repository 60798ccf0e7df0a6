//! Lookup of `w:style` definitions by id.
//!
//! The index is built once per parsed document and handed to whatever needs
//! style information. It holds handles only, so it stays valid for as long
//! as the indexed styles are not destroyed. Inheritance through
//! `w:basedOn` is exposed but not resolved.
use std::collections::HashMap;

use super::{Document, NodeId, Tag};
use crate::common::Result;

#[derive(Debug, Clone, Default)]
pub struct StyleIndex {
    by_id: HashMap<String, NodeId>,
    default_paragraph: Option<NodeId>,
}

impl StyleIndex {
    /// Index every `w:style` in the document.
    ///
    /// The default paragraph style is the first one marked
    /// `w:type="paragraph" w:default="on"`. A repeated id keeps its first
    /// definition.
    pub fn build(doc: &Document) -> Result<Self> {
        let mut index = Self::default();
        for style in doc.as_stream(doc.root(), Tag::Style)? {
            if let Some(id) = doc.w_attribute(style, "styleId")? {
                index.by_id.entry(id.to_string()).or_insert(style);
            }
            if index.default_paragraph.is_none()
                && doc.w_attribute(style, "type")? == Some("paragraph")
                && doc.w_attribute(style, "default")? == Some("on")
            {
                index.default_paragraph = Some(style);
            }
        }
        Ok(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    #[inline]
    pub fn get(&self, style_id: &str) -> Option<NodeId> {
        self.by_id.get(style_id).copied()
    }

    #[inline]
    pub fn default_paragraph_style(&self) -> Option<NodeId> {
        self.default_paragraph
    }

    /// Style referenced by the paragraph's `w:pPr/w:pStyle`, or the default
    /// paragraph style when it has none.
    pub fn paragraph_style(&self, doc: &Document, para: NodeId) -> Result<Option<NodeId>> {
        match doc.find_property_element(para, Tag::PProp, Tag::PStyle)? {
            Some(pstyle) => Ok(doc.w_attribute(pstyle, "val")?.and_then(|id| self.get(id))),
            None => Ok(self.default_paragraph),
        }
    }

    /// Display name from the style's `w:name`.
    pub fn style_name<'d>(&self, doc: &'d Document, style: NodeId) -> Result<Option<&'d str>> {
        match doc.first_of(style, Tag::StyleName)? {
            Some(name) => doc.w_attribute(name, "val"),
            None => Ok(None),
        }
    }

    /// Parent style named by `w:basedOn`, if indexed.
    pub fn based_on(&self, doc: &Document, style: NodeId) -> Result<Option<NodeId>> {
        match doc.first_of(style, Tag::BasedOn)? {
            Some(based_on) => Ok(doc.w_attribute(based_on, "val")?.and_then(|id| self.get(id))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wml::parser::parse;

    const STYLED: &str = r#"<w:wordDocument>
<w:styles>
  <w:style w:type="paragraph" w:default="on" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
  <w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/></w:style>
  <w:style w:type="character" w:default="on" w:styleId="DefaultFont"><w:name w:val="Default Paragraph Font"/></w:style>
</w:styles>
<w:body>
  <w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Title</w:t></w:r></w:p>
  <w:p><w:r><w:t>Plain</w:t></w:r></w:p>
  <w:p><w:pPr><w:pStyle w:val="Missing"/></w:pPr></w:p>
</w:body>
</w:wordDocument>"#;

    #[test]
    fn test_build_index() {
        let doc = parse(STYLED).unwrap();
        let styles = StyleIndex::build(&doc).unwrap();
        assert_eq!(styles.len(), 3);
        let normal = styles.get("Normal").unwrap();
        assert_eq!(styles.default_paragraph_style(), Some(normal));
        assert_eq!(styles.style_name(&doc, normal).unwrap(), Some("Normal"));

        let heading = styles.get("Heading1").unwrap();
        assert_eq!(styles.based_on(&doc, heading).unwrap(), Some(normal));
        assert_eq!(styles.based_on(&doc, normal).unwrap(), None);
    }

    #[test]
    fn test_paragraph_style_lookup() {
        let doc = parse(STYLED).unwrap();
        let styles = StyleIndex::build(&doc).unwrap();
        let paras: Vec<NodeId> = doc.as_stream(doc.root(), Tag::Para).unwrap().collect();
        assert_eq!(styles.paragraph_style(&doc, paras[0]).unwrap(), styles.get("Heading1"));
        assert_eq!(styles.paragraph_style(&doc, paras[1]).unwrap(), styles.get("Normal"));
        assert_eq!(styles.paragraph_style(&doc, paras[2]).unwrap(), None);
    }

    #[test]
    fn test_document_without_styles() {
        let doc = Document::new();
        let styles = StyleIndex::build(&doc).unwrap();
        assert!(styles.is_empty());
        assert_eq!(styles.default_paragraph_style(), None);
    }
}
