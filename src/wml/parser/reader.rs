//! quick-xml adapter producing [`XmlEvent`]s.
use std::collections::VecDeque;
use std::io::BufRead;
use std::str::from_utf8;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::XmlEvent;
use crate::common::Result;
use crate::common::xml::{resolve_reference, split_qname, unescape_xml};
use crate::wml::Attr;

/// Pull reader over WordML markup.
///
/// Empty elements are expanded into a start and an end event, and
/// adjacent text, CDATA and references are merged into one
/// [`XmlEvent::Characters`]. Whitespace outside the document element is
/// not reported. End names are not checked here: mismatched end tags reach
/// the tree builder, which tolerates them. After the first error the
/// iterator is exhausted.
pub struct XmlEventReader<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    text: String,
    pending: VecDeque<XmlEvent>,
    /// Open elements seen so far.
    depth: usize,
    finished: bool,
}

impl<R: BufRead> XmlEventReader<R> {
    pub fn new(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        let config = reader.config_mut();
        config.expand_empty_elements = true;
        config.check_end_names = false;
        Self {
            reader,
            buf: Vec::with_capacity(1024),
            text: String::new(),
            pending: VecDeque::with_capacity(2),
            depth: 0,
            finished: false,
        }
    }

    fn flush_text(&mut self) -> Option<XmlEvent> {
        (!self.text.is_empty()).then(|| XmlEvent::Characters(std::mem::take(&mut self.text)))
    }

    fn read_next(&mut self) -> Result<Option<XmlEvent>> {
        if let Some(event) = self.pending.pop_front() {
            return Ok(Some(event));
        }
        loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(e) => {
                    self.depth += 1;
                    self.pending.push_back(start_event(&e)?);
                },
                Event::Empty(e) => {
                    let start = start_event(&e)?;
                    if let XmlEvent::StartElement { prefix, local_name, .. } = &start {
                        let end = XmlEvent::end(prefix.as_str(), local_name.as_str());
                        self.pending.push_back(start);
                        self.pending.push_back(end);
                    }
                },
                Event::End(e) => {
                    self.depth = self.depth.saturating_sub(1);
                    let name = e.name();
                    let (prefix, local_name) = split_qname(name.as_ref());
                    self.pending
                        .push_back(XmlEvent::end(from_utf8(prefix)?, from_utf8(local_name)?));
                },
                Event::Text(e) => {
                    let text = from_utf8(e.as_ref())?;
                    if self.depth > 0 || !text.trim().is_empty() {
                        self.text.push_str(&unescape_xml(text));
                    }
                },
                Event::CData(e) => self.text.push_str(from_utf8(e.as_ref())?),
                Event::GeneralRef(e) => {
                    let name = from_utf8(e.as_ref())?;
                    match resolve_reference(name) {
                        Some(c) => self.text.push(c),
                        None => {
                            self.text.push('&');
                            self.text.push_str(name);
                            self.text.push(';');
                        },
                    }
                },
                Event::Eof => {
                    self.finished = true;
                    return Ok(self.flush_text());
                },
                // Declarations, comments, processing instructions, doctypes
                _ => {},
            }
            if !self.pending.is_empty() {
                if let Some(text) = self.flush_text() {
                    return Ok(Some(text));
                }
                return Ok(self.pending.pop_front());
            }
        }
    }
}

fn start_event(e: &BytesStart<'_>) -> Result<XmlEvent> {
    let name = e.name();
    let (prefix, local_name) = split_qname(name.as_ref());
    let mut attributes = Vec::new();
    let mut namespaces = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let (namespace, attr_name) = split_qname(attr.key.as_ref());
        let namespace = from_utf8(namespace)?;
        let attr_name = from_utf8(attr_name)?;
        let value = unescape_xml(from_utf8(attr.value.as_ref())?).into_owned();
        let is_declaration = namespace == "xmlns" || (namespace.is_empty() && attr_name == "xmlns");
        let attr = Attr::new(namespace, attr_name, value);
        if is_declaration {
            namespaces.push(attr);
        } else {
            attributes.push(attr);
        }
    }
    Ok(XmlEvent::StartElement {
        prefix: from_utf8(prefix)?.to_owned(),
        local_name: from_utf8(local_name)?.to_owned(),
        attributes,
        namespaces,
    })
}

impl<R: BufRead> Iterator for XmlEventReader<R> {
    type Item = Result<XmlEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished && self.pending.is_empty() {
            return None;
        }
        match self.read_next() {
            Ok(event) => event.map(Ok),
            Err(e) => {
                self.finished = true;
                self.pending.clear();
                Some(Err(e))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(xml: &str) -> Vec<XmlEvent> {
        XmlEventReader::new(xml.as_bytes()).collect::<Result<_>>().unwrap()
    }

    #[test]
    fn test_splits_names_and_namespaces() {
        let got = events(r#"<w:wordDocument xmlns:w="urn:w" xmlns="urn:d" w:macrosPresent="no"></w:wordDocument>"#);
        assert_eq!(
            got,
            vec![
                XmlEvent::StartElement {
                    prefix: "w".into(),
                    local_name: "wordDocument".into(),
                    attributes: vec![Attr::w("macrosPresent", "no")],
                    namespaces: vec![Attr::new("xmlns", "w", "urn:w"), Attr::new("", "xmlns", "urn:d")],
                },
                XmlEvent::end("w", "wordDocument"),
            ]
        );
    }

    #[test]
    fn test_empty_elements_are_expanded() {
        let got = events(r#"<w:p><w:br/></w:p>"#);
        assert_eq!(
            got,
            vec![
                XmlEvent::start("w", "p"),
                XmlEvent::start("w", "br"),
                XmlEvent::end("w", "br"),
                XmlEvent::end("w", "p"),
            ]
        );
    }

    #[test]
    fn test_text_pieces_are_merged() {
        let got = events(r#"<w:t>a &amp; b &#x41;<![CDATA[<raw>]]>&unknown;</w:t>"#);
        assert_eq!(got[1], XmlEvent::text("a & b A<raw>&unknown;"));
        assert_eq!(got.len(), 3);
    }

    #[test]
    fn test_attribute_values_are_unescaped() {
        let got = events(r#"<w:style w:styleId="a&lt;b"/>"#);
        match &got[0] {
            XmlEvent::StartElement { attributes, .. } => {
                assert_eq!(attributes, &vec![Attr::w("styleId", "a<b")]);
            },
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_whitespace_around_document_element_is_dropped() {
        let got = events("<?xml version=\"1.0\"?>\n<w:p> </w:p>\n");
        assert_eq!(
            got,
            vec![XmlEvent::start("w", "p"), XmlEvent::text(" "), XmlEvent::end("w", "p")]
        );
    }

    #[test]
    fn test_mismatched_end_names_pass_through() {
        let got = events("<w:p></w:r>");
        assert_eq!(got, vec![XmlEvent::start("w", "p"), XmlEvent::end("w", "r")]);
    }

    #[test]
    fn test_error_ends_the_stream() {
        let mut reader = XmlEventReader::new(r#"<w:p a="1" a="2">"#.as_bytes());
        let err = reader.next().unwrap().unwrap_err();
        assert!(err.is_parse_error());
        assert!(reader.next().is_none());
    }
}
