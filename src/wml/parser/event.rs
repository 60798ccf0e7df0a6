use crate::wml::Attr;

/// One step of the markup stream the tree builder consumes.
///
/// Names are already split; attribute values and text are already
/// unescaped. Namespace declarations are kept apart from ordinary
/// attributes: `xmlns:w="..."` arrives as `Attr { namespace: "xmlns",
/// name: "w", .. }` and a default declaration as `Attr { namespace: "",
/// name: "xmlns", .. }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlEvent {
    StartElement {
        prefix: String,
        local_name: String,
        attributes: Vec<Attr>,
        namespaces: Vec<Attr>,
    },
    Characters(String),
    EndElement {
        prefix: String,
        local_name: String,
    },
}

impl XmlEvent {
    /// Start tag without attributes.
    pub fn start(prefix: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self::StartElement {
            prefix: prefix.into(),
            local_name: local_name.into(),
            attributes: Vec::new(),
            namespaces: Vec::new(),
        }
    }

    pub fn start_with(prefix: impl Into<String>, local_name: impl Into<String>, attributes: Vec<Attr>) -> Self {
        Self::StartElement {
            prefix: prefix.into(),
            local_name: local_name.into(),
            attributes,
            namespaces: Vec::new(),
        }
    }

    #[inline]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Characters(text.into())
    }

    pub fn end(prefix: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self::EndElement {
            prefix: prefix.into(),
            local_name: local_name.into(),
        }
    }
}
