//! Node handles, kinds and type predicates.
use std::fmt;

use super::{Align, Attr, QName, Tag, TagCategory};
use crate::common::{Error, Result};

/// Handle to a node inside a [`Document`](super::Document) arena.
///
/// Handles are plain indices: they are `Copy`, cheap to compare, and only
/// meaningful for the document that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Handle of the `w:wordDocument` node, always the first slot.
    pub(crate) const ROOT: NodeId = NodeId(0);

    /// Handle for an arena slot; fails once the arena outgrows `u32`.
    #[inline]
    pub(crate) fn from_index(index: usize) -> Result<Self> {
        u32::try_from(index).map(Self).map_err(|_| Error::TooManyNodes(index))
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A recognized element other than `w:t` and `w:binData`.
    Element(Tag),
    /// `w:t` text leaf.
    Text(String),
    /// `w:binData` leaf holding a base64 payload.
    BinData(String),
    /// Unrecognized element; composite.
    Unidentified(QName),
    /// Unrecognized element that carries character data; leaf.
    UnidentifiedText { name: QName, text: String },
}

impl NodeKind {
    /// Instantiate the kind for a registry tag.
    pub fn from_tag(tag: Tag) -> Self {
        match tag {
            Tag::Text => Self::Text(String::new()),
            Tag::BinData => Self::BinData(String::new()),
            other => Self::Element(other),
        }
    }

    /// Instantiate the kind for a qualified element name, falling back to
    /// [`NodeKind::Unidentified`] outside the registry.
    pub fn from_qname(prefix: &str, local_name: &str) -> Self {
        match Tag::from_qname(prefix, local_name) {
            Some(tag) => Self::from_tag(tag),
            None => Self::Unidentified(QName::new(prefix, local_name)),
        }
    }

    /// Registry tag, if the kind has one.
    #[inline]
    pub fn tag(&self) -> Option<Tag> {
        match self {
            Self::Element(tag) => Some(*tag),
            Self::Text(_) => Some(Tag::Text),
            Self::BinData(_) => Some(Tag::BinData),
            Self::Unidentified(_) | Self::UnidentifiedText { .. } => None,
        }
    }

    #[inline]
    pub fn is(&self, tag: Tag) -> bool {
        self.tag() == Some(tag)
    }

    /// `(prefix, local_name)` as written in markup.
    pub fn qname(&self) -> (&str, &str) {
        match self {
            Self::Element(tag) => tag.qname(),
            Self::Text(_) => Tag::Text.qname(),
            Self::BinData(_) => Tag::BinData.qname(),
            Self::Unidentified(name) | Self::UnidentifiedText { name, .. } => {
                (name.prefix.as_str(), name.local_name.as_str())
            },
        }
    }

    #[inline]
    pub fn is_composite(&self) -> bool {
        match self {
            Self::Element(tag) => tag.category() != TagCategory::Leaf,
            Self::Unidentified(_) => true,
            _ => false,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        !self.is_composite()
    }

    #[inline]
    pub fn is_property(&self) -> bool {
        matches!(self, Self::Element(tag) if tag.category() == TagCategory::Property)
    }

    #[inline]
    pub fn is_property_element(&self) -> bool {
        matches!(self, Self::Element(tag) if tag.category() == TagCategory::PropertyElement)
    }

    #[inline]
    pub fn is_text_container(&self) -> bool {
        matches!(self, Self::Text(_) | Self::UnidentifiedText { .. })
    }

    /// Character payload of text containers and bin data.
    #[inline]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) | Self::BinData(text) | Self::UnidentifiedText { text, .. } => Some(text),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn text_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::Text(text) | Self::BinData(text) | Self::UnidentifiedText { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Stable name of the variant, used for ordering in comparisons.
    pub(crate) fn type_name(&self) -> String {
        match self {
            Self::Element(tag) => format!("{:?}", tag),
            Self::Text(_) => "Text".to_string(),
            Self::BinData(_) => "BinData".to_string(),
            Self::Unidentified(_) => "Unidentified".to_string(),
            Self::UnidentifiedText { .. } => "UnidentifiedText".to_string(),
        }
    }
}

/// Type selector for queries.
///
/// `Any` and `Composite` are the generic supertypes. Only `Composite` keeps a
/// descendant walk going below the nodes it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Any,
    Composite,
    Property,
    PropertyElement,
    Leaf,
    TextContainer,
    /// Both unidentified variants.
    Unidentified,
    Tag(Tag),
}

impl NodeType {
    pub fn matches(self, kind: &NodeKind) -> bool {
        match self {
            Self::Any => true,
            Self::Composite => kind.is_composite(),
            Self::Property => kind.is_property(),
            Self::PropertyElement => kind.is_property_element(),
            Self::Leaf => kind.is_leaf(),
            Self::TextContainer => kind.is_text_container(),
            Self::Unidentified => {
                matches!(kind, NodeKind::Unidentified(_) | NodeKind::UnidentifiedText { .. })
            },
            Self::Tag(tag) => kind.is(tag),
        }
    }

    #[inline]
    pub const fn is_generic(self) -> bool {
        matches!(self, Self::Any | Self::Composite)
    }

    /// Whether a [`Relation::Descendant`](super::Relation::Descendant) walk
    /// looks below accepted matches of this type.
    #[inline]
    pub const fn descends_into_matches(self) -> bool {
        matches!(self, Self::Composite)
    }
}

impl From<Tag> for NodeType {
    #[inline]
    fn from(tag: Tag) -> Self {
        Self::Tag(tag)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(tag) => write!(f, "{}", tag),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Where a node is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Membership {
    Detached,
    Child { parent: NodeId, index: usize },
    Property { owner: NodeId },
}

/// One arena slot.
#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub uid: u64,
    pub kind: NodeKind,
    pub attributes: Option<Vec<Attr>>,
    pub membership: Membership,
    pub children: Vec<NodeId>,
    pub properties: Option<Vec<NodeId>>,
    pub align: Align,
    pub indent: Option<i32>,
    pub destroyed: bool,
}

impl NodeData {
    pub(crate) fn new(uid: u64, kind: NodeKind) -> Self {
        Self {
            uid,
            kind,
            attributes: None,
            membership: Membership::Detached,
            children: Vec::new(),
            properties: None,
            align: Align::None,
            indent: None,
            destroyed: false,
        }
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<NodeId> {
        match self.membership {
            Membership::Detached => None,
            Membership::Child { parent, .. } => Some(parent),
            Membership::Property { owner } => Some(owner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_qname() {
        assert_eq!(NodeKind::from_qname("w", "t"), NodeKind::Text(String::new()));
        assert_eq!(NodeKind::from_qname("w", "p"), NodeKind::Element(Tag::Para));
        assert_eq!(
            NodeKind::from_qname("aml", "annotation"),
            NodeKind::Unidentified(QName::new("aml", "annotation"))
        );
    }

    #[test]
    fn test_composite_classification() {
        assert!(NodeKind::Element(Tag::Para).is_composite());
        assert!(NodeKind::Element(Tag::Jc).is_composite());
        assert!(NodeKind::Unidentified(QName::new("x", "y")).is_composite());
        assert!(!NodeKind::Element(Tag::Br).is_composite());
        assert!(!NodeKind::Text("a".into()).is_composite());
    }

    #[test]
    fn test_node_type_matching() {
        let text = NodeKind::Text("a".into());
        let utext = NodeKind::UnidentifiedText {
            name: QName::new("o", "Title"),
            text: "t".into(),
        };
        assert!(NodeType::TextContainer.matches(&text));
        assert!(NodeType::TextContainer.matches(&utext));
        assert!(NodeType::Unidentified.matches(&utext));
        assert!(NodeType::Tag(Tag::Text).matches(&text));
        assert!(!NodeType::Tag(Tag::Text).matches(&utext));
        assert!(NodeType::Property.matches(&NodeKind::Element(Tag::RProp)));
        assert!(!NodeType::Property.matches(&NodeKind::Element(Tag::Bold)));
    }

    #[test]
    fn test_only_composite_descends_into_matches() {
        assert!(NodeType::Composite.descends_into_matches());
        assert!(!NodeType::Any.descends_into_matches());
        assert!(!NodeType::Tag(Tag::Para).descends_into_matches());
        assert!(NodeType::Any.is_generic());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_index_beyond_u32_is_rejected() {
        let last = u32::MAX as usize;
        assert_eq!(NodeId::from_index(last).unwrap().index(), last);
        assert!(matches!(NodeId::from_index(last + 1), Err(Error::TooManyNodes(_))));
    }

    #[test]
    fn test_qname_of_unidentified() {
        let kind = NodeKind::Unidentified(QName::new("aml", "annotation"));
        assert_eq!(kind.qname(), ("aml", "annotation"));
        assert_eq!(kind.tag(), None);
    }
}
