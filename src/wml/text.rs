//! Visible text extraction over `w:t` leaves.
use super::filter::{Filter, TextContainsFilter, TextEndsFilter, TextEqualsFilter, TextStartsFilter};
use super::{Document, NodeId, NodeKind, Relation, Tag};
use crate::common::Result;
use crate::common::text::join_smart;

impl Document {
    fn text_fragments(&self, id: NodeId) -> Result<impl Iterator<Item = &str>> {
        Ok(self
            .as_stream(id, Tag::Text)?
            .filter_map(|t| self.kind(t).ok().and_then(NodeKind::text)))
    }

    /// Every `w:t` under the node, concatenated.
    pub fn get_text(&self, id: NodeId) -> Result<String> {
        Ok(self.text_fragments(id)?.collect())
    }

    /// Every `w:t` under the node, joined with single spaces.
    pub fn get_text_with_space_delimiter(&self, id: NodeId) -> Result<String> {
        Ok(self.text_fragments(id)?.collect::<Vec<_>>().join(" "))
    }

    /// Every `w:t` under the node, with a space between fragments where
    /// [`needs_space`](crate::common::text::needs_space) calls for one.
    pub fn get_text_smart(&self, id: NodeId) -> Result<String> {
        Ok(join_smart(self.text_fragments(id)?))
    }

    fn has_text_matching(&self, id: NodeId, filter: &mut dyn Filter) -> Result<bool> {
        let mut found = false;
        self.process(id, Tag::Text, Relation::Descendant, filter, |_| found = true)?;
        Ok(found)
    }

    /// Some `w:t` under the node contains `needle`, ignoring case.
    pub fn contains_text(&self, id: NodeId, needle: &str) -> Result<bool> {
        self.has_text_matching(id, &mut TextContainsFilter::new(needle))
    }

    /// Some `w:t` under the node equals `needle`, ignoring case.
    pub fn contains_text_equals(&self, id: NodeId, needle: &str) -> Result<bool> {
        self.has_text_matching(id, &mut TextEqualsFilter::new(needle))
    }

    pub fn contains_text_starts(&self, id: NodeId, needle: &str) -> Result<bool> {
        self.has_text_matching(id, &mut TextStartsFilter::new(needle))
    }

    pub fn contains_text_ends(&self, id: NodeId, needle: &str) -> Result<bool> {
        self.has_text_matching(id, &mut TextEndsFilter::new(needle))
    }

    /// Whether the node renders nothing visible.
    ///
    /// A `w:t` is blank when it trims to nothing and a picture never is.
    /// Composites are blank when all their children are; other leaves are.
    pub fn is_blank(&self, id: NodeId) -> Result<bool> {
        let mut pending = vec![id];
        while let Some(node) = pending.pop() {
            let data = self.data(node)?;
            match &data.kind {
                NodeKind::Text(text) if !text.trim().is_empty() => return Ok(false),
                kind if kind.is(Tag::Pict) => return Ok(false),
                kind if kind.is_composite() => pending.extend(data.children.iter().copied()),
                _ => {},
            }
        }
        Ok(true)
    }

    #[inline]
    pub fn is_not_blank(&self, id: NodeId) -> Result<bool> {
        Ok(!self.is_blank(id)?)
    }

    /// Nearest following sibling that is not blank.
    pub fn find_next_with_text(&self, id: NodeId) -> Result<Option<NodeId>> {
        let mut current = self.next(id)?;
        while let Some(node) = current {
            if self.is_not_blank(node)? {
                return Ok(Some(node));
            }
            current = self.next(node)?;
        }
        Ok(None)
    }
}
