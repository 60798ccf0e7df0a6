//! Formatting properties and their promotion onto owners.
//!
//! Alignment (`w:jc`) and first-line indentation (`w:ind w:first-line`) are
//! not kept as elements under a paragraph's `w:pPr`. They are lifted onto the
//! paragraph itself as [`Align`] and an integer indent, both when a property
//! is attached and when such an element is added to an attached property.
//! Style definitions keep them as ordinary elements.
use tracing::trace;

use super::{Align, Attr, Document, NodeId, NodeType, Tag};
use crate::common::{Error, Result};

/// `w:color` value used for vanished (hidden) runs.
pub const DARK_RED_COLOR: &str = "800000";

/// Ordering weights used by [`Document::sort_property_elements`]; anything
/// else sorts after these, by tag name.
const ELEMENT_SORT_ORDER: [(Tag, u32); 6] = [
    (Tag::Vanish, 1),
    (Tag::Color, 10),
    (Tag::PStyle, 15),
    (Tag::Ind, 30),
    (Tag::Shd, 40),
    (Tag::Jc, 50),
];

impl Document {
    /// Alignment encoded by a `w:jc` element's `w:val`.
    pub fn jc_align(&self, jc: NodeId) -> Result<Align> {
        Ok(self.w_attribute(jc, "val")?.map(Align::from_xml).unwrap_or_default())
    }

    /// First-line indent encoded by a `w:ind` element's `w:first-line`.
    pub fn first_line_indent(&self, ind: NodeId) -> Result<Option<i32>> {
        match self.w_attribute(ind, "first-line")? {
            Some(value) => value
                .trim()
                .parse::<i32>()
                .map(Some)
                .map_err(|e| Error::Processing(format!("Invalid first-line indent '{}' on {}: {}", value, ind, e))),
            None => Ok(None),
        }
    }

    fn is_style_like(&self, id: NodeId) -> Result<bool> {
        Ok(self.tag(id)?.is_some_and(Tag::is_style_container))
    }

    fn supports_indentation(&self, id: NodeId) -> Result<bool> {
        Ok(self.tag(id)?.is_some_and(Tag::supports_indentation))
    }

    fn promotion_target(&self, composite: NodeId, element: NodeId) -> Result<NodeId> {
        self.parent(composite)?.ok_or_else(|| {
            Error::Processing(format!(
                "{} can't be added to {} without a parent",
                self.data(element).map(|d| d.kind.type_name()).unwrap_or_default(),
                composite
            ))
        })
    }

    /// Apply the `add` special cases. Returns `true` when the element was
    /// absorbed into the grandparent and must not be stored.
    pub(crate) fn promote_on_add(&mut self, composite: NodeId, node: NodeId) -> Result<bool> {
        match self.tag(node)? {
            Some(Tag::Jc) => {
                let target = self.promotion_target(composite, node)?;
                if self.is_style_like(target)? {
                    return Ok(false);
                }
                let align = self.jc_align(node)?;
                trace!(%target, %align, "promoting w:jc");
                self.data_mut(target)?.align = align;
                Ok(true)
            },
            Some(Tag::Ind) if self.find_attribute_by_name(node, "first-line")?.is_some() => {
                let target = self.promotion_target(composite, node)?;
                if self.is_style_like(target)? || !self.supports_indentation(target)? {
                    return Ok(false);
                }
                let indent = self.first_line_indent(node)?;
                trace!(%target, ?indent, "promoting w:ind");
                self.data_mut(target)?.indent = indent;
                Ok(true)
            },
            _ => Ok(false),
        }
    }

    // ------------------------------------------------------------------
    // Property list
    // ------------------------------------------------------------------

    /// Attached properties in attachment order.
    pub fn properties(&self, owner: NodeId) -> Result<&[NodeId]> {
        Ok(self.composite(owner)?.properties.as_deref().unwrap_or(&[]))
    }

    #[inline]
    pub fn properties_size(&self, owner: NodeId) -> Result<usize> {
        Ok(self.properties(owner)?.len())
    }

    /// Attach `property` to `owner`, absorbing alignment and indentation from
    /// a `w:pPr`. Any property with the same tag is evicted.
    #[inline]
    pub fn set_property(&mut self, owner: NodeId, property: NodeId) -> Result<()> {
        self.set_property_with(owner, property, true)
    }

    /// Attach `property` to `owner`; `process` controls the `w:pPr` scan.
    pub fn set_property_with(&mut self, owner: NodeId, property: NodeId, process: bool) -> Result<()> {
        self.composite(owner)?;
        if !self.data(property)?.kind.is_property() {
            return Err(Error::NotAProperty(property));
        }
        if self.would_cycle(property, owner)? {
            return Err(Error::Cycle {
                node: property,
                parent: owner,
            });
        }
        self.detach(property)?;
        if process && self.kind(property)?.is(Tag::PProp) {
            self.absorb_paragraph_properties(owner, property)?;
        }

        let tag = self.tag(property)?;
        let evicted: Vec<NodeId> = self
            .properties(owner)?
            .iter()
            .copied()
            .filter(|p| self.tag(*p).ok().flatten() == tag)
            .collect();
        for old in evicted {
            self.detach(old)?;
        }
        self.attach_property(owner, property);
        Ok(())
    }

    fn absorb_paragraph_properties(&mut self, owner: NodeId, pprop: NodeId) -> Result<()> {
        if let Some(jc) = self.first_of(pprop, Tag::Jc)?
            && self.has_attributes(jc)?
        {
            let align = self.jc_align(jc)?;
            if align != Align::None {
                self.data_mut(owner)?.align = align;
                self.detach(jc)?;
            }
        }
        if let Some(ind) = self.first_of(pprop, Tag::Ind)?
            && self.has_attributes(ind)?
            && self.supports_indentation(owner)?
            && let Some(indent) = self.first_line_indent(ind)?
        {
            self.data_mut(owner)?.indent = Some(indent);
            self.detach(ind)?;
        }
        Ok(())
    }

    /// First attached property of the given type.
    pub fn find_property(&self, owner: NodeId, property_type: impl Into<NodeType>) -> Result<Option<NodeId>> {
        let property_type = property_type.into();
        for property in self.properties(owner)? {
            if property_type.matches(self.kind(*property)?) {
                return Ok(Some(*property));
            }
        }
        Ok(None)
    }

    /// First element of `element_type` inside the owner's property of
    /// `property_type`.
    pub fn find_property_element(
        &self,
        owner: NodeId,
        property_type: impl Into<NodeType>,
        element_type: impl Into<NodeType>,
    ) -> Result<Option<NodeId>> {
        match self.find_property(owner, property_type)? {
            Some(property) => self.first_of(property, element_type),
            None => Ok(None),
        }
    }

    /// Whether the property element exists and its attribute `attr_name`
    /// (any namespace) equals `value`.
    pub fn has_property(
        &self,
        owner: NodeId,
        property_type: impl Into<NodeType>,
        element_type: impl Into<NodeType>,
        attr_name: &str,
        value: &str,
    ) -> Result<bool> {
        match self.find_property_element(owner, property_type, element_type)? {
            Some(element) => Ok(self
                .find_attribute_by_name(element, attr_name)?
                .is_some_and(|a| a.value == value)),
            None => Ok(false),
        }
    }

    /// Detach every property of the given type.
    pub fn remove_property(&mut self, owner: NodeId, property_type: impl Into<NodeType>) -> Result<Vec<NodeId>> {
        let property_type = property_type.into();
        let mut removed = Vec::new();
        for property in self.properties(owner)?.to_vec() {
            if property_type.matches(self.kind(property)?) {
                self.detach(property)?;
                removed.push(property);
            }
        }
        Ok(removed)
    }

    /// Detach the first matching element from the owner's property.
    pub fn remove_property_element(
        &mut self,
        owner: NodeId,
        property_type: impl Into<NodeType>,
        element_type: impl Into<NodeType>,
    ) -> Result<Option<NodeId>> {
        let element = self.find_property_element(owner, property_type, element_type)?;
        if let Some(element) = element {
            self.detach(element)?;
        }
        Ok(element)
    }

    /// Detach the owner's property of the given type if it has no elements.
    pub fn remove_empty_property(&mut self, owner: NodeId, property_type: impl Into<NodeType>) -> Result<bool> {
        let property_type = property_type.into();
        match self.find_property(owner, property_type)? {
            Some(property) if self.size(property)? == 0 => {
                self.remove_property(owner, property_type)?;
                Ok(true)
            },
            _ => Ok(false),
        }
    }

    /// Put `element` into the owner's `property_tag` property.
    ///
    /// A `w:jc` with a recognized value goes straight to the owner's
    /// alignment. Otherwise an existing element of the same tag is replaced,
    /// or the element is added to the existing property, or a new property is
    /// created for it.
    pub fn add_property_element(&mut self, owner: NodeId, property_tag: Tag, element: NodeId) -> Result<()> {
        self.add_property_element_with(owner, property_tag, element, true)
    }

    pub fn add_property_element_with(
        &mut self,
        owner: NodeId,
        property_tag: Tag,
        element: NodeId,
        process: bool,
    ) -> Result<()> {
        self.composite(owner)?;
        if process && self.kind(element)?.is(Tag::Jc) {
            let align = self.jc_align(element)?;
            if align != Align::None {
                self.data_mut(owner)?.align = align;
                return Ok(());
            }
        }

        let element_type = match self.tag(element)? {
            Some(tag) => NodeType::Tag(tag),
            None => NodeType::Unidentified,
        };
        if let Some(existing) = self.find_property_element(owner, property_tag, element_type)? {
            let holder = self.get_parent(existing)?;
            self.replace(holder, existing, element)?;
            return Ok(());
        }
        if let Some(property) = self.find_property(owner, property_tag)? {
            return self.add(property, element);
        }
        let property = self.create_element(property_tag)?;
        self.set_property_with(owner, property, false)?;
        self.add(property, element)
    }

    /// Attach clones of every property of `from` to `to`, along with its
    /// alignment and indentation.
    pub fn copy_all_properties(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        self.copy_alignment(from, to)?;
        self.copy_indentation(from, to)?;
        for property in self.properties(from)?.to_vec() {
            let copy = self.clone_subtree(property)?;
            self.set_property(to, copy)?;
        }
        Ok(())
    }

    /// Hide a node's text: a `w:vanish` plus the dark red marker color in its
    /// `w:rPr`.
    pub fn add_vanish_run_property(&mut self, owner: NodeId) -> Result<()> {
        let vanish = self.create_element(Tag::Vanish)?;
        self.add_property_element(owner, Tag::RProp, vanish)?;
        let color = self.create_with_attributes(Tag::Color, [Attr::w("val", DARK_RED_COLOR)])?;
        self.add_property_element(owner, Tag::RProp, color)
    }

    /// Point the node's `w:pPr/w:pStyle` at `style_id`, creating both as
    /// needed.
    pub fn set_paragraph_style(&mut self, owner: NodeId, style_id: &str) -> Result<()> {
        let style_attr = Attr::w("val", style_id);
        match self.find_property_element(owner, Tag::PProp, Tag::PStyle)? {
            Some(pstyle) => self.update_attribute_by_name(pstyle, "val", style_attr),
            None => {
                let pstyle = self.create_with_attributes(Tag::PStyle, [style_attr])?;
                self.add_property_element(owner, Tag::PProp, pstyle)
            },
        }
    }

    /// Order the elements of a property: vanish, color, pStyle, ind, shd,
    /// jc, then everything else by tag name.
    pub fn sort_property_elements(&mut self, property: NodeId) -> Result<()> {
        let mut keyed = Vec::with_capacity(self.size(property)?);
        for child in self.children(property)? {
            let kind = self.kind(*child)?;
            let weight = kind
                .tag()
                .and_then(|tag| ELEMENT_SORT_ORDER.iter().find(|(t, _)| *t == tag))
                .map_or(u32::MAX, |(_, w)| *w);
            keyed.push((weight, kind.type_name(), *child));
        }
        keyed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        self.data_mut(property)?.children = keyed.into_iter().map(|(_, _, id)| id).collect();
        self.reindex(property, 0);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Alignment and indentation
    // ------------------------------------------------------------------

    #[inline]
    pub fn align(&self, id: NodeId) -> Result<Align> {
        Ok(self.composite(id)?.align)
    }

    pub fn set_align(&mut self, id: NodeId, align: Align) -> Result<()> {
        self.composite(id)?;
        self.data_mut(id)?.align = align;
        Ok(())
    }

    #[inline]
    pub fn indent(&self, id: NodeId) -> Result<Option<i32>> {
        Ok(self.composite(id)?.indent)
    }

    /// Set the first-line indent of a node that supports indentation.
    pub fn set_indent(&mut self, id: NodeId, indent: Option<i32>) -> Result<()> {
        self.composite(id)?;
        if !self.supports_indentation(id)? {
            return Err(Error::Processing(format!("Node {} does not support indentation", id)));
        }
        self.data_mut(id)?.indent = indent;
        Ok(())
    }

    pub fn copy_alignment(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        let align = self.align(from)?;
        self.set_align(to, align)
    }

    /// Copy the indent when both nodes support indentation; otherwise a
    /// no-op.
    pub fn copy_indentation(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        if self.supports_indentation(from)? && self.supports_indentation(to)? {
            let indent = self.indent(from)?;
            self.data_mut(to)?.indent = indent;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jc(doc: &mut Document, value: &str) -> NodeId {
        doc.create_with_attributes(Tag::Jc, [Attr::w("val", value)]).unwrap()
    }

    fn first_line_ind(doc: &mut Document, value: &str) -> NodeId {
        doc.create_with_attributes(Tag::Ind, [Attr::w("first-line", value)]).unwrap()
    }

    fn para_with_pprop(doc: &mut Document) -> (NodeId, NodeId) {
        let para = doc.create_element(Tag::Para).unwrap();
        let pprop = doc.create_element(Tag::PProp).unwrap();
        doc.set_property(para, pprop).unwrap();
        (para, pprop)
    }

    #[test]
    fn test_jc_added_to_attached_pprop_is_promoted() {
        let mut doc = Document::new();
        let (para, pprop) = para_with_pprop(&mut doc);
        let jc = jc(&mut doc, "center");
        doc.add(pprop, jc).unwrap();
        assert_eq!(doc.align(para).unwrap(), Align::Center);
        assert_eq!(doc.size(pprop).unwrap(), 0);
        assert_eq!(doc.parent(jc).unwrap(), None);
    }

    #[test]
    fn test_repeated_jc_overwrites() {
        let mut doc = Document::new();
        let (para, pprop) = para_with_pprop(&mut doc);
        let first = jc(&mut doc, "left");
        let second = jc(&mut doc, "right");
        doc.add(pprop, first).unwrap();
        doc.add(pprop, second).unwrap();
        assert_eq!(doc.align(para).unwrap(), Align::Right);
        assert_eq!(doc.size(pprop).unwrap(), 0);
    }

    #[test]
    fn test_jc_without_grandparent_fails() {
        let mut doc = Document::new();
        let pprop = doc.create_element(Tag::PProp).unwrap();
        let jc = jc(&mut doc, "center");
        assert!(matches!(doc.add(pprop, jc), Err(Error::Processing(_))));
    }

    #[test]
    fn test_jc_under_style_is_stored() {
        let mut doc = Document::new();
        let style = doc.create_element(Tag::Style).unwrap();
        let pprop = doc.create_element(Tag::PProp).unwrap();
        doc.set_property(style, pprop).unwrap();
        let jc = jc(&mut doc, "center");
        doc.add(pprop, jc).unwrap();
        assert_eq!(doc.align(style).unwrap(), Align::None);
        assert_eq!(doc.children(pprop).unwrap(), &[jc]);
    }

    #[test]
    fn test_ind_first_line_promoted_to_paragraph() {
        let mut doc = Document::new();
        let (para, pprop) = para_with_pprop(&mut doc);
        let ind = first_line_ind(&mut doc, "720");
        doc.add(pprop, ind).unwrap();
        assert_eq!(doc.indent(para).unwrap(), Some(720));
        assert_eq!(doc.size(pprop).unwrap(), 0);
    }

    #[test]
    fn test_ind_on_run_property_is_stored() {
        let mut doc = Document::new();
        let run = doc.create_element(Tag::Run).unwrap();
        let rprop = doc.create_element(Tag::RProp).unwrap();
        doc.set_property(run, rprop).unwrap();
        let ind = first_line_ind(&mut doc, "720");
        doc.add(rprop, ind).unwrap();
        assert_eq!(doc.children(rprop).unwrap(), &[ind]);
    }

    #[test]
    fn test_ind_without_first_line_is_stored() {
        let mut doc = Document::new();
        let (para, pprop) = para_with_pprop(&mut doc);
        let ind = doc.create_with_attributes(Tag::Ind, [Attr::w("left", "100")]).unwrap();
        doc.add(pprop, ind).unwrap();
        assert_eq!(doc.indent(para).unwrap(), None);
        assert_eq!(doc.children(pprop).unwrap(), &[ind]);
    }

    #[test]
    fn test_invalid_first_line_fails() {
        let mut doc = Document::new();
        let (_, pprop) = para_with_pprop(&mut doc);
        let ind = first_line_ind(&mut doc, "wide");
        assert!(matches!(doc.add(pprop, ind), Err(Error::Processing(_))));
    }

    #[test]
    fn test_set_property_absorbs_prefilled_pprop() {
        let mut doc = Document::new();
        let para = doc.create_element(Tag::Para).unwrap();
        let pprop = doc.create_element(Tag::PProp).unwrap();
        let jc = jc(&mut doc, "both");
        let ind = first_line_ind(&mut doc, "-240");
        let style = doc.create_with_attributes(Tag::PStyle, [Attr::w("val", "Heading1")]).unwrap();
        // Build the property while detached through the raw path
        doc.attach_child(pprop, jc);
        doc.attach_child(pprop, ind);
        doc.attach_child(pprop, style);

        doc.set_property(para, pprop).unwrap();
        assert_eq!(doc.align(para).unwrap(), Align::Justify);
        assert_eq!(doc.indent(para).unwrap(), Some(-240));
        assert_eq!(doc.children(pprop).unwrap(), &[style]);
    }

    #[test]
    fn test_set_property_absorbs_first_of_repeated_jc() {
        let mut doc = Document::new();
        let para = doc.create_element(Tag::Para).unwrap();
        let pprop = doc.create_element(Tag::PProp).unwrap();
        let first = jc(&mut doc, "right");
        let second = jc(&mut doc, "center");
        doc.attach_child(pprop, first);
        doc.attach_child(pprop, second);

        doc.set_property(para, pprop).unwrap();
        assert_eq!(doc.align(para).unwrap(), Align::Right);
        assert_eq!(doc.children(pprop).unwrap(), &[second]);
    }

    #[test]
    fn test_set_property_without_processing_keeps_elements() {
        let mut doc = Document::new();
        let para = doc.create_element(Tag::Para).unwrap();
        let pprop = doc.create_element(Tag::PProp).unwrap();
        let jc = jc(&mut doc, "center");
        doc.attach_child(pprop, jc);
        doc.set_property_with(para, pprop, false).unwrap();
        assert_eq!(doc.align(para).unwrap(), Align::None);
        assert_eq!(doc.size(pprop).unwrap(), 1);
    }

    #[test]
    fn test_set_property_evicts_same_tag() {
        let mut doc = Document::new();
        let run = doc.create_element(Tag::Run).unwrap();
        let first = doc.create_element(Tag::RProp).unwrap();
        let second = doc.create_element(Tag::RProp).unwrap();
        doc.set_property(run, first).unwrap();
        doc.set_property(run, second).unwrap();
        assert_eq!(doc.properties(run).unwrap(), &[second]);
        assert_eq!(doc.parent(first).unwrap(), None);
        assert_eq!(doc.get_parent(second).unwrap(), run);
        assert!(doc.is_property_of(second, run).unwrap());
    }

    #[test]
    fn test_set_property_moves_between_owners() {
        let mut doc = Document::new();
        let a = doc.create_element(Tag::Run).unwrap();
        let b = doc.create_element(Tag::Run).unwrap();
        let rprop = doc.create_element(Tag::RProp).unwrap();
        doc.set_property(a, rprop).unwrap();
        doc.set_property(b, rprop).unwrap();
        assert_eq!(doc.properties_size(a).unwrap(), 0);
        assert_eq!(doc.properties(b).unwrap(), &[rprop]);
    }

    #[test]
    fn test_set_property_rejects_non_property() {
        let mut doc = Document::new();
        let para = doc.create_element(Tag::Para).unwrap();
        let run = doc.create_element(Tag::Run).unwrap();
        assert!(matches!(doc.set_property(para, run), Err(Error::NotAProperty(_))));
    }

    #[test]
    fn test_property_queries() {
        let mut doc = Document::new();
        let cell = doc.create_element(Tag::TCell).unwrap();
        let vmerge = doc.create_with_attributes(Tag::VMerge, [Attr::w("val", "restart")]).unwrap();
        doc.add_property_element(cell, Tag::TCellProp, vmerge).unwrap();

        assert!(doc.find_property(cell, Tag::TCellProp).unwrap().is_some());
        assert_eq!(
            doc.find_property_element(cell, Tag::TCellProp, Tag::VMerge).unwrap(),
            Some(vmerge)
        );
        assert!(doc.has_property(cell, Tag::TCellProp, Tag::VMerge, "val", "restart").unwrap());
        assert!(!doc.has_property(cell, Tag::TCellProp, Tag::VMerge, "val", "continue").unwrap());
        assert!(!doc.has_property(cell, Tag::TCellProp, Tag::GridSpan, "val", "2").unwrap());

        assert_eq!(
            doc.remove_property_element(cell, Tag::TCellProp, Tag::VMerge).unwrap(),
            Some(vmerge)
        );
        assert!(doc.remove_empty_property(cell, Tag::TCellProp).unwrap());
        assert_eq!(doc.properties_size(cell).unwrap(), 0);
    }

    #[test]
    fn test_add_property_element_replaces_existing() {
        let mut doc = Document::new();
        let run = doc.create_element(Tag::Run).unwrap();
        let red = doc.create_with_attributes(Tag::Color, [Attr::w("val", "FF0000")]).unwrap();
        let blue = doc.create_with_attributes(Tag::Color, [Attr::w("val", "0000FF")]).unwrap();
        let bold = doc.create_element(Tag::Bold).unwrap();
        doc.add_property_element(run, Tag::RProp, red).unwrap();
        doc.add_property_element(run, Tag::RProp, bold).unwrap();
        doc.add_property_element(run, Tag::RProp, blue).unwrap();

        let rprop = doc.find_property(run, Tag::RProp).unwrap().unwrap();
        assert_eq!(doc.children(rprop).unwrap(), &[blue, bold]);
        assert!(doc.has_property(run, Tag::RProp, Tag::Color, "val", "0000FF").unwrap());
    }

    #[test]
    fn test_add_property_element_promotes_jc() {
        let mut doc = Document::new();
        let para = doc.create_element(Tag::Para).unwrap();
        let jc = jc(&mut doc, "right");
        doc.add_property_element(para, Tag::PProp, jc).unwrap();
        assert_eq!(doc.align(para).unwrap(), Align::Right);
        assert_eq!(doc.properties_size(para).unwrap(), 0);
    }

    #[test]
    fn test_vanish_and_paragraph_style_helpers() {
        let mut doc = Document::new();
        let run = doc.create_element(Tag::Run).unwrap();
        doc.add_vanish_run_property(run).unwrap();
        assert!(doc.find_property_element(run, Tag::RProp, Tag::Vanish).unwrap().is_some());
        assert!(doc.has_property(run, Tag::RProp, Tag::Color, "val", DARK_RED_COLOR).unwrap());

        let para = doc.create_element(Tag::Para).unwrap();
        doc.set_paragraph_style(para, "Heading1").unwrap();
        doc.set_paragraph_style(para, "Heading2").unwrap();
        assert!(doc.has_property(para, Tag::PProp, Tag::PStyle, "val", "Heading2").unwrap());
        let pprop = doc.find_property(para, Tag::PProp).unwrap().unwrap();
        assert_eq!(doc.size(pprop).unwrap(), 1);
    }

    #[test]
    fn test_sort_property_elements() {
        let mut doc = Document::new();
        let rprop = doc.create_element(Tag::RProp).unwrap();
        let bold = doc.create_element(Tag::Bold).unwrap();
        let color = doc.create_element(Tag::Color).unwrap();
        let vanish = doc.create_element(Tag::Vanish).unwrap();
        let sz = doc.create_element(Tag::Sz).unwrap();
        doc.add_all(rprop, [bold, sz, color, vanish]).unwrap();
        doc.sort_property_elements(rprop).unwrap();
        assert_eq!(doc.children(rprop).unwrap(), &[vanish, color, bold, sz]);
        assert_eq!(doc.next(vanish).unwrap(), Some(color));
    }

    #[test]
    fn test_copy_all_properties() {
        let mut doc = Document::new();
        let source = doc.create_element(Tag::Para).unwrap();
        let target = doc.create_element(Tag::Para).unwrap();
        doc.set_paragraph_style(source, "Title").unwrap();
        doc.set_align(source, Align::Center).unwrap();
        doc.set_indent(source, Some(360)).unwrap();

        doc.copy_all_properties(source, target).unwrap();
        assert_eq!(doc.align(target).unwrap(), Align::Center);
        assert_eq!(doc.indent(target).unwrap(), Some(360));
        assert!(doc.has_property(target, Tag::PProp, Tag::PStyle, "val", "Title").unwrap());
        assert_ne!(doc.properties(target).unwrap(), doc.properties(source).unwrap());
    }

    #[test]
    fn test_set_indent_requires_capability() {
        let mut doc = Document::new();
        let run = doc.create_element(Tag::Run).unwrap();
        assert!(doc.set_indent(run, Some(1)).is_err());
    }
}
