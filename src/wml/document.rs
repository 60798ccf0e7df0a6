//! Node arena with identity, links and attributes.
//!
//! Every node of a tree lives in one [`Document`]. A child's position is
//! cached in its membership record, and siblings are read from the parent's
//! child list at the neighboring indices, so the tree view and the sibling
//! view cannot drift apart. Every splice ends with a call to
//! `reindex`, which refreshes the cached positions from the splice point on.
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::node::{Membership, NodeData};
use super::{Attr, NodeId, NodeKind, Tag};
use crate::common::id::next_node_uid;
use crate::common::{Error, Result};

/// A WordML document tree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document holding only the `w:wordDocument` root.
    pub fn new() -> Self {
        let mut nodes = Vec::with_capacity(64);
        nodes.push(NodeData::new(next_node_uid(), NodeKind::from_tag(Tag::Document)));
        Self {
            nodes,
            root: NodeId::ROOT,
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, detached ones included.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|n| !n.destroyed).count()
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Allocate a detached node.
    ///
    /// Fails with [`Error::TooManyNodes`] once the arena is out of handles.
    pub fn create(&mut self, kind: NodeKind) -> Result<NodeId> {
        let id = NodeId::from_index(self.nodes.len())?;
        self.nodes.push(NodeData::new(next_node_uid(), kind));
        Ok(id)
    }

    #[inline]
    pub fn create_element(&mut self, tag: Tag) -> Result<NodeId> {
        self.create(NodeKind::from_tag(tag))
    }

    pub fn create_with_attributes<I>(&mut self, tag: Tag, attributes: I) -> Result<NodeId>
    where
        I: IntoIterator<Item = Attr>,
    {
        let id = self.create_element(tag)?;
        let attributes: Vec<Attr> = attributes.into_iter().collect();
        if !attributes.is_empty() {
            self.nodes[id.index()].attributes = Some(attributes);
        }
        Ok(id)
    }

    #[inline]
    pub fn create_text(&mut self, text: impl Into<String>) -> Result<NodeId> {
        self.create(NodeKind::Text(text.into()))
    }

    // ------------------------------------------------------------------
    // Slot access
    // ------------------------------------------------------------------

    pub(crate) fn data(&self, id: NodeId) -> Result<&NodeData> {
        match self.nodes.get(id.index()) {
            Some(data) if data.destroyed => Err(Error::Destroyed(id)),
            Some(data) => Ok(data),
            None => Err(Error::UnknownNode(id)),
        }
    }

    pub(crate) fn data_mut(&mut self, id: NodeId) -> Result<&mut NodeData> {
        match self.nodes.get_mut(id.index()) {
            Some(data) if data.destroyed => Err(Error::Destroyed(id)),
            Some(data) => Ok(data),
            None => Err(Error::UnknownNode(id)),
        }
    }

    /// Slot of a live composite.
    pub(crate) fn composite(&self, id: NodeId) -> Result<&NodeData> {
        let data = self.data(id)?;
        if data.kind.is_composite() {
            Ok(data)
        } else {
            Err(Error::NotComposite(id))
        }
    }

    /// Whether the handle refers to a live node of this document.
    #[inline]
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.data(id).is_ok()
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> Result<&NodeKind> {
        Ok(&self.data(id)?.kind)
    }

    #[inline]
    pub fn tag(&self, id: NodeId) -> Result<Option<Tag>> {
        Ok(self.data(id)?.kind.tag())
    }

    #[inline]
    pub fn uid(&self, id: NodeId) -> Result<u64> {
        Ok(self.data(id)?.uid)
    }

    /// `(prefix, local_name)` of the node as written in markup.
    pub fn qname(&self, id: NodeId) -> Result<(&str, &str)> {
        Ok(self.data(id)?.kind.qname())
    }

    #[inline]
    pub fn is_composite(&self, id: NodeId) -> Result<bool> {
        Ok(self.data(id)?.kind.is_composite())
    }

    // ------------------------------------------------------------------
    // Links
    // ------------------------------------------------------------------

    /// Parent composite, or the owner for a property node.
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.data(id)?.parent())
    }

    pub fn prev(&self, id: NodeId) -> Result<Option<NodeId>> {
        match self.data(id)?.membership {
            Membership::Child { parent, index } if index > 0 => {
                Ok(self.data(parent)?.children.get(index - 1).copied())
            },
            _ => Ok(None),
        }
    }

    pub fn next(&self, id: NodeId) -> Result<Option<NodeId>> {
        match self.data(id)?.membership {
            Membership::Child { parent, index } => Ok(self.data(parent)?.children.get(index + 1).copied()),
            _ => Ok(None),
        }
    }

    pub fn get_parent(&self, id: NodeId) -> Result<NodeId> {
        self.parent(id)?.ok_or(Error::NoSuchRelation {
            node: id,
            relation: "parent",
        })
    }

    pub fn get_prev(&self, id: NodeId) -> Result<NodeId> {
        self.prev(id)?.ok_or(Error::NoSuchRelation {
            node: id,
            relation: "previous sibling",
        })
    }

    pub fn get_next(&self, id: NodeId) -> Result<NodeId> {
        self.next(id)?.ok_or(Error::NoSuchRelation {
            node: id,
            relation: "next sibling",
        })
    }

    #[inline]
    pub fn has_parent(&self, id: NodeId) -> Result<bool> {
        Ok(self.parent(id)?.is_some())
    }

    #[inline]
    pub fn has_prev(&self, id: NodeId) -> Result<bool> {
        Ok(self.prev(id)?.is_some())
    }

    #[inline]
    pub fn has_next(&self, id: NodeId) -> Result<bool> {
        Ok(self.next(id)?.is_some())
    }

    /// Whether `node` sits in the property list of `owner`.
    #[inline]
    pub fn is_property_of(&self, node: NodeId, owner: NodeId) -> Result<bool> {
        Ok(self.data(node)?.membership == Membership::Property { owner })
    }

    /// Whether `ancestor` is `node` or lies on its parent chain.
    pub(crate) fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> Result<bool> {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return Ok(true);
            }
            current = self.data(id)?.parent();
        }
        Ok(false)
    }

    /// Whether attaching `node` under `parent` would close a cycle. Nodes
    /// without children or properties can only collide with themselves.
    pub(crate) fn would_cycle(&self, node: NodeId, parent: NodeId) -> Result<bool> {
        if node == parent {
            return Ok(true);
        }
        let data = self.data(node)?;
        if data.children.is_empty() && data.properties.as_ref().is_none_or(Vec::is_empty) {
            return Ok(false);
        }
        self.is_ancestor_or_self(node, parent)
    }

    /// Refresh cached child positions of `parent` starting at `from`.
    pub(crate) fn reindex(&mut self, parent: NodeId, from: usize) {
        let len = self.nodes[parent.index()].children.len();
        for index in from..len {
            let child = self.nodes[parent.index()].children[index];
            self.nodes[child.index()].membership = Membership::Child { parent, index };
        }
    }

    /// Remove the node from whatever list holds it. Detached nodes are left
    /// as they are.
    pub(crate) fn detach(&mut self, id: NodeId) -> Result<()> {
        match self.data(id)?.membership {
            Membership::Detached => return Ok(()),
            Membership::Child { parent, index } => {
                let children = &mut self.data_mut(parent)?.children;
                debug_assert_eq!(children.get(index), Some(&id));
                children.remove(index);
                self.reindex(parent, index);
            },
            Membership::Property { owner } => {
                if let Some(properties) = self.data_mut(owner)?.properties.as_mut() {
                    properties.retain(|p| *p != id);
                }
            },
        }
        self.nodes[id.index()].membership = Membership::Detached;
        Ok(())
    }

    /// Append without promotion or ownership checks. The child must be
    /// detached.
    pub(crate) fn attach_child(&mut self, parent: NodeId, child: NodeId) {
        let children = &mut self.nodes[parent.index()].children;
        let index = children.len();
        children.push(child);
        self.nodes[child.index()].membership = Membership::Child { parent, index };
    }

    /// Append to the property list without promotion. The property must be
    /// detached.
    pub(crate) fn attach_property(&mut self, owner: NodeId, property: NodeId) {
        self.nodes[owner.index()]
            .properties
            .get_or_insert_with(Vec::new)
            .push(property);
        self.nodes[property.index()].membership = Membership::Property { owner };
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    /// Attributes in stored order; empty when none were ever added.
    pub fn attributes(&self, id: NodeId) -> Result<&[Attr]> {
        Ok(self.data(id)?.attributes.as_deref().unwrap_or(&[]))
    }

    #[inline]
    pub fn has_attributes(&self, id: NodeId) -> Result<bool> {
        Ok(!self.attributes(id)?.is_empty())
    }

    /// First attribute with the given local name, in any namespace.
    pub fn find_attribute_by_name(&self, id: NodeId, name: &str) -> Result<Option<&Attr>> {
        Ok(self.attributes(id)?.iter().find(|a| a.name == name))
    }

    pub fn find_attribute(&self, id: NodeId, namespace: &str, name: &str) -> Result<Option<&Attr>> {
        Ok(self.attributes(id)?.iter().find(|a| a.is(namespace, name)))
    }

    /// Value of the `w:`-namespaced attribute `name`.
    pub fn w_attribute(&self, id: NodeId, name: &str) -> Result<Option<&str>> {
        Ok(self.find_attribute(id, "w", name)?.map(|a| a.value.as_str()))
    }

    pub fn add_attribute(&mut self, id: NodeId, attr: Attr) -> Result<()> {
        self.data_mut(id)?
            .attributes
            .get_or_insert_with(Vec::new)
            .push(attr);
        Ok(())
    }

    pub fn set_attributes(&mut self, id: NodeId, attributes: Vec<Attr>) -> Result<()> {
        self.data_mut(id)?.attributes = (!attributes.is_empty()).then_some(attributes);
        Ok(())
    }

    /// Replace the first attribute equal to `old`. Returns whether one was
    /// found.
    pub fn replace_attribute(&mut self, id: NodeId, old: &Attr, new: Attr) -> Result<bool> {
        let data = self.data_mut(id)?;
        match data
            .attributes
            .as_mut()
            .and_then(|attrs| attrs.iter_mut().find(|a| **a == *old))
        {
            Some(slot) => {
                *slot = new;
                Ok(true)
            },
            None => Ok(false),
        }
    }

    /// Replace the first attribute named `name`, or append `new` if there is
    /// none.
    pub fn update_attribute_by_name(&mut self, id: NodeId, name: &str, new: Attr) -> Result<()> {
        let attributes = self.data_mut(id)?.attributes.get_or_insert_with(Vec::new);
        match attributes.iter_mut().find(|a| a.name == name) {
            Some(slot) => *slot = new,
            None => attributes.push(new),
        }
        Ok(())
    }

    /// Remove the first attribute equal to `attr`. Returns whether one was
    /// removed.
    pub fn remove_attribute(&mut self, id: NodeId, attr: &Attr) -> Result<bool> {
        let Some(attributes) = self.data_mut(id)?.attributes.as_mut() else {
            return Ok(false);
        };
        match attributes.iter().position(|a| a == attr) {
            Some(pos) => {
                attributes.remove(pos);
                Ok(true)
            },
            None => Ok(false),
        }
    }

    // ------------------------------------------------------------------
    // Character payload
    // ------------------------------------------------------------------

    /// Text of a `w:t`, unidentified text or `w:binData` node.
    pub fn node_text(&self, id: NodeId) -> Result<Option<&str>> {
        Ok(self.data(id)?.kind.text())
    }

    pub fn set_node_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<()> {
        match self.data_mut(id)?.kind.text_mut() {
            Some(slot) => {
                *slot = text.into();
                Ok(())
            },
            None => Err(Error::Processing(format!("Node {} does not carry text", id))),
        }
    }

    pub(crate) fn append_node_text(&mut self, id: NodeId, text: &str) -> Result<bool> {
        match self.data_mut(id)?.kind.text_mut() {
            Some(slot) => {
                slot.push_str(text);
                Ok(true)
            },
            None => Ok(false),
        }
    }

    /// Decode the base64 payload of a `w:binData` node.
    pub fn bin_data_bytes(&self, id: NodeId) -> Result<Vec<u8>> {
        match &self.data(id)?.kind {
            NodeKind::BinData(payload) => {
                let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
                Ok(STANDARD.decode(compact)?)
            },
            _ => Err(Error::Processing(format!("Node {} is not w:binData", id))),
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Deep-copy a subtree into fresh, detached nodes.
    ///
    /// Children, properties, attributes, alignment and indentation are
    /// copied; every copy gets a new uid.
    pub fn clone_subtree(&mut self, id: NodeId) -> Result<NodeId> {
        let copy = self.copy_slot(id)?;
        // (source, copy) pairs whose children and properties are still pending
        let mut pending = vec![(id, copy)];
        while let Some((source, target)) = pending.pop() {
            let children = self.data(source)?.children.clone();
            let properties = self.data(source)?.properties.clone().unwrap_or_default();
            for child in children {
                let child_copy = self.copy_slot(child)?;
                self.attach_child(target, child_copy);
                pending.push((child, child_copy));
            }
            for property in properties {
                let property_copy = self.copy_slot(property)?;
                self.attach_property(target, property_copy);
                pending.push((property, property_copy));
            }
        }
        Ok(copy)
    }

    /// Detached copy of a single slot without its children and properties.
    fn copy_slot(&mut self, id: NodeId) -> Result<NodeId> {
        let source = self.data(id)?;
        let kind = source.kind.clone();
        let attributes = source.attributes.clone();
        let align = source.align;
        let indent = source.indent;

        let copy = self.create(kind)?;
        let data = &mut self.nodes[copy.index()];
        data.attributes = attributes;
        data.align = align;
        data.indent = indent;
        Ok(copy)
    }

    /// Detach the node and tear down its subtree.
    ///
    /// Every node of the subtree is marked destroyed; later operations on
    /// any of their handles fail with [`Error::Destroyed`].
    pub fn destroy(&mut self, id: NodeId) -> Result<()> {
        self.detach(id)?;
        let mut pending = vec![id];
        while let Some(node) = pending.pop() {
            let data = &mut self.nodes[node.index()];
            pending.extend(std::mem::take(&mut data.children));
            pending.extend(data.properties.take().unwrap_or_default());
            data.attributes = None;
            data.membership = Membership::Detached;
            data.destroyed = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wml::Align;

    fn para_with_runs(doc: &mut Document, n: usize) -> (NodeId, Vec<NodeId>) {
        let para = doc.create_element(Tag::Para).unwrap();
        let runs: Vec<NodeId> = (0..n).map(|_| doc.create_element(Tag::Run).unwrap()).collect();
        for run in &runs {
            doc.add(para, *run).unwrap();
        }
        (para, runs)
    }

    #[test]
    fn test_new_document_root() {
        let doc = Document::new();
        let root = doc.root();
        assert_eq!(doc.tag(root).unwrap(), Some(Tag::Document));
        assert_eq!(doc.parent(root).unwrap(), None);
        assert_eq!(doc.node_count(), 1);
    }

    #[test]
    fn test_uids_unique() {
        let mut doc = Document::new();
        let a = doc.create_element(Tag::Para).unwrap();
        let b = doc.create_element(Tag::Para).unwrap();
        assert_ne!(doc.uid(a).unwrap(), doc.uid(b).unwrap());
    }

    #[test]
    fn test_sibling_links() {
        let mut doc = Document::new();
        let (para, runs) = para_with_runs(&mut doc, 3);
        assert_eq!(doc.prev(runs[0]).unwrap(), None);
        assert_eq!(doc.next(runs[0]).unwrap(), Some(runs[1]));
        assert_eq!(doc.prev(runs[2]).unwrap(), Some(runs[1]));
        assert_eq!(doc.next(runs[2]).unwrap(), None);
        assert_eq!(doc.get_parent(runs[1]).unwrap(), para);
        assert!(matches!(
            doc.get_next(runs[2]),
            Err(Error::NoSuchRelation { relation: "next sibling", .. })
        ));
        assert!(matches!(doc.get_parent(para), Err(Error::NoSuchRelation { .. })));
    }

    #[test]
    fn test_attribute_operations() {
        let mut doc = Document::new();
        let jc = doc.create_element(Tag::Jc).unwrap();
        assert!(doc.attributes(jc).unwrap().is_empty());
        assert!(!doc.has_attributes(jc).unwrap());

        doc.add_attribute(jc, Attr::w("val", "left")).unwrap();
        assert_eq!(doc.w_attribute(jc, "val").unwrap(), Some("left"));

        assert!(doc.replace_attribute(jc, &Attr::w("val", "left"), Attr::w("val", "right")).unwrap());
        assert!(!doc.replace_attribute(jc, &Attr::w("val", "left"), Attr::w("val", "x")).unwrap());
        assert_eq!(doc.find_attribute_by_name(jc, "val").unwrap().unwrap().value, "right");

        doc.update_attribute_by_name(jc, "val", Attr::w("val", "center")).unwrap();
        doc.update_attribute_by_name(jc, "other", Attr::w("other", "1")).unwrap();
        assert_eq!(doc.attributes(jc).unwrap().len(), 2);
        assert_eq!(doc.w_attribute(jc, "val").unwrap(), Some("center"));

        assert!(doc.remove_attribute(jc, &Attr::w("other", "1")).unwrap());
        assert!(!doc.remove_attribute(jc, &Attr::w("other", "1")).unwrap());
        assert_eq!(doc.attributes(jc).unwrap().len(), 1);
    }

    #[test]
    fn test_node_text_and_bin_data() {
        let mut doc = Document::new();
        let text = doc.create_text("abc").unwrap();
        doc.set_node_text(text, "xyz").unwrap();
        assert_eq!(doc.node_text(text).unwrap(), Some("xyz"));

        let para = doc.create_element(Tag::Para).unwrap();
        assert!(doc.set_node_text(para, "x").is_err());

        let bin = doc.create(NodeKind::BinData("aGVs\nbG8=".to_string())).unwrap();
        assert_eq!(doc.bin_data_bytes(bin).unwrap(), b"hello");
        assert!(doc.bin_data_bytes(text).is_err());
    }

    #[test]
    fn test_clone_subtree_is_independent() {
        let mut doc = Document::new();
        let (para, runs) = para_with_runs(&mut doc, 2);
        let text = doc.create_text("hello").unwrap();
        doc.add(runs[0], text).unwrap();
        let pprop = doc.create_element(Tag::PProp).unwrap();
        doc.set_property(para, pprop).unwrap();
        doc.set_align(para, Align::Center).unwrap();

        let copy = doc.clone_subtree(para).unwrap();
        assert_eq!(doc.parent(copy).unwrap(), None);
        assert_eq!(doc.size(copy).unwrap(), 2);
        assert_eq!(doc.properties_size(copy).unwrap(), 1);
        assert_eq!(doc.align(copy).unwrap(), Align::Center);
        assert_ne!(doc.uid(copy).unwrap(), doc.uid(para).unwrap());

        let copied_run = doc.get(copy, 0).unwrap();
        assert_ne!(copied_run, runs[0]);
        assert_eq!(doc.get_parent(copied_run).unwrap(), copy);

        // Mutating the copy leaves the source alone
        doc.remove(copy, copied_run).unwrap();
        assert_eq!(doc.size(para).unwrap(), 2);
        assert_eq!(doc.get_text(para).unwrap(), "hello");
    }

    #[test]
    fn test_destroy_tombstones_subtree() {
        let mut doc = Document::new();
        let (para, runs) = para_with_runs(&mut doc, 2);
        let body = doc.create_element(Tag::Body).unwrap();
        doc.add(body, para).unwrap();

        doc.destroy(para).unwrap();
        assert_eq!(doc.size(body).unwrap(), 0);
        assert!(matches!(doc.parent(para), Err(Error::Destroyed(_))));
        assert!(matches!(doc.next(runs[0]), Err(Error::Destroyed(_))));
        assert!(matches!(doc.add(para, runs[1]), Err(Error::Destroyed(_))));
        assert!(!doc.is_alive(runs[1]));
    }

    #[test]
    fn test_unknown_handle() {
        let doc = Document::new();
        let foreign = NodeId::from_index(99).unwrap();
        assert!(matches!(doc.kind(foreign), Err(Error::UnknownNode(_))));
    }
}
