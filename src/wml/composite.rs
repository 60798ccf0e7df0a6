//! Composite container operations.
//!
//! Every mutation detaches the incoming node from its previous owner before
//! placing it, so a node is never listed by two composites, and rejects
//! placements that would make a node its own ancestor.
use super::node::Membership;
use super::{Document, NodeId, NodeType};
use crate::common::{Error, Result};

impl Document {
    /// Direct children in document order.
    #[inline]
    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(&self.composite(id)?.children)
    }

    #[inline]
    pub fn children_copy(&self, id: NodeId) -> Result<Vec<NodeId>> {
        Ok(self.children(id)?.to_vec())
    }

    #[inline]
    pub fn size(&self, id: NodeId) -> Result<usize> {
        Ok(self.children(id)?.len())
    }

    pub fn get(&self, id: NodeId, index: usize) -> Result<NodeId> {
        let children = self.children(id)?;
        children.get(index).copied().ok_or(Error::IndexOutOfRange {
            node: id,
            index,
            len: children.len(),
        })
    }

    /// Position of `node` among the children of `parent`.
    pub fn index_of(&self, parent: NodeId, node: NodeId) -> Result<Option<usize>> {
        self.composite(parent)?;
        match self.data(node)?.membership {
            Membership::Child { parent: p, index } if p == parent => Ok(Some(index)),
            _ => Ok(None),
        }
    }

    #[inline]
    pub fn contains(&self, parent: NodeId, node: NodeId) -> Result<bool> {
        Ok(self.index_of(parent, node)?.is_some())
    }

    /// Whether any direct child has the given type.
    pub fn has_child(&self, parent: NodeId, node_type: impl Into<NodeType>) -> Result<bool> {
        let node_type = node_type.into();
        for child in self.children(parent)? {
            if node_type.matches(&self.data(*child)?.kind) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub(crate) fn child_index(&self, parent: NodeId, node: NodeId) -> Result<usize> {
        self.index_of(parent, node)?
            .ok_or(Error::NotAChild { node, parent })
    }

    fn check_insertable(&self, parent: NodeId, node: NodeId) -> Result<()> {
        self.composite(parent)?;
        self.data(node)?;
        if self.would_cycle(node, parent)? {
            return Err(Error::Cycle { node, parent });
        }
        Ok(())
    }

    /// Append `node` as the last child of `parent`.
    ///
    /// A `w:jc`, or a `w:ind` carrying a first-line value, may instead be
    /// promoted onto the grandparent; see [`Document::set_property`].
    pub fn add(&mut self, parent: NodeId, node: NodeId) -> Result<()> {
        self.check_insertable(parent, node)?;
        if self.promote_on_add(parent, node)? {
            return Ok(());
        }
        self.detach(node)?;
        self.attach_child(parent, node);
        Ok(())
    }

    pub fn add_all<I>(&mut self, parent: NodeId, nodes: I) -> Result<()>
    where
        I: IntoIterator<Item = NodeId>,
    {
        for node in nodes {
            self.add(parent, node)?;
        }
        Ok(())
    }

    /// Insert `node` before the child at `index`; `index == size` appends.
    pub fn insert(&mut self, parent: NodeId, index: usize, node: NodeId) -> Result<()> {
        self.check_insertable(parent, node)?;
        let len = self.size(parent)?;
        if index > len {
            return Err(Error::IndexOutOfRange {
                node: parent,
                index,
                len,
            });
        }
        let mut index = index;
        if let Membership::Child { parent: p, index: old } = self.data(node)?.membership
            && p == parent
            && old < index
        {
            index -= 1;
        }
        self.detach(node)?;
        self.data_mut(parent)?.children.insert(index, node);
        self.reindex(parent, index);
        Ok(())
    }

    /// Detach a child of `parent`.
    pub fn remove(&mut self, parent: NodeId, node: NodeId) -> Result<()> {
        self.child_index(parent, node)?;
        self.detach(node)
    }

    /// Detach every child of `parent`, returning them in their former order.
    pub fn remove_all(&mut self, parent: NodeId) -> Result<Vec<NodeId>> {
        self.composite(parent)?;
        let children = std::mem::take(&mut self.data_mut(parent)?.children);
        for child in &children {
            self.data_mut(*child)?.membership = Membership::Detached;
        }
        Ok(children)
    }

    /// Detach the node from its parent, or from its owner for a property.
    #[inline]
    pub fn remove_from_parent(&mut self, node: NodeId) -> Result<()> {
        self.detach(node)
    }

    /// Replace the child at `index` with `node`, returning the replaced child.
    pub fn set(&mut self, parent: NodeId, index: usize, node: NodeId) -> Result<NodeId> {
        self.check_insertable(parent, node)?;
        let target = self.get(parent, index)?;
        if target == node {
            return Ok(node);
        }
        self.detach(node)?;
        let index = self.child_index(parent, target)?;
        self.data_mut(parent)?.children[index] = node;
        self.data_mut(target)?.membership = Membership::Detached;
        self.data_mut(node)?.membership = Membership::Child { parent, index };
        Ok(target)
    }

    /// Replace the child at `index` with the first node and thread the rest
    /// after it in order.
    pub fn set_all(&mut self, parent: NodeId, index: usize, nodes: &[NodeId]) -> Result<()> {
        let (first, rest) = nodes
            .split_first()
            .ok_or_else(|| Error::Processing(format!("Empty replacement list for {}", parent)))?;
        self.set(parent, index, *first)?;
        self.insert_after_all(parent, *first, rest)
    }

    /// Substitute `target` with `replacement` in place.
    ///
    /// Returns the replacement's index, or `None` when `target` is not a
    /// child of `parent`.
    pub fn replace(&mut self, parent: NodeId, target: NodeId, replacement: NodeId) -> Result<Option<usize>> {
        let Some(index) = self.index_of(parent, target)? else {
            return Ok(None);
        };
        self.set(parent, index, replacement)?;
        self.index_of(parent, replacement)
    }

    /// Substitute `target` with a run of nodes.
    pub fn replace_with_many(
        &mut self,
        parent: NodeId,
        target: NodeId,
        replacements: &[NodeId],
    ) -> Result<Option<usize>> {
        let Some(index) = self.index_of(parent, target)? else {
            return Ok(None);
        };
        self.set_all(parent, index, replacements)?;
        self.index_of(parent, replacements[0])
    }

    /// Substitute a group of children with a run of nodes.
    ///
    /// Every target is checked before anything is changed: an empty target
    /// list or a target outside `parent` fails and leaves the tree intact.
    /// The replacements land where the first target was; the other targets
    /// are detached.
    pub fn replace_many(&mut self, parent: NodeId, targets: &[NodeId], replacements: &[NodeId]) -> Result<usize> {
        let Some(first) = targets.first() else {
            return Err(Error::Processing(format!("Empty target list for {}", parent)));
        };
        if replacements.is_empty() {
            return Err(Error::Processing(format!("Empty replacement list for {}", parent)));
        }
        for target in targets {
            self.child_index(parent, *target)?;
        }
        for replacement in replacements {
            self.check_insertable(parent, *replacement)?;
        }

        let index = self.child_index(parent, *first)?;
        self.set_all(parent, index, replacements)?;
        for target in &targets[1..] {
            if !replacements.contains(target) && self.contains(parent, *target)? {
                self.detach(*target)?;
            }
        }
        self.child_index(parent, replacements[0])
    }

    /// Insert `node` right before `anchor`, which must be a child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, anchor: NodeId, node: NodeId) -> Result<()> {
        let index = self.child_index(parent, anchor)?;
        self.insert(parent, index, node)
    }

    /// Insert `node` right after `anchor`, which must be a child of `parent`.
    pub fn insert_after(&mut self, parent: NodeId, anchor: NodeId, node: NodeId) -> Result<()> {
        let index = self.child_index(parent, anchor)?;
        self.insert(parent, index + 1, node)
    }

    /// Insert the nodes one after another, starting right after `anchor`.
    pub fn insert_after_all(&mut self, parent: NodeId, anchor: NodeId, nodes: &[NodeId]) -> Result<()> {
        self.child_index(parent, anchor)?;
        let mut anchor = anchor;
        for node in nodes {
            self.insert_after(parent, anchor, *node)?;
            anchor = *node;
        }
        Ok(())
    }
}
