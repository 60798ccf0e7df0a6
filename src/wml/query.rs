//! Traversal and query engine.
//!
//! Walks are depth-first pre-order over children; property lists are never
//! walked. The walk keeps its own stack of pending nodes, and a `Stop` from
//! the filter ends it at once.
use super::filter::{CountFilter, Filter, PositiveFilter};
use super::{ContinueStrategy, Direction, Document, NodeId, NodeType, Relation};
use crate::common::{Error, Result};

/// Default hop limit for [`Document::find_sibling`].
pub const DEFAULT_SIBLING_LIMIT: usize = 1_000_000;

/// Where accepted nodes go.
enum Sink<'s> {
    List(Vec<NodeId>),
    Consumer(&'s mut dyn FnMut(NodeId)),
}

/// Per-walk state threaded through a query.
pub(crate) struct FilteringContext<'s> {
    relation: Relation,
    sink: Sink<'s>,
}

impl<'s> FilteringContext<'s> {
    fn collecting(relation: Relation) -> Self {
        Self {
            relation,
            sink: Sink::List(Vec::new()),
        }
    }

    fn consuming(relation: Relation, consumer: &'s mut dyn FnMut(NodeId)) -> Self {
        Self {
            relation,
            sink: Sink::Consumer(consumer),
        }
    }

    #[inline]
    fn accept(&mut self, node: NodeId) {
        match &mut self.sink {
            Sink::List(list) => list.push(node),
            Sink::Consumer(consumer) => consumer(node),
        }
    }

    fn into_list(self) -> Vec<NodeId> {
        match self.sink {
            Sink::List(list) => list,
            Sink::Consumer(_) => Vec::new(),
        }
    }
}

impl Document {
    fn walk(
        &self,
        start: NodeId,
        node_type: NodeType,
        context: &mut FilteringContext<'_>,
        filter: &mut dyn Filter,
    ) -> Result<()> {
        match context.relation {
            Relation::Child => {
                for child in self.children(start)? {
                    if !node_type.matches(self.kind(*child)?) {
                        continue;
                    }
                    let result = filter.apply(self, *child);
                    if result.accepted {
                        context.accept(*child);
                    }
                    if result.is_stop() {
                        break;
                    }
                }
                Ok(())
            },
            Relation::Descendant | Relation::AllDescendants => {
                self.visit(start, node_type, context, filter)?;
                Ok(())
            },
        }
    }

    /// Pre-order walk over the subtree of `start` with an explicit stack,
    /// so tree depth never turns into call depth.
    fn visit(
        &self,
        start: NodeId,
        node_type: NodeType,
        context: &mut FilteringContext<'_>,
        filter: &mut dyn Filter,
    ) -> Result<ContinueStrategy> {
        let prune_matches = context.relation == Relation::Descendant && !node_type.descends_into_matches();
        let mut pending = vec![start];
        while let Some(id) = pending.pop() {
            let data = self.data(id)?;
            if node_type.matches(&data.kind) {
                let result = filter.apply(self, id);
                if result.accepted {
                    context.accept(id);
                }
                if result.is_stop() {
                    return Ok(ContinueStrategy::Stop);
                }
                if result.accepted && prune_matches {
                    continue;
                }
            }
            pending.extend(data.children.iter().rev().copied());
        }
        Ok(ContinueStrategy::Continue)
    }

    /// Matching nodes in the subtree of `id` (the node itself included),
    /// using [`Relation::Descendant`].
    pub fn as_stream(&self, id: NodeId, node_type: impl Into<NodeType>) -> Result<std::vec::IntoIter<NodeId>> {
        self.as_stream_in(id, node_type, Relation::Descendant)
    }

    pub fn as_stream_in(
        &self,
        id: NodeId,
        node_type: impl Into<NodeType>,
        relation: Relation,
    ) -> Result<std::vec::IntoIter<NodeId>> {
        self.as_stream_filtered(id, node_type, relation, &mut PositiveFilter)
    }

    pub fn as_stream_filtered(
        &self,
        id: NodeId,
        node_type: impl Into<NodeType>,
        relation: Relation,
        filter: &mut dyn Filter,
    ) -> Result<std::vec::IntoIter<NodeId>> {
        let mut context = FilteringContext::collecting(relation);
        self.walk(id, node_type.into(), &mut context, filter)?;
        Ok(context.into_list().into_iter())
    }

    /// Push every accepted node to `consumer` as the walk reaches it.
    pub fn process<C>(
        &self,
        id: NodeId,
        node_type: impl Into<NodeType>,
        relation: Relation,
        filter: &mut dyn Filter,
        mut consumer: C,
    ) -> Result<()>
    where
        C: FnMut(NodeId),
    {
        let mut context = FilteringContext::consuming(relation, &mut consumer);
        self.walk(id, node_type.into(), &mut context, filter)
    }

    /// The single node of a type expected to be unique in the subtree.
    ///
    /// Fails with [`Error::Ambiguous`] when a second match exists.
    pub fn find_first(&self, id: NodeId, node_type: impl Into<NodeType>) -> Result<Option<NodeId>> {
        let node_type = node_type.into();
        // A second match is all it takes to tell unique from ambiguous
        let found: Vec<NodeId> = self
            .as_stream_filtered(id, node_type, Relation::Descendant, &mut CountFilter::new(2))?
            .collect();
        match found.as_slice() {
            [] => Ok(None),
            [single] => Ok(Some(*single)),
            _ => Err(Error::Ambiguous { node: id, node_type }),
        }
    }

    /// First match in document order, without an uniqueness check.
    pub fn first_of(&self, id: NodeId, node_type: impl Into<NodeType>) -> Result<Option<NodeId>> {
        Ok(self
            .as_stream_filtered(id, node_type, Relation::Descendant, &mut CountFilter::new(1))?
            .next())
    }

    /// Last match of a concrete type.
    ///
    /// `Any` and `Composite` are rejected; reduce
    /// `as_stream_in(id, NodeType::Any, Relation::AllDescendants)` instead.
    pub fn find_last(&self, id: NodeId, node_type: impl Into<NodeType>) -> Result<Option<NodeId>> {
        let node_type = node_type.into();
        if node_type.is_generic() {
            return Err(Error::UnsupportedQuery(format!(
                "find_last does not support {}; reduce as_stream_in(.., AllDescendants) instead",
                node_type
            )));
        }
        Ok(self.as_stream(id, node_type)?.last())
    }

    /// Last match of any type, generic ones included.
    pub fn get_last(&self, id: NodeId, node_type: impl Into<NodeType>) -> Result<Option<NodeId>> {
        Ok(self.as_stream(id, node_type)?.last())
    }

    // ------------------------------------------------------------------
    // Siblings
    // ------------------------------------------------------------------

    fn sibling(&self, id: NodeId, direction: Direction) -> Result<Option<NodeId>> {
        match direction {
            Direction::Prev => self.prev(id),
            Direction::Next => self.next(id),
        }
    }

    /// Nearest following sibling of the type.
    #[inline]
    pub fn find_next(&self, id: NodeId, node_type: impl Into<NodeType>) -> Result<Option<NodeId>> {
        self.find_sibling(id, node_type, Direction::Next, DEFAULT_SIBLING_LIMIT)
    }

    /// Nearest preceding sibling of the type.
    #[inline]
    pub fn find_prev(&self, id: NodeId, node_type: impl Into<NodeType>) -> Result<Option<NodeId>> {
        self.find_sibling(id, node_type, Direction::Prev, DEFAULT_SIBLING_LIMIT)
    }

    /// Nearest sibling of the type within `limit` hops; the immediate
    /// neighbor is hop 1.
    pub fn find_sibling(
        &self,
        id: NodeId,
        node_type: impl Into<NodeType>,
        direction: Direction,
        limit: usize,
    ) -> Result<Option<NodeId>> {
        let node_type = node_type.into();
        let mut current = self.sibling(id, direction)?;
        let mut hops = 1;
        while let Some(node) = current {
            if node_type.matches(self.kind(node)?) {
                return Ok(Some(node));
            }
            if hops >= limit {
                return Ok(None);
            }
            current = self.sibling(node, direction)?;
            hops += 1;
        }
        Ok(None)
    }

    /// Siblings in walk order that match the type and are accepted by the
    /// filter, until the filter stops or the siblings run out.
    pub fn find_siblings(
        &self,
        id: NodeId,
        node_type: impl Into<NodeType>,
        direction: Direction,
        include_this: bool,
        filter: &mut dyn Filter,
    ) -> Result<Vec<NodeId>> {
        let node_type = node_type.into();
        let mut found = Vec::new();
        let mut current = if include_this {
            Some(id)
        } else {
            self.sibling(id, direction)?
        };
        while let Some(node) = current {
            if node_type.matches(self.kind(node)?) {
                let result = filter.apply(self, node);
                if result.accepted {
                    found.push(node);
                }
                if result.is_stop() {
                    break;
                }
            }
            current = self.sibling(node, direction)?;
        }
        Ok(found)
    }

    // ------------------------------------------------------------------
    // Ancestors
    // ------------------------------------------------------------------

    /// Nearest proper ancestor of the type.
    pub fn find_outer_node(&self, id: NodeId, node_type: impl Into<NodeType>) -> Result<Option<NodeId>> {
        let node_type = node_type.into();
        let mut current = self.parent(id)?;
        while let Some(node) = current {
            if node_type.matches(self.kind(node)?) {
                return Ok(Some(node));
            }
            current = self.parent(node)?;
        }
        Ok(None)
    }

    /// Nearest ancestor-or-self whose parent has the type.
    pub fn find_outer_node_with_parent(
        &self,
        id: NodeId,
        parent_type: impl Into<NodeType>,
    ) -> Result<Option<NodeId>> {
        let parent_type = parent_type.into();
        let mut current = id;
        while let Some(parent) = self.parent(current)? {
            if parent_type.matches(self.kind(parent)?) {
                return Ok(Some(current));
            }
            current = parent;
        }
        Ok(None)
    }
}
