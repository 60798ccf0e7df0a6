//! Traversal filters.
//!
//! A filter sees every node the walk visits that matched the requested type
//! and answers two questions at once: keep this node, and keep walking.
//! Filters are stateful (`&mut self`), so counting and range filters are
//! single-use. Build a fresh one per query.
use smallvec::SmallVec;

use super::{ContinueStrategy, Document, NodeId, NodeKind, NodeType, Tag};

/// Outcome of a filter for one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterResult {
    pub strategy: ContinueStrategy,
    pub accepted: bool,
}

impl FilterResult {
    pub const ACCEPT_AND_CONTINUE: Self = Self::new(ContinueStrategy::Continue, true);
    pub const ACCEPT_AND_STOP: Self = Self::new(ContinueStrategy::Stop, true);
    pub const SKIP_AND_CONTINUE: Self = Self::new(ContinueStrategy::Continue, false);
    pub const SKIP_AND_STOP: Self = Self::new(ContinueStrategy::Stop, false);

    #[inline]
    pub const fn new(strategy: ContinueStrategy, accepted: bool) -> Self {
        Self { strategy, accepted }
    }

    #[inline]
    pub const fn accept_if(accepted: bool) -> Self {
        Self::new(ContinueStrategy::Continue, accepted)
    }

    #[inline]
    pub const fn is_stop(self) -> bool {
        self.strategy.is_stop()
    }
}

/// Node predicate with a continuation signal.
pub trait Filter {
    fn apply(&mut self, doc: &Document, node: NodeId) -> FilterResult;
}

impl<F> Filter for F
where
    F: FnMut(&Document, NodeId) -> FilterResult,
{
    #[inline]
    fn apply(&mut self, doc: &Document, node: NodeId) -> FilterResult {
        self(doc, node)
    }
}

fn kind_matches(doc: &Document, node: NodeId, types: &[NodeType]) -> bool {
    doc.kind(node)
        .map(|kind| types.iter().any(|t| t.matches(kind)))
        .unwrap_or(false)
}

fn w_text(doc: &Document, node: NodeId) -> Option<&str> {
    match doc.kind(node) {
        Ok(NodeKind::Text(text)) => Some(text),
        _ => None,
    }
}

/// Accepts everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositiveFilter;

impl Filter for PositiveFilter {
    #[inline]
    fn apply(&mut self, _doc: &Document, _node: NodeId) -> FilterResult {
        FilterResult::ACCEPT_AND_CONTINUE
    }
}

/// Accepts nodes matching any of the given types.
#[derive(Debug, Clone)]
pub struct InstanceFilter {
    types: SmallVec<[NodeType; 4]>,
}

impl InstanceFilter {
    pub fn new<I, T>(types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<NodeType>,
    {
        Self {
            types: types.into_iter().map(Into::into).collect(),
        }
    }
}

impl Filter for InstanceFilter {
    fn apply(&mut self, doc: &Document, node: NodeId) -> FilterResult {
        FilterResult::accept_if(kind_matches(doc, node, &self.types))
    }
}

/// Accepts the first node matching any of the given types and stops.
#[derive(Debug, Clone)]
pub struct InstanceFindFirstFilter {
    types: SmallVec<[NodeType; 4]>,
}

impl InstanceFindFirstFilter {
    pub fn new<I, T>(types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<NodeType>,
    {
        Self {
            types: types.into_iter().map(Into::into).collect(),
        }
    }
}

impl Filter for InstanceFindFirstFilter {
    fn apply(&mut self, doc: &Document, node: NodeId) -> FilterResult {
        if kind_matches(doc, node, &self.types) {
            FilterResult::ACCEPT_AND_STOP
        } else {
            FilterResult::SKIP_AND_CONTINUE
        }
    }
}

macro_rules! text_filter {
    ($(#[$doc:meta])* $name:ident, |$text:ident, $needle:ident| $test:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            needle: String,
        }

        impl $name {
            pub fn new(needle: impl AsRef<str>) -> Self {
                Self {
                    needle: needle.as_ref().to_lowercase(),
                }
            }
        }

        impl Filter for $name {
            fn apply(&mut self, doc: &Document, node: NodeId) -> FilterResult {
                let accepted = w_text(doc, node).is_some_and(|text| {
                    let $text = text.to_lowercase();
                    let $needle = self.needle.as_str();
                    $test
                });
                FilterResult::accept_if(accepted)
            }
        }
    };
}

text_filter!(
    /// Accepts `w:t` nodes whose text equals the needle, ignoring case.
    TextEqualsFilter,
    |text, needle| text == needle
);
text_filter!(
    /// Accepts `w:t` nodes whose text contains the needle, ignoring case.
    TextContainsFilter,
    |text, needle| text.contains(needle)
);
text_filter!(
    /// Accepts `w:t` nodes whose text starts with the needle, ignoring case.
    TextStartsFilter,
    |text, needle| text.starts_with(needle)
);
text_filter!(
    /// Accepts `w:t` nodes whose text ends with the needle, ignoring case.
    TextEndsFilter,
    |text, needle| text.ends_with(needle)
);

/// Accepts exactly `max` nodes.
///
/// The `max`-th acceptance carries [`ContinueStrategy::Stop`], so a walk
/// driven by `CountFilter::new(n)` visits no node past the n-th match and
/// yields at most `n`. Anything offered after that is skipped with `Stop`.
/// [`Document::find_first`] runs with `n = 2` so that a second match is
/// seen and reported as ambiguous.
#[derive(Debug, Clone)]
pub struct CountFilter {
    max: usize,
    count: usize,
}

impl CountFilter {
    pub fn new(max: usize) -> Self {
        Self { max, count: 0 }
    }
}

impl Filter for CountFilter {
    fn apply(&mut self, _doc: &Document, _node: NodeId) -> FilterResult {
        if self.count >= self.max {
            return FilterResult::SKIP_AND_STOP;
        }
        self.count += 1;
        if self.count == self.max {
            FilterResult::ACCEPT_AND_STOP
        } else {
            FilterResult::ACCEPT_AND_CONTINUE
        }
    }
}

/// Skips everything up to and including `start`, then accepts `max` nodes.
#[derive(Debug, Clone)]
pub struct StartWithNodeAndCountFilter {
    start: NodeId,
    found: bool,
    inner: CountFilter,
}

impl StartWithNodeAndCountFilter {
    pub fn new(max: usize, start: NodeId) -> Self {
        Self {
            start,
            found: false,
            inner: CountFilter::new(max),
        }
    }
}

impl Filter for StartWithNodeAndCountFilter {
    fn apply(&mut self, doc: &Document, node: NodeId) -> FilterResult {
        if self.found {
            return self.inner.apply(doc, node);
        }
        if node == self.start {
            self.found = true;
        }
        FilterResult::SKIP_AND_CONTINUE
    }
}

/// Accepts the inclusive range between two sentinel nodes and stops at the
/// second one.
///
/// Reaching `stop` before `start` ends the walk with nothing accepted.
#[derive(Debug, Clone)]
pub struct StartStopNodesFilter {
    start: NodeId,
    stop: NodeId,
    accepting: bool,
}

impl StartStopNodesFilter {
    pub fn new(start: NodeId, stop: NodeId) -> Self {
        Self {
            start,
            stop,
            accepting: false,
        }
    }
}

impl Filter for StartStopNodesFilter {
    fn apply(&mut self, _doc: &Document, node: NodeId) -> FilterResult {
        if node == self.start {
            self.accepting = true;
        }
        if !self.accepting {
            if node == self.stop {
                return FilterResult::SKIP_AND_STOP;
            }
            return FilterResult::SKIP_AND_CONTINUE;
        }
        if node == self.stop {
            FilterResult::ACCEPT_AND_STOP
        } else {
            FilterResult::ACCEPT_AND_CONTINUE
        }
    }
}

/// Rejects a fixed set of nodes.
#[derive(Debug, Clone)]
pub struct ExcludeNodesFilter {
    excluded: SmallVec<[NodeId; 8]>,
}

impl ExcludeNodesFilter {
    pub fn new(excluded: impl IntoIterator<Item = NodeId>) -> Self {
        Self {
            excluded: excluded.into_iter().collect(),
        }
    }
}

impl Filter for ExcludeNodesFilter {
    fn apply(&mut self, _doc: &Document, node: NodeId) -> FilterResult {
        FilterResult::accept_if(!self.excluded.contains(&node))
    }
}

/// Finds the first run whose first `w:t`, once trimmed, starts with a letter
/// or digit.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstCharInRunLetterOrDigitFilter;

impl Filter for FirstCharInRunLetterOrDigitFilter {
    fn apply(&mut self, doc: &Document, node: NodeId) -> FilterResult {
        if !doc.kind(node).is_ok_and(|k| k.is(Tag::Run)) {
            return FilterResult::SKIP_AND_CONTINUE;
        }
        let starts_alphanumeric = doc
            .first_of(node, Tag::Text)
            .ok()
            .flatten()
            .and_then(|text| w_text(doc, text))
            .and_then(|text| text.trim().chars().next())
            .is_some_and(char::is_alphanumeric);
        if starts_alphanumeric {
            FilterResult::ACCEPT_AND_STOP
        } else {
            FilterResult::SKIP_AND_CONTINUE
        }
    }
}

/// Accepts when every inner filter accepts; stops when any inner filter
/// stops.
pub struct AllOf<'f> {
    filters: Vec<Box<dyn Filter + 'f>>,
}

impl<'f> AllOf<'f> {
    pub fn new(filters: Vec<Box<dyn Filter + 'f>>) -> Self {
        Self { filters }
    }
}

impl Filter for AllOf<'_> {
    fn apply(&mut self, doc: &Document, node: NodeId) -> FilterResult {
        let mut accepted = true;
        for filter in &mut self.filters {
            let result = filter.apply(doc, node);
            accepted &= result.accepted;
            if result.is_stop() {
                return FilterResult::new(ContinueStrategy::Stop, accepted);
            }
            if !accepted {
                break;
            }
        }
        FilterResult::accept_if(accepted)
    }
}

/// Accepts when any inner filter accepts; stops when any consulted filter
/// stops.
pub struct AnyOf<'f> {
    filters: Vec<Box<dyn Filter + 'f>>,
}

impl<'f> AnyOf<'f> {
    pub fn new(filters: Vec<Box<dyn Filter + 'f>>) -> Self {
        Self { filters }
    }
}

impl Filter for AnyOf<'_> {
    fn apply(&mut self, doc: &Document, node: NodeId) -> FilterResult {
        for filter in &mut self.filters {
            let result = filter.apply(doc, node);
            if result.accepted || result.is_stop() {
                return result;
            }
        }
        FilterResult::SKIP_AND_CONTINUE
    }
}

/// Inverts acceptance, keeping the inner continuation signal.
pub struct Not<F>(pub F);

impl<F: Filter> Filter for Not<F> {
    fn apply(&mut self, doc: &Document, node: NodeId) -> FilterResult {
        let result = self.0.apply(doc, node);
        FilterResult::new(result.strategy, !result.accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wml::Relation;

    fn texts(doc: &mut Document, values: &[&str]) -> Vec<NodeId> {
        values.iter().map(|v| doc.create_text(*v).unwrap()).collect()
    }

    #[test]
    fn test_count_filter_accepts_exactly_n() {
        let doc = Document::new();
        let root = doc.root();
        let mut filter = CountFilter::new(3);
        assert_eq!(filter.apply(&doc, root), FilterResult::ACCEPT_AND_CONTINUE);
        assert_eq!(filter.apply(&doc, root), FilterResult::ACCEPT_AND_CONTINUE);
        assert_eq!(filter.apply(&doc, root), FilterResult::ACCEPT_AND_STOP);
        assert_eq!(filter.apply(&doc, root), FilterResult::SKIP_AND_STOP);
    }

    #[test]
    fn test_count_filter_zero() {
        let doc = Document::new();
        assert_eq!(CountFilter::new(0).apply(&doc, doc.root()), FilterResult::SKIP_AND_STOP);
    }

    #[test]
    fn test_text_filters_ignore_case() {
        let mut doc = Document::new();
        let t = texts(&mut doc, &["Hello World"])[0];
        assert!(TextEqualsFilter::new("hello world").apply(&doc, t).accepted);
        assert!(TextContainsFilter::new("LO WO").apply(&doc, t).accepted);
        assert!(TextStartsFilter::new("HELLO").apply(&doc, t).accepted);
        assert!(TextEndsFilter::new("world").apply(&doc, t).accepted);
        assert!(!TextEndsFilter::new("hello").apply(&doc, t).accepted);

        let run = doc.create_element(Tag::Run).unwrap();
        assert!(!TextContainsFilter::new("").apply(&doc, run).accepted);
    }

    #[test]
    fn test_start_stop_nodes_inclusive() {
        let mut doc = Document::new();
        let n = texts(&mut doc, &["a", "b", "c", "d"]);
        let mut filter = StartStopNodesFilter::new(n[1], n[2]);
        assert!(!filter.apply(&doc, n[0]).accepted);
        assert_eq!(filter.apply(&doc, n[1]), FilterResult::ACCEPT_AND_CONTINUE);
        assert_eq!(filter.apply(&doc, n[2]), FilterResult::ACCEPT_AND_STOP);
    }

    #[test]
    fn test_stop_node_before_start_ends_the_walk() {
        let mut doc = Document::new();
        let n = texts(&mut doc, &["a", "b", "c"]);
        let mut filter = StartStopNodesFilter::new(n[2], n[0]);
        assert_eq!(filter.apply(&doc, n[0]), FilterResult::SKIP_AND_STOP);

        let mut doc = Document::new();
        let run = doc.create_element(Tag::Run).unwrap();
        let t = texts(&mut doc, &["a", "b", "c"]);
        doc.add_all(run, t.iter().copied()).unwrap();
        let found: Vec<_> = doc
            .as_stream_filtered(run, Tag::Text, Relation::Child, &mut StartStopNodesFilter::new(t[2], t[1]))
            .unwrap()
            .collect();
        assert!(found.is_empty());
    }

    #[test]
    fn test_start_with_node_and_count() {
        let mut doc = Document::new();
        let n = texts(&mut doc, &["a", "b", "c", "d"]);
        let mut filter = StartWithNodeAndCountFilter::new(2, n[0]);
        assert!(!filter.apply(&doc, n[0]).accepted);
        assert_eq!(filter.apply(&doc, n[1]), FilterResult::ACCEPT_AND_CONTINUE);
        assert_eq!(filter.apply(&doc, n[2]), FilterResult::ACCEPT_AND_STOP);
    }

    #[test]
    fn test_instance_filters() {
        let mut doc = Document::new();
        let run = doc.create_element(Tag::Run).unwrap();
        let t = doc.create_text("x").unwrap();
        let mut any = InstanceFilter::new([Tag::Run, Tag::Para]);
        assert!(any.apply(&doc, run).accepted);
        assert!(!any.apply(&doc, t).accepted);
        let mut first = InstanceFindFirstFilter::new([NodeType::Leaf]);
        assert_eq!(first.apply(&doc, run), FilterResult::SKIP_AND_CONTINUE);
        assert_eq!(first.apply(&doc, t), FilterResult::ACCEPT_AND_STOP);
    }

    #[test]
    fn test_combinators() {
        let mut doc = Document::new();
        let n = texts(&mut doc, &["alpha", "beta"]);
        let mut both = AllOf::new(vec![
            Box::new(TextContainsFilter::new("a")),
            Box::new(ExcludeNodesFilter::new([n[0]])),
        ]);
        assert!(!both.apply(&doc, n[0]).accepted);
        assert!(both.apply(&doc, n[1]).accepted);

        let mut either = AnyOf::new(vec![
            Box::new(TextEqualsFilter::new("alpha")),
            Box::new(TextEqualsFilter::new("beta")),
        ]);
        assert!(either.apply(&doc, n[0]).accepted);
        assert!(either.apply(&doc, n[1]).accepted);

        let mut not = Not(TextEqualsFilter::new("alpha"));
        assert!(!not.apply(&doc, n[0]).accepted);
        assert!(not.apply(&doc, n[1]).accepted);
    }

    #[test]
    fn test_closure_filter() {
        let mut doc = Document::new();
        let t = doc.create_text("x").unwrap();
        let mut seen = 0;
        let mut filter = |_: &Document, _: NodeId| {
            seen += 1;
            FilterResult::ACCEPT_AND_CONTINUE
        };
        assert!(filter.apply(&doc, t).accepted);
        assert_eq!(seen, 1);
    }
}
