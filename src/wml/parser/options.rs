use serde::{Deserialize, Serialize};

/// Tree builder configuration.
///
/// # Examples
///
/// ```rust
/// use wordml_dom::wml::ParseOptions;
///
/// let options = ParseOptions::new()
///     .with_ignore_whitespace_text(false)
///     .with_max_depth(Some(256));
/// assert!(options.sort_attributes);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Drop whitespace-only character data outside text-bearing nodes
    /// (indentation between tags).
    pub ignore_whitespace_text: bool,
    /// Store attributes ordered by namespace, name and value.
    pub sort_attributes: bool,
    /// Deepest element nesting accepted below the document node.
    pub max_depth: Option<usize>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            ignore_whitespace_text: true,
            sort_attributes: true,
            max_depth: None,
        }
    }
}

impl ParseOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_ignore_whitespace_text(mut self, ignore: bool) -> Self {
        self.ignore_whitespace_text = ignore;
        self
    }

    #[inline]
    pub fn with_sort_attributes(mut self, sort: bool) -> Self {
        self.sort_attributes = sort;
        self
    }

    /// Set the nesting guard. `None` disables it.
    #[inline]
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}
