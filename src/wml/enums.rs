/// Enumerations shared by the WordML tree and its query engine.
use std::fmt;

use serde::{Deserialize, Serialize};

/// Horizontal alignment promoted from a `w:jc` element.
///
/// # Examples
///
/// ```rust
/// use wordml_dom::wml::Align;
///
/// assert_eq!(Align::from_xml("center"), Align::Center);
/// assert_eq!(Align::from_xml("distribute"), Align::Justify);
/// assert_eq!(Align::Right.to_xml(), Some("right"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Align {
    /// No alignment recorded.
    #[default]
    None = 0,
    Left = 1,
    Right = 2,
    Center = 3,
    /// `both`, `justify` and `distribute` all map here.
    Justify = 4,
}

impl Align {
    /// Convert the alignment to its `w:val` value.
    #[inline]
    pub const fn to_xml(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Left => Some("left"),
            Self::Right => Some("right"),
            Self::Center => Some("center"),
            Self::Justify => Some("both"),
        }
    }

    /// Parse a `w:val` value. Unrecognized values map to [`Align::None`].
    #[inline]
    pub fn from_xml(s: &str) -> Self {
        match s {
            "left" => Self::Left,
            "right" => Self::Right,
            "center" => Self::Center,
            "both" | "justify" | "distribute" => Self::Justify,
            _ => Self::None,
        }
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Left => write!(f, "Left"),
            Self::Right => write!(f, "Right"),
            Self::Center => write!(f, "Center"),
            Self::Justify => write!(f, "Justify"),
        }
    }
}

/// Breadth of a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Relation {
    /// Only the direct children of the starting composite.
    Child,
    /// Pre-order walk that does not descend into matched nodes.
    #[default]
    Descendant,
    /// Unconditional pre-order walk of the whole subtree.
    AllDescendants,
}

/// Signal returned by a filter for the walk as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContinueStrategy {
    Continue,
    Stop,
}

impl ContinueStrategy {
    #[inline]
    pub const fn is_stop(self) -> bool {
        matches!(self, Self::Stop)
    }
}

/// Sibling walk direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Prev,
    Next,
}
