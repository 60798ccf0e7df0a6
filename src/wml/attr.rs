use std::fmt;

/// A single XML attribute.
///
/// An empty `namespace` means the attribute had no prefix. Attributes order
/// by namespace, then name, then value, which is the order the parser stores
/// them in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Attr {
    pub namespace: String,
    pub name: String,
    pub value: String,
}

impl Attr {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            value: value.into(),
        }
    }

    /// Shorthand for an attribute in the `w` namespace.
    #[inline]
    pub fn w(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new("w", name, value)
    }

    #[inline]
    pub fn is(&self, namespace: &str, name: &str) -> bool {
        self.namespace == namespace && self.name == name
    }

    /// Case-insensitive comparison of all three parts.
    pub fn eq_ignore_case(&self, other: &Attr) -> bool {
        self.namespace.eq_ignore_ascii_case(&other.namespace)
            && self.name.eq_ignore_ascii_case(&other.name)
            && self.value.eq_ignore_ascii_case(&other.value)
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}=\"{}\"", self.name, self.value)
        } else {
            write!(f, "{}:{}=\"{}\"", self.namespace, self.name, self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_by_namespace_then_name() {
        let mut attrs = vec![Attr::w("val", "1"), Attr::new("", "id", "x"), Attr::w("type", "p")];
        attrs.sort();
        assert_eq!(attrs[0].name, "id");
        assert_eq!(attrs[1].name, "type");
        assert_eq!(attrs[2].name, "val");
    }

    #[test]
    fn test_display() {
        assert_eq!(Attr::w("val", "center").to_string(), "w:val=\"center\"");
        assert_eq!(Attr::new("", "id", "1").to_string(), "id=\"1\"");
    }

    #[test]
    fn test_eq_ignore_case() {
        assert!(Attr::w("Val", "ON").eq_ignore_case(&Attr::new("W", "val", "on")));
        assert!(!Attr::w("val", "on").eq_ignore_case(&Attr::w("val", "off")));
    }
}
