use crate::common::Result;
use crate::wml::Document;

/// A whole-tree rewrite run once the builder has finished.
///
/// Passes run in registration order through the public editing API only.
/// Run normalization and style preparation plug in here.
pub trait DocumentPass {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    fn apply(&self, doc: &mut Document) -> Result<()>;
}

impl<F> DocumentPass for (&'static str, F)
where
    F: Fn(&mut Document) -> Result<()>,
{
    fn name(&self) -> &str {
        self.0
    }

    fn apply(&self, doc: &mut Document) -> Result<()> {
        (self.1)(doc)
    }
}
