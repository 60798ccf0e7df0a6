//! Structural equivalence of two subtrees, possibly from different
//! documents.
//!
//! Children and properties are compared pairwise after a stable sort by
//! node type, so sibling order only matters between nodes of the same type.
//! Attribute comparison ignores case and order.
use super::{Attr, Document, NodeId};
use crate::common::{Error, Result};

fn sorted_by_type(doc: &Document, nodes: &[NodeId]) -> Result<Vec<NodeId>> {
    let mut keyed = Vec::with_capacity(nodes.len());
    for node in nodes {
        keyed.push((doc.kind(*node)?.type_name(), *node));
    }
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(keyed.into_iter().map(|(_, node)| node).collect())
}

fn describe(doc: &Document, node: NodeId) -> String {
    match doc.qname(node) {
        Ok(("", local)) => format!("{} {}", local, node),
        Ok((prefix, local)) => format!("{}:{} {}", prefix, local, node),
        Err(_) => node.to_string(),
    }
}

/// Check that `b` in `b_doc` is equivalent to `a` in `a_doc`.
///
/// Fails with [`Error::Mismatch`] describing the first difference found.
pub fn compare(a_doc: &Document, a: NodeId, b_doc: &Document, b: NodeId) -> Result<()> {
    let mut pending = vec![(a, b)];
    while let Some((a, b)) = pending.pop() {
        compare_node(a_doc, a, b_doc, b, &mut pending)?;
    }
    Ok(())
}

/// Compare one pair and queue its properties and children, properties first.
fn compare_node(
    a_doc: &Document,
    a: NodeId,
    b_doc: &Document,
    b: NodeId,
    pending: &mut Vec<(NodeId, NodeId)>,
) -> Result<()> {
    let kind_a = a_doc.kind(a)?;
    let kind_b = b_doc.kind(b)?;
    if kind_a.type_name() != kind_b.type_name() || kind_a.qname() != kind_b.qname() {
        return Err(Error::Mismatch(format!(
            "types are different. ref: {}, actual: {}",
            describe(a_doc, a),
            describe(b_doc, b)
        )));
    }
    if let (Some(text_a), Some(text_b)) = (kind_a.text(), kind_b.text())
        && text_a != text_b
    {
        return Err(Error::Mismatch(format!(
            "texts are different:\n{}\n{}",
            text_a, text_b
        )));
    }

    let properties = paired_properties(a_doc, a, b_doc, b)?;
    compare_attributes(a_doc, a, b_doc, b)?;
    if !kind_a.is_composite() {
        return Ok(());
    }

    let children_a = a_doc.children(a)?;
    let children_b = b_doc.children(b)?;
    if children_a.len() != children_b.len() {
        return Err(Error::Mismatch(format!(
            "{} has {} sub-nodes, actual {} has {}",
            describe(a_doc, a),
            children_a.len(),
            describe(b_doc, b),
            children_b.len()
        )));
    }
    let sorted_a = sorted_by_type(a_doc, children_a)?;
    let sorted_b = sorted_by_type(b_doc, children_b)?;
    pending.extend(sorted_a.into_iter().zip(sorted_b).rev());
    pending.extend(properties.into_iter().rev());
    Ok(())
}

/// Compare promoted alignment and indentation, then the property lists.
pub fn compare_properties(a_doc: &Document, a: NodeId, b_doc: &Document, b: NodeId) -> Result<()> {
    for (property_a, property_b) in paired_properties(a_doc, a, b_doc, b)? {
        compare(a_doc, property_a, b_doc, property_b)?;
    }
    Ok(())
}

/// Check alignment, indentation and property counts, and pair the
/// properties up for comparison.
fn paired_properties(a_doc: &Document, a: NodeId, b_doc: &Document, b: NodeId) -> Result<Vec<(NodeId, NodeId)>> {
    if !(a_doc.is_composite(a)? && b_doc.is_composite(b)?) {
        return Ok(Vec::new());
    }
    let (align_a, align_b) = (a_doc.align(a)?, b_doc.align(b)?);
    if align_a != align_b {
        return Err(Error::Mismatch(format!(
            "different alignment, ref: {}:{}, actual: {}:{}",
            describe(a_doc, a),
            align_a,
            describe(b_doc, b),
            align_b
        )));
    }
    let (indent_a, indent_b) = (a_doc.indent(a)?, b_doc.indent(b)?);
    if indent_a != indent_b {
        return Err(Error::Mismatch(format!(
            "different indent, ref: {}:{:?}, actual: {}:{:?}",
            describe(a_doc, a),
            indent_a,
            describe(b_doc, b),
            indent_b
        )));
    }

    let properties_a = sorted_by_type(a_doc, a_doc.properties(a)?)?;
    let properties_b = sorted_by_type(b_doc, b_doc.properties(b)?)?;
    if properties_a.len() != properties_b.len() {
        return Err(Error::Mismatch(format!(
            "different number of properties, ref count: {}, actual count: {}",
            properties_a.len(),
            properties_b.len()
        )));
    }
    Ok(properties_a.into_iter().zip(properties_b).collect())
}

fn compare_attributes(a_doc: &Document, a: NodeId, b_doc: &Document, b: NodeId) -> Result<()> {
    let attributes_a = a_doc.attributes(a)?;
    let attributes_b = b_doc.attributes(b)?;
    if attributes_a.len() != attributes_b.len() {
        return Err(Error::Mismatch(format!(
            "number of attributes is different on {}: {} vs {}",
            describe(a_doc, a),
            attributes_a.len(),
            attributes_b.len()
        )));
    }
    let missing: Vec<&Attr> = attributes_a
        .iter()
        .filter(|attr| !attributes_b.iter().any(|other| other.eq_ignore_case(attr)))
        .collect();
    if let Some(attr) = missing.first() {
        return Err(Error::Mismatch(format!(
            "attributes are different on {}: {} not found",
            describe(a_doc, a),
            attr
        )));
    }
    Ok(())
}

/// Whether the two nodes carry equivalent formatting.
pub fn check_property_equality(a_doc: &Document, a: NodeId, b_doc: &Document, b: NodeId) -> bool {
    compare_properties(a_doc, a, b_doc, b).is_ok()
}

impl Document {
    /// Compare a subtree of this document with one in `other`.
    #[inline]
    pub fn compare_with(&self, id: NodeId, other: &Document, other_id: NodeId) -> Result<()> {
        compare(self, id, other, other_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wml::parser::parse;
    use crate::wml::{Align, Tag};

    const BODY: &str = r#"<w:wordDocument>
<w:body>
  <w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t>One</w:t></w:r></w:p>
  <w:tbl><w:tr><w:tc><w:p><w:r><w:t>Cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
</w:body>
</w:wordDocument>"#;

    fn body(doc: &Document) -> NodeId {
        doc.first_of(doc.root(), Tag::Body).unwrap().unwrap()
    }

    #[test]
    fn test_identical_documents_match() {
        let a = parse(BODY).unwrap();
        let b = parse(BODY).unwrap();
        compare(&a, a.root(), &b, b.root()).unwrap();
    }

    #[test]
    fn test_clone_matches_original() {
        let mut doc = parse(BODY).unwrap();
        let original = body(&doc);
        let copy = doc.clone_subtree(original).unwrap();
        doc.compare_with(original, &doc, copy).unwrap();
    }

    #[test]
    fn test_children_sorted_by_type() {
        let a = parse(BODY).unwrap();
        let b = parse(&BODY.replace(
            "<w:p><w:pPr><w:jc w:val=\"center\"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t>One</w:t></w:r></w:p>\n  <w:tbl><w:tr><w:tc><w:p><w:r><w:t>Cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>",
            "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>Cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>\n  <w:p><w:pPr><w:jc w:val=\"center\"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t>One</w:t></w:r></w:p>",
        ))
        .unwrap();
        compare(&a, body(&a), &b, body(&b)).unwrap();
    }

    #[test]
    fn test_text_difference() {
        let a = parse(BODY).unwrap();
        let b = parse(&BODY.replace("One", "Two")).unwrap();
        let err = compare(&a, a.root(), &b, b.root()).unwrap_err();
        assert!(matches!(err, Error::Mismatch(ref msg) if msg.contains("texts are different")));
    }

    #[test]
    fn test_alignment_difference() {
        let a = parse(BODY).unwrap();
        let mut b = parse(BODY).unwrap();
        let para = b.first_of(b.root(), Tag::Para).unwrap().unwrap();
        b.set_align(para, Align::Right).unwrap();
        let err = compare(&a, a.root(), &b, b.root()).unwrap_err();
        assert!(matches!(err, Error::Mismatch(ref msg) if msg.contains("alignment")));

        let para_a = a.first_of(a.root(), Tag::Para).unwrap().unwrap();
        assert!(!check_property_equality(&a, para_a, &b, para));
    }

    #[test]
    fn test_property_count_difference() {
        let a = parse(BODY).unwrap();
        let b = parse(&BODY.replace("<w:rPr><w:b/></w:rPr>", "")).unwrap();
        let run_a = a.first_of(a.root(), Tag::Run).unwrap().unwrap();
        let run_b = b.first_of(b.root(), Tag::Run).unwrap().unwrap();
        assert!(!check_property_equality(&a, run_a, &b, run_b));
        assert!(compare(&a, a.root(), &b, b.root()).is_err());
    }

    #[test]
    fn test_attributes_ignore_case_and_order() {
        let mut a = Document::new();
        let mut b = Document::new();
        let x = a.create_with_attributes(Tag::Spacing, [Attr::w("after", "0"), Attr::w("line", "240")]).unwrap();
        let y = b.create_with_attributes(Tag::Spacing, [Attr::w("LINE", "240"), Attr::w("after", "0")]).unwrap();
        compare(&a, x, &b, y).unwrap();

        let z = b.create_with_attributes(Tag::Spacing, [Attr::w("after", "0"), Attr::w("line", "360")]).unwrap();
        assert!(matches!(compare(&a, x, &b, z), Err(Error::Mismatch(_))));
    }

    #[test]
    fn test_child_count_difference() {
        let a = parse(BODY).unwrap();
        let b = parse(&BODY.replace("<w:t>One</w:t>", "<w:t>One</w:t><w:br/>")).unwrap();
        let err = compare(&a, a.root(), &b, b.root()).unwrap_err();
        assert!(matches!(err, Error::Mismatch(ref msg) if msg.contains("sub-nodes")));
    }
}
