//! Kind-based dispatch over code documents.
//!
//! [`dispatch`] resolves a node's [`NodeKind`] and calls the matching
//! [`CodeVisitor`] method. A method returning `None` passes the node on to the
//! methods of the kind's mixins, depth first, and finally to
//! [`CodeVisitor::default_case`]. [`walk`] applies this to a whole subtree.

use spldoc_model::{Document, ModelResult, NodeId};

use crate::factory::kind_of;
use crate::schema::{CodeVisitor, NodeKind};

pub fn dispatch<V: CodeVisitor + ?Sized>(
    visitor: &mut V,
    doc: &Document,
    node: NodeId,
) -> ModelResult<Option<V::Output>> {
    let kind = kind_of(doc, node)?;
    Ok(visit_as(visitor, kind, doc, node).or_else(|| visitor.default_case(doc, node)))
}

fn visit_as<V: CodeVisitor + ?Sized>(
    visitor: &mut V,
    kind: NodeKind,
    doc: &Document,
    node: NodeId,
) -> Option<V::Output> {
    if let Some(output) = visitor.case(kind, doc, node) {
        return Some(output);
    }
    kind.mixins()
        .iter()
        .find_map(|mixin| visit_as(visitor, *mixin, doc, node))
}

/// Dispatches `root` and every node below it in depth-first pre-order and
/// collects the handled results.
pub fn walk<V: CodeVisitor + ?Sized>(
    visitor: &mut V,
    doc: &Document,
    root: NodeId,
) -> ModelResult<Vec<V::Output>> {
    let nodes = std::iter::once(root).chain(doc.all_contents(root)?);
    let mut outputs = Vec::new();
    for node in nodes {
        if let Some(output) = dispatch(visitor, doc, node)? {
            outputs.push(output);
        }
    }
    tracing::trace!("walked {root}, {} results", outputs.len());
    Ok(outputs)
}
