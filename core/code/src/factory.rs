//! Construction of code documents and nodes.

use spldoc_model::{Document, DocumentConfig, ModelError, ModelResult, NodeId};

use crate::schema::{CATALOG, NodeKind};

/// Empty document over the code catalog.
#[must_use]
pub fn new_document() -> Document {
    Document::new(&CATALOG)
}

#[must_use]
pub fn new_document_with_config(config: &DocumentConfig) -> Document {
    Document::with_config(&CATALOG, config)
}

pub fn create(doc: &mut Document, kind: NodeKind) -> ModelResult<NodeId> {
    doc.create(kind.id())
}

/// Creates a node from its catalog name, e.g. `"CompositeHeadType"`.
pub fn create_by_name(doc: &mut Document, name: &str) -> ModelResult<NodeId> {
    let kind = NodeKind::from_name(name).ok_or_else(|| ModelError::UnknownKind(name.to_string()))?;
    create(doc, kind)
}

/// Kind of a node of a code document. Fails for documents built over any
/// other catalog.
pub fn kind_of(doc: &Document, node: NodeId) -> ModelResult<NodeKind> {
    let kind = doc.kind(node)?;
    if !std::ptr::eq(doc.catalog(), &CATALOG) {
        return Err(ModelError::UnknownKind(doc.catalog().kind_name(kind).to_string()));
    }
    NodeKind::from_id(kind).ok_or_else(|| ModelError::UnknownKind(format!("#{}", kind.0)))
}
