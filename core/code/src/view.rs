//! Read-only typed view of a code node.

use std::fmt::{self, Debug, Formatter};

use spldoc_model::{Document, EnumValue, FeatureId, ModelError, ModelResult, NodeId, Value};

use crate::factory::kind_of;
use crate::schema::{CATALOG, NodeKind, features};

/// A node of a code document together with its resolved kind.
#[derive(Clone, Copy)]
pub struct CodeNode<'doc> {
    doc: &'doc Document,
    id: NodeId,
    kind: NodeKind,
}

impl Debug for CodeNode<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind, self.id)
    }
}

impl<'doc> CodeNode<'doc> {
    pub fn new(doc: &'doc Document, id: NodeId) -> ModelResult<Self> {
        Ok(Self {
            doc,
            id,
            kind: kind_of(doc, id)?,
        })
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Whether this node's kind is `kind` or mixes it in.
    #[must_use]
    pub fn is_a(&self, kind: NodeKind) -> bool {
        CATALOG.is_a(self.kind.id(), kind.id())
    }

    pub fn owner(&self) -> ModelResult<Option<CodeNode<'doc>>> {
        self.doc
            .owner(self.id)?
            .map(|owner| CodeNode::new(self.doc, owner.node))
            .transpose()
    }

    pub fn string(&self, feature: FeatureId) -> ModelResult<Option<&'doc str>> {
        self.doc.string(self.id, feature)
    }

    pub fn integer(&self, feature: FeatureId) -> ModelResult<Option<i64>> {
        Ok(self.doc.get(self.id, feature)?.as_int())
    }

    pub fn unsigned(&self, feature: FeatureId) -> ModelResult<Option<u64>> {
        Ok(self.doc.get(self.id, feature)?.as_uint())
    }

    pub fn flag(&self, feature: FeatureId) -> ModelResult<bool> {
        Ok(self.doc.get(self.id, feature)?.as_bool().unwrap_or(false))
    }

    /// Enumeration attribute converted to its Rust enum.
    pub fn choice<E>(&self, feature: FeatureId) -> ModelResult<Option<E>>
    where
        E: TryFrom<EnumValue, Error = ModelError>,
    {
        match self.doc.get(self.id, feature)? {
            Value::Enum(value) => E::try_from(value).map(Some),
            _ => Ok(None),
        }
    }

    pub fn child(&self, feature: FeatureId) -> ModelResult<Option<CodeNode<'doc>>> {
        self.doc
            .child(self.id, feature)?
            .map(|child| CodeNode::new(self.doc, child))
            .transpose()
    }

    pub fn children(&self, feature: FeatureId) -> ModelResult<Vec<CodeNode<'doc>>> {
        self.doc
            .children(self.id, feature)?
            .iter()
            .map(|child| CodeNode::new(self.doc, *child))
            .collect()
    }

    /// `(line, column)` of nodes carrying a source position.
    pub fn position(&self) -> ModelResult<Option<(i64, i64)>> {
        if !self.is_a(NodeKind::SourceLocation) {
            return Ok(None);
        }
        let line = self.integer(features::source_location::LINE)?;
        let column = self.integer(features::source_location::COLUMN)?;
        Ok(line.zip(column))
    }

    /// `(start line, end line)` of nodes carrying a source span.
    pub fn span(&self) -> ModelResult<Option<(i64, i64)>> {
        if !self.is_a(NodeKind::ExtendedSourceLocation) {
            return Ok(None);
        }
        let start = self.integer(features::extended_source_location::START_LINE)?;
        let end = self.integer(features::extended_source_location::END_LINE)?;
        Ok(start.zip(end))
    }
}
