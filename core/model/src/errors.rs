//! Error types for the model crate.
//!
//! Every fault here is a local structural-integrity fault: the caller asked for
//! something the catalog or the current tree does not allow. None of them is
//! retried; the failing step leaves the document untouched and the error is
//! propagated to whoever drives the mutation (a loader, an editor, a test).

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::FeatureId;
use crate::node::NodeId;

/// Errors raised by the catalog, the document and its containment lists.
#[derive(Debug, Error)]
#[must_use = "errors must not be silently ignored"]
pub enum ModelError {
    /// The feature id is not part of the node kind's catalog entry.
    #[error("feature {feature} is not defined for node kind `{kind}`")]
    UnsupportedFeature { kind: &'static str, feature: FeatureId },

    /// The supplied value does not have the shape the feature declares.
    #[error("type mismatch on `{kind}.{feature}`: expected {expected}, found {found}")]
    TypeMismatch {
        kind: &'static str,
        feature: &'static str,
        expected: String,
        found: String,
    },

    /// `remove` was called with a child that is not an element of that exact list.
    #[error("node {child} is not an element of `{feature}` of node {owner}")]
    OwnershipViolation {
        owner: NodeId,
        feature: &'static str,
        child: NodeId,
    },

    /// Attaching the child would make a node its own ancestor.
    #[error("attaching node {child} under node {owner} would make it its own ancestor")]
    ContainmentCycle { owner: NodeId, child: NodeId },

    /// The handle does not name a live node of this document.
    #[error("node {0} does not exist in this document")]
    UnknownNode(NodeId),

    /// No kind of that name exists in the catalog.
    #[error("unknown node kind `{0}`")]
    UnknownKind(String),

    /// The text is neither a literal nor a name of the enumeration.
    #[error("`{literal}` is not a literal of enumeration `{enumeration}`")]
    UnknownLiteral {
        enumeration: &'static str,
        literal: String,
    },

    /// A list operation was requested on a feature that is not a containment list.
    #[error("feature `{kind}.{feature}` is not a containment list")]
    NotAList {
        kind: &'static str,
        feature: &'static str,
    },

    #[error("index {index} is out of bounds for `{feature}` (length {len})")]
    IndexOutOfBounds {
        feature: &'static str,
        index: usize,
        len: usize,
    },

    #[error("node kind `{0}` is abstract and cannot be instantiated")]
    AbstractKind(&'static str),

    /// The static catalog violates its own structural rules.
    #[error("invalid catalog `{catalog}`: {reason}")]
    InvalidCatalog {
        catalog: &'static str,
        reason: String,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type ModelResult<T> = Result<T, ModelError>;
