//! Node storage.
//!
//! A node is a kind, an optional owner back-reference and one slot per feature
//! of its kind. The owner is a plain `(node id, feature id)` pair: the parent's
//! slot holds the child id strongly (the arena keeps the data alive), the child
//! only remembers where it sits, so the tree carries no reference cycles.

use std::fmt::{self, Display, Formatter};

use crate::catalog::{Feature, FeatureId, KindId, Shape};
use crate::value::Value;

/// Opaque, stable handle of a node in a [`crate::document::Document`].
///
/// Ids are assigned sequentially starting from 1 and are never reused, so a
/// stale handle to a deleted node can be detected. Zero is reserved.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[must_use]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a node currently sits: the containing node and the feature slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Owner {
    pub node: NodeId,
    pub feature: FeatureId,
}

impl Owner {
    #[must_use]
    pub fn new(node: NodeId, feature: FeatureId) -> Self {
        Self { node, feature }
    }
}

/// Tri-state of an optional attribute.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum Setting {
    /// Never set, or unset since: reads yield the catalog default.
    #[default]
    Default,
    Explicit(Value),
}

impl Setting {
    #[must_use]
    pub fn is_explicit(&self) -> bool {
        matches!(self, Setting::Explicit(_))
    }
}

#[derive(Clone, Debug)]
pub(crate) enum Slot {
    Value(Value),
    Setting(Setting),
    Child(Option<NodeId>),
    Children(Vec<NodeId>),
    Reference(Option<NodeId>),
}

impl Slot {
    /// Eager, fixed-shape storage for one feature.
    pub(crate) fn for_feature(feature: &Feature) -> Self {
        match feature.shape {
            Shape::Attribute {
                unsettable: true, ..
            } => Slot::Setting(Setting::Default),
            Shape::Attribute { .. } => Slot::Value(feature.default_value()),
            Shape::Containment { many: true, .. } => Slot::Children(Vec::new()),
            Shape::Containment { .. } => Slot::Child(None),
            Shape::Reference { .. } => Slot::Reference(None),
        }
    }

    /// Current value as the generic interface reports it.
    pub(crate) fn read(&self, feature: &Feature) -> Value {
        match self {
            Slot::Value(value) | Slot::Setting(Setting::Explicit(value)) => value.clone(),
            Slot::Setting(Setting::Default) => feature.default_value(),
            Slot::Child(child) | Slot::Reference(child) => Value::from(*child),
            Slot::Children(children) => Value::List(children.clone()),
        }
    }

    pub(crate) fn is_set(&self, feature: &Feature) -> bool {
        match self {
            Slot::Value(value) => *value != feature.default_value(),
            Slot::Setting(setting) => setting.is_explicit(),
            Slot::Child(child) | Slot::Reference(child) => child.is_some(),
            Slot::Children(children) => !children.is_empty(),
        }
    }

    /// Ids of the nodes this slot owns.
    pub(crate) fn contained(&self) -> &[NodeId] {
        match self {
            Slot::Child(Some(child)) => std::slice::from_ref(child),
            Slot::Children(children) => children,
            _ => &[],
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct NodeData {
    pub(crate) kind: KindId,
    pub(crate) owner: Option<Owner>,
    pub(crate) slots: Vec<Slot>,
}

impl NodeData {
    pub(crate) fn new(kind: KindId, features: &[Feature]) -> Self {
        Self {
            kind,
            owner: None,
            slots: features.iter().map(Slot::for_feature).collect(),
        }
    }
}
