#![warn(clippy::pedantic)]
//! Reflective containment-tree model.
//!
//! Nodes live in a [`Document`] arena and are typed by a static [`Catalog`].
//! Every feature of every node is reachable through the same small interface
//! (`get`, `set`, `unset`, `is_set`), every change is reported to registered
//! [`Observer`]s as a [`Notification`].
pub mod catalog;
pub mod config;
pub mod containment;
pub mod document;
pub mod errors;
pub mod node;
pub mod notification;
pub mod value;

pub use catalog::{
    Cardinality, Catalog, DataType, Feature, FeatureId, KindDef, KindId, Literal, Ownership, Shape,
};
pub use config::DocumentConfig;
pub use containment::ContainmentList;
pub use document::{Document, NodeDisplay};
pub use errors::{ModelError, ModelResult};
pub use node::{NodeId, Owner, Setting};
pub use notification::{
    EventLog, Notification, NotificationChain, NotificationKind, Observer, ObserverId,
};
pub use value::{EnumDef, EnumLiteral, EnumValue, Value};
