//! The document arena and the generic feature interface.
//!
//! A [`Document`] owns every node of one tree (or forest) built against one
//! [`Catalog`]. Nodes are addressed by [`NodeId`]; the arena is the only strong
//! owner of node data, parents hold child ids in their containment slots and
//! children hold a weak `(parent, feature)` back-reference. Dropping a subtree
//! from the arena is therefore deterministic and cycle-free.
//!
//! All access goes through four feature-indexed operations, valid for every
//! node kind:
//!
//! - [`Document::get`] reads the current value of a feature,
//! - [`Document::set`] writes it (attributes, single children, whole lists),
//! - [`Document::unset`] restores its default,
//! - [`Document::is_set`] tells whether it differs from "never assigned".
//!
//! Containment lists are edited through [`Document::list`], see
//! [`crate::containment`].
//!
//! # Mutation protocol
//!
//! Every public mutating operation validates all of its inputs first, then
//! applies its steps while appending events to a [`NotificationChain`], then
//! dispatches the chain. A failing operation therefore leaves the document
//! untouched and emits nothing.

use std::fmt::{self, Debug, Display, Formatter};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::catalog::{Catalog, DataType, Feature, FeatureId, KindId, Shape};
use crate::config::DocumentConfig;
use crate::errors::{ModelError, ModelResult};
use crate::node::{NodeData, NodeId, Owner, Setting, Slot};
use crate::notification::{
    Notification, NotificationChain, NotificationKind, Observer, ObserverId, Observers,
};
use crate::value::Value;

pub struct Document {
    catalog: &'static Catalog,
    nodes: FxHashMap<NodeId, NodeData>,
    next_id: u32,
    observers: Observers,
    deliver: bool,
}

impl Debug for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("catalog", &self.catalog.name)
            .field("nodes", &self.nodes.len())
            .field("observers", &self.observers.len())
            .field("deliver", &self.deliver)
            .finish()
    }
}

impl Document {
    #[must_use]
    pub fn new(catalog: &'static Catalog) -> Self {
        Self::with_config(catalog, &DocumentConfig::default())
    }

    #[must_use]
    pub fn with_config(catalog: &'static Catalog, config: &DocumentConfig) -> Self {
        let mut nodes = FxHashMap::default();
        nodes.reserve(config.initial_capacity);
        Self {
            catalog,
            nodes,
            next_id: 0,
            observers: Observers::default(),
            deliver: config.deliver_notifications,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Creates a detached node of `kind` holding default values.
    pub fn create(&mut self, kind: KindId) -> ModelResult<NodeId> {
        let catalog = self.catalog;
        let def = catalog
            .kind(kind)
            .ok_or_else(|| ModelError::UnknownKind(format!("#{}", kind.0)))?;
        if def.is_abstract {
            return Err(ModelError::AbstractKind(def.name));
        }
        self.next_id += 1;
        let id = NodeId(self.next_id);
        self.nodes.insert(id, NodeData::new(kind, def.features));
        tracing::trace!("created {} {id}", def.name);
        Ok(id)
    }

    pub fn kind(&self, node: NodeId) -> ModelResult<KindId> {
        Ok(self.data(node)?.kind)
    }

    pub fn kind_name(&self, node: NodeId) -> ModelResult<&'static str> {
        Ok(self.catalog.kind_name(self.kind(node)?))
    }

    pub fn owner(&self, node: NodeId) -> ModelResult<Option<Owner>> {
        Ok(self.data(node)?.owner)
    }

    pub fn features(&self, node: NodeId) -> ModelResult<&'static [Feature]> {
        self.catalog.features_of(self.kind(node)?)
    }

    /// Resolves a feature of `node` by name.
    pub fn feature_named(&self, node: NodeId, name: &str) -> ModelResult<Option<&'static Feature>> {
        Ok(self.catalog.feature_by_name(self.kind(node)?, name))
    }

    // ---- generic feature interface -------------------------------------

    /// Current value of a feature. Lists are returned as an ordered snapshot,
    /// optional attributes as their explicit value or the default.
    pub fn get(&self, node: NodeId, feature: FeatureId) -> ModelResult<Value> {
        let feature = self.feature_of(node, feature)?;
        Ok(self.slot(node, feature.id)?.read(feature))
    }

    pub fn set(&mut self, node: NodeId, feature: FeatureId, value: impl Into<Value>) -> ModelResult<()> {
        let value = value.into();
        let feature = self.feature_of(node, feature)?;
        let mut chain = NotificationChain::new();
        let result = self.set_feature(node, feature, value, &mut chain);
        self.trace_result("set", node, feature, &result);
        self.dispatch(chain);
        result
    }

    pub fn unset(&mut self, node: NodeId, feature: FeatureId) -> ModelResult<()> {
        let feature = self.feature_of(node, feature)?;
        let mut chain = NotificationChain::new();
        let result = self.unset_feature(node, feature, &mut chain);
        self.trace_result("unset", node, feature, &result);
        self.dispatch(chain);
        result
    }

    pub fn is_set(&self, node: NodeId, feature: FeatureId) -> ModelResult<bool> {
        let feature = self.feature_of(node, feature)?;
        Ok(self.slot(node, feature.id)?.is_set(feature))
    }

    /// Tri-state of an optional attribute, `None` for any other feature.
    pub fn setting(&self, node: NodeId, feature: FeatureId) -> ModelResult<Option<&Setting>> {
        let feature = self.feature_of(node, feature)?;
        Ok(match self.slot(node, feature.id)? {
            Slot::Setting(setting) => Some(setting),
            _ => None,
        })
    }

    // ---- read-only helpers for consumers -------------------------------

    /// Children held by a containment feature, in order. A single containment
    /// yields zero or one element; attributes yield nothing.
    pub fn children(&self, node: NodeId, feature: FeatureId) -> ModelResult<&[NodeId]> {
        let feature = self.feature_of(node, feature)?;
        Ok(self.slot(node, feature.id)?.contained())
    }

    pub fn child(&self, node: NodeId, feature: FeatureId) -> ModelResult<Option<NodeId>> {
        let feature = self.feature_of(node, feature)?;
        Ok(match self.slot(node, feature.id)? {
            Slot::Child(child) | Slot::Reference(child) => *child,
            _ => None,
        })
    }

    /// Borrowed string value of an attribute, without cloning.
    pub fn string(&self, node: NodeId, feature: FeatureId) -> ModelResult<Option<&str>> {
        let feature = self.feature_of(node, feature)?;
        Ok(match self.slot(node, feature.id)? {
            Slot::Value(Value::Str(s)) | Slot::Setting(Setting::Explicit(Value::Str(s))) => {
                Some(s.as_str())
            }
            _ => None,
        })
    }

    /// Direct children of `node`, in feature order then list order.
    pub fn contents(&self, node: NodeId) -> ModelResult<Vec<NodeId>> {
        Ok(self
            .data(node)?
            .slots
            .iter()
            .flat_map(|slot| slot.contained().iter().copied())
            .collect())
    }

    /// Every node below `node`, depth-first pre-order.
    pub fn all_contents(&self, node: NodeId) -> ModelResult<Vec<NodeId>> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.contents(node)?.into_iter().rev().collect();
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.contents(current)?.into_iter().rev());
        }
        Ok(result)
    }

    /// Owners of `node` from its parent up to the root.
    pub fn ancestors(&self, node: NodeId) -> ModelResult<Vec<NodeId>> {
        let mut result = Vec::new();
        let mut current = self.data(node)?.owner;
        while let Some(owner) = current {
            result.push(owner.node);
            current = self.data(owner.node)?.owner;
        }
        Ok(result)
    }

    pub fn root(&self, node: NodeId) -> ModelResult<NodeId> {
        Ok(self.ancestors(node)?.last().copied().unwrap_or(node))
    }

    /// Detached nodes, ordered by creation.
    #[must_use]
    pub fn roots(&self) -> Vec<NodeId> {
        let mut roots: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|(_, data)| data.owner.is_none())
            .map(|(id, _)| *id)
            .collect();
        roots.sort_unstable();
        roots
    }

    /// Nodes whose kind is `kind` or inherits it, ordered by creation.
    #[must_use]
    pub fn nodes_of_kind(&self, kind: KindId) -> Vec<NodeId> {
        let mut found: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|(_, data)| self.catalog.is_a(data.kind, kind))
            .map(|(id, _)| *id)
            .collect();
        found.sort_unstable();
        found
    }

    /// Formats `node` as `Kind (attribute: value, ...)`.
    #[must_use]
    pub fn describe(&self, node: NodeId) -> NodeDisplay<'_> {
        NodeDisplay { doc: self, node }
    }

    // ---- observers -----------------------------------------------------

    /// Registers an observer of every node of the document.
    pub fn observe(&mut self, observer: impl Observer + 'static) -> ObserverId {
        self.observers.register(None, Box::new(observer))
    }

    /// Registers an observer of a single node.
    pub fn observe_node(
        &mut self,
        node: NodeId,
        observer: impl Observer + 'static,
    ) -> ModelResult<ObserverId> {
        self.data(node)?;
        Ok(self.observers.register(Some(node), Box::new(observer)))
    }

    pub fn unobserve(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    pub fn set_deliver(&mut self, deliver: bool) {
        self.deliver = deliver;
    }

    #[must_use]
    pub fn delivers(&self) -> bool {
        self.deliver
    }

    /// Whether a change of `node` has anyone to be reported to.
    #[must_use]
    pub fn notification_required(&self, node: NodeId) -> bool {
        self.deliver && self.observers.listens_to(node)
    }

    // ---- structural operations -----------------------------------------

    /// Removes `node` from its owner, if any, and returns the former owner.
    pub fn detach(&mut self, node: NodeId) -> ModelResult<Option<Owner>> {
        self.data(node)?;
        let mut chain = NotificationChain::new();
        let result = self.basic_detach(node, &mut chain);
        self.dispatch(chain);
        result
    }

    /// Detaches `node` and drops it with its whole subtree from the arena.
    /// Non-owned references into the dropped subtree are cleared. Returns the
    /// number of nodes dropped.
    pub fn delete(&mut self, node: NodeId) -> ModelResult<usize> {
        let mut doomed = self.all_contents(node)?;
        doomed.push(node);
        let doomed: FxHashSet<NodeId> = doomed.into_iter().collect();

        let mut dangling = Vec::new();
        for (id, data) in &self.nodes {
            if doomed.contains(id) {
                continue;
            }
            for (position, slot) in data.slots.iter().enumerate() {
                if let Slot::Reference(Some(target)) = slot {
                    if doomed.contains(target) {
                        dangling.push((*id, position));
                    }
                }
            }
        }

        let mut chain = NotificationChain::new();
        self.basic_detach(node, &mut chain)?;
        for (id, position) in dangling {
            let notify = self.notification_required(id);
            let data = self.data_mut(id)?;
            let Some(Slot::Reference(target)) = data.slots.get_mut(position) else {
                continue;
            };
            let old = target.take();
            if notify {
                chain.push(Notification {
                    kind: NotificationKind::Set,
                    notifier: id,
                    feature: FeatureId(u16::try_from(position).unwrap_or(u16::MAX)),
                    old: Value::from(old),
                    new: Value::None,
                    position: None,
                    was_set: true,
                });
            }
        }
        for id in &doomed {
            self.nodes.remove(id);
            self.observers.forget_node(*id);
        }
        tracing::debug!("deleted subtree of {node} ({} nodes)", doomed.len());
        self.dispatch(chain);
        Ok(doomed.len())
    }

    /// Creates a detached structural copy of `node` and its subtree. References
    /// to nodes inside the copied subtree are redirected to their copies.
    pub fn deep_copy(&mut self, node: NodeId) -> ModelResult<NodeId> {
        let mut copies = FxHashMap::default();
        let copy = self.copy_subtree(node, &mut copies)?;
        for new_id in copies.values() {
            if let Some(data) = self.nodes.get_mut(new_id) {
                for slot in &mut data.slots {
                    if let Slot::Reference(Some(target)) = slot {
                        if let Some(redirect) = copies.get(target) {
                            *target = *redirect;
                        }
                    }
                }
            }
        }
        tracing::debug!("copied subtree of {node} as {copy} ({} nodes)", copies.len());
        Ok(copy)
    }

    fn copy_subtree(
        &mut self,
        node: NodeId,
        copies: &mut FxHashMap<NodeId, NodeId>,
    ) -> ModelResult<NodeId> {
        let original = self.data(node)?.clone();
        self.next_id += 1;
        let copy = NodeId(self.next_id);
        copies.insert(node, copy);
        let mut slots = Vec::with_capacity(original.slots.len());
        for (position, slot) in original.slots.into_iter().enumerate() {
            let feature = FeatureId(u16::try_from(position).unwrap_or(u16::MAX));
            let copied = match slot {
                Slot::Child(Some(child)) => {
                    let child_copy = self.copy_subtree(child, copies)?;
                    self.data_mut(child_copy)?.owner = Some(Owner::new(copy, feature));
                    Slot::Child(Some(child_copy))
                }
                Slot::Children(children) => {
                    let mut list = Vec::with_capacity(children.len());
                    for child in children {
                        let child_copy = self.copy_subtree(child, copies)?;
                        self.data_mut(child_copy)?.owner = Some(Owner::new(copy, feature));
                        list.push(child_copy);
                    }
                    Slot::Children(list)
                }
                other => other,
            };
            slots.push(copied);
        }
        self.nodes.insert(
            copy,
            NodeData {
                kind: original.kind,
                owner: None,
                slots,
            },
        );
        Ok(copy)
    }

    // ---- internals -----------------------------------------------------

    pub(crate) fn data(&self, node: NodeId) -> ModelResult<&NodeData> {
        self.nodes.get(&node).ok_or(ModelError::UnknownNode(node))
    }

    pub(crate) fn data_mut(&mut self, node: NodeId) -> ModelResult<&mut NodeData> {
        self.nodes.get_mut(&node).ok_or(ModelError::UnknownNode(node))
    }

    pub(crate) fn feature_of(&self, node: NodeId, feature: FeatureId) -> ModelResult<&'static Feature> {
        self.catalog.feature(self.kind(node)?, feature)
    }

    pub(crate) fn slot(&self, node: NodeId, feature: FeatureId) -> ModelResult<&Slot> {
        let data = self.data(node)?;
        data.slots
            .get(feature.index())
            .ok_or(ModelError::UnsupportedFeature {
                kind: self.catalog.kind_name(data.kind),
                feature,
            })
    }

    pub(crate) fn slot_mut(&mut self, node: NodeId, feature: FeatureId) -> ModelResult<&mut Slot> {
        let catalog = self.catalog;
        let data = self.data_mut(node)?;
        let kind = data.kind;
        data.slots
            .get_mut(feature.index())
            .ok_or(ModelError::UnsupportedFeature {
                kind: catalog.kind_name(kind),
                feature,
            })
    }

    pub(crate) fn dispatch(&mut self, chain: NotificationChain) {
        if !chain.is_empty() {
            self.observers.dispatch(chain);
        }
    }

    pub(crate) fn mismatch(&self, node: NodeId, feature: &Feature, found: String) -> ModelError {
        ModelError::TypeMismatch {
            kind: self
                .kind(node)
                .map_or("<unknown>", |kind| self.catalog.kind_name(kind)),
            feature: feature.name,
            expected: feature.expected(self.catalog),
            found,
        }
    }

    fn trace_result(&self, op: &str, node: NodeId, feature: &Feature, result: &ModelResult<()>) {
        match result {
            Ok(()) => tracing::trace!("{op} {node}.{}", feature.name),
            Err(err) => tracing::debug!("{op} {node}.{} rejected: {err}", feature.name),
        }
    }

    /// Checks that `child` may be held by `feature` of `owner`: it exists, its
    /// kind conforms to the feature target and, for containment, it is neither
    /// `owner` itself nor one of its ancestors.
    pub(crate) fn check_target(&self, owner: NodeId, feature: &Feature, child: NodeId) -> ModelResult<()> {
        let child_kind = self.kind(child)?;
        if let Some(target) = feature.target() {
            if !self.catalog.is_a(child_kind, target) {
                return Err(self.mismatch(
                    owner,
                    feature,
                    self.catalog.kind_name(child_kind).to_string(),
                ));
            }
        }
        if matches!(feature.shape, Shape::Containment { .. })
            && (child == owner || self.ancestors(owner)?.contains(&child))
        {
            return Err(ModelError::ContainmentCycle { owner, child });
        }
        Ok(())
    }

    fn single_target(&self, owner: NodeId, feature: &Feature, value: &Value) -> ModelResult<Option<NodeId>> {
        match value {
            Value::None => Ok(None),
            Value::Node(child) => {
                self.check_target(owner, feature, *child)?;
                Ok(Some(*child))
            }
            other => Err(self.mismatch(owner, feature, other.shape_name())),
        }
    }

    /// Validated contents for a bulk list assignment. Repeated elements are
    /// kept: appending one again moves it to the end, as `add` does.
    fn list_targets(&self, owner: NodeId, feature: &Feature, value: Value) -> ModelResult<Vec<NodeId>> {
        let Value::List(children) = value else {
            return Err(self.mismatch(owner, feature, value.shape_name()));
        };
        for child in &children {
            self.check_target(owner, feature, *child)?;
        }
        Ok(children)
    }

    fn check_data(&self, node: NodeId, feature: &Feature, data_type: DataType, value: &Value) -> ModelResult<()> {
        if data_type.accepts(value) {
            Ok(())
        } else {
            Err(self.mismatch(node, feature, value.shape_name()))
        }
    }

    fn set_feature(
        &mut self,
        node: NodeId,
        feature: &'static Feature,
        value: Value,
        chain: &mut NotificationChain,
    ) -> ModelResult<()> {
        match feature.shape {
            Shape::Attribute {
                data_type,
                unsettable,
                ..
            } => {
                self.check_data(node, feature, data_type, &value)?;
                if unsettable {
                    self.basic_set_explicit(node, feature, value, chain)
                } else {
                    self.basic_set_value(node, feature, value, chain)
                }
            }
            Shape::Containment { many: false, .. } => {
                let child = self.single_target(node, feature, &value)?;
                self.basic_set_child(node, feature, child, chain)
            }
            Shape::Containment { many: true, .. } => {
                let children = self.list_targets(node, feature, value)?;
                self.basic_clear(node, feature, chain)?;
                for child in children {
                    self.basic_detach(child, chain)?;
                    self.basic_insert(node, feature, child, None, chain)?;
                }
                Ok(())
            }
            Shape::Reference { .. } => {
                let target = self.single_target(node, feature, &value)?;
                self.basic_set_reference(node, feature, target, chain)
            }
        }
    }

    fn unset_feature(
        &mut self,
        node: NodeId,
        feature: &'static Feature,
        chain: &mut NotificationChain,
    ) -> ModelResult<()> {
        match feature.shape {
            Shape::Attribute {
                unsettable: true, ..
            } => self.basic_unset_explicit(node, feature, chain),
            Shape::Attribute { .. } => {
                self.basic_set_value(node, feature, feature.default_value(), chain)
            }
            Shape::Containment { many: true, .. } => self.basic_clear(node, feature, chain),
            Shape::Containment { many: false, .. } => self.basic_set_child(node, feature, None, chain),
            Shape::Reference { .. } => self.basic_set_reference(node, feature, None, chain),
        }
    }

    fn basic_set_value(
        &mut self,
        node: NodeId,
        feature: &Feature,
        value: Value,
        chain: &mut NotificationChain,
    ) -> ModelResult<()> {
        let notify = self.notification_required(node);
        let Slot::Value(current) = self.slot_mut(node, feature.id)? else {
            return Err(self.mismatch(node, feature, value.shape_name()));
        };
        if *current == value {
            return Ok(());
        }
        let old = std::mem::replace(current, value.clone());
        if notify {
            let was_set = old != feature.default_value();
            chain.push(Notification {
                kind: NotificationKind::Set,
                notifier: node,
                feature: feature.id,
                old,
                new: value,
                position: None,
                was_set,
            });
        }
        Ok(())
    }

    fn basic_set_explicit(
        &mut self,
        node: NodeId,
        feature: &Feature,
        value: Value,
        chain: &mut NotificationChain,
    ) -> ModelResult<()> {
        let notify = self.notification_required(node);
        let default = feature.default_value();
        let value = if value.is_none() { default.clone() } else { value };
        let Slot::Setting(setting) = self.slot_mut(node, feature.id)? else {
            return Err(self.mismatch(node, feature, value.shape_name()));
        };
        let previous = std::mem::replace(setting, Setting::Explicit(value.clone()));
        if notify {
            let (old, was_set) = match previous {
                Setting::Explicit(old) => (old, true),
                Setting::Default => (default, false),
            };
            chain.push(Notification {
                kind: NotificationKind::Set,
                notifier: node,
                feature: feature.id,
                old,
                new: value,
                position: None,
                was_set,
            });
        }
        Ok(())
    }

    fn basic_unset_explicit(
        &mut self,
        node: NodeId,
        feature: &Feature,
        chain: &mut NotificationChain,
    ) -> ModelResult<()> {
        let notify = self.notification_required(node);
        let default = feature.default_value();
        let Slot::Setting(setting) = self.slot_mut(node, feature.id)? else {
            return Err(self.mismatch(node, feature, "unsettable attribute".to_string()));
        };
        let previous = std::mem::take(setting);
        if notify {
            let (old, was_set) = match previous {
                Setting::Explicit(old) => (old, true),
                Setting::Default => (default.clone(), false),
            };
            chain.push(Notification {
                kind: NotificationKind::Unset,
                notifier: node,
                feature: feature.id,
                old,
                new: default,
                position: None,
                was_set,
            });
        }
        Ok(())
    }

    fn basic_set_child(
        &mut self,
        owner: NodeId,
        feature: &Feature,
        child: Option<NodeId>,
        chain: &mut NotificationChain,
    ) -> ModelResult<()> {
        let old = match self.slot(owner, feature.id)? {
            Slot::Child(old) => *old,
            _ => return Err(self.mismatch(owner, feature, "single child".to_string())),
        };
        if old == child {
            return Ok(());
        }
        if let Some(new_child) = child {
            self.basic_detach(new_child, chain)?;
        }
        if let Some(old_child) = old {
            self.data_mut(old_child)?.owner = None;
        }
        if let Slot::Child(slot) = self.slot_mut(owner, feature.id)? {
            *slot = child;
        }
        if let Some(new_child) = child {
            self.data_mut(new_child)?.owner = Some(Owner::new(owner, feature.id));
        }
        if self.notification_required(owner) {
            chain.push(Notification {
                kind: NotificationKind::Set,
                notifier: owner,
                feature: feature.id,
                old: Value::from(old),
                new: Value::from(child),
                position: None,
                was_set: old.is_some(),
            });
        }
        Ok(())
    }

    fn basic_set_reference(
        &mut self,
        node: NodeId,
        feature: &Feature,
        target: Option<NodeId>,
        chain: &mut NotificationChain,
    ) -> ModelResult<()> {
        let notify = self.notification_required(node);
        let Slot::Reference(slot) = self.slot_mut(node, feature.id)? else {
            return Err(self.mismatch(node, feature, "reference".to_string()));
        };
        if *slot == target {
            return Ok(());
        }
        let old = std::mem::replace(slot, target);
        if notify {
            chain.push(Notification {
                kind: NotificationKind::Set,
                notifier: node,
                feature: feature.id,
                old: Value::from(old),
                new: Value::from(target),
                position: None,
                was_set: old.is_some(),
            });
        }
        Ok(())
    }

    /// Removes `child` from wherever it is contained, emitting the event of
    /// that old location. A detached child is left alone.
    pub(crate) fn basic_detach(
        &mut self,
        child: NodeId,
        chain: &mut NotificationChain,
    ) -> ModelResult<Option<Owner>> {
        let Some(owner) = self.data(child)?.owner else {
            return Ok(None);
        };
        let notify = self.notification_required(owner.node);
        let event = match self.slot_mut(owner.node, owner.feature)? {
            Slot::Children(children) => children.iter().position(|c| *c == child).map(|pos| {
                children.remove(pos);
                (NotificationKind::Remove, Some(pos))
            }),
            Slot::Child(slot) if *slot == Some(child) => {
                *slot = None;
                Some((NotificationKind::Set, None))
            }
            _ => None,
        };
        self.data_mut(child)?.owner = None;
        if let (true, Some((kind, position))) = (notify, event) {
            chain.push(Notification {
                kind,
                notifier: owner.node,
                feature: owner.feature,
                old: Value::Node(child),
                new: Value::None,
                position,
                was_set: true,
            });
        }
        Ok(Some(owner))
    }

    /// Inserts an already detached `child` into a list slot.
    pub(crate) fn basic_insert(
        &mut self,
        owner: NodeId,
        feature: &Feature,
        child: NodeId,
        index: Option<usize>,
        chain: &mut NotificationChain,
    ) -> ModelResult<()> {
        let notify = self.notification_required(owner);
        let kind = self.kind_name(owner)?;
        let Slot::Children(children) = self.slot_mut(owner, feature.id)? else {
            return Err(ModelError::NotAList {
                kind,
                feature: feature.name,
            });
        };
        let was_set = !children.is_empty();
        let position = index.map_or(children.len(), |i| i.min(children.len()));
        children.insert(position, child);
        self.data_mut(child)?.owner = Some(Owner::new(owner, feature.id));
        if notify {
            chain.push(Notification {
                kind: NotificationKind::Add,
                notifier: owner,
                feature: feature.id,
                old: Value::None,
                new: Value::Node(child),
                position: Some(position),
                was_set,
            });
        }
        Ok(())
    }

    pub(crate) fn basic_remove(
        &mut self,
        owner: NodeId,
        feature: &Feature,
        child: NodeId,
        chain: &mut NotificationChain,
    ) -> ModelResult<()> {
        let notify = self.notification_required(owner);
        let kind = self.kind_name(owner)?;
        let Slot::Children(children) = self.slot_mut(owner, feature.id)? else {
            return Err(ModelError::NotAList {
                kind,
                feature: feature.name,
            });
        };
        let Some(position) = children.iter().position(|c| *c == child) else {
            return Err(ModelError::OwnershipViolation {
                owner,
                feature: feature.name,
                child,
            });
        };
        children.remove(position);
        self.data_mut(child)?.owner = None;
        if notify {
            chain.push(Notification {
                kind: NotificationKind::Remove,
                notifier: owner,
                feature: feature.id,
                old: Value::Node(child),
                new: Value::None,
                position: Some(position),
                was_set: true,
            });
        }
        Ok(())
    }

    /// Removes every element in order, one REMOVE event each.
    pub(crate) fn basic_clear(
        &mut self,
        owner: NodeId,
        feature: &Feature,
        chain: &mut NotificationChain,
    ) -> ModelResult<()> {
        let snapshot = self.slot(owner, feature.id)?.contained().to_vec();
        for child in snapshot {
            self.basic_remove(owner, feature, child, chain)?;
        }
        Ok(())
    }
}

/// `Display` adapter returned by [`Document::describe`].
pub struct NodeDisplay<'doc> {
    doc: &'doc Document,
    node: NodeId,
}

impl Display for NodeDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Ok(data) = self.doc.data(self.node) else {
            return write!(f, "<deleted {}>", self.node);
        };
        let catalog = self.doc.catalog;
        write!(f, "{} {}", catalog.kind_name(data.kind), self.node)?;
        let features = catalog.features_of(data.kind).unwrap_or_default();
        let mut first = true;
        for (feature, slot) in features.iter().zip(&data.slots) {
            let rendered = match slot {
                Slot::Value(value) => value.to_string(),
                Slot::Setting(Setting::Explicit(value)) => value.to_string(),
                Slot::Setting(Setting::Default) => "<unset>".to_string(),
                _ => continue,
            };
            f.write_str(if first { " (" } else { ", " })?;
            first = false;
            write!(f, "{}: {rendered}", feature.name)?;
        }
        if !first {
            f.write_str(")")?;
        }
        Ok(())
    }
}
