//! Containment lists.
//!
//! A [`ContainmentList`] is a short-lived editing handle over one multi-valued
//! containment feature of one node. Every insertion detaches the child from
//! wherever it sat before (emitting that location's REMOVE or SET first), so a
//! node is always an element of at most one list in the whole document.

use crate::catalog::{Feature, FeatureId};
use crate::document::Document;
use crate::errors::{ModelError, ModelResult};
use crate::node::{NodeId, Slot};
use crate::notification::NotificationChain;

#[derive(Debug)]
pub struct ContainmentList<'doc> {
    doc: &'doc mut Document,
    owner: NodeId,
    feature: &'static Feature,
}

impl Document {
    /// Opens the containment list `feature` of `owner` for editing.
    pub fn list(&mut self, owner: NodeId, feature: FeatureId) -> ModelResult<ContainmentList<'_>> {
        let feature = self.feature_of(owner, feature)?;
        if !feature.is_many() {
            return Err(ModelError::NotAList {
                kind: self.kind_name(owner)?,
                feature: feature.name,
            });
        }
        Ok(ContainmentList {
            doc: self,
            owner,
            feature,
        })
    }
}

impl ContainmentList<'_> {
    #[must_use]
    pub fn owner(&self) -> NodeId {
        self.owner
    }

    #[must_use]
    pub fn feature(&self) -> &'static Feature {
        self.feature
    }

    #[must_use]
    pub fn as_slice(&self) -> &[NodeId] {
        self.doc
            .slot(self.owner, self.feature.id)
            .map(Slot::contained)
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.as_slice().iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.as_slice().get(index).copied()
    }

    #[must_use]
    pub fn contains(&self, child: NodeId) -> bool {
        self.as_slice().contains(&child)
    }

    #[must_use]
    pub fn index_of(&self, child: NodeId) -> Option<usize> {
        self.as_slice().iter().position(|c| *c == child)
    }

    /// Appends `child`. A child already in this list moves to the end.
    pub fn add(&mut self, child: NodeId) -> ModelResult<()> {
        self.attach(child, None)
    }

    /// Inserts `child` so that it ends up at `index`.
    pub fn insert(&mut self, index: usize, child: NodeId) -> ModelResult<()> {
        self.attach(child, Some(index))
    }

    pub fn remove(&mut self, child: NodeId) -> ModelResult<()> {
        self.doc.data(child)?;
        let mut chain = NotificationChain::new();
        self.doc
            .basic_remove(self.owner, self.feature, child, &mut chain)?;
        self.doc.dispatch(chain);
        tracing::trace!("removed {child} from {}.{}", self.owner, self.feature.name);
        Ok(())
    }

    pub fn remove_at(&mut self, index: usize) -> ModelResult<NodeId> {
        let child = self.get(index).ok_or(ModelError::IndexOutOfBounds {
            feature: self.feature.name,
            index,
            len: self.len(),
        })?;
        self.remove(child)?;
        Ok(child)
    }

    /// Removes every element, front to back.
    pub fn clear(&mut self) -> ModelResult<()> {
        let mut chain = NotificationChain::new();
        self.doc.basic_clear(self.owner, self.feature, &mut chain)?;
        self.doc.dispatch(chain);
        Ok(())
    }

    fn attach(&mut self, child: NodeId, index: Option<usize>) -> ModelResult<()> {
        self.doc.check_target(self.owner, self.feature, child)?;
        if let Some(index) = index {
            let len = self.len() - usize::from(self.contains(child));
            if index > len {
                return Err(ModelError::IndexOutOfBounds {
                    feature: self.feature.name,
                    index,
                    len,
                });
            }
        }
        let mut chain = NotificationChain::new();
        self.doc.basic_detach(child, &mut chain)?;
        self.doc
            .basic_insert(self.owner, self.feature, child, index, &mut chain)?;
        self.doc.dispatch(chain);
        tracing::trace!("attached {child} to {}.{}", self.owner, self.feature.name);
        Ok(())
    }
}
