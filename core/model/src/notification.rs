//! Change Notification
//!
//! Every mutation of a [`crate::document::Document`] is described by one
//! [`Notification`] per structural change. Compound operations (re-parenting,
//! bulk list replacement, clearing) collect their events into a
//! [`NotificationChain`] that is passed explicitly through each step and
//! dispatched to the registered [`Observer`]s only once the whole operation has
//! completed, so no observer ever sees a half-applied change.
//!
//! When nobody listens to a node the engine skips building events for it
//! entirely; observers therefore cost nothing until they are registered.

use std::cell::RefCell;
use std::rc::Rc;

use crate::catalog::FeatureId;
use crate::node::NodeId;
use crate::value::Value;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum NotificationKind {
    Set,
    Unset,
    Add,
    Remove,
}

/// Record of a single SET/UNSET/ADD/REMOVE mutation.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Notification {
    pub kind: NotificationKind,
    /// Node whose feature changed.
    pub notifier: NodeId,
    pub feature: FeatureId,
    pub old: Value,
    pub new: Value,
    /// List position for ADD and REMOVE.
    pub position: Option<usize>,
    /// Whether the feature counted as set before the change.
    pub was_set: bool,
}

impl Notification {
    /// A SET that did not change the value (optional attributes re-set to the
    /// same explicit value).
    #[must_use]
    pub fn is_touch(&self) -> bool {
        self.kind == NotificationKind::Set && self.old == self.new
    }

    /// Node added or removed by an ADD/REMOVE event.
    #[must_use]
    pub fn child(&self) -> Option<NodeId> {
        match self.kind {
            NotificationKind::Add => self.new.as_node(),
            NotificationKind::Remove => self.old.as_node(),
            NotificationKind::Set | NotificationKind::Unset => None,
        }
    }
}

/// Buffer of the events produced by one compound operation.
#[derive(Clone, Default, Debug)]
pub struct NotificationChain {
    events: Vec<Notification>,
}

impl NotificationChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        self.events.push(notification);
    }

    #[must_use]
    pub fn events(&self) -> &[Notification] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl IntoIterator for NotificationChain {
    type Item = Notification;
    type IntoIter = std::vec::IntoIter<Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

/// Receiver of change notifications.
///
/// Observers are called synchronously on the mutating thread, after the
/// operation that produced the events has returned. They get the event only,
/// never the document, so they cannot re-enter a mutation in progress.
pub trait Observer {
    fn notify_changed(&mut self, notification: &Notification);
}

impl<F> Observer for F
where
    F: FnMut(&Notification),
{
    fn notify_changed(&mut self, notification: &Notification) {
        self(notification);
    }
}

/// Recording observer. Clones share one log, so a test can keep a handle
/// while the document owns another.
#[derive(Clone, Default, Debug)]
pub struct EventLog {
    events: Rc<RefCell<Vec<Notification>>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<Notification> {
        self.events.borrow().clone()
    }

    #[must_use]
    pub fn kinds(&self) -> Vec<NotificationKind> {
        self.events.borrow().iter().map(|n| n.kind).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Returns the recorded events and empties the log.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

impl Observer for EventLog {
    fn notify_changed(&mut self, notification: &Notification) {
        self.events.borrow_mut().push(notification.clone());
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ObserverId(u32);

struct Registration {
    id: ObserverId,
    /// `None` listens to every node of the document.
    target: Option<NodeId>,
    observer: Box<dyn Observer>,
}

#[derive(Default)]
pub(crate) struct Observers {
    next_id: u32,
    registrations: Vec<Registration>,
}

impl Observers {
    pub(crate) fn register(&mut self, target: Option<NodeId>, observer: Box<dyn Observer>) -> ObserverId {
        self.next_id += 1;
        let id = ObserverId(self.next_id);
        self.registrations.push(Registration {
            id,
            target,
            observer,
        });
        id
    }

    pub(crate) fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.id != id);
        self.registrations.len() != before
    }

    /// Drops node-scoped observers of nodes that no longer exist.
    pub(crate) fn forget_node(&mut self, node: NodeId) {
        self.registrations.retain(|r| r.target != Some(node));
    }

    pub(crate) fn listens_to(&self, node: NodeId) -> bool {
        self.registrations
            .iter()
            .any(|r| r.target.is_none_or(|target| target == node))
    }

    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.registrations.len()
    }

    pub(crate) fn dispatch(&mut self, chain: NotificationChain) {
        for notification in chain {
            for registration in &mut self.registrations {
                if registration
                    .target
                    .is_none_or(|target| target == notification.notifier)
                {
                    registration.observer.notify_changed(&notification);
                }
            }
        }
    }
}
