//! Observer registration, scoping and delivery.

use std::cell::Cell;
use std::rc::Rc;

use spldoc_model::{Document, DocumentConfig, EventLog, Notification, NotificationKind};

use crate::utils::{PARENT, TREE_CATALOG, child, named_child, parent, tree_document};

#[test]
fn test_node_observer_sees_only_its_node() -> anyhow::Result<()> {
    let (mut doc, global) = tree_document();
    let a = doc.create(PARENT)?;
    let b = doc.create(PARENT)?;
    let scoped = EventLog::new();
    doc.observe_node(a, scoped.clone())?;

    doc.set(a, parent::LABEL, "a")?;
    doc.set(b, parent::LABEL, "b")?;
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped.events()[0].notifier, a);
    assert_eq!(global.len(), 2);
    Ok(())
}

#[test]
fn test_closure_observer_and_unobserve() -> anyhow::Result<()> {
    let mut doc = Document::new(&TREE_CATALOG);
    let p = doc.create(PARENT)?;
    let count = Rc::new(Cell::new(0));
    let seen = Rc::clone(&count);
    let id = doc.observe(move |_: &Notification| seen.set(seen.get() + 1));

    doc.set(p, parent::LABEL, "one")?;
    assert_eq!(count.get(), 1);
    assert!(doc.unobserve(id));
    assert!(!doc.unobserve(id));
    doc.set(p, parent::LABEL, "two")?;
    assert_eq!(count.get(), 1);
    Ok(())
}

#[test]
fn test_delivery_switch() -> anyhow::Result<()> {
    let (mut doc, log) = tree_document();
    let p = doc.create(PARENT)?;
    doc.set_deliver(false);
    assert!(!doc.notification_required(p));
    doc.set(p, parent::LABEL, "quiet")?;
    assert!(log.is_empty());

    doc.set_deliver(true);
    doc.set(p, parent::LABEL, "loud")?;
    assert_eq!(log.len(), 1);
    Ok(())
}

#[test]
fn test_config_disables_delivery() -> anyhow::Result<()> {
    let config = DocumentConfig::from_toml_str("deliver_notifications = false")?;
    let mut doc = Document::with_config(&TREE_CATALOG, &config);
    let log = EventLog::new();
    doc.observe(log.clone());
    let p = doc.create(PARENT)?;
    doc.set(p, parent::LABEL, "x")?;
    assert!(!doc.delivers());
    assert!(log.is_empty());
    Ok(())
}

#[test]
fn test_no_observer_means_no_events_built() -> anyhow::Result<()> {
    let mut doc = Document::new(&TREE_CATALOG);
    let p = doc.create(PARENT)?;
    assert!(!doc.notification_required(p));
    let scoped = EventLog::new();
    doc.observe_node(p, scoped.clone())?;
    assert!(doc.notification_required(p));
    let c = named_child(&mut doc, "c")?;
    assert!(!doc.notification_required(c));
    Ok(())
}

#[test]
fn test_events_arrive_after_the_operation_completes() -> anyhow::Result<()> {
    let (mut doc, _log) = tree_document();
    let a = doc.create(PARENT)?;
    let b = doc.create(PARENT)?;
    let x = named_child(&mut doc, "x")?;
    doc.list(a, parent::CHILDREN)?.add(x)?;

    let adds = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&adds);
    doc.observe(move |n: &Notification| {
        if n.kind == NotificationKind::Add {
            counter.set(counter.get() + 1);
        }
    });
    let chained = EventLog::new();
    doc.observe(chained.clone());

    doc.list(b, parent::CHILDREN)?.add(x)?;
    assert_eq!(adds.get(), 1);
    assert_eq!(
        chained.kinds(),
        vec![NotificationKind::Remove, NotificationKind::Add]
    );
    Ok(())
}

#[test]
fn test_deleted_node_forgets_its_observers() -> anyhow::Result<()> {
    let (mut doc, _log) = tree_document();
    let p = doc.create(PARENT)?;
    let c = named_child(&mut doc, "c")?;
    let scoped = EventLog::new();
    doc.observe_node(c, scoped.clone())?;
    doc.set(c, child::NAME, "renamed")?;
    doc.delete(c)?;
    assert!(doc.observe_node(c, EventLog::new()).is_err());
    doc.set(p, parent::LABEL, "still here")?;
    assert_eq!(scoped.len(), 1);
    Ok(())
}
