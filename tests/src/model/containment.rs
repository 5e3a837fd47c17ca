//! Containment lists: ownership bookkeeping, re-parenting and bulk replacement.

use rustc_hash::FxHashMap;
use spldoc_model::{Notification, NotificationKind, Owner, Value};

use crate::utils::{PARENT, child, named_child, parent, tree_document};

#[test]
fn test_add_then_remove_tracks_owner() -> anyhow::Result<()> {
    let (mut doc, _log) = tree_document();
    let p = doc.create(PARENT)?;
    let first = named_child(&mut doc, "first")?;
    let c = named_child(&mut doc, "c")?;

    doc.list(p, parent::CHILDREN)?.add(first)?;
    doc.list(p, parent::CHILDREN)?.add(c)?;
    assert_eq!(doc.owner(c)?, Some(Owner::new(p, parent::CHILDREN)));
    assert_eq!(doc.children(p, parent::CHILDREN)?.last(), Some(&c));

    doc.list(p, parent::CHILDREN)?.remove(c)?;
    assert_eq!(doc.owner(c)?, None);
    assert!(!doc.children(p, parent::CHILDREN)?.contains(&c));
    assert_eq!(doc.children(p, parent::CHILDREN)?, &[first]);
    Ok(())
}

#[test]
fn test_reparent_between_parents() -> anyhow::Result<()> {
    let (mut doc, log) = tree_document();
    let a = doc.create(PARENT)?;
    let b = doc.create(PARENT)?;
    let x = doc.create(crate::utils::CHILD)?;

    doc.list(a, parent::CHILDREN)?.add(x)?;
    assert_eq!(doc.children(a, parent::CHILDREN)?, &[x]);
    assert_eq!(doc.owner(x)?, Some(Owner::new(a, parent::CHILDREN)));
    log.take();

    doc.list(b, parent::CHILDREN)?.add(x)?;
    assert!(doc.children(a, parent::CHILDREN)?.is_empty());
    assert_eq!(doc.children(b, parent::CHILDREN)?, &[x]);
    assert_eq!(doc.owner(x)?, Some(Owner::new(b, parent::CHILDREN)));

    let events = log.take();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].kind, NotificationKind::Remove);
    assert_eq!(events[0].notifier, a);
    assert_eq!(events[0].feature, parent::CHILDREN);
    assert_eq!(events[0].child(), Some(x));
    assert_eq!(events[1].kind, NotificationKind::Add);
    assert_eq!(events[1].notifier, b);
    assert_eq!(events[1].feature, parent::CHILDREN);
    assert_eq!(events[1].child(), Some(x));
    Ok(())
}

#[test]
fn test_reparent_between_features_of_one_parent() -> anyhow::Result<()> {
    let (mut doc, log) = tree_document();
    let p = doc.create(PARENT)?;
    let x = named_child(&mut doc, "x")?;
    doc.list(p, parent::CHILDREN)?.add(x)?;
    log.take();

    doc.set(p, parent::FAVORITE, x)?;
    assert!(doc.children(p, parent::CHILDREN)?.is_empty());
    assert_eq!(doc.child(p, parent::FAVORITE)?, Some(x));
    assert_eq!(
        log.kinds(),
        vec![NotificationKind::Remove, NotificationKind::Set]
    );
    Ok(())
}

#[test]
fn test_bulk_replace_matches_clear_then_add() -> anyhow::Result<()> {
    let build = || -> anyhow::Result<_> {
        let (mut doc, _log) = tree_document();
        let p = doc.create(PARENT)?;
        let other = doc.create(PARENT)?;
        let kept = named_child(&mut doc, "kept")?;
        let dropped = named_child(&mut doc, "dropped")?;
        let stolen = named_child(&mut doc, "stolen")?;
        let fresh = named_child(&mut doc, "fresh")?;
        doc.set(p, parent::CHILDREN, vec![kept, dropped])?;
        doc.list(other, parent::CHILDREN)?.add(stolen)?;
        Ok((doc, p, vec![fresh, kept, stolen], [kept, dropped, stolen, fresh]))
    };

    let (mut bulk, p1, list1, all1) = build()?;
    bulk.set(p1, parent::CHILDREN, list1.clone())?;

    let (mut stepwise, p2, list2, all2) = build()?;
    stepwise.list(p2, parent::CHILDREN)?.clear()?;
    for c in &list2 {
        stepwise.list(p2, parent::CHILDREN)?.add(*c)?;
    }

    assert_eq!(bulk.children(p1, parent::CHILDREN)?, list1.as_slice());
    assert_eq!(stepwise.children(p2, parent::CHILDREN)?, list2.as_slice());

    let owners = |doc: &spldoc_model::Document, all: [spldoc_model::NodeId; 4]| {
        all.iter()
            .map(|n| (*n, doc.owner(*n).unwrap()))
            .collect::<FxHashMap<_, _>>()
    };
    assert_eq!(owners(&bulk, all1), owners(&stepwise, all2));
    Ok(())
}

#[test]
fn test_bulk_replace_event_order() -> anyhow::Result<()> {
    let (mut doc, log) = tree_document();
    let p = doc.create(PARENT)?;
    let a = named_child(&mut doc, "a")?;
    let b = named_child(&mut doc, "b")?;
    doc.set(p, parent::CHILDREN, vec![a])?;
    log.take();

    doc.set(p, parent::CHILDREN, vec![b, a])?;
    let events = log.take();
    let summary: Vec<_> = events
        .iter()
        .map(|n| (n.kind, n.child(), n.position))
        .collect();
    assert_eq!(
        summary,
        vec![
            (NotificationKind::Remove, Some(a), Some(0)),
            (NotificationKind::Add, Some(b), Some(0)),
            (NotificationKind::Add, Some(a), Some(1)),
        ]
    );
    Ok(())
}

#[test]
fn test_bulk_replace_with_repeats_matches_clear_then_add() -> anyhow::Result<()> {
    let (mut doc, log) = tree_document();
    let p = doc.create(PARENT)?;
    let a = named_child(&mut doc, "a")?;
    doc.set(p, parent::CHILDREN, vec![a, a])?;
    assert_eq!(doc.get(p, parent::CHILDREN)?, Value::List(vec![a]));

    let q = doc.create(PARENT)?;
    let b = named_child(&mut doc, "b")?;
    let c = named_child(&mut doc, "c")?;
    log.take();
    doc.set(q, parent::CHILDREN, vec![b, c, b])?;
    let bulk = log.take();

    let r = doc.create(PARENT)?;
    let d = named_child(&mut doc, "d")?;
    let e = named_child(&mut doc, "e")?;
    log.take();
    {
        let mut list = doc.list(r, parent::CHILDREN)?;
        list.clear()?;
        for item in [d, e, d] {
            list.add(item)?;
        }
    }
    let stepwise = log.take();

    assert_eq!(doc.children(q, parent::CHILDREN)?, &[c, b]);
    assert_eq!(doc.children(r, parent::CHILDREN)?, &[e, d]);
    let shape = |events: &[Notification]| -> Vec<_> {
        events.iter().map(|n| (n.kind, n.position)).collect()
    };
    assert_eq!(
        shape(&bulk),
        vec![
            (NotificationKind::Add, Some(0)),
            (NotificationKind::Add, Some(1)),
            (NotificationKind::Remove, Some(0)),
            (NotificationKind::Add, Some(1)),
        ]
    );
    assert_eq!(shape(&bulk), shape(&stepwise));
    assert_eq!(doc.owner(b)?, Some(Owner::new(q, parent::CHILDREN)));
    Ok(())
}

#[test]
fn test_unset_list_clears_with_one_remove_per_element() -> anyhow::Result<()> {
    let (mut doc, log) = tree_document();
    let p = doc.create(PARENT)?;
    let a = named_child(&mut doc, "a")?;
    let b = named_child(&mut doc, "b")?;
    doc.set(p, parent::CHILDREN, vec![a, b])?;
    assert!(doc.is_set(p, parent::CHILDREN)?);
    log.take();

    doc.unset(p, parent::CHILDREN)?;
    assert!(doc.children(p, parent::CHILDREN)?.is_empty());
    assert_eq!(doc.owner(a)?, None);
    assert_eq!(doc.owner(b)?, None);
    assert!(!doc.is_set(p, parent::CHILDREN)?);

    let events = log.take();
    assert_eq!(
        events.iter().map(|n| n.kind).collect::<Vec<_>>(),
        vec![NotificationKind::Remove, NotificationKind::Remove]
    );
    assert_eq!(
        events.iter().map(|n| n.old.clone()).collect::<Vec<_>>(),
        vec![Value::Node(a), Value::Node(b)]
    );
    assert!(events.iter().all(|n| n.position == Some(0)));
    Ok(())
}

#[test]
fn test_bulk_replace_rejects_wrong_kind_without_mutation() -> anyhow::Result<()> {
    let (mut doc, log) = tree_document();
    let p = doc.create(PARENT)?;
    let a = named_child(&mut doc, "a")?;
    let intruder = doc.create(PARENT)?;
    doc.set(p, parent::CHILDREN, vec![a])?;
    log.take();

    let err = doc
        .set(p, parent::CHILDREN, vec![intruder, a])
        .unwrap_err();
    assert!(matches!(
        err,
        spldoc_model::ModelError::TypeMismatch { found, .. } if found == "Parent"
    ));
    assert_eq!(doc.children(p, parent::CHILDREN)?, &[a]);
    assert!(log.is_empty());
    Ok(())
}

#[test]
fn test_nested_lists_share_one_owner_rule() -> anyhow::Result<()> {
    let (mut doc, _log) = tree_document();
    let p = doc.create(PARENT)?;
    let outer = named_child(&mut doc, "outer")?;
    let inner = named_child(&mut doc, "inner")?;
    doc.list(p, parent::CHILDREN)?.add(outer)?;
    doc.list(p, parent::CHILDREN)?.add(inner)?;

    doc.list(outer, child::CHILDREN)?.add(inner)?;
    assert_eq!(doc.children(p, parent::CHILDREN)?, &[outer]);
    assert_eq!(doc.owner(inner)?, Some(Owner::new(outer, child::CHILDREN)));
    assert_eq!(doc.ancestors(inner)?, vec![outer, p]);
    Ok(())
}
