//! Structural edits on a realistic code tree.

use spldoc_code::{NodeKind, create, features, kind_of};
use spldoc_model::{EventLog, ModelError, NotificationKind, Owner, Value};

use crate::utils::build_composite;

#[test]
fn test_move_invocation_between_graphs() -> anyhow::Result<()> {
    use features::composite_graph::OPERATOR_INVOCATION;

    let mut fixture = build_composite()?;
    let doc = &mut fixture.doc;
    let other = create(doc, NodeKind::CompositeGraph)?;
    let log = EventLog::new();
    doc.observe(log.clone());

    doc.list(other, OPERATOR_INVOCATION)?.add(fixture.invocation)?;
    assert!(doc.children(fixture.graph, OPERATOR_INVOCATION)?.is_empty());
    assert_eq!(doc.children(other, OPERATOR_INVOCATION)?, &[fixture.invocation]);
    assert_eq!(
        doc.owner(fixture.invocation)?,
        Some(Owner::new(other, OPERATOR_INVOCATION))
    );

    let events = log.take();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].kind, NotificationKind::Remove);
    assert_eq!(events[0].notifier, fixture.graph);
    assert_eq!(events[1].kind, NotificationKind::Add);
    assert_eq!(events[1].notifier, other);
    assert_eq!(events[1].child(), Some(fixture.invocation));
    Ok(())
}

#[test]
fn test_wrong_child_kind_is_rejected() -> anyhow::Result<()> {
    let mut fixture = build_composite()?;
    let err = fixture
        .doc
        .set(
            fixture.definition,
            features::composite_definition::COMPOSITE_BODY,
            fixture.head,
        )
        .unwrap_err();
    assert!(matches!(err, ModelError::TypeMismatch { .. }));
    assert_eq!(
        fixture.doc.child(fixture.definition, features::composite_definition::COMPOSITE_HEAD)?,
        Some(fixture.head)
    );
    Ok(())
}

#[test]
fn test_deep_copy_of_definition() -> anyhow::Result<()> {
    use features::{composite_definition, composite_head};

    let mut fixture = build_composite()?;
    let before = fixture.doc.len();
    let copy = fixture.doc.deep_copy(fixture.definition)?;
    assert_eq!(fixture.doc.len(), before + 10);
    assert_eq!(fixture.doc.owner(copy)?, None);
    assert_eq!(kind_of(&fixture.doc, copy)?, NodeKind::CompositeDefinition);

    let head = fixture
        .doc
        .child(copy, composite_definition::COMPOSITE_HEAD)?
        .ok_or_else(|| anyhow::anyhow!("copy lost its head"))?;
    assert_ne!(head, fixture.head);
    assert_eq!(fixture.doc.string(head, composite_head::NAME)?, Some("Main"));

    fixture.doc.set(head, composite_head::NAME, "Copy")?;
    assert_eq!(fixture.doc.string(fixture.head, composite_head::NAME)?, Some("Main"));
    Ok(())
}

#[test]
fn test_delete_window_subtree() -> anyhow::Result<()> {
    use features::operator_invocation_windows::WINDOW;

    let mut fixture = build_composite()?;
    let windows = fixture
        .doc
        .owner(fixture.window)?
        .map(|owner| owner.node)
        .ok_or_else(|| anyhow::anyhow!("window is detached"))?;
    let before = fixture.doc.len();
    assert_eq!(fixture.doc.delete(fixture.window)?, 2);
    assert_eq!(fixture.doc.len(), before - 2);
    assert!(fixture.doc.children(windows, WINDOW)?.is_empty());
    assert!(!fixture.doc.contains(fixture.window));
    assert!(matches!(
        fixture.doc.get(fixture.window, WINDOW),
        Err(ModelError::UnknownNode(_))
    ));
    assert_eq!(
        fixture.doc.describe(fixture.window).to_string(),
        format!("<deleted {}>", fixture.window)
    );
    Ok(())
}

#[test]
fn test_generic_access_by_feature_name() -> anyhow::Result<()> {
    let mut fixture = build_composite()?;
    let feature = fixture
        .doc
        .feature_named(fixture.head, "name")?
        .ok_or_else(|| anyhow::anyhow!("no name feature"))?;
    assert_eq!(feature.id, features::composite_head::NAME);
    fixture.doc.set(fixture.head, feature.id, "Renamed")?;
    assert_eq!(
        fixture.doc.get(fixture.head, feature.id)?,
        Value::Str("Renamed".to_string())
    );
    assert!(fixture.doc.feature_named(fixture.head, "nom")?.is_none());
    Ok(())
}
