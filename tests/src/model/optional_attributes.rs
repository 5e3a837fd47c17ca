//! Optional attributes: default, explicit value and the is-set flag.

use spldoc_model::{EnumDef, EnumLiteral, NotificationKind, Setting, Value};

use crate::utils::{MODIFIER_HOLDER, holder, modifier, tree_document};

#[test]
fn test_modifier_holder_scenario() -> anyhow::Result<()> {
    let (mut doc, log) = tree_document();
    let node = doc.create(MODIFIER_HOLDER)?;

    assert!(!doc.is_set(node, holder::NAME)?);
    assert_eq!(doc.get(node, holder::NAME)?, Value::Enum(modifier("PUBLIC")));

    doc.set(node, holder::NAME, modifier("PROTECTED"))?;
    assert!(doc.is_set(node, holder::NAME)?);
    assert_eq!(doc.get(node, holder::NAME)?, Value::Enum(modifier("PROTECTED")));
    let events = log.take();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, NotificationKind::Set);
    assert_eq!(events[0].old, Value::Enum(modifier("PUBLIC")));
    assert_eq!(events[0].new, Value::Enum(modifier("PROTECTED")));
    assert!(!events[0].was_set);

    doc.unset(node, holder::NAME)?;
    assert!(!doc.is_set(node, holder::NAME)?);
    assert_eq!(doc.get(node, holder::NAME)?, Value::Enum(modifier("PUBLIC")));
    let events = log.take();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, NotificationKind::Unset);
    assert_eq!(events[0].old, Value::Enum(modifier("PROTECTED")));
    assert!(events[0].was_set);
    Ok(())
}

#[test]
fn test_unset_round_trip_restores_default() -> anyhow::Result<()> {
    let (mut doc, _log) = tree_document();
    let node = doc.create(MODIFIER_HOLDER)?;
    doc.set(node, holder::FROZEN, true)?;
    doc.unset(node, holder::FROZEN)?;
    assert!(!doc.is_set(node, holder::FROZEN)?);
    assert_eq!(
        doc.get(node, holder::FROZEN)?,
        doc.catalog().default_of(MODIFIER_HOLDER, holder::FROZEN)?
    );
    assert_eq!(doc.setting(node, holder::FROZEN)?, Some(&Setting::Default));
    Ok(())
}

#[test]
fn test_setting_same_value_twice_emits_twice() -> anyhow::Result<()> {
    let (mut doc, log) = tree_document();
    let node = doc.create(MODIFIER_HOLDER)?;

    doc.set(node, holder::NAME, modifier("private"))?;
    assert!(doc.is_set(node, holder::NAME)?);
    doc.set(node, holder::NAME, modifier("private"))?;
    assert!(doc.is_set(node, holder::NAME)?);

    let events = log.take();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|n| n.kind == NotificationKind::Set));
    assert!(!events[0].was_set);
    assert!(events[1].was_set);
    assert!(events[1].is_touch());
    Ok(())
}

#[test]
fn test_explicit_default_counts_as_set() -> anyhow::Result<()> {
    let (mut doc, log) = tree_document();
    let node = doc.create(MODIFIER_HOLDER)?;

    doc.set(node, holder::NAME, modifier("PUBLIC"))?;
    assert!(doc.is_set(node, holder::NAME)?);
    assert_eq!(log.len(), 1);

    doc.set(node, holder::FROZEN, Value::None)?;
    assert!(doc.is_set(node, holder::FROZEN)?);
    assert_eq!(doc.get(node, holder::FROZEN)?, Value::Bool(false));
    assert_eq!(
        doc.setting(node, holder::FROZEN)?,
        Some(&Setting::Explicit(Value::Bool(false)))
    );
    Ok(())
}

#[test]
fn test_unset_of_never_set_attribute_still_notifies() -> anyhow::Result<()> {
    let (mut doc, log) = tree_document();
    let node = doc.create(MODIFIER_HOLDER)?;
    doc.unset(node, holder::NAME)?;

    let events = log.take();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, NotificationKind::Unset);
    assert!(!events[0].was_set);
    assert_eq!(events[0].old, events[0].new);
    Ok(())
}

#[test]
fn test_foreign_enum_literal_is_a_type_mismatch() -> anyhow::Result<()> {
    let (mut doc, log) = tree_document();
    let node = doc.create(MODIFIER_HOLDER)?;
    let foreign = spldoc_code::enums::WINDOW_TYPE_ENUM.parse("sliding")?;

    let err = doc.set(node, holder::NAME, foreign).unwrap_err();
    assert!(matches!(err, spldoc_model::ModelError::TypeMismatch { .. }));
    assert!(!doc.is_set(node, holder::NAME)?);
    assert!(log.is_empty());
    Ok(())
}

/// Same name and literals as the holder's enumeration, but a distinct definition.
static LOOKALIKE_MODIFIER_KIND: EnumDef = EnumDef {
    name: "ModifierKind",
    literals: &[EnumLiteral {
        name: "PUBLIC",
        literal: "public",
        value: 0,
    }],
};

#[test]
fn test_same_named_enum_from_another_definition_is_a_type_mismatch() -> anyhow::Result<()> {
    let (mut doc, log) = tree_document();
    let node = doc.create(MODIFIER_HOLDER)?;
    let lookalike = LOOKALIKE_MODIFIER_KIND.parse("public")?;
    assert_ne!(lookalike, modifier("public"));

    let err = doc.set(node, holder::NAME, lookalike).unwrap_err();
    assert!(matches!(err, spldoc_model::ModelError::TypeMismatch { .. }));
    assert!(!doc.is_set(node, holder::NAME)?);
    assert!(log.is_empty());
    Ok(())
}

#[test]
fn test_enum_lookup_by_literal_and_name() {
    assert_eq!(modifier("protected"), modifier("PROTECTED"));
    assert_eq!(modifier("private").value(), 2);
    assert_eq!(modifier("private").to_string(), "private");
    assert!(
        crate::utils::MODIFIER_KIND
            .parse("internal")
            .is_err()
    );
}
