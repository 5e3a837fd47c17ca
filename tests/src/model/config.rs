use std::io::Write;

use spldoc_model::{Document, DocumentConfig, ModelError};

use crate::utils::TREE_CATALOG;

#[test]
fn test_load_config_from_file() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "deliver_notifications = false")?;
    writeln!(file, "initial_capacity = 32")?;
    let config = DocumentConfig::load(file.path())?;

    assert!(!config.deliver_notifications);
    assert_eq!(config.initial_capacity, 32);
    let doc = Document::with_config(&TREE_CATALOG, &config);
    assert!(!doc.delivers());
    assert!(doc.is_empty());
    Ok(())
}

#[test]
fn test_missing_config_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spldoc-config-does-not-exist.toml");
    let err = DocumentConfig::load(&path).unwrap_err();
    assert!(matches!(err, ModelError::Io { .. }));
    assert!(err.to_string().contains("spldoc-config-does-not-exist.toml"));
}

#[test]
fn test_default_config() {
    let config = DocumentConfig::default();
    assert!(config.deliver_notifications);
    assert_eq!(config.initial_capacity, 256);
}
