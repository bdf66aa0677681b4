use ghostcfg_config::{
    BackupState, ConfigDocument, ConfigError, backup_config, read_config, write_config,
};
use std::fs;
use tempfile::tempdir;

const SAMPLE_CONFIG: &str = "\
# Font
font-size = 13

# Theme
theme = Catppuccin Mocha

# Cursor
cursor-style = underline
";

#[test]
fn test_read_missing_file_yields_empty_document() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("ghostty").join("config");

    let doc = read_config(&path).unwrap();
    assert!(doc.is_empty());
    assert_eq!(doc.path(), Some(path.as_path()));
}

#[test]
fn test_read_binds_path_and_parses() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("config");
    fs::write(&path, SAMPLE_CONFIG).unwrap();

    let doc = read_config(&path).unwrap();
    assert_eq!(doc.path(), Some(path.as_path()));
    assert_eq!(doc.get("cursor-style"), Some("underline"));
    assert_eq!(doc.to_text(), SAMPLE_CONFIG);
}

#[test]
fn test_write_without_path_fails() {
    let doc = ConfigDocument::parse("a = 1");
    let err = write_config(&doc, None).unwrap_err();
    assert!(matches!(err, ConfigError::NoPath));
}

#[test]
fn test_write_creates_parent_dirs_on_first_save() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("nested").join("ghostty").join("config");

    let mut doc = read_config(&path).unwrap();
    doc.set("font-size", "14");
    let written = write_config(&doc, None).unwrap();

    assert_eq!(written, path);
    assert_eq!(fs::read_to_string(&path).unwrap(), "font-size = 14\n");
    assert!(!path.with_file_name("config.tmp").exists());
}

#[test]
fn test_write_override_path_wins() {
    let temp = tempdir().unwrap();
    let bound = temp.path().join("bound");
    let other = temp.path().join("other");

    let doc = ConfigDocument::parse("a = 1").with_path(&bound);
    write_config(&doc, Some(other.as_path())).unwrap();

    assert!(other.exists());
    assert!(!bound.exists());
}

#[test]
fn test_edit_only_touches_changed_line() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("config");
    fs::write(&path, SAMPLE_CONFIG).unwrap();

    let mut doc = read_config(&path).unwrap();
    doc.set("cursor-style", "block");
    write_config(&doc, None).unwrap();

    let saved = read_config(&path).unwrap();
    assert_eq!(saved.get("cursor-style"), Some("block"));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        SAMPLE_CONFIG.replace("cursor-style = underline", "cursor-style = block")
    );
}

#[test]
fn test_backup_once_per_session() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("config");
    fs::write(&path, SAMPLE_CONFIG).unwrap();

    let mut doc = read_config(&path).unwrap();
    assert_eq!(doc.backup_state(), BackupState::Pending);

    let backup = backup_config(&mut doc).unwrap();
    let backup_path = temp.path().join("config.bak");
    assert_eq!(backup, Some(backup_path.clone()));
    assert_eq!(doc.backup_state(), BackupState::Done);
    assert_eq!(fs::read_to_string(&backup_path).unwrap(), SAMPLE_CONFIG);

    // Later writes must not refresh the backup.
    doc.set("font-size", "20");
    write_config(&doc, None).unwrap();
    assert_eq!(backup_config(&mut doc).unwrap(), None);
    assert_eq!(fs::read_to_string(&backup_path).unwrap(), SAMPLE_CONFIG);
}

#[test]
fn test_backup_noop_without_file_or_path() {
    let temp = tempdir().unwrap();

    let mut unbound = ConfigDocument::parse("a = 1");
    assert_eq!(backup_config(&mut unbound).unwrap(), None);
    assert_eq!(unbound.backup_state(), BackupState::Pending);

    let mut missing = read_config(temp.path().join("config")).unwrap();
    assert_eq!(backup_config(&mut missing).unwrap(), None);
    assert_eq!(missing.backup_state(), BackupState::Pending);
    assert!(!temp.path().join("config.bak").exists());
}
