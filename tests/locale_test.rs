//! Aggregating a locales directory through the public API.

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]
#![allow(missing_docs)]

use std::fs;
use std::path::Path;

use menu_kit::config::LocaleSettings;
use menu_kit::locale::{
    self,
    LocaleError,
    Messages,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

/// Write `content` to `relative` under `dir`.
fn write(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Locales directory covering every format, a default export, a
/// non-translation file and a subdirectory.
fn fixture() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "en.yml", "menu:\n  title: Menu\n  empty: Nothing to eat\n");
    write(temp_dir.path(), "fr.yml", "menu:\n  title: Carte\n");
    write(temp_dir.path(), "de.yaml", "menu:\n  title: Speisekarte\n");
    write(temp_dir.path(), "en.json", r#"{"menu": {"title": "Our menu"}}"#);
    write(temp_dir.path(), "ja.json", r#"{"default": {"menu": {"title": "メニュー"}}}"#);
    write(temp_dir.path(), "notes.txt", "not a locale");
    write(temp_dir.path(), "admin/es.json", r#"{"menu": {"title": "Menú"}}"#);
    temp_dir
}

/// Each derived key is listed once, in merge order.
#[test]
fn test_every_file_key_appears_once() {
    let temp_dir = fixture();

    let messages = Messages::load(temp_dir.path(), false).unwrap();

    assert_eq!(messages.available_locales(), ["en", "fr", "de", "ja"]);
}

/// json content replaces yml content for the same key.
#[test]
fn test_json_wins_over_yml() {
    let temp_dir = fixture();

    let messages = Messages::load(temp_dir.path(), false).unwrap();

    assert_eq!(messages.get("en"), Some(&json!({"menu": {"title": "Our menu"}})));
    assert_eq!(messages.get("ja"), Some(&json!({"menu": {"title": "メニュー"}})));
}

/// A recursive scan keys nested files by relative path.
#[test]
fn test_recursive_scan_keeps_relative_key() {
    let temp_dir = fixture();
    let settings = LocaleSettings { dir: temp_dir.path().to_path_buf(), recursive: true };

    let messages = locale::aggregate(&settings).unwrap();

    assert_eq!(messages.available_locales(), ["en", "fr", "de", "admin/es", "ja"]);
    assert_eq!(messages.get("admin/es"), Some(&json!({"menu": {"title": "Menú"}})));
}

/// A malformed file aborts aggregation and is named.
/// Dot-prefixed files, including unreadable AppleDouble ones, are skipped.
#[test]
fn test_hidden_files_are_not_locales() {
    let temp_dir = fixture();
    write(temp_dir.path(), ".draft.json", r#"{"menu": {"title": "Draft"}}"#);
    fs::write(temp_dir.path().join("._en.json"), [0x00, 0x05, 0x16, 0x07, 0xff, 0xfe]).unwrap();

    let messages = Messages::load(temp_dir.path(), false).unwrap();

    assert_eq!(messages.available_locales(), ["en", "fr", "de", "ja"]);
}

/// A malformed file aborts aggregation and is named.
#[test]
fn test_malformed_file_aborts_aggregation() {
    let temp_dir = fixture();
    write(temp_dir.path(), "it.json", r#"{"menu": "#);

    let err = Messages::load(temp_dir.path(), false).unwrap_err();

    match err {
        LocaleError::Parse { path, .. } => assert!(path.ends_with("it.json")),
        other => panic!("unexpected error: {other}"),
    }
}

/// A missing directory is an error, not an empty table.
#[test]
fn test_missing_directory_is_an_error() {
    let temp_dir = TempDir::new().unwrap();

    let result = Messages::load(&temp_dir.path().join("locales"), false);

    assert!(matches!(result, Err(LocaleError::InvalidPath(_))));
}

/// The process-wide table is empty until `init`.
#[test]
fn test_process_wide_table() {
    let temp_dir = fixture();
    let settings = LocaleSettings { dir: temp_dir.path().to_path_buf(), recursive: false };

    assert!(menu_kit::messages().is_none());

    locale::init(&settings).unwrap();

    assert_eq!(menu_kit::available_locales(), ["en", "fr", "de", "ja"]);
    assert_eq!(
        menu_kit::messages().and_then(|m| m.get("de")),
        Some(&json!({"menu": {"title": "Speisekarte"}}))
    );
}
