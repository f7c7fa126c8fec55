//! The merged locale → messages table.

use std::path::{
    Path,
    PathBuf,
};
use std::sync::OnceLock;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::discovery::{
    discover,
    locale_key,
};
use super::format::unwrap_default_export;
use super::{
    LocaleError,
    LocaleFormat,
};
use crate::config::LocaleSettings;

/// One parsed translation file.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleEntry {
    /// Locale key derived from the file path, e.g. `en` or `admin/fr`
    pub key: String,
    /// File the messages were read from
    pub path: PathBuf,
    /// Parsed content, default export unwrapped
    pub messages: Value,
}

/// Locale key → message table, in first-insertion order.
///
/// A key overwritten by a later format group keeps its original position, so
/// [`Messages::available_locales`] is stable regardless of collisions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Messages {
    /// Locale key → messages
    table: IndexMap<String, Value>,
    /// Keys of `table`, cached for [`Messages::available_locales`]
    #[serde(skip)]
    locales: Vec<String>,
}

impl Messages {
    /// Scan `dir` and merge every translation file.
    pub fn load(dir: &Path, recursive: bool) -> Result<Self, LocaleError> {
        let mut table = IndexMap::new();

        for format in LocaleFormat::MERGE_ORDER {
            for entry in load_entries(dir, format, recursive)? {
                if table.insert(entry.key.clone(), entry.messages).is_some() {
                    tracing::debug!(
                        key = %entry.key,
                        path = %entry.path.display(),
                        "Locale overrides an earlier file"
                    );
                }
            }
        }

        Ok(Self::from_table(table))
    }

    /// Wrap an already merged table.
    #[must_use]
    pub fn from_table(table: IndexMap<String, Value>) -> Self {
        let locales = table.keys().cloned().collect();
        Self { table, locales }
    }

    /// Messages of `locale`.
    #[must_use]
    pub fn get(&self, locale: &str) -> Option<&Value> {
        self.table.get(locale)
    }

    /// Locale keys in table order.
    #[must_use]
    pub fn available_locales(&self) -> &[String] {
        &self.locales
    }

    /// Number of locales.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// True when no translation file was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Locale and messages pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.table.iter()
    }

    /// The underlying ordered map.
    #[must_use]
    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.table
    }
}

/// Read and parse every file of one format group, in path order.
pub fn load_entries(
    dir: &Path,
    format: LocaleFormat,
    recursive: bool,
) -> Result<Vec<LocaleEntry>, LocaleError> {
    discover(dir, format, recursive)?
        .into_iter()
        .map(|path| {
            let key = locale_key(dir, &path, format)?;
            let content = std::fs::read_to_string(&path)
                .map_err(|source| LocaleError::Io { path: path.clone(), source })?;
            let messages = unwrap_default_export(format.parse(&content, &path)?);
            Ok(LocaleEntry { key, path, messages })
        })
        .collect()
}

/// Build the table described by `settings`.
pub fn aggregate(settings: &LocaleSettings) -> Result<Messages, LocaleError> {
    tracing::debug!(dir = %settings.dir.display(), recursive = settings.recursive, "Aggregating locales");
    let messages = Messages::load(&settings.dir, settings.recursive)?;
    tracing::info!(locales = ?messages.available_locales(), "Locale messages loaded");
    Ok(messages)
}

/// Table built by [`init`].
static MESSAGES: OnceLock<Messages> = OnceLock::new();

/// Build the process-wide table. It can only be built once.
pub fn init(settings: &LocaleSettings) -> Result<&'static Messages, LocaleError> {
    if MESSAGES.get().is_some() {
        return Err(LocaleError::AlreadyInitialized);
    }

    let messages = aggregate(settings)?;
    MESSAGES.set(messages).map_err(|_| LocaleError::AlreadyInitialized)?;
    MESSAGES.get().ok_or(LocaleError::AlreadyInitialized)
}

/// The process-wide table, if [`init`] succeeded.
#[must_use]
pub fn messages() -> Option<&'static Messages> {
    MESSAGES.get()
}

/// Locale keys of the process-wide table; empty before [`init`].
#[must_use]
pub fn available_locales() -> &'static [String] {
    MESSAGES.get().map(Messages::available_locales).unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::test_utils::write_locale;

    /// load: one entry per file across the three formats
    #[googletest::test]
    fn test_load_merges_all_formats() {
        let temp_dir = TempDir::new().unwrap();
        write_locale(temp_dir.path(), "en.yml", "greeting: Hello\n");
        write_locale(temp_dir.path(), "de.yaml", "greeting: Hallo\n");
        write_locale(temp_dir.path(), "ja.json", r#"{"greeting": "こんにちは"}"#);

        let messages = Messages::load(temp_dir.path(), false).unwrap();

        expect_that!(
            messages.available_locales().to_vec(),
            elements_are![eq("en"), eq("de"), eq("ja")]
        );
        expect_that!(messages.get("de"), some(eq(&json!({"greeting": "Hallo"}))));
        expect_that!(messages.len(), eq(3));
    }

    /// load: json wins, the key keeps its first position
    #[googletest::test]
    fn test_load_json_overrides_yml_and_keeps_position() {
        let temp_dir = TempDir::new().unwrap();
        write_locale(temp_dir.path(), "en.yml", "greeting: from yml\n");
        write_locale(temp_dir.path(), "fr.yml", "greeting: Bonjour\n");
        write_locale(temp_dir.path(), "en.yaml", "greeting: from yaml\n");
        write_locale(temp_dir.path(), "en.json", r#"{"greeting": "from json"}"#);

        let messages = Messages::load(temp_dir.path(), false).unwrap();

        expect_that!(messages.available_locales().to_vec(), elements_are![eq("en"), eq("fr")]);
        expect_that!(messages.get("en"), some(eq(&json!({"greeting": "from json"}))));
    }

    /// load: yaml wins over yml
    #[googletest::test]
    fn test_load_yaml_overrides_yml() {
        let temp_dir = TempDir::new().unwrap();
        write_locale(temp_dir.path(), "en.yml", "greeting: from yml\n");
        write_locale(temp_dir.path(), "en.yaml", "greeting: from yaml\n");

        let messages = Messages::load(temp_dir.path(), false).unwrap();

        expect_that!(messages.get("en"), some(eq(&json!({"greeting": "from yaml"}))));
    }

    /// load: `default` envelope removed
    #[googletest::test]
    fn test_load_unwraps_default_export() {
        let temp_dir = TempDir::new().unwrap();
        write_locale(temp_dir.path(), "en.json", r#"{"default": {"greeting": "Hello"}}"#);

        let messages = Messages::load(temp_dir.path(), false).unwrap();

        expect_that!(messages.get("en"), some(eq(&json!({"greeting": "Hello"}))));
    }

    /// load: a malformed file aborts the whole table
    #[rstest]
    fn test_load_fails_on_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        write_locale(temp_dir.path(), "en.json", r#"{"greeting": "Hello"}"#);
        write_locale(temp_dir.path(), "fr.yml", "greeting: [oops\n");

        let err = Messages::load(temp_dir.path(), false).unwrap_err();

        assert!(matches!(err, LocaleError::Parse { ref path, .. } if path.ends_with("fr.yml")));
    }

    /// load: dot-prefixed files are neither locales nor parse errors
    #[googletest::test]
    fn test_load_skips_hidden_files() {
        let temp_dir = TempDir::new().unwrap();
        write_locale(temp_dir.path(), "en.json", r#"{"greeting": "Hello"}"#);
        write_locale(temp_dir.path(), ".draft.json", r#"{"greeting": "Draft"}"#);
        std::fs::write(temp_dir.path().join("._en.json"), [0x00, 0x05, 0x16, 0x07, 0xff, 0xfe])
            .unwrap();

        let messages = Messages::load(temp_dir.path(), false).unwrap();

        expect_that!(messages.available_locales().to_vec(), elements_are![eq("en")]);
        expect_that!(messages.get("en"), some(eq(&json!({"greeting": "Hello"}))));
    }

    /// load: empty directory gives an empty table
    #[rstest]
    fn test_load_empty_directory() {
        let temp_dir = TempDir::new().unwrap();

        let messages = Messages::load(temp_dir.path(), false).unwrap();

        assert!(messages.is_empty());
        assert!(messages.available_locales().is_empty());
    }

    /// iter/into_inner: same order as available_locales
    #[rstest]
    fn test_iter_and_into_inner_follow_table_order() {
        let temp_dir = TempDir::new().unwrap();
        write_locale(temp_dir.path(), "fr.yml", "greeting: Bonjour\n");
        write_locale(temp_dir.path(), "en.json", r#"{"greeting": "Hello"}"#);

        let messages = Messages::load(temp_dir.path(), false).unwrap();
        let iterated: Vec<&str> = messages.iter().map(|(locale, _)| locale.as_str()).collect();
        let table = messages.clone().into_inner();

        assert_eq!(iterated, ["fr", "en"]);
        assert_eq!(
            table.keys().collect::<Vec<_>>(),
            messages.available_locales().iter().collect::<Vec<_>>()
        );
        assert_eq!(table.get("en"), Some(&json!({"greeting": "Hello"})));
    }

    /// serialize: a plain locale → messages object
    #[rstest]
    fn test_serialize_as_plain_object() {
        let mut table = IndexMap::new();
        table.insert("en".to_string(), json!({"greeting": "Hello"}));
        table.insert("fr".to_string(), json!({"greeting": "Bonjour"}));

        let text = serde_json::to_string(&Messages::from_table(table)).unwrap();

        assert_eq!(text, r#"{"en":{"greeting":"Hello"},"fr":{"greeting":"Bonjour"}}"#);
    }

    /// init: the process-wide table is built once
    #[rstest]
    fn test_global_before_and_after_init() {
        let temp_dir = TempDir::new().unwrap();
        write_locale(temp_dir.path(), "en.json", r#"{"greeting": "Hello"}"#);
        let settings =
            LocaleSettings { dir: temp_dir.path().to_path_buf(), recursive: false };

        // Other tests in this binary never touch the global table.
        assert!(messages().is_none());
        assert!(available_locales().is_empty());

        let initialized = init(&settings).unwrap();

        assert_eq!(initialized.available_locales(), ["en".to_string()]);
        assert_eq!(available_locales(), ["en".to_string()]);
        assert!(messages().is_some());
        assert!(matches!(init(&settings), Err(LocaleError::AlreadyInitialized)));
    }
}
