//! Translation file discovery.

use std::path::{
    Component,
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobMatcher,
};
use ignore::WalkBuilder;

use super::{
    LocaleError,
    LocaleFormat,
};

/// Find every file of `format` under `dir`, sorted by path.
///
/// Only `dir` itself is scanned unless `recursive` is set. Dot-prefixed files
/// and directories are skipped; `.gitignore` and friends are not honored.
pub fn discover(
    dir: &Path,
    format: LocaleFormat,
    recursive: bool,
) -> Result<Vec<PathBuf>, LocaleError> {
    if !dir.is_dir() {
        return Err(LocaleError::InvalidPath(format!(
            "'{}' is not a directory",
            dir.display()
        )));
    }

    let matcher = file_matcher(format)?;
    let mut found_files = Vec::new();

    for result in WalkBuilder::new(dir)
        .standard_filters(false)
        .hidden(true)
        .follow_links(false)
        .max_depth(if recursive { None } else { Some(1) })
        .build()
    {
        let entry = result.map_err(|e| LocaleError::Walk(e.to_string()))?;

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        if path.file_name().is_some_and(|name| matcher.is_match(name)) {
            found_files.push(path.to_path_buf());
        }
    }

    found_files.sort();
    tracing::debug!(dir = %dir.display(), %format, count = found_files.len(), "Discovered translation files");

    Ok(found_files)
}

/// Compile the `*.{ext}` file name matcher of `format`.
fn file_matcher(format: LocaleFormat) -> Result<GlobMatcher, LocaleError> {
    let pattern = format.file_pattern();
    Glob::new(&pattern)
        .map(|glob| glob.compile_matcher())
        .map_err(|e| LocaleError::InvalidPath(format!("Invalid file pattern '{pattern}': {e}")))
}

/// Derive the locale key of `path` by removing the `dir` prefix and the
/// format's extension.
///
/// # Examples
/// - `locales/en.yml` → `en`
/// - `locales/pt-BR.json` → `pt-BR`
/// - `locales/admin/fr.yaml` → `admin/fr` (recursive scan)
pub fn locale_key(dir: &Path, path: &Path, format: LocaleFormat) -> Result<String, LocaleError> {
    let relative = path.strip_prefix(dir).map_err(|_| {
        LocaleError::InvalidPath(format!(
            "'{}' is not under '{}'",
            path.display(),
            dir.display()
        ))
    })?;

    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    let joined = parts.join("/");

    let suffix = format!(".{}", format.extension());
    match joined.strip_suffix(&suffix) {
        Some(key) if !key.is_empty() && !key.ends_with('/') => Ok(key.to_string()),
        _ => Err(LocaleError::InvalidPath(format!(
            "'{}' has no locale name before '{suffix}'",
            path.display()
        ))),
    }
}
