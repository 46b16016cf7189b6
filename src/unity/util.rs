//! Shared utilities for reading assets and rendering paths.

use std::path::Path;

use crate::error::{AnalyzerError, Result};

/// Normalize line endings and BOM so regexes and line anchors behave the same on every platform.
pub fn normalize_source(text: &str) -> String {
    if text.is_empty() {
        return text.to_string();
    }
    let s = text.replace("\r\n", "\n").replace('\r', "\n");
    match s.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => s,
    }
}

/// Read a text asset and normalize it. Invalid UTF-8 is replaced rather than rejected.
pub fn read_file_normalized(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| AnalyzerError::io(path, e))?;
    Ok(normalize_source(&String::from_utf8_lossy(&bytes)))
}

/// `path` relative to `root`, joined with `/` whatever the host separator is.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Format path for user-facing output: strip Windows extended path prefix `\\?\`.
pub fn display_path(path: &Path) -> std::borrow::Cow<'_, str> {
    let s = path.to_string_lossy();
    #[cfg(windows)]
    {
        if let Some(stripped) = s.strip_prefix(r"\\?\") {
            return std::borrow::Cow::Owned(stripped.to_string());
        }
    }
    s
}
