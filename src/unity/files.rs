//! File system traversal for scenes and scripts under a project's `Assets` tree.

use std::fs;
use std::path::{Path, PathBuf};

use log::{trace, warn};

use super::constants::{ASSETS_DIR, SCENE_EXTENSION, SCRIPT_EXTENSION};

fn matches_extension(path: &Path, ext: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.to_lowercase().ends_with(ext))
}

/// Unity does not import `.hidden` folders or folders ending in `~`.
fn is_ignored_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.') || n.ends_with('~'))
}

fn walk_files_rec(dir_path: &Path, result: &mut Vec<PathBuf>, extension: &str) {
    let read_dir = match fs::read_dir(dir_path) {
        Ok(rd) => rd,
        Err(e) => {
            warn!("cannot read directory {}: {}", dir_path.display(), e);
            return;
        }
    };
    let mut dirs = Vec::new();
    for entry in read_dir.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if !is_ignored_dir(&path) {
                dirs.push(path);
            }
        } else if path.is_file() && matches_extension(&path, extension) {
            result.push(path);
        }
    }
    trace!(
        "[walk] {} subdirs={} {} so far={}",
        dir_path.display(),
        dirs.len(),
        extension,
        result.len()
    );
    for d in &dirs {
        walk_files_rec(d, result, extension);
    }
}

/// Recursively collect all files under `root` with the given extension (case-insensitive), sorted.
fn iter_files_by_extension(root: &Path, extension: &str) -> Vec<PathBuf> {
    if !root.is_dir() {
        return Vec::new();
    }
    let mut result = Vec::new();
    walk_files_rec(root, &mut result, extension);
    result.sort();
    result
}

/// `<project>/Assets`, or `None` (with a warning) when the project has no Assets folder.
pub fn assets_dir(project_root: &Path) -> Option<PathBuf> {
    let assets = project_root.join(ASSETS_DIR);
    if assets.is_dir() {
        Some(assets)
    } else {
        warn!(
            "no {} directory under {}; nothing to analyze",
            ASSETS_DIR,
            project_root.display()
        );
        None
    }
}

/// All `.unity` scene files under `root`.
pub fn iter_scene_files(root: &Path) -> Vec<PathBuf> {
    iter_files_by_extension(root, SCENE_EXTENSION)
}

/// All `.cs` script files under `root`.
pub fn iter_script_files(root: &Path) -> Vec<PathBuf> {
    iter_files_by_extension(root, SCRIPT_EXTENSION)
}
