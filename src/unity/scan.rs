//! Orchestrate project scanning: register scripts by GUID, parse scenes, and
//! collect scene references. Files are processed in parallel; results are merged
//! on the calling thread in path order.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use rayon::prelude::*;

use super::document::{is_text_scene, parse_scene};
use super::files::{assets_dir, iter_scene_files, iter_script_files};
use super::guid::resolve_guid;
use super::hierarchy::render_dump;
use super::models::{ProjectIndex, ScriptRecord, ScriptReference};
use super::references::ReferenceExtractor;
use super::util::{read_file_normalized, relative_path};
use crate::error::Result;

/// Output of one scene: its hierarchy dump and the script references it holds.
#[derive(Debug)]
pub struct SceneScan {
    pub path: PathBuf,
    /// `None` when the scene is not text-serialized.
    pub dump: Option<String>,
    pub references: Vec<ScriptReference>,
}

/// Parse one scene file into its dump text and references.
pub fn scan_scene(path: &Path, extractor: &dyn ReferenceExtractor) -> Result<SceneScan> {
    let text = read_file_normalized(path)?;
    if !is_text_scene(&text) {
        warn!(
            "{} is not a text-serialized scene; skipped",
            path.display()
        );
        return Ok(SceneScan {
            path: path.to_path_buf(),
            dump: None,
            references: Vec::new(),
        });
    }
    let dump = render_dump(&parse_scene(&text));
    let references = extractor.extract(&text);
    debug!(
        "scene {}: {} reference(s)",
        path.display(),
        references.len()
    );
    Ok(SceneScan {
        path: path.to_path_buf(),
        dump: Some(dump),
        references,
    })
}

/// Script record for `path`, or `None` when it has no resolvable GUID.
fn script_record(project_root: &Path, path: &Path) -> Option<ScriptRecord> {
    match resolve_guid(path) {
        Ok(Some(guid)) => Some(ScriptRecord {
            guid,
            relative_path: relative_path(project_root, path),
            path: path.to_path_buf(),
        }),
        Ok(None) => None,
        Err(e) => {
            warn!("{}", e);
            None
        }
    }
}

/// Register every script under the project's Assets directory.
/// Scripts are merged in relative-path string order, so a duplicated GUID keeps the
/// record with the greatest relative path. Each collision is logged.
pub fn index_scripts(project_root: &Path, index: &mut ProjectIndex) {
    let Some(assets) = assets_dir(project_root) else {
        return;
    };
    let mut scripts = iter_script_files(&assets);
    scripts.sort_by_cached_key(|path| relative_path(project_root, path));
    let records: Vec<Option<ScriptRecord>> = scripts
        .par_iter()
        .map(|path| script_record(project_root, path))
        .collect();
    for record in records.into_iter().flatten() {
        let relative = record.relative_path.clone();
        if let Some(previous) = index.insert_script(record) {
            warn!(
                "duplicate guid {}: {} replaces {}",
                previous.guid, relative, previous.relative_path
            );
        }
    }
}

/// Parse every scene under the project's Assets directory. Unreadable scenes are skipped.
pub fn scan_scenes(project_root: &Path, extractor: &dyn ReferenceExtractor) -> Vec<SceneScan> {
    let Some(assets) = assets_dir(project_root) else {
        return Vec::new();
    };
    let mut scenes = iter_scene_files(&assets);
    scenes.sort_by_cached_key(|path| relative_path(project_root, path));
    let scans: Vec<Result<SceneScan>> = scenes
        .par_iter()
        .map(|path| scan_scene(path, extractor))
        .collect();
    scans
        .into_iter()
        .filter_map(|scan| match scan {
            Ok(scan) => Some(scan),
            Err(e) => {
                warn!("{}", e);
                None
            }
        })
        .collect()
}

/// Scan scripts and scenes. Scene references are merged into the index in scene path order.
pub fn scan_project(
    project_root: &Path,
    extractor: &dyn ReferenceExtractor,
) -> (ProjectIndex, Vec<SceneScan>) {
    let mut index = ProjectIndex::default();
    index_scripts(project_root, &mut index);
    let mut scenes = scan_scenes(project_root, extractor);
    for scene in &mut scenes {
        index.scenes.push(scene.path.clone());
        index.references.append(&mut scene.references);
    }
    (index, scenes)
}
