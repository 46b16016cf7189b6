//! Analyze a scanned project: used GUIDs, unused scripts, and the files written for them.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

use log::{debug, info, warn};

mod report;
mod usage;

pub use report::{dump_file_name, render_report, sort_for_report, write_dump, write_report};
pub use usage::used_guids;

use super::fields::script_field_names;
use super::models::{ProjectIndex, ScriptRecord};
use super::references::{ReferenceExtractor, TextReferenceExtractor};
use super::scan::scan_project;
use crate::error::{AnalyzerError, Result};

/// Counts reported after a full run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub scenes: usize,
    pub dumps_written: usize,
    pub scripts: usize,
    pub used: usize,
    pub unused: usize,
}

/// Registered scripts whose GUID is not in `used`, in report order.
pub fn unused_scripts(index: &ProjectIndex, used: &HashSet<String>) -> Vec<ScriptRecord> {
    let mut unused: Vec<ScriptRecord> = index
        .scripts
        .values()
        .filter(|s| !used.contains(&s.guid))
        .cloned()
        .collect();
    sort_for_report(&mut unused);
    unused
}

/// Unused scripts of an already scanned project, validating fields with `field_names`.
pub fn find_unused_scripts_with<F>(index: &ProjectIndex, field_names: F) -> Vec<ScriptRecord>
where
    F: Fn(&ScriptRecord) -> BTreeSet<String> + Sync,
{
    let used = used_guids(index, field_names);
    unused_scripts(index, &used)
}

/// Unused scripts of an already scanned project, reading field declarations from disk.
pub fn find_unused_scripts(index: &ProjectIndex) -> Vec<ScriptRecord> {
    find_unused_scripts_with(index, |record| script_field_names(&record.path))
}

/// Scan `project_root`, write one dump per scene and the unused-script report into `output_dir`.
pub fn analyze_project(project_root: &Path, output_dir: &Path) -> Result<RunSummary> {
    analyze_project_with(project_root, output_dir, &TextReferenceExtractor)
}

pub fn analyze_project_with(
    project_root: &Path,
    output_dir: &Path,
    extractor: &dyn ReferenceExtractor,
) -> Result<RunSummary> {
    if !project_root.is_dir() {
        return Err(AnalyzerError::NotADirectory(project_root.to_path_buf()));
    }
    std::fs::create_dir_all(output_dir).map_err(|e| AnalyzerError::io(output_dir, e))?;

    let (index, scenes) = scan_project(project_root, extractor);
    let mut summary = RunSummary {
        scenes: scenes.len(),
        scripts: index.scripts.len(),
        ..RunSummary::default()
    };
    // Dumps are named after the scene file only; a later scene with the same name replaces the file.
    let mut dump_owners: HashMap<_, &Path> = HashMap::new();
    for scene in &scenes {
        let Some(dump) = &scene.dump else {
            continue;
        };
        let path = write_dump(output_dir, &scene.path, dump)?;
        debug!("wrote {}", path.display());
        match dump_owners.insert(dump_file_name(&scene.path), &scene.path) {
            Some(previous) => warn!(
                "{} overwrites the dump of {}",
                scene.path.display(),
                previous.display()
            ),
            None => summary.dumps_written += 1,
        }
    }

    let used = used_guids(&index, |record| script_field_names(&record.path));
    let unused = unused_scripts(&index, &used);
    let report = write_report(output_dir, &unused)?;
    summary.used = index.scripts.keys().filter(|g| used.contains(*g)).count();
    summary.unused = unused.len();
    info!(
        "{} scene(s), {} script(s): {} used, {} unused; report at {}",
        summary.scenes,
        summary.scripts,
        summary.used,
        summary.unused,
        report.display()
    );
    Ok(summary)
}
