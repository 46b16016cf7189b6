//! Unused-script report and hierarchy dump output.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use super::super::constants::{DUMP_SUFFIX, REPORT_COLUMNS, REPORT_FILE_NAME};
use super::super::models::ScriptRecord;
use crate::error::{AnalyzerError, Result};

/// Sort shallower paths first, then by path.
pub fn sort_for_report(scripts: &mut [ScriptRecord]) {
    scripts.sort_by(|a, b| {
        (a.depth(), a.relative_path.as_str()).cmp(&(b.depth(), b.relative_path.as_str()))
    });
}

/// CSV text: header then one `path,guid` row per script, in the given order.
/// Fields holding a comma, quote or newline are quoted.
pub fn render_report(scripts: &[ScriptRecord]) -> io::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(REPORT_COLUMNS)?;
    for script in scripts {
        writer.write_record([script.relative_path.as_str(), script.guid.as_str()])?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn write_file(path: PathBuf, contents: &str) -> Result<PathBuf> {
    std::fs::write(&path, contents).map_err(|e| AnalyzerError::io(&path, e))?;
    Ok(path)
}

pub fn write_report(output_dir: &Path, scripts: &[ScriptRecord]) -> Result<PathBuf> {
    let path = output_dir.join(REPORT_FILE_NAME);
    let contents = render_report(scripts).map_err(|e| AnalyzerError::io(&path, e))?;
    write_file(path, &contents)
}

/// `<scene file name>.dump`
pub fn dump_file_name(scene: &Path) -> OsString {
    let mut name = scene
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(DUMP_SUFFIX);
    name
}

/// Write `<output>/<scene file name>.dump`.
pub fn write_dump(output_dir: &Path, scene: &Path, dump: &str) -> Result<PathBuf> {
    write_file(output_dir.join(dump_file_name(scene)), dump)
}
