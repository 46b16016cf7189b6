//! Analyze Unity projects: scene hierarchies and script usage.

pub mod analysis;
pub mod constants;
pub mod document;
mod files;
pub mod fields;
pub mod guid;
pub mod hierarchy;
pub mod models;
pub mod references;
mod scan;
pub mod util;

pub use analysis::{
    analyze_project, analyze_project_with, find_unused_scripts, find_unused_scripts_with,
    render_report, used_guids, RunSummary,
};
pub use document::{classify, parse_scene, DocumentKind};
pub use fields::{find_field_names, script_field_names};
pub use files::{iter_scene_files, iter_script_files};
pub use guid::{parse_meta_guid, resolve_guid};
pub use hierarchy::{hierarchy_lines, render_dump};
pub use models::{ObjectNode, ProjectIndex, SceneGraph, ScriptRecord, ScriptReference, TransformNode};
pub use references::{find_script_references, ReferenceExtractor, TextReferenceExtractor};
pub use scan::{scan_project, scan_scene, SceneScan};
