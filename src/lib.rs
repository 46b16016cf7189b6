//! Dump Unity scene hierarchies and find MonoBehaviour scripts that no scene uses.

pub mod cli;
pub mod error;
pub mod unity;

pub use cli::{run, Args};
pub use error::{AnalyzerError, Result};
pub use unity::{
    analyze_project, find_unused_scripts, parse_scene, render_dump, scan_project, RunSummary,
    ScriptRecord, ScriptReference,
};
