//! CLI: args, root resolution, and run logic.

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::error::{AnalyzerError, Result};
use crate::unity::constants::REPORT_FILE_NAME;
use crate::unity::util::display_path;
use crate::unity::{analyze_project, RunSummary};

#[derive(Parser)]
#[command(name = "unity-project-analyzer")]
#[command(about = "Dump Unity scene hierarchies and find scripts no scene uses.")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Unity project root (the directory that contains Assets/)
    #[arg(value_name = "PROJECT")]
    pub project: PathBuf,

    /// Directory for the .dump files and UnusedScripts.csv (created if missing)
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Verbose: -v = info, -vv = debug, -vvv = trace (RUST_LOG also applies)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn resolve_root(path: &Path) -> Result<PathBuf> {
    let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if !root.is_dir() {
        return Err(AnalyzerError::NotADirectory(root));
    }
    Ok(root)
}

fn print_summary(output: &Path, summary: &RunSummary) {
    println!(
        "Wrote {} scene dump(s) to {}",
        summary.dumps_written,
        display_path(output)
    );
    println!(
        "{} of {} script(s) unused, listed in {}",
        summary.unused,
        summary.scripts,
        display_path(&output.join(REPORT_FILE_NAME))
    );
}

/// Run the analyzer and return the process exit code.
pub fn run(args: Args) -> i32 {
    let root = match resolve_root(&args.project) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return e.exit_code();
        }
    };
    match analyze_project(&root, &args.output) {
        Ok(summary) => {
            print_summary(&args.output, &summary);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}
