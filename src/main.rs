//! CLI entrypoint for unity-project-analyzer.

use std::io::Write;

use clap::Parser;
use upa::cli::{run, Args};

/// Map `-v` occurrences to a level filter; `RUST_LOG` is read first and then overridden.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    std::process::exit(run(args));
}
