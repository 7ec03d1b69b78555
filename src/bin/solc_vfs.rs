//! Thin CLI frontage over [`solc_vfs`]'s resolution core (spec §6, SPEC_FULL §10.5).
//!
//! This binary owns flag parsing, stdin reading, and process exit codes. It calls into the core
//! ([`ResolverConfigBuilder`], [`Session`]) for everything else — it is not part of the core and
//! carries none of its invariants.

use clap::Parser;
use solc_vfs::{
    config::{cli_path_to_sun, ResolverConfigBuilder},
    driver, SourceUnitName,
};
use std::{
    collections::VecDeque,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
};

/// Resolves a set of Solidity-family source files through the virtual filesystem, printing each
/// source unit name it discovers while walking imports.
#[derive(Debug, Parser)]
#[command(name = "solc-vfs", version)]
struct Args {
    /// Source files to compile. Use `-` once to read a single source from standard input.
    #[arg(required = true)]
    sources: Vec<String>,

    /// Directory prepended to non-absolute source unit names by the Host Filesystem Loader.
    #[arg(long, default_value = "")]
    base_path: String,

    /// `[context:]prefix=[target]` remapping rule; may be repeated.
    #[arg(short = 'r', long = "remapping")]
    remappings: Vec<String>,

    /// Print each source unit's origin after resolution.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    tracing_subscriber_init();

    let args = Args::parse();
    match run(args) {
        Ok(true) => ExitCode::from(0),
        Ok(false) => ExitCode::from(1),
        Err(code) => ExitCode::from(code),
    }
}

fn tracing_subscriber_init() {
    #[cfg(debug_assertions)]
    let _ = tracing_subscriber::fmt::try_init();
}

/// Returns `Ok(true)` on a clean compile-and-resolve pass, `Ok(false)` on a resolution/load
/// failure (exit code `1`), or `Err(2)` on a usage error (spec §6's exit code table).
fn run(args: Args) -> Result<bool, u8> {
    let mut builder = ResolverConfigBuilder::new().base_path(args.base_path);

    for raw in &args.remappings {
        builder = builder.remapping(raw).map_err(|e| {
            eprintln!("error: {e}");
            2
        })?;
    }

    let mut stdin_seen = false;
    let mut roots = Vec::new();
    for source in &args.sources {
        if source.as_str() == "-" {
            if stdin_seen {
                eprintln!("error: standard input may only be read once");
                return Err(2);
            }
            stdin_seen = true;
            let mut content = Vec::new();
            io::stdin().read_to_end(&mut content).map_err(|e| {
                eprintln!("error: failed to read standard input: {e}");
                2
            })?;
            builder = builder.stdin_source(content);
            roots.push(SourceUnitName::stdin());
        } else {
            let path = PathBuf::from(source);
            roots.push(cli_path_to_sun(&path));
            builder = builder.cli_source(path);
        }
    }

    let mut session = builder.build().map_err(|e| {
        eprintln!("error: {e}");
        1u8
    })?;

    let mut queue: VecDeque<SourceUnitName> = roots.into_iter().collect();
    let mut visited = std::collections::HashSet::new();
    let mut had_error = false;

    while let Some(importer) = queue.pop_front() {
        if !visited.insert(importer.clone()) {
            continue;
        }
        let Some(unit) = session.vfs().get(&importer) else { continue };
        let Ok(text) = std::str::from_utf8(unit.content()) else { continue };
        for import_path in driver::extract_import_paths(text) {
            match session.resolve_import(&importer, &import_path) {
                Ok((sun, _)) => queue.push_back(sun),
                Err(e) => {
                    eprintln!("error resolving {import_path:?} from {importer}: {e}");
                    had_error = true;
                }
            }
        }
    }

    if args.verbose {
        println!("{}", session.vfs().origin_report());
    }

    Ok(!had_error)
}
