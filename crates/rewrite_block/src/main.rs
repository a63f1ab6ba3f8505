// crates/rewrite_block/src/main.rs

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;

use removal_pipeline::{
    remove_call_line, remove_constructor_line, remove_documented_function, remove_require_line,
    RemovalPipeline,
};
use rewrite_block::{exit_code, run, RewriteConfig};
use scan_block_extent::DEFAULT_SCAN_WINDOW;

/// Identifiers accepted by the removal flags: a plain name or a dotted
/// path such as `service.method`.
static REMOVAL_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(?:\.[A-Za-z_$][A-Za-z0-9_$]*)*$").unwrap());

fn main() {
    let matches = Command::new("rewrite_block")
        .version("0.1.0")
        .about("Replaces or removes a brace-balanced block located by a marker line")
        .arg(
            Arg::new("file")
                .required(true)
                .value_name("FILE")
                .help("Target file to rewrite"),
        )
        .arg(
            Arg::new("marker")
                .long("marker")
                .required(true)
                .num_args(1)
                .help("Literal text identifying the anchor line"),
        )
        .arg(
            Arg::new("replacement")
                .long("replacement")
                .num_args(1)
                .value_name("FILE")
                .help("File whose lines replace the located block"),
        )
        .arg(
            Arg::new("delete")
                .long("delete")
                .action(ArgAction::SetTrue)
                .help("Remove the located block instead of replacing it"),
        )
        .group(
            ArgGroup::new("edit")
                .args(["replacement", "delete"])
                .required(true),
        )
        .arg(
            Arg::new("window")
                .long("window")
                .num_args(1)
                .value_parser(clap::value_parser!(usize))
                .help("Maximum lines scanned for the closing delimiter (default 150)"),
        )
        .arg(
            Arg::new("remove_function")
                .long("remove-function")
                .action(ArgAction::Append)
                .value_name("NAME")
                .help("Also strip the named documented helper function"),
        )
        .arg(
            Arg::new("remove_require")
                .long("remove-require")
                .action(ArgAction::Append)
                .value_name("BINDING")
                .help("Also strip the require line declaring the named binding"),
        )
        .arg(
            Arg::new("remove_new")
                .long("remove-new")
                .action(ArgAction::Append)
                .value_name("TYPE")
                .help("Also strip constructor lines instantiating the named type"),
        )
        .arg(
            Arg::new("remove_call")
                .long("remove-call")
                .action(ArgAction::Append)
                .value_name("CALLEE")
                .help("Also strip single-line calls to the named function"),
        )
        .arg(
            Arg::new("dry_run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Report the planned edit without writing the file"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable verbose logging"),
        )
        .get_matches();

    let verbose = *matches.get_one::<bool>("verbose").unwrap();
    let mut logger = env_logger::Builder::from_default_env();
    if verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    let _ = logger.try_init();

    let config = match build_config(&matches) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(2);
        }
    };

    println!("--------------------------------------------------");
    println!("Target file: {}", config.target.display());
    println!("Marker: {}", config.marker);
    if !config.removals.is_empty() {
        println!("Removal patterns: {}", config.removals.len());
    }
    println!("--------------------------------------------------");

    match run(&config) {
        Ok(outcome) => {
            println!(
                "Replacing lines {} to {}",
                outcome.block.start + 1,
                outcome.block.end
            );
            println!(
                "Document: {} line(s) before, {} line(s) after",
                outcome.lines_before, outcome.lines_after
            );
            if outcome.applied {
                println!("Successfully rewrote {}", config.target.display());
            } else {
                println!("Dry run: no changes written");
            }
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(exit_code(&err));
        }
    }
}

fn build_config(matches: &ArgMatches) -> Result<RewriteConfig> {
    let target = PathBuf::from(matches.get_one::<String>("file").unwrap());
    let marker = matches.get_one::<String>("marker").unwrap().clone();
    if marker.is_empty() {
        bail!("marker must not be empty");
    }

    let replacement = matches.get_one::<String>("replacement").map(PathBuf::from);
    let window = matches
        .get_one::<usize>("window")
        .copied()
        .unwrap_or(DEFAULT_SCAN_WINDOW);
    if window == 0 {
        bail!("window must be at least 1 line");
    }

    let mut removals = RemovalPipeline::new();
    for name in removal_names(matches, "remove_function")? {
        removals.push(remove_documented_function(&name).context("invalid removal pattern")?);
    }
    for name in removal_names(matches, "remove_require")? {
        removals.push(remove_require_line(&name).context("invalid removal pattern")?);
    }
    for name in removal_names(matches, "remove_new")? {
        removals.push(remove_constructor_line(&name).context("invalid removal pattern")?);
    }
    for name in removal_names(matches, "remove_call")? {
        removals.push(remove_call_line(&name).context("invalid removal pattern")?);
    }

    Ok(RewriteConfig {
        target,
        marker,
        replacement,
        window,
        removals,
        dry_run: *matches.get_one::<bool>("dry_run").unwrap(),
    })
}

/// Collects one removal flag's values, rejecting anything that is not a
/// plain or dotted identifier.
fn removal_names(matches: &ArgMatches, flag: &str) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for name in matches.get_many::<String>(flag).unwrap_or_default() {
        if !REMOVAL_NAME_RE.is_match(name) {
            bail!("'{name}' is not a valid identifier for --{}", flag.replace('_', "-"));
        }
        names.push(name.clone());
    }
    Ok(names)
}
