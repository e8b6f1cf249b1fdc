/**
 * Lazy Component Compiler CLI - lazyc
 *
 * Rewrites `@Component` classes of the given files into lazy-loadable classes.
 */
use clap::{Arg, ArgAction, Command};
use std::path::{Path, PathBuf};
use std::process;

use lazy_compiler::compile::{expand_inputs, transform_files, write_outputs};
use lazy_compiler::lazy::logging::ConsoleLogger;
use lazy_compiler::{ComponentExport, ModuleConvention, StyleMode, TransformOptions};

fn cli() -> Command {
    Command::new("lazyc")
        .version(lazy_compiler::version())
        .about("Lazy component compiler (Rust implementation)")
        .arg(
            Arg::new("inputs")
                .value_name("FILES")
                .help("Source files or glob patterns")
                .num_args(1..)
                .required(true),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("JSON file with transform options"),
        )
        .arg(
            Arg::new("core-import-path")
                .long("core-import-path")
                .value_name("MODULE")
                .help("Module the runtime functions are imported from"),
        )
        .arg(
            Arg::new("module")
                .long("module")
                .value_name("KIND")
                .value_parser(["esm", "cjs"])
                .help("Output module convention"),
        )
        .arg(
            Arg::new("component-export")
                .long("component-export")
                .value_name("KIND")
                .value_parser(["lazy", "customelement"])
                .help("How rewritten classes are exported"),
        )
        .arg(
            Arg::new("style")
                .long("style")
                .value_name("MODE")
                .value_parser(["static", "none"])
                .help("Style hoisting mode"),
        )
        .arg(
            Arg::new("out-dir")
                .short('o')
                .long("out-dir")
                .value_name("DIR")
                .help("Write outputs here instead of stdout"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log every class"),
        )
}

fn resolve_options(matches: &clap::ArgMatches) -> anyhow::Result<TransformOptions> {
    let mut options = match matches.get_one::<String>("config") {
        Some(path) => TransformOptions::load(Path::new(path))?,
        None => TransformOptions::default(),
    };

    if let Some(path) = matches.get_one::<String>("core-import-path") {
        options = options.with_core_import_path(path.as_str());
    }
    if let Some(module) = matches.get_one::<String>("module") {
        options.module = module.parse::<ModuleConvention>().map_err(anyhow::Error::msg)?;
    }
    if let Some(export) = matches.get_one::<String>("component-export") {
        options.component_export = export.parse::<ComponentExport>().map_err(anyhow::Error::msg)?;
    }
    if let Some(style) = matches.get_one::<String>("style") {
        options.style = style.parse::<StyleMode>().map_err(anyhow::Error::msg)?;
    }
    Ok(options)
}

/// Returns whether any file failed or reported an error diagnostic.
fn run(matches: &clap::ArgMatches) -> anyhow::Result<bool> {
    let options = resolve_options(matches)?;
    let logger = ConsoleLogger::from_verbosity(matches.get_flag("verbose"));

    let inputs: Vec<String> = matches
        .get_many::<String>("inputs")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let files = expand_inputs(&inputs)?;
    if files.is_empty() {
        anyhow::bail!("no input files matched");
    }

    let outcomes = transform_files(&files, &options, &logger);

    let mut failed = false;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(output) => {
                for diag in &output.report.diagnostics {
                    eprintln!("{}: {}", outcome.path.display(), diag);
                }
                failed |= output.report.has_errors();
            }
            Err(e) => {
                eprintln!("Error: {:#}", e);
                failed = true;
            }
        }
    }

    match matches.get_one::<String>("out-dir") {
        Some(out_dir) => {
            let written: Vec<PathBuf> = write_outputs(&outcomes, Path::new(out_dir))?;
            eprintln!("Wrote {} file(s) to {}", written.len(), out_dir);
        }
        None => {
            for outcome in &outcomes {
                if let Ok(output) = &outcome.result {
                    if outcomes.len() > 1 {
                        println!("// {}", outcome.path.display());
                    }
                    println!("{}", output.code);
                }
            }
        }
    }

    Ok(failed)
}

fn main() {
    let matches = cli().get_matches();

    match run(&matches) {
        Ok(false) => {}
        Ok(true) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
