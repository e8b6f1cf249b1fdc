use anyhow::Context;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::options::TransformOptions;
use crate::lazy::logging::Logger;
use crate::lazy::transform::{transform_module, TransformOutput};

/// Result of transforming one input file.
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: anyhow::Result<TransformOutput>,
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

/// Resolves plain paths and glob patterns to a sorted, deduplicated file list.
pub fn expand_inputs(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if is_glob_pattern(input) {
            let paths = glob::glob(input).with_context(|| format!("invalid glob pattern '{}'", input))?;
            for entry in paths {
                let path = entry.with_context(|| format!("failed to read a match of '{}'", input))?;
                if path.is_file() {
                    files.push(path);
                }
            }
        } else {
            let path = PathBuf::from(input);
            if !path.is_file() {
                anyhow::bail!("input file not found: {}", input);
            }
            files.push(path);
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Transforms every file on the rayon pool. Each file gets its own allocator
/// and pass state; outcomes come back in input order.
pub fn transform_files(
    files: &[PathBuf],
    options: &TransformOptions,
    logger: &(dyn Logger + Sync),
) -> Vec<FileOutcome> {
    let start = Instant::now();
    logger.info(&format!("Transforming {} file(s) in parallel...", files.len()));

    let outcomes: Vec<FileOutcome> = files
        .par_iter()
        .map(|path| FileOutcome {
            path: path.clone(),
            result: transform_file(path, options, logger),
        })
        .collect();

    logger.info(&format!("Transform finished in {:?}", start.elapsed()));
    outcomes
}

fn transform_file(path: &Path, options: &TransformOptions, logger: &dyn Logger) -> anyhow::Result<TransformOutput> {
    let source =
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    logger.debug(&format!("lazy: {}", path.display()));
    let output = transform_module(&source, &path.to_string_lossy(), options, logger)?;
    Ok(output)
}

/// Where the output for `input` goes inside `out_dir`. Relative inputs keep
/// their directory layout; absolute ones are flattened to their file name.
pub fn output_path(out_dir: &Path, input: &Path) -> PathBuf {
    if input.is_relative() && !input.components().any(|c| c == std::path::Component::ParentDir) {
        out_dir.join(input)
    } else {
        out_dir.join(input.file_name().unwrap_or(input.as_os_str()))
    }
}

/// Writes successful outputs below `out_dir`. Returns the written paths.
pub fn write_outputs(outcomes: &[FileOutcome], out_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    outcomes
        .par_iter()
        .filter_map(|outcome| outcome.result.as_ref().ok().map(|output| (&outcome.path, output)))
        .map(|(input, output)| -> anyhow::Result<PathBuf> {
            let target = output_path(out_dir, input);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory {}", parent.display()))?;
            }
            std::fs::write(&target, &output.code)
                .with_context(|| format!("failed to write {}", target.display()))?;
            Ok(target)
        })
        .collect()
}
