//! File level conversion: one module graph in, one C++ file out, and the
//! directory scan built on top of it.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::graph::ModuleGraph;
use crate::renderer::{CodeGenerator, RenderContext};

const GRAPH_EXTENSIONS: [&str; 2] = [".json", ".json.zst"];

/// Source of decoded module graphs.
pub trait ModuleLoader {
    fn load(&self, path: &Path) -> Result<ModuleGraph>;
}

/// Reads graphs from JSON files on disk, zstd-compressed or not.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileLoader;

impl ModuleLoader for FileLoader {
    fn load(&self, path: &Path) -> Result<ModuleGraph> {
        ModuleGraph::load(path)
    }
}

pub fn is_module_graph_file(path: &Path) -> bool {
    let name = path.to_string_lossy();
    GRAPH_EXTENSIONS.iter().any(|extension| name.ends_with(extension))
}

/// `dir/Module.json.zst` becomes `Module.cpp`.
pub fn output_file_name(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = GRAPH_EXTENSIONS
        .iter()
        .rev()
        .find_map(|extension| name.strip_suffix(extension))
        .unwrap_or(&name);
    PathBuf::from(format!("{}.cpp", stem))
}

/// Generate the reflection source for an already loaded module.
pub fn convert_module(graph: &ModuleGraph, context: &RenderContext) -> Result<String> {
    CodeGenerator::new(graph, context.clone()).generate()
}

pub fn convert_file(
    loader: &dyn ModuleLoader,
    input: &Path,
    output: &Path,
    context: &RenderContext,
) -> Result<()> {
    convert_file_inner(loader, input, output, context).with_context(|| {
        format!(
            "While loading module graph '{}' and preparing to output to '{}'",
            input.display(),
            output.display()
        )
    })
}

fn convert_file_inner(
    loader: &dyn ModuleLoader,
    input: &Path,
    output: &Path,
    context: &RenderContext,
) -> Result<()> {
    if !input.exists() {
        bail!("Input module graph '{}' does not exist", input.display());
    }
    if !is_module_graph_file(input) {
        bail!(
            "Input '{}' is not a module graph, expected one of: {}",
            input.display(),
            GRAPH_EXTENSIONS.join(", ")
        );
    }
    if output.extension().map_or(true, |extension| extension != "cpp") {
        bail!("Output '{}' is not a .cpp file", output.display());
    }

    let graph = loader.load(input)?;
    debug!(module = graph.unit_name(), "loaded module graph");

    let code = convert_module(&graph, context)?;
    fs::write(output, code)
        .with_context(|| format!("Could not write output file '{}'", output.display()))?;

    info!(input = %input.display(), output = %output.display(), "converted module");
    Ok(())
}

/// Convert every module graph in `in_dir`, in file name order, stopping at the
/// first failure. Returns the number of converted files.
pub fn scan_directory(
    loader: &dyn ModuleLoader,
    in_dir: &Path,
    out_dir: &Path,
    context: &RenderContext,
) -> Result<usize> {
    let mut inputs = Vec::new();
    for entry in fs::read_dir(in_dir)
        .with_context(|| format!("Could not read directory '{}'", in_dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && is_module_graph_file(&path) {
            inputs.push(path);
        }
    }
    inputs.sort();

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Could not create directory '{}'", out_dir.display()))?;

    for input in &inputs {
        let output = out_dir.join(output_file_name(input));
        info!("Converting '{}' to '{}'", input.display(), output.display());
        convert_file(loader, input, &output, context)
            .with_context(|| format!("Failed to convert '{}'", input.display()))?;
    }

    Ok(inputs.len())
}
