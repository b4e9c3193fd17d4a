//! Turns a directory of workflow definitions into generated workflow files.

use crate::core::error::{FlowError, FlowResult};
use crate::core::workflow::Workflow;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// Extensions recognised as workflow definition files.
pub const DEFINITION_EXTENSIONS: &[&str] = &["yml", "yaml", "json"];

/// A loaded definition paired with the file it should be written to.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowModule {
    pub source: PathBuf,
    pub out_file: PathBuf,
    pub workflow: Workflow,
}

/// Result of comparing rendered text against the file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    UpToDate,
    Missing,
    Stale,
}

fn whitespace_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// `"Release Main.main"` with suffix `.generated.yml` becomes
/// `release-main.generated.yml`.
pub fn output_file_name(stem: &str, suffix: &str) -> String {
    let stem = stem.strip_suffix(".main").unwrap_or(stem);
    let name = whitespace_pattern().replace_all(&stem.to_lowercase(), "-").into_owned();
    format!("{}{}", name, suffix)
}

/// Generated file for a definition kept next to it: `.main` is dropped
/// from the stem and `suffix` appended.
pub fn output_path_beside(source: &Path, suffix: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = stem.strip_suffix(".main").unwrap_or(&stem);
    source.with_file_name(format!("{}{}", stem, suffix))
}

/// Load every definition file directly inside `src_dir`, in file-name order.
///
/// Files already ending in `suffix` are generated output and are skipped, so
/// sources and outputs may share a directory.
pub fn scan_workflows(src_dir: &Path, out_dir: &Path, suffix: &str) -> FlowResult<Vec<WorkflowModule>> {
    let entries = fs::read_dir(src_dir).map_err(|err| FlowError::io(src_dir, err))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|err| FlowError::io(src_dir, err))?.path();
        if is_definition_file(&path, suffix) {
            files.push(path);
        }
    }
    files.sort();

    let mut modules = Vec::with_capacity(files.len());
    for source in files {
        let workflow = Workflow::load_from_file(&source)?;
        let stem = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let out_file = out_dir.join(output_file_name(&stem, suffix));
        debug!(
            source = %source.display(),
            out_file = %out_file.display(),
            "loaded workflow definition"
        );
        modules.push(WorkflowModule {
            source,
            out_file,
            workflow,
        });
    }
    Ok(modules)
}

fn is_definition_file(path: &Path, suffix: &str) -> bool {
    if !path.is_file() {
        return false;
    }
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    if name.starts_with('.') || name.ends_with(suffix) {
        return false;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| DEFINITION_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Hand each module to `on_module` in order and report how many were handled.
pub fn generate_workflows<F>(modules: &[WorkflowModule], mut on_module: F) -> FlowResult<usize>
where
    F: FnMut(&WorkflowModule) -> FlowResult<()>,
{
    for module in modules {
        on_module(module)?;
    }
    match modules.len() {
        0 => warn!("No GitHub Actions workflows found"),
        1 => info!("1 GitHub Actions workflow was generated"),
        count => info!("{} GitHub Actions workflows were generated", count),
    }
    Ok(modules.len())
}

/// Write `text` to `path`, creating parent directories as needed.
pub fn write_workflow(path: &Path, text: &str) -> FlowResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| FlowError::io(parent, err))?;
    }
    fs::write(path, text).map_err(|err| FlowError::io(path, err))?;
    info!(path = %path.display(), bytes = text.len(), "wrote workflow");
    Ok(())
}

pub fn check_workflow(path: &Path, text: &str) -> FlowResult<CheckStatus> {
    if !path.exists() {
        return Ok(CheckStatus::Missing);
    }
    let current = fs::read_to_string(path).map_err(|err| FlowError::io(path, err))?;
    Ok(if current == text {
        CheckStatus::UpToDate
    } else {
        CheckStatus::Stale
    })
}
