//! Turns a template tree into a generation plan and applies it.
//!
//! Planning renders every path and file before anything touches the output
//! directory, so a template error never leaves a half-written project.

use globset::GlobSet;
use log::debug;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::constants::CONTEXT_NAMESPACE;
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;

/// A single filesystem change of the plan.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOperation {
    /// Create a directory. `had_entries` records whether the template
    /// directory had children, which lets emptied directories be dropped.
    CreateDir { target: PathBuf, had_entries: bool },
    /// Copy the source bytes unchanged.
    Copy { source: PathBuf, target: PathBuf },
    /// Write rendered content, keeping the source permissions.
    Write { source: PathBuf, target: PathBuf, content: String },
}

impl FileOperation {
    pub fn target(&self) -> &Path {
        match self {
            FileOperation::CreateDir { target, .. }
            | FileOperation::Copy { target, .. }
            | FileOperation::Write { target, .. } => target,
        }
    }
}

/// Ordered operations producing one project directory.
#[derive(Debug)]
pub struct Plan {
    pub project_dir: PathBuf,
    pub operations: Vec<FileOperation>,
}

/// Outcome of one applied operation, for reporting.
#[derive(Debug, PartialEq)]
pub struct Applied {
    pub action: &'static str,
    pub target: PathBuf,
}

/// Returns true for `name.ext.j2` style file names.
pub fn is_jinja_template(filename: &str) -> bool {
    let parts: Vec<&str> = filename.split('.').collect();
    parts.len() > 2 && parts.last() == Some(&"j2")
}

/// Finds the project template directory: the one directory directly under
/// the template root whose name is a `cookiecutter` substitution.
///
/// # Errors
/// * `Error::TemplateError` if there is no such directory
pub fn find_project_template<P: AsRef<Path>>(template_root: P) -> Result<PathBuf> {
    let template_root = template_root.as_ref();
    let mut candidates: Vec<PathBuf> = fs::read_dir(template_root)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .filter(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy())
                .is_some_and(|name| name.contains("{{") && name.contains(CONTEXT_NAMESPACE))
        })
        .collect();
    candidates.sort();

    match candidates.len() {
        0 => Err(Error::TemplateError(format!(
            "no project template directory found in '{}'",
            template_root.display()
        ))),
        1 => Ok(candidates.remove(0)),
        _ => Err(Error::TemplateError(format!(
            "several project template directories found in '{}': {}",
            template_root.display(),
            candidates
                .iter()
                .filter_map(|path| path.file_name())
                .map(|name| format!("'{}'", name.to_string_lossy()))
                .collect::<Vec<_>>()
                .join(", ")
        ))),
    }
}

/// Renders template entries into file operations.
pub struct Processor<'a> {
    engine: &'a dyn TemplateRenderer,
    template_root: &'a Path,
    output_root: &'a Path,
    context: &'a serde_json::Value,
    ignored: &'a GlobSet,
    copy_without_render: &'a GlobSet,
}

impl<'a> Processor<'a> {
    pub fn new(
        engine: &'a dyn TemplateRenderer,
        template_root: &'a Path,
        output_root: &'a Path,
        context: &'a serde_json::Value,
        ignored: &'a GlobSet,
        copy_without_render: &'a GlobSet,
    ) -> Self {
        Self { engine, template_root, output_root, context, ignored, copy_without_render }
    }

    fn process_error(&self, source: &Path, e: impl ToString) -> Error {
        Error::ProcessError { source_path: source.display().to_string(), e: e.to_string() }
    }

    fn wrap_error(&self, source: &Path, e: Error) -> Error {
        match e {
            Error::ProcessError { .. } => e,
            other => self.process_error(source, other),
        }
    }

    fn is_ignored(&self, entry: &Path) -> bool {
        entry
            .strip_prefix(self.template_root)
            .is_ok_and(|relative| self.ignored.is_match(relative))
    }

    /// Renders a template-relative path component by component.
    ///
    /// # Returns
    /// * `Ok(None)` when a component renders empty, meaning the entry is
    ///   switched off by the answers
    ///
    /// # Errors
    /// * `Error::ProcessError` when a component renders to something that
    ///   is not a plain file name
    pub fn render_path(&self, relative: &Path) -> Result<Option<PathBuf>> {
        let mut rendered = PathBuf::new();
        for component in relative.components() {
            let raw = match component {
                Component::Normal(raw) => raw.to_string_lossy(),
                _ => return Err(self.process_error(relative, "unexpected path component")),
            };
            let name = self.engine.render(&raw, self.context)?;
            let name = name.trim();
            if name.is_empty() {
                return Ok(None);
            }
            if name == "." || name == ".." || name.contains('/') || name.contains('\\') {
                return Err(self.process_error(
                    relative,
                    format!("'{raw}' renders to an invalid file name '{name}'"),
                ));
            }
            rendered.push(name);
        }
        Ok(Some(rendered))
    }

    /// Builds the operation for one template entry.
    ///
    /// # Returns
    /// * `Ok(None)` if the entry is ignored or switched off
    pub fn process(&self, entry: &Path, project_template: &Path) -> Result<Option<FileOperation>> {
        let relative = entry
            .strip_prefix(self.template_root)
            .map_err(|e| self.process_error(entry, e))?;

        if self.is_ignored(entry) {
            debug!("Skipping '{}' (ignored)", relative.display());
            return Ok(None);
        }

        let rendered = match self.render_path(relative).map_err(|e| self.wrap_error(relative, e))? {
            Some(rendered) => rendered,
            None => {
                debug!("Skipping '{}' (path renders empty)", relative.display());
                return Ok(None);
            }
        };

        if entry.is_dir() {
            let had_entries = entry != project_template
                && fs::read_dir(entry)?.next().is_some();
            return Ok(Some(FileOperation::CreateDir {
                target: self.output_root.join(rendered),
                had_entries,
            }));
        }

        let stripped = rendered
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| is_jinja_template(n))
            .map(|n| n.trim_end_matches(".j2").to_string());
        let rendered = match stripped {
            Some(name) => rendered.with_file_name(name),
            None => rendered,
        };
        let target = self.output_root.join(rendered);

        let inside_project = entry.strip_prefix(project_template).unwrap_or(relative);
        if self.copy_without_render.is_match(inside_project) {
            debug!("Copying '{}' without rendering", relative.display());
            return Ok(Some(FileOperation::Copy { source: entry.to_path_buf(), target }));
        }

        let bytes = fs::read(entry)?;
        match String::from_utf8(bytes) {
            Ok(text) => {
                let content = self
                    .engine
                    .render(&text, self.context)
                    .map_err(|e| self.wrap_error(relative, e))?;
                Ok(Some(FileOperation::Write { source: entry.to_path_buf(), target, content }))
            }
            Err(_) => {
                debug!("Copying binary file '{}'", relative.display());
                Ok(Some(FileOperation::Copy { source: entry.to_path_buf(), target }))
            }
        }
    }

    /// Walks the project template in sorted order and collects the plan.
    pub fn plan(&self, project_template: &Path) -> Result<Plan> {
        let project_dir = self
            .process(project_template, project_template)?
            .map(|op| op.target().to_path_buf())
            .ok_or_else(|| {
                Error::TemplateError(format!(
                    "project directory name '{}' renders empty",
                    project_template.display()
                ))
            })?;

        let mut operations = Vec::new();
        // An ignored directory takes its whole subtree with it.
        let walker = WalkDir::new(project_template)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|dir_entry| !self.is_ignored(dir_entry.path()));
        for dir_entry in walker {
            let dir_entry = dir_entry.map_err(|e| Error::TemplateError(e.to_string()))?;
            if let Some(operation) = self.process(dir_entry.path(), project_template)? {
                operations.push(operation);
            }
        }

        Ok(Plan { project_dir, operations: prune_emptied_dirs(operations) })
    }
}

/// Drops directories whose template counterpart had entries but whose
/// entries were all skipped.
pub fn prune_emptied_dirs(operations: Vec<FileOperation>) -> Vec<FileOperation> {
    let mut kept: Vec<FileOperation> = Vec::with_capacity(operations.len());
    for operation in operations.into_iter().rev() {
        if let FileOperation::CreateDir { target, had_entries: true } = &operation {
            let has_descendants = kept
                .iter()
                .any(|k| k.target() != target.as_path() && k.target().starts_with(target));
            if !has_descendants {
                debug!("Dropping emptied directory '{}'", target.display());
                continue;
            }
        }
        kept.push(operation);
    }
    kept.reverse();
    kept
}

fn ensure_parent(target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Applies a plan to the filesystem.
///
/// # Arguments
/// * `skip_if_file_exists` - Keep files that already exist instead of
///   overwriting them
pub fn apply(plan: &Plan, skip_if_file_exists: bool) -> Result<Vec<Applied>> {
    let mut applied = Vec::new();
    for operation in &plan.operations {
        let target = operation.target();
        let action = match operation {
            FileOperation::CreateDir { target, .. } => {
                fs::create_dir_all(target)?;
                continue;
            }
            _ if skip_if_file_exists && target.exists() => "Skipped",
            FileOperation::Copy { source, target } => {
                ensure_parent(target)?;
                fs::copy(source, target)?;
                "Copied"
            }
            FileOperation::Write { source, target, content } => {
                ensure_parent(target)?;
                fs::write(target, content)?;
                fs::set_permissions(target, fs::metadata(source)?.permissions())?;
                "Written"
            }
        };
        debug!("{action}: '{}'", target.display());
        applied.push(Applied { action, target: target.to_path_buf() });
    }
    Ok(applied)
}
