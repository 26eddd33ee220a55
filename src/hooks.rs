//! Pre and post generation hooks.
//! Hook scripts are rendered like any other template file, written to a
//! temporary file and executed inside the project directory with the
//! answers on stdin.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::debug;

use crate::constants::{HOOKS_DIR, POST_GEN_HOOK, PRE_GEN_HOOK};
use crate::error::{Error, Result};
use crate::prompt::Prompter;
use crate::renderer::TemplateRenderer;

/// Finds a hook script by stem, e.g. `pre_gen_project` or
/// `pre_gen_project.py`. Editor backups ending in `~` are ignored.
fn find_hook(hooks_dir: &Path, stem: &str) -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = std::fs::read_dir(hooks_dir)
        .ok()?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_stem().and_then(|s| s.to_str()) == Some(stem)
                && !path.to_string_lossy().ends_with('~')
        })
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}

/// Returns the pre and post generation hook scripts of a template.
pub fn get_hook_files<P: AsRef<Path>>(template_dir: P) -> (Option<PathBuf>, Option<PathBuf>) {
    let hooks_dir = template_dir.as_ref().join(HOOKS_DIR);
    (find_hook(&hooks_dir, PRE_GEN_HOOK), find_hook(&hooks_dir, POST_GEN_HOOK))
}

/// Asks whether hooks may run. Templates without hooks need no answer.
pub fn confirm_hook_execution<P: AsRef<Path>>(
    prompt: &dyn Prompter,
    template_dir: P,
    skip_hooks_check: bool,
) -> Result<bool> {
    let (pre, post) = get_hook_files(template_dir);
    if pre.is_none() && post.is_none() {
        return Ok(false);
    }
    prompt.confirm(
        skip_hooks_check,
        "WARNING: This template contains hooks that will execute commands on your system. Do you want to run these hooks?".to_string(),
    )
}

fn hook_command(script: &Path) -> Command {
    match script.extension().and_then(|e| e.to_str()) {
        Some("py") => {
            let mut command = Command::new("python3");
            command.arg(script);
            command
        }
        Some("sh") => {
            let mut command = Command::new("sh");
            command.arg(script);
            command
        }
        _ => Command::new(script),
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut permissions = std::fs::metadata(path)?.permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(path, permissions)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Renders and runs a hook script.
///
/// # Arguments
/// * `engine` - Renderer used for the script body
/// * `hook_path` - Hook script inside the template
/// * `project_dir` - Working directory for the script
/// * `context` - Template context; also written to stdin as JSON
///
/// # Errors
/// * `Error::HookError` if the script exits with a non-zero status
pub fn run_hook(
    engine: &dyn TemplateRenderer,
    hook_path: &Path,
    project_dir: &Path,
    context: &serde_json::Value,
) -> Result<()> {
    debug!("Running hook '{}' in '{}'", hook_path.display(), project_dir.display());

    let source = std::fs::read_to_string(hook_path)?;
    let script = engine.render(&source, context)?;

    let suffix = hook_path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    let mut rendered = tempfile::Builder::new().prefix("pybake-hook-").suffix(&suffix).tempfile()?;
    rendered.write_all(script.as_bytes())?;
    rendered.flush()?;
    let rendered = rendered.into_temp_path();
    make_executable(&rendered)?;

    let mut child = hook_command(&rendered)
        .current_dir(project_dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| Error::HookError(format!("cannot start '{}': {e}", hook_path.display())))?;

    if let Some(mut stdin) = child.stdin.take() {
        // Scripts are free to exit without reading their input.
        match stdin.write_all(context.to_string().as_bytes()) {
            Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => return Err(e.into()),
            _ => {}
        }
    }

    let status = child.wait()?;
    if !status.success() {
        return Err(Error::HookError(format!(
            "'{}' failed with status: {status}",
            hook_path.display()
        )));
    }

    Ok(())
}
