//! Core generation flow.
//! Ties loading, answer resolution, planning, hooks and writing together.

use indexmap::IndexMap;
use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::config::{get_config, Config};
use crate::constants::INITIALIZE_GIT_KEY;
use crate::error::{Error, Result};
use crate::hooks::{confirm_hook_execution, get_hook_files, run_hook};
use crate::ignore::{copy_without_render_set, parse_ignore_file};
use crate::loader::{load_template, TemplateSource};
use crate::parser::{get_answers, get_answers_from, template_context, AnswerSource};
use crate::processor::{apply, find_project_template, Applied, Plan, Processor};
use crate::prompt::Prompter;
use crate::renderer::TemplateRenderer;
use crate::replay;
use crate::user_config::UserConfig;
use crate::validate::validate_answers;

/// Where recorded answers come from.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum ReplayMode {
    /// Resolve answers normally.
    #[default]
    Off,
    /// Use the answers recorded for this template in the replay directory.
    Recorded,
    /// Use answers from an explicit file.
    File(PathBuf),
}

/// Everything a generation run needs besides the renderer and prompter.
#[derive(Debug)]
pub struct GenerateOptions {
    /// Template path or git URL
    pub template: String,
    /// Parent directory of the generated project
    pub output_dir: PathBuf,
    /// `key=value` overrides from the command line
    pub extra_context: IndexMap<String, serde_json::Value>,
    pub overwrite_if_exists: bool,
    pub skip_if_file_exists: bool,
    pub skip_hooks_check: bool,
    /// JSON answers piped in with `--stdin`
    pub stdin_answers: Option<String>,
    pub replay: ReplayMode,
    /// Write the resolved answers to the replay directory
    pub record_answers: bool,
    pub user_config: UserConfig,
}

impl GenerateOptions {
    pub fn new<S: Into<String>, P: Into<PathBuf>>(template: S, output_dir: P) -> Self {
        Self {
            template: template.into(),
            output_dir: output_dir.into(),
            extra_context: IndexMap::new(),
            overwrite_if_exists: false,
            skip_if_file_exists: false,
            skip_hooks_check: false,
            stdin_answers: None,
            replay: ReplayMode::Off,
            record_answers: true,
            user_config: UserConfig::default(),
        }
    }
}

/// Result of a successful run.
#[derive(Debug)]
pub struct Generated {
    pub project_dir: PathBuf,
    pub applied: Vec<Applied>,
    pub answers: serde_json::Value,
    /// Toggle options answered `true`, in declaration order
    pub enabled_toggles: Vec<String>,
}

fn preloaded_answers(options: &GenerateOptions, source: &TemplateSource) -> Result<serde_json::Value> {
    let answer_source = match &options.replay {
        ReplayMode::File(path) => AnswerSource::Replay(replay::load(path)?),
        ReplayMode::Recorded => {
            let replay_dir = options.user_config.replay_dir().ok_or_else(|| {
                Error::ConfigError("no replay directory configured".to_string())
            })?;
            let path = replay::replay_file(replay_dir, &source.template_name());
            AnswerSource::Replay(replay::load(path)?)
        }
        ReplayMode::Off => match &options.stdin_answers {
            Some(content) => AnswerSource::Stdin(content.clone()),
            None => AnswerSource::None,
        },
    };
    get_answers_from(answer_source)
}

fn overrides(options: &GenerateOptions) -> IndexMap<String, serde_json::Value> {
    let mut overrides = options.user_config.default_context.clone();
    for (key, value) in &options.extra_context {
        overrides.insert(key.clone(), value.clone());
    }
    overrides
}

fn record_answers(options: &GenerateOptions, source: &TemplateSource, answers: &serde_json::Value) {
    if !options.record_answers || options.replay != ReplayMode::Off {
        return;
    }
    match options.user_config.replay_dir() {
        Some(dir) => {
            if let Err(e) = replay::dump(&dir, &source.template_name(), answers) {
                warn!("Cannot record answers in '{}': {e}", dir.display());
            }
        }
        None => debug!("No replay directory, answers are not recorded"),
    }
}

fn initialize_git(project_dir: &Path, answers: &serde_json::Value) -> Result<()> {
    let wanted = answers.get(INITIALIZE_GIT_KEY).and_then(|v| v.as_bool()) == Some(true);
    if wanted && !project_dir.join(".git").exists() {
        debug!("Initializing git repository in '{}'", project_dir.display());
        git2::Repository::init(project_dir)?;
    }
    Ok(())
}

struct Hooks {
    pre: Option<PathBuf>,
    post: Option<PathBuf>,
}

fn write_project(
    engine: &dyn TemplateRenderer,
    plan: &Plan,
    hooks: &Hooks,
    context: &serde_json::Value,
    answers: &serde_json::Value,
    skip_if_file_exists: bool,
) -> Result<Vec<Applied>> {
    std::fs::create_dir_all(&plan.project_dir)?;
    if let Some(pre) = &hooks.pre {
        run_hook(engine, pre, &plan.project_dir, context)?;
    }
    let applied = apply(plan, skip_if_file_exists)?;
    if let Some(post) = &hooks.post {
        run_hook(engine, post, &plan.project_dir, context)?;
    }
    initialize_git(&plan.project_dir, answers)?;
    Ok(applied)
}

/// Generates a project.
///
/// # Flow
/// 1. Loads the template and its option schema
/// 2. Resolves and validates answers, then records them
/// 3. Renders the full plan in memory
/// 4. Runs the pre hook, writes the plan, runs the post hook
/// 5. Initializes git when requested by the answers
///
/// # Errors
/// Any failure after this run created the project directory removes it.
pub fn generate(
    options: &GenerateOptions,
    engine: &dyn TemplateRenderer,
    prompt: &dyn Prompter,
) -> Result<Generated> {
    let source = TemplateSource::from_string(&options.template);
    debug!("Using template from the {source}");
    let template_root = load_template(prompt, &source, options.overwrite_if_exists)?;
    let config: Config = get_config(&template_root)?;

    let preloaded = preloaded_answers(options, &source)?;
    let answers = get_answers(engine, prompt, &config, &overrides(options), &preloaded)?;
    validate_answers(&config, &answers)?;
    record_answers(options, &source, &answers);

    let answer_map = answers.as_object().cloned().unwrap_or_default();
    let context = template_context(&answer_map);

    let ignored = parse_ignore_file(&template_root)?;
    let copy_without_render = copy_without_render_set(config.copy_without_render.as_slice())?;
    let project_template = find_project_template(&template_root)?;
    let processor = Processor::new(
        engine,
        &template_root,
        &options.output_dir,
        &context,
        &ignored,
        &copy_without_render,
    );
    let plan = processor.plan(&project_template)?;

    let existed = plan.project_dir.exists();
    if existed && !options.overwrite_if_exists {
        return Err(Error::OutputDirectoryExistsError {
            output_dir: plan.project_dir.display().to_string(),
        });
    }

    let hooks = if confirm_hook_execution(prompt, &template_root, options.skip_hooks_check)? {
        let (pre, post) = get_hook_files(&template_root);
        Hooks { pre, post }
    } else {
        Hooks { pre: None, post: None }
    };

    match write_project(engine, &plan, &hooks, &context, &answers, options.skip_if_file_exists) {
        Ok(applied) => Ok(Generated {
            enabled_toggles: config
                .enabled_toggles(&answers)
                .into_iter()
                .map(str::to_string)
                .collect(),
            project_dir: plan.project_dir,
            applied,
            answers,
        }),
        Err(e) => {
            if !existed && plan.project_dir.exists() {
                if let Err(cleanup) = std::fs::remove_dir_all(&plan.project_dir) {
                    warn!("Cannot remove '{}': {cleanup}", plan.project_dir.display());
                }
            }
            Err(e)
        }
    }
}
