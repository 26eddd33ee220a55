//! Common constants used throughout pybake.

/// Option schema file names, in lookup order.
pub const CONFIG_FILES: [&str; 3] = ["cookiecutter.json", "cookiecutter.yml", "cookiecutter.yaml"];

/// Name under which answers are exposed to templates.
pub const CONTEXT_NAMESPACE: &str = "cookiecutter";

/// Ignore file name, looked up in the template root.
pub const IGNORE_FILE: &str = ".pybakeignore";

/// Patterns ignored even without an ignore file.
pub const DEFAULT_IGNORE_PATTERNS: [&str; 3] = ["**/.DS_Store", "**/__pycache__/**", "**/*.pyc"];

/// Private schema key listing globs of files copied without rendering.
pub const COPY_WITHOUT_RENDER_KEY: &str = "_copy_without_render";

/// Private schema key mapping option names to prompt text.
pub const PROMPTS_KEY: &str = "__prompts__";

/// Environment variable naming the user config file.
pub const USER_CONFIG_ENV: &str = "PYBAKE_CONFIG";

/// Replay directory used when the user config does not name one.
pub const DEFAULT_REPLAY_DIR: &str = ".pybake_replay";

/// Directory holding hook scripts inside the template root.
pub const HOOKS_DIR: &str = "hooks";

pub const PRE_GEN_HOOK: &str = "pre_gen_project";
pub const POST_GEN_HOOK: &str = "post_gen_project";

/// Answer that requests a git repository in the generated project.
pub const INITIALIZE_GIT_KEY: &str = "initialize_git";
