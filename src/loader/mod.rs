//! Template sources.
//! A template is either a local directory or a git repository cloned into
//! the current directory before generation.

use crate::error::Result;
use crate::loader::git::GitLoader;
use crate::loader::interface::TemplateLoader;
use crate::loader::local::LocalLoader;
use crate::prompt::Prompter;
use std::path::PathBuf;

pub mod git;
pub mod interface;
pub mod local;

/// Represents the source location of a template.
#[derive(Debug, PartialEq)]
pub enum TemplateSource {
    /// Local filesystem template path
    FileSystem(PathBuf),
    /// Git repository URL (HTTPS or SSH)
    Git(String),
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSource::FileSystem(path) => {
                write!(f, "local path: '{}'", path.display())
            }
            TemplateSource::Git(repo) => write!(f, "git repository: '{repo}'"),
        }
    }
}

impl TemplateSource {
    /// Classifies a template argument as a git URL or a path.
    pub fn from_string(s: &str) -> Self {
        if GitLoader::<&str>::is_git_url(s) {
            Self::Git(s.to_string())
        } else {
            Self::FileSystem(PathBuf::from(s))
        }
    }

    /// Name used for the replay file of this template.
    pub fn template_name(&self) -> String {
        match self {
            TemplateSource::FileSystem(path) => path
                .canonicalize()
                .unwrap_or_else(|_| path.clone())
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "template".to_string()),
            TemplateSource::Git(repo) => GitLoader::<&str>::repo_name(repo).to_string(),
        }
    }
}

/// Returns the template directory for the provided template source.
pub fn load_template(
    prompt: &dyn Prompter,
    source: &TemplateSource,
    skip_overwrite_check: bool,
) -> Result<PathBuf> {
    let loader: Box<dyn TemplateLoader + '_> = match source {
        TemplateSource::Git(repo) => {
            Box::new(GitLoader::new(prompt, repo.as_str(), skip_overwrite_check))
        }
        TemplateSource::FileSystem(path) => Box::new(LocalLoader::new(path.as_path())),
    };

    loader.load()
}
