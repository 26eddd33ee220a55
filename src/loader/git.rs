use crate::error::{Error, Result};
use crate::loader::interface::TemplateLoader;
use crate::prompt::Prompter;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Loader for templates from git repositories.
pub struct GitLoader<'a, S: AsRef<str>> {
    prompt: &'a dyn Prompter,
    repo: S,
    skip_overwrite_check: bool,
}

impl<'a, S: AsRef<str>> GitLoader<'a, S> {
    /// Creates a new GitLoader instance.
    pub fn new(prompt: &'a dyn Prompter, repo: S, skip_overwrite_check: bool) -> Self {
        Self { prompt, repo, skip_overwrite_check }
    }

    /// Whether `s` looks like something git can clone.
    pub fn is_git_url(s: &str) -> bool {
        if let Ok(url) = Url::parse(s) {
            if url.scheme() == "https" || url.scheme() == "git" || url.scheme() == "ssh" {
                return true;
            }
        }
        s.starts_with("git@")
    }

    /// Directory name derived from the repository URL.
    pub fn repo_name(repo_url: &str) -> &str {
        let name = repo_url
            .trim_end_matches('/')
            .rsplit(['/', ':'])
            .next()
            .unwrap_or("template")
            .trim_end_matches(".git");
        if name.is_empty() {
            "template"
        } else {
            name
        }
    }
}

impl<S: AsRef<str>> TemplateLoader for GitLoader<'_, S> {
    /// Clones the repository into the current directory.
    ///
    /// # Errors
    /// * `Error::Git2Error` if the clone fails
    fn load(&self) -> Result<PathBuf> {
        let repo_url = self.repo.as_ref();
        let repo_name = Self::repo_name(repo_url);
        let clone_path = PathBuf::from(repo_name);

        if clone_path.exists() {
            let response = self.prompt.confirm(
                self.skip_overwrite_check,
                format!("Directory '{repo_name}' already exists. Replace it?"),
            )?;
            if response {
                fs::remove_dir_all(&clone_path)?;
            } else {
                debug!("Using existing directory '{}'.", clone_path.display());
                return Ok(clone_path);
            }
        }

        debug!("Cloning repository '{}' to '{}'.", repo_url, clone_path.display());

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                let home = std::env::var("HOME").unwrap_or_default();
                git2::Cred::ssh_key(
                    username_from_url.unwrap_or("git"),
                    None,
                    &Path::new(&home).join(".ssh").join("id_rsa"),
                    None,
                )
            } else {
                git2::Cred::default()
            }
        });

        let mut fetch_opts = git2::FetchOptions::new();
        fetch_opts.remote_callbacks(callbacks);

        let mut builder = git2::build::RepoBuilder::new();
        builder.fetch_options(fetch_opts);
        builder.clone(repo_url, &clone_path)?;

        Ok(clone_path)
    }
}
