#![allow(dead_code)]

use pybake::error::Result;
use pybake::generate::{generate, GenerateOptions, Generated};
use pybake::prompt::DefaultsPrompter;
use pybake::renderer::MiniJinjaRenderer;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// The Python project template shipped with the crate.
pub fn bundled_template() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("template")
}

/// Non-interactive options that do not touch the replay directory.
pub fn options<T: AsRef<Path>, O: AsRef<Path>>(template: T, output: O) -> GenerateOptions {
    let mut options =
        GenerateOptions::new(template.as_ref().to_string_lossy(), output.as_ref());
    options.record_answers = false;
    options
}

pub fn run(options: &GenerateOptions) -> Result<Generated> {
    generate(options, &MiniJinjaRenderer::new(), &DefaultsPrompter::new())
}

pub fn with_context(mut options: GenerateOptions, pairs: &[&str]) -> GenerateOptions {
    options.extra_context = pybake::parser::parse_extra_context(pairs).unwrap();
    options
}

/// Relative paths of every file under `root`, sorted.
pub fn files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| !e.path().components().any(|c| c.as_os_str() == ".git"))
        .map(|e| e.path().strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    files.sort();
    files
}

pub fn read(root: &Path, relative: &str) -> String {
    std::fs::read_to_string(root.join(relative)).unwrap()
}

/// Writes a small template: schema plus files under the project directory.
pub fn write_template(root: &Path, schema: &str, files: &[(&str, &[u8])]) {
    std::fs::create_dir_all(root).unwrap();
    std::fs::write(root.join("cookiecutter.json"), schema).unwrap();
    let project = root.join("{{ cookiecutter.name }}");
    std::fs::create_dir_all(&project).unwrap();
    for (path, content) in files {
        let target = project.join(path);
        std::fs::create_dir_all(target.parent().unwrap()).unwrap();
        std::fs::write(target, content).unwrap();
    }
}
