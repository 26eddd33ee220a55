use std::path::{Path, PathBuf};

use pybake::ignore::{copy_without_render_set, parse_ignore_file};
use pybake::processor::{apply, is_jinja_template, FileOperation, Plan, Processor};
use pybake::renderer::MiniJinjaRenderer;
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_is_jinja_template() {
    assert!(is_jinja_template("template.html.j2"));
    assert!(is_jinja_template("file.txt.j2"));
    assert!(!is_jinja_template("regular.html"));
    assert!(!is_jinja_template("file.j2txt"));
}

#[test]
fn test_plan_is_rendered_before_writing() {
    let template = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let project_template = template.path().join("{{ cookiecutter.slug }}");
    std::fs::create_dir_all(project_template.join("{{ cookiecutter.pkg }}")).unwrap();
    std::fs::write(project_template.join("{{ cookiecutter.pkg }}/mod.py.j2"), "X = '{{ cookiecutter.slug }}'\n")
        .unwrap();
    std::fs::create_dir_all(project_template.join("{% if cookiecutter.docs %}docs{% endif %}")).unwrap();
    std::fs::write(
        project_template.join("{% if cookiecutter.docs %}docs{% endif %}/index.md"),
        "docs",
    )
    .unwrap();

    let engine = MiniJinjaRenderer::new();
    let context = json!({"cookiecutter": {"slug": "demo", "pkg": "demo_pkg", "docs": false}});
    let ignored = parse_ignore_file(template.path()).unwrap();
    let raw = copy_without_render_set::<&str>(&[]).unwrap();
    let processor =
        Processor::new(&engine, template.path(), output.path(), &context, &ignored, &raw);

    let plan = processor.plan(&project_template).unwrap();
    assert_eq!(plan.project_dir, output.path().join("demo"));
    assert!(std::fs::read_dir(output.path()).unwrap().next().is_none());

    let targets: Vec<PathBuf> = plan.operations.iter().map(|op| op.target().to_path_buf()).collect();
    assert_eq!(
        targets,
        vec![
            output.path().join("demo"),
            output.path().join("demo/demo_pkg"),
            output.path().join("demo/demo_pkg/mod.py"),
        ]
    );

    let applied = apply(&plan, false).unwrap();
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].action, "Written");
    assert_eq!(
        std::fs::read_to_string(output.path().join("demo/demo_pkg/mod.py")).unwrap(),
        "X = 'demo'\n"
    );
}

#[test]
fn test_apply_skips_existing_files() {
    let output = TempDir::new().unwrap();
    let source = output.path().join("source.txt");
    std::fs::write(&source, "").unwrap();
    let target = output.path().join("project/a.txt");
    std::fs::create_dir_all(target.parent().unwrap()).unwrap();
    std::fs::write(&target, "mine").unwrap();

    let plan = Plan {
        project_dir: output.path().join("project"),
        operations: vec![FileOperation::Write {
            source: source.clone(),
            target: target.clone(),
            content: "theirs".to_string(),
        }],
    };

    let applied = apply(&plan, true).unwrap();
    assert_eq!(applied[0].action, "Skipped");
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "mine");

    apply(&plan, false).unwrap();
    assert_eq!(std::fs::read_to_string(Path::new(&target)).unwrap(), "theirs");
}
