//! Generation behaviour on small purpose-built templates.

mod common;

use common::{bundled_template, files, options, read, run, with_context, write_template};
use pybake::error::Error;
use pybake::generate::ReplayMode;
use pybake::user_config::UserConfig;
use tempfile::TempDir;

const SCHEMA: &str = r#"{
    "name": "demo",
    "greeting": "hello {{ cookiecutter.name }}",
    "extra": false,
    "_copy_without_render": ["raw/*"]
}"#;

#[test]
fn renders_paths_contents_and_j2_suffixes() {
    let tpl = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_template(
        tpl.path(),
        SCHEMA,
        &[
            ("{{ cookiecutter.name }}.txt", b"{{ cookiecutter.greeting }}\n".as_slice()),
            ("config.toml.j2", b"name = \"{{ cookiecutter.name }}\"\n".as_slice()),
            ("{% if cookiecutter.extra %}extra.txt{% endif %}", b"extra\n".as_slice()),
        ],
    );

    let generated = run(&options(tpl.path(), out.path())).unwrap();
    let project = out.path().join("demo");
    assert_eq!(generated.project_dir, project);
    assert_eq!(files(&project), ["config.toml", "demo.txt"]);
    assert_eq!(read(&project, "demo.txt"), "hello demo\n");
    assert_eq!(read(&project, "config.toml"), "name = \"demo\"\n");
}

#[test]
fn copies_raw_and_binary_files_verbatim() {
    let tpl = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let binary: &[u8] = &[0xff, 0xfe, 0x00, 0x7b, 0x7b];
    write_template(
        tpl.path(),
        SCHEMA,
        &[
            ("raw/keep.txt", b"{{ left alone }}".as_slice()),
            ("logo.bin", binary),
        ],
    );

    run(&options(tpl.path(), out.path())).unwrap();
    let project = out.path().join("demo");
    assert_eq!(read(&project, "raw/keep.txt"), "{{ left alone }}");
    assert_eq!(std::fs::read(project.join("logo.bin")).unwrap(), binary);
}

#[test]
fn ignore_file_excludes_paths() {
    let tpl = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_template(
        tpl.path(),
        SCHEMA,
        &[
            ("keep.txt", b"keep".as_slice()),
            ("notes.log", b"drop".as_slice()),
            ("pkg/__pycache__/mod.pyc", b"drop".as_slice()),
        ],
    );
    std::fs::write(tpl.path().join(".pybakeignore"), "**/*.log\n").unwrap();

    run(&options(tpl.path(), out.path())).unwrap();
    let project = out.path().join("demo");
    assert_eq!(files(&project), ["keep.txt"]);
    assert!(!project.join("pkg").exists());
}

#[test]
fn ignored_directory_drops_its_subtree() {
    let tpl = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_template(
        tpl.path(),
        SCHEMA,
        &[
            ("keep.txt", b"keep".as_slice()),
            ("scratch/notes.txt", b"drop".as_slice()),
            ("scratch/deeper/more.txt", b"drop".as_slice()),
        ],
    );
    std::fs::write(tpl.path().join(".pybakeignore"), "**/scratch\n").unwrap();

    run(&options(tpl.path(), out.path())).unwrap();
    let project = out.path().join("demo");
    assert_eq!(files(&project), ["keep.txt"]);
    assert!(!project.join("scratch").exists());
}

#[test]
fn answers_from_stdin_content() {
    let tpl = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_template(tpl.path(), SCHEMA, &[("a.txt", b"{{ cookiecutter.greeting }}".as_slice())]);

    let mut opts = options(tpl.path(), out.path());
    opts.stdin_answers = Some(r#"{"name": "piped", "extra": true}"#.to_string());
    let generated = run(&opts).unwrap();

    assert_eq!(generated.project_dir, out.path().join("piped"));
    assert_eq!(read(&generated.project_dir, "a.txt"), "hello piped");
    assert_eq!(generated.enabled_toggles, ["extra"]);
}

#[test]
fn undefined_option_fails_without_output() {
    let tpl = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_template(
        tpl.path(),
        SCHEMA,
        &[
            ("a.txt", b"fine".as_slice()),
            ("b.txt", b"{{ cookiecutter.undeclared }}".as_slice()),
        ],
    );

    let result = run(&options(tpl.path(), out.path()));
    match result {
        Err(Error::ProcessError { source_path, .. }) => assert!(source_path.ends_with("b.txt")),
        other => panic!("expected a process error, got {other:?}"),
    }
    assert!(!out.path().join("demo").exists());
}

#[test]
fn unbalanced_conditional_fails_without_output() {
    let tpl = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_template(
        tpl.path(),
        SCHEMA,
        &[("a.txt", b"{% if cookiecutter.extra %}never closed".as_slice())],
    );

    assert!(matches!(run(&options(tpl.path(), out.path())), Err(Error::ProcessError { .. })));
    assert!(!out.path().join("demo").exists());
}

#[test]
fn missing_schema_is_a_config_error() {
    let tpl = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    std::fs::create_dir(tpl.path().join("{{ cookiecutter.name }}")).unwrap();
    assert!(matches!(run(&options(tpl.path(), out.path())), Err(Error::ConfigError(_))));
}

#[test]
fn missing_template_directory() {
    let out = TempDir::new().unwrap();
    let result = run(&options(out.path().join("nowhere"), out.path()));
    assert!(matches!(result, Err(Error::TemplateDoesNotExistsError { .. })));
}

#[test]
fn existing_project_directory() {
    let tpl = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_template(tpl.path(), SCHEMA, &[("a.txt", b"{{ cookiecutter.name }}".as_slice())]);

    run(&options(tpl.path(), out.path())).unwrap();
    let again = run(&options(tpl.path(), out.path()));
    assert!(matches!(again, Err(Error::OutputDirectoryExistsError { .. })));

    let project = out.path().join("demo");
    std::fs::write(project.join("a.txt"), "edited").unwrap();

    let mut keep = options(tpl.path(), out.path());
    keep.overwrite_if_exists = true;
    keep.skip_if_file_exists = true;
    let generated = run(&keep).unwrap();
    assert_eq!(read(&project, "a.txt"), "edited");
    assert!(generated.applied.iter().any(|a| a.action == "Skipped"));

    let mut overwrite = options(tpl.path(), out.path());
    overwrite.overwrite_if_exists = true;
    run(&overwrite).unwrap();
    assert_eq!(read(&project, "a.txt"), "demo");
}

#[test]
fn user_config_and_extra_context_precedence() {
    let tpl = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_template(tpl.path(), SCHEMA, &[("a.txt", b"{{ cookiecutter.greeting }}".as_slice())]);

    let mut opts = with_context(options(tpl.path(), out.path()), &["name=cli"]);
    opts.user_config.default_context.insert("name".into(), "config".into());
    opts.user_config.default_context.insert("greeting".into(), "hi from config".into());
    let generated = run(&opts).unwrap();

    assert_eq!(generated.project_dir, out.path().join("cli"));
    assert_eq!(read(&generated.project_dir, "a.txt"), "hi from config");
}

#[test]
fn answers_are_recorded_and_replayed() {
    let replay_dir = TempDir::new().unwrap();
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let user_config = || UserConfig {
        replay_dir: Some(replay_dir.path().to_path_buf()),
        ..UserConfig::default()
    };

    let mut record = with_context(options(bundled_template(), first.path()), &["project_name=Replay Me"]);
    record.record_answers = true;
    record.user_config = user_config();
    run(&record).unwrap();
    assert!(replay_dir.path().join("template.json").is_file());

    let mut replay = options(bundled_template(), second.path());
    replay.replay = ReplayMode::Recorded;
    replay.user_config = user_config();
    let generated = run(&replay).unwrap();
    assert_eq!(generated.project_dir, second.path().join("replay-me"));
    assert!(!dir_diff::is_different(first.path(), second.path()).unwrap());
}

#[test]
fn replayed_choices_are_validated() {
    let dir = TempDir::new().unwrap();
    let replay_file = dir.path().join("answers.json");
    std::fs::write(&replay_file, r#"{"project_name": "Replayed", "license": "WTFPL"}"#).unwrap();

    let mut opts = options(bundled_template(), dir.path().join("out"));
    opts.replay = ReplayMode::File(replay_file);
    assert!(matches!(run(&opts), Err(Error::ValidationError(_))));
}
