//! pybake's application entry point.
//! Parses the command line, picks the prompter and hands over to
//! [`pybake::generate::generate`].

use pybake::{
    cli::{get_args, Args},
    error::{default_error_handler, Result},
    generate::{generate, GenerateOptions, Generated, ReplayMode},
    parser::{load_from_stdin, parse_extra_context},
    prompt::{DefaultsPrompter, DialoguerPrompter, Prompter},
    renderer::MiniJinjaRenderer,
    user_config::get_user_config,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Off
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn options_from_args(args: Args) -> Result<GenerateOptions> {
    let mut options = GenerateOptions::new(args.template, args.output_dir);
    options.extra_context = parse_extra_context(&args.extra_context)?;
    options.overwrite_if_exists = args.overwrite_if_exists;
    options.skip_if_file_exists = args.skip_if_file_exists;
    options.skip_hooks_check = args.skip_hooks_check;
    if args.stdin {
        options.stdin_answers = Some(load_from_stdin()?);
    }
    options.replay = match (args.replay, args.replay_file) {
        (_, Some(path)) => ReplayMode::File(path),
        (true, None) => ReplayMode::Recorded,
        (false, None) => ReplayMode::Off,
    };
    options.user_config = get_user_config(args.config_file.as_deref())?;
    Ok(options)
}

fn report(generated: &Generated) {
    for applied in &generated.applied {
        println!("{}: '{}'", applied.action, applied.target.display());
    }
    println!("Project created at: {}", generated.project_dir.display());

    if !generated.enabled_toggles.is_empty() {
        println!("\nEnabled features:");
        for toggle in &generated.enabled_toggles {
            println!("   - {toggle}");
        }
    }

    println!("\nNext steps:");
    println!("   1. cd {}", generated.project_dir.display());
    println!("   2. make setup");
}

/// Main application logic execution.
fn run(args: Args) -> Result<()> {
    let engine = MiniJinjaRenderer::new();
    let prompt: Box<dyn Prompter> = if args.no_input || args.stdin {
        Box::new(DefaultsPrompter::new())
    } else {
        Box::new(DialoguerPrompter::new())
    };

    let options = options_from_args(args)?;
    let generated = generate(&options, &engine, &*prompt)?;
    report(&generated);
    Ok(())
}
