//! Command-line interface implementation for pybake.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for pybake.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "pybake: generate Python package skeletons from a Jinja project template",
    long_about = None
)]
pub struct Args {
    /// Path to the template directory or git repository URL
    #[arg(value_name = "TEMPLATE")]
    pub template: String,

    /// Directory in which the project directory is created
    #[arg(short, long, value_name = "OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Do not prompt, accept defaults and overrides
    #[arg(long)]
    pub no_input: bool,

    /// Override a default, KEY=VALUE (repeatable)
    #[arg(short, long = "extra-context", value_name = "KEY=VALUE")]
    pub extra_context: Vec<String>,

    /// Generate into an existing project directory
    #[arg(short = 'f', long)]
    pub overwrite_if_exists: bool,

    /// Keep files that already exist in the project directory
    #[arg(short, long)]
    pub skip_if_file_exists: bool,

    /// Run template hooks without asking for confirmation first
    #[arg(long)]
    pub skip_hooks_check: bool,

    /// Read answers as a JSON object from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Reuse the answers recorded for this template
    #[arg(long, conflicts_with = "replay_file")]
    pub replay: bool,

    /// Reuse answers from a JSON file
    #[arg(long, value_name = "FILE")]
    pub replay_file: Option<PathBuf>,

    /// User config file with default_context overrides
    #[arg(long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
