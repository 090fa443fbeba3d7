//! lint-report CLI entry point

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lint_report::commands::{run_lint, CommandContext};
use lint_report::{Cli, Settings};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run(cli: &Cli) -> lint_report::Result<String> {
    let root = match &cli.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    let settings = Settings::load(&root, cli.config.as_deref())?;

    let ctx = CommandContext {
        root,
        settings,
        format: cli.format,
        verbose: cli.verbose,
    };
    run_lint(cli.command, &ctx)
}

/// Log to stderr; `RUST_LOG` overrides the verbosity flag
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "lint_report=debug"
    } else {
        "lint_report=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
