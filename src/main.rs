//! gh-action-readme - Generate documentation for GitHub Actions
//!
//! This is the main entry point for the CLI application.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gh_action_readme::cli::{self, exit_codes, Cli, Commands};
use gh_action_readme::ActionDocsError;

#[tokio::main]
async fn main() {
    // Usage errors exit with INVALID_ARGS; help and version exit cleanly
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() {
                exit_codes::INVALID_ARGS
            } else {
                exit_codes::SUCCESS
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    setup_logging(cli.verbose, cli.quiet);
    let global = cli.global_options();

    let result: anyhow::Result<i32> = match cli.command {
        Commands::Gen(args) => cli::commands::gen::execute(args, &global)
            .await
            .map_err(Into::into),
        Commands::Validate(args) => cli::commands::validate::execute(args, &global)
            .await
            .map_err(Into::into),
        Commands::Config(args) => cli::commands::config::execute(args, &global).await,
        Commands::Deps(args) => cli::commands::deps::execute(args, &global)
            .await
            .map_err(Into::into),
        Commands::Schema(args) => cli::commands::schema::execute(args)
            .await
            .map_err(Into::into),
        Commands::GenerateMan(args) => cli::commands::generate_man::execute(args)
            .await
            .map_err(Into::into),
    };

    // Handle exit codes for CI integration
    match result {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            let code = match e.downcast_ref::<ActionDocsError>() {
                Some(err) => {
                    eprintln!("Error: {err}");
                    exit_codes::for_error(err)
                }
                None => {
                    eprintln!("Error: {e:#}");
                    exit_codes::ERROR
                }
            };
            std::process::exit(code);
        }
    }
}

fn setup_logging(verbosity: u8, quiet: bool) {
    let filter = match (quiet, verbosity) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}
