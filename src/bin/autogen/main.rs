//! Autogen CLI - configure scripts and forward headers for qmake products

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use autogen::util::{Shell, Verbosity};
use autogen::AutogenError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        let code = e
            .downcast_ref::<AutogenError>()
            .map(AutogenError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let shell = Shell::from_flags(cli.global.quiet, cli.global.verbose, cli.global.color);
    let default_filter = match shell.verbosity() {
        Verbosity::Quiet => "autogen=warn",
        Verbosity::Normal => "autogen=info",
        Verbosity::Verbose => "autogen=debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => commands::run::execute(&cli.global),
        Commands::Configure => commands::configure::execute(&cli.global),
        Commands::Headers => commands::headers::execute(&cli.global),
        Commands::Products => commands::products::execute(&cli.global),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
