mod board;
mod cli;
mod client;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod responses;
mod types;
mod version;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use cli::{Cli, Commands};
use config::Config;
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");

        // Show error chain if verbose flag was passed
        if std::env::args().any(|arg| arg == "--verbose" || arg == "-v") {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    output::set_format(cli.output_format());
    output::set_quiet(cli.quiet);

    match cli.command {
        // Commands that don't need config or a client
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "signalhound", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run().await?;
        }
        command => {
            let config = Config::load()?;
            logging::init(cli.verbose, config.log_dir.as_deref());
            let board = config.board()?;

            match command {
                Commands::Issues(args) => {
                    commands::issues::list(&board, &config, args).await?;
                }
                Commands::Fields => {
                    commands::fields::list(&board).await?;
                }
                Commands::Resolve { board: selector } => {
                    commands::resolve::show(&board, &selector).await?;
                }
                Commands::Draft(args) => {
                    commands::draft::create(&board, args).await?;
                }
                Commands::Completions { .. } | Commands::Init => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
