// Copyright 2026 Job Scout Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use job_scout_runtime::cli;
use job_scout_runtime::config::StrategyKind;

#[derive(Parser)]
#[command(
    name = "job-scout",
    about = "Job Scout - job listing search with skill extraction",
    version,
    after_help = "Run 'job-scout <command> --help' for details on each command.\nRun 'job-scout' with no command to start the REST API."
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP REST API (default)
    Serve {
        /// Listen address (host:port). Defaults to JOBSCOUT_ADDR or 127.0.0.1:3000
        #[arg(long)]
        addr: Option<String>,
        /// Override the strategy chosen from JOBSCOUT_SERVERLESS
        #[arg(long, value_enum)]
        strategy: Option<StrategyKind>,
    },
    /// Run one search and print the first results as JSON
    Search {
        /// Search keywords
        #[arg(long, env = "KEYWORDS", default_value = "react developer")]
        keywords: String,
        /// Search location
        #[arg(long, env = "LOCATION", default_value = "remote")]
        location: String,
        /// Posting age (past_24h, past_week, past_month, any)
        #[arg(long, env = "DATE", default_value = "past_24h")]
        date: String,
        /// Number of jobs to print
        #[arg(long, default_value = "5")]
        show: usize,
        /// Override the strategy chosen from JOBSCOUT_SERVERLESS
        #[arg(long, value_enum)]
        strategy: Option<StrategyKind>,
    },
    /// Check environment and diagnose issues
    Doctor,
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve {
        addr: None,
        strategy: None,
    }) {
        Commands::Serve { addr, strategy } => {
            cli::init_tracing(&cli.log_level);
            cli::serve::run(addr, strategy).await
        }
        Commands::Search {
            keywords,
            location,
            date,
            show,
            strategy,
        } => {
            cli::init_tracing(&cli.log_level);
            cli::search::run(keywords, location, date, show, strategy).await
        }
        Commands::Doctor => cli::doctor::run().await,
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "job-scout",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
