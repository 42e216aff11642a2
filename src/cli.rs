use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Compact,
}

#[derive(Parser)]
#[command(name = "signalhound")]
#[command(about = "Sync CI signal with the SIG Release GitHub project board", version)]
#[command(after_help = "EXAMPLES:
    signalhound issues                      List failing/flaky issues on the current release
    signalhound fields                      Show the project's fields and options
    signalhound draft -t \"Title\" -b \"Body\" --board sig-release-master-blocking#gce
                                            Create a draft item on the board")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json, compact)
    #[arg(long, short = 'o', global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Output as JSON (alias for --format json)
    #[arg(long, global = true, hide = true)]
    pub json: bool,

    /// Suppress success messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show debug logs and detailed error information
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Get the effective output format, considering --json flag
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List failing or flaky issues on the newest K8s release
    #[command(after_help = "EXAMPLES:
    signalhound issues
    signalhound issues --per-page 50
    signalhound issues --format compact")]
    Issues(IssuesArgs),
    /// List the project's single-select and iteration fields
    #[command(after_help = "EXAMPLES:
    signalhound fields
    signalhound fields --json")]
    Fields,
    /// Show which fields and options a draft or a retrieval would use
    #[command(after_help = "EXAMPLES:
    signalhound resolve
    signalhound resolve --board sig-release-master-informing#capz-windows")]
    Resolve {
        /// Dashboard selector in board#tab form
        #[arg(long, default_value = "")]
        board: String,
    },
    /// Create a draft item on the project board
    #[command(after_help = "EXAMPLES:
    signalhound draft -t \"[Failing Test] TestFoo\" -b \"Details\" --board sig-release-master-blocking#gce
    signalhound draft -t \"[Flaking Test] TestBar\" --body-file issue.md --board sig-release-master-informing#kind")]
    Draft(DraftArgs),
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    signalhound completions bash > ~/.bash_completion.d/signalhound
    signalhound completions zsh > ~/.zfunc/_signalhound")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    Init,
}

#[derive(Args)]
pub struct IssuesArgs {
    /// Items fetched per page (1-100, defaults to config or 100)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub per_page: Option<u32>,
}

#[derive(Args)]
pub struct DraftArgs {
    /// Draft title
    #[arg(long, short)]
    pub title: String,

    /// Draft body (markdown supported)
    #[arg(long, short, conflicts_with = "body_file")]
    pub body: Option<String>,

    /// Read the draft body from a file
    #[arg(long)]
    pub body_file: Option<PathBuf>,

    /// Dashboard selector in board#tab form
    #[arg(long)]
    pub board: String,
}
