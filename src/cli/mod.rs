pub mod args;
pub mod commands;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use colored::*;

use crate::error::CompanyInfoError;

/// Japanese corporate registry CLI
#[derive(Parser, Debug)]
#[command(
    name = "company-info",
    about = "Japanese corporate registry CLI - look up corporations by number or name",
    version,
    author,
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Pretty-print JSON responses
    #[arg(short, long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub search: args::SearchArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    #[command(alias = "c")]
    Config(args::ConfigArgs),

    /// Show version information
    Version,

    /// Generate shell completion scripts
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Generate shell completion scripts
    fn generate_completions(shell: Shell) {
        use clap::CommandFactory;
        use clap_complete::generate;
        use std::io;

        let mut cmd = Self::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut io::stdout());
    }

    /// Run the CLI application
    pub async fn run() -> crate::error::Result<()> {
        let cli = Self::parse();

        // Set up logging
        let default_filter = if cli.verbose { "debug" } else { "warn" };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
            .init();

        let result = match cli.command {
            Some(Commands::Config(args)) => commands::config::execute(args).await,
            Some(Commands::Version) => {
                commands::version::execute();
                Ok(())
            }
            Some(Commands::Completions { shell }) => {
                Self::generate_completions(shell);
                Ok(())
            }
            None => commands::search::execute(cli.search, cli.pretty, cli.quiet, cli.verbose).await,
        };

        if let Err(e) = &result {
            report_error(e, cli.verbose);
        }
        result
    }
}

/// Print an error and its hint to stderr
fn report_error(e: &CompanyInfoError, verbose: bool) {
    match e {
        CompanyInfoError::ApiError { status, body } => {
            eprintln!("{} API returned status {}", "Error:".red().bold(), status);
            if verbose || body.chars().count() <= 200 {
                eprintln!("{}", body);
            } else {
                let head: String = body.chars().take(200).collect();
                eprintln!("{}...", head);
                eprintln!("\nRun with --verbose for the full response.");
            }
        }
        CompanyInfoError::Transport(err) => {
            eprintln!("{} {}", "Network error:".red().bold(), err);
        }
        _ => {
            eprintln!("{} {}", "Error:".red().bold(), e);
        }
    }

    if let Some(hint) = e.hint() {
        eprintln!("\n{} {}", "Hint:".yellow(), hint);
    }
}
