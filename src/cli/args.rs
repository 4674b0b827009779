use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::models::WarningStatus;

#[derive(Parser, Debug)]
#[command(name = "scamwatch")]
#[command(version)]
#[command(about = "Browse, report and moderate community scam warnings", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Keep the session in memory only (nothing is written to disk)
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize configuration
    Init,
    /// Show configuration, session and service status
    Status,
    /// Create an account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "SCAMWATCH_PASSWORD", hide_env_values = true)]
        password: String,
        /// Log in with the new account right away
        #[arg(long)]
        login: bool,
    },
    /// Log in and remember the user locally
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "SCAMWATCH_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the remembered user
    Logout,
    /// Show the remembered user
    Whoami,
    /// Show the latest approved warnings
    Home,
    /// Browse and report warnings
    #[command(subcommand)]
    Warnings(WarningsCommand),
    /// List warning categories
    Categories,
    /// Read and post comments
    #[command(subcommand)]
    Comments(CommentsCommand),
    /// Moderation (admin only)
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Subcommand, Debug)]
pub enum WarningsCommand {
    /// List approved warnings
    List {
        /// Show only the latest N warnings
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show a warning with its comments
    Show { id: i64 },
    /// Search warnings by text and/or category
    Search {
        #[arg(short, long, default_value = "")]
        term: String,
        /// Category id or name
        #[arg(long)]
        category: Option<String>,
    },
    /// Report a new warning (login required)
    Create(WarningForm),
}

#[derive(Args, Debug)]
pub struct WarningForm {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: String,
    /// Comma-separated warning signs
    #[arg(long)]
    pub signs: String,
    /// Category id or name
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum CommentsCommand {
    /// List comments on a warning
    List { warning_id: i64 },
    /// Comment on a warning (login required)
    Add { warning_id: i64, text: String },
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Ask the service whether the current user is an admin
    Verify,
    /// List all warnings with moderation stats
    List,
    /// Edit a warning; omitted fields keep their current value
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        signs: Option<String>,
        /// Category id or name
        #[arg(long)]
        category: Option<String>,
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },
    /// Delete a warning
    Delete { id: i64 },
    /// Approve a pending warning
    Approve { id: i64 },
    /// Reject a pending warning
    Reject { id: i64 },
    /// Delete a comment
    DeleteComment { id: i64 },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Pending,
    Approved,
}

impl From<StatusArg> for WarningStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Pending => WarningStatus::Pending,
            StatusArg::Approved => WarningStatus::Approved,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Text,
    /// JSON `{success, data|error}` envelopes
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_nested_commands() {
        let cli = Cli::try_parse_from([
            "scamwatch", "--output", "json", "admin", "update", "7", "--status", "approved",
        ])
        .unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
        match cli.command {
            Commands::Admin(AdminCommand::Update { id, status, title, .. }) => {
                assert_eq!(id, 7);
                assert!(matches!(status, Some(StatusArg::Approved)));
                assert!(title.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["scamwatch", "comments", "add", "3", "same here"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Comments(CommentsCommand::Add { warning_id: 3, .. })
        ));
    }
}
