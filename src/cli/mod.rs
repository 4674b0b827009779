/// CLI argument parsing and command handling - Gateway
mod args;
mod commands;
mod output;

pub use args::{AdminCommand, Cli, Commands, CommentsCommand, OutputFormat, WarningsCommand};
pub use commands::{failure_envelope, handle_command, handle_init};
