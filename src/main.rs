use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing::warn;

use scamwatch::{
    app::{load_config, load_config_file, AppContext, Config},
    cli::{failure_envelope, handle_command, handle_init, Cli, Commands, OutputFormat},
    utils::init_logger,
};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_logger(cli.verbose);
    let format = cli.output;

    if let Err(e) = run(cli).await {
        if format == OutputFormat::Json {
            if let Ok(json) = serde_json::to_string_pretty(&failure_envelope(&e)) {
                println!("{}", json);
            }
        }
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Init only writes the config file, no service or session needed
    if let Commands::Init = cli.command {
        return handle_init(cli.config, cli.output);
    }

    // Load configuration
    let config = match &cli.config {
        Some(path) => load_config_file(path)?,
        None => load_config().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load configuration, using defaults");
            Config::default()
        }),
    };

    let ctx = AppContext::bootstrap(config, cli.ephemeral).await?;
    handle_command(&ctx, &cli.command, cli.output).await
}
