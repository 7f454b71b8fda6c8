//! Kaimono CLI entry point.

use clap::Parser;

use kaimono::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let result = match cli.command {
        Commands::Serve(args) => kaimono::cli::commands::serve::execute(args, config_path).await,
        Commands::Parse(args) => kaimono::cli::commands::parse::execute(args, cli.json),
        Commands::CheckConfig(args) => {
            kaimono::cli::commands::check_config::execute(args, config_path, cli.json)
        }
    };

    if let Err(err) = result {
        kaimono::cli::handle_error(err, cli.json);
    }
}
