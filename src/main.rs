mod cli;
mod commands;
mod extract;
mod mcp;
mod page_range;
mod pdf;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Mcp => {
            mcp::run_server().await?;
        }
        Commands::Info { path } => {
            commands::info::run(&path)?;
        }
        Commands::Select {
            path,
            pages,
            output,
            force,
            json,
        } => {
            let options = commands::select::SelectOptions {
                output,
                force,
                json,
            };
            commands::select::run(&path, &pages, &options)?;
        }
    }

    Ok(())
}
