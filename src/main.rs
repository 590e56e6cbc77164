mod commands;
mod context;
mod error;
mod hcl;
mod inventory;
mod naming;
mod output;
mod pipeline;
mod renderers;
mod traits;

use anyhow::Result;
use clap::Parser;
use commands::{GlobalArgs, ImportCommand};
use context::Context;

#[derive(Parser)]
#[command(name = "gcp-import")]
#[command(about = "Create Terraform code from Google Cloud resources", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: ImportCommand,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = Context::new();

    // A missing inventory is reported by the pipeline and is not a failure
    cli.command.execute(&ctx, cli.global)?;

    Ok(())
}
