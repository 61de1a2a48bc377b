//! Chunkmark CLI
//!
//! Converts annotated Markdown documents into sectioned HTML pages.

use anyhow::Result;
use chunkmark_cli::{ChunkmarkCli, CliArgs};
use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = CliArgs::parse();
    ChunkmarkCli::init_logging(args.verbose, args.quiet);
    tracing::debug!(?args, "parsed arguments");

    let cli = ChunkmarkCli::from_args(&args)?;
    Ok(cli.run(args).await?)
}
