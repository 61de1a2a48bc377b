//! # chunkmark-cli
//!
//! Command-line front end for Chunkmark:
//! - `convert`: render Markdown files and directories into sectioned HTML
//! - `config`: show, query, and create the configuration file
//! - `version`: print the version

pub mod app;
pub mod batch;
pub mod cli;
pub mod config;
pub mod config_handlers;

pub use app::ChunkmarkCli;
pub use batch::{BatchOptions, BatchReport, ensure_output_dir, run_batch};
pub use cli::CliArgs;
pub use config::ChunkmarkConfig;
