//! Chunkmark CLI application.
//!
//! Loads configuration, installs logging and dispatches commands.

use crate::batch::{BatchOptions, BatchReport, run_batch};
use crate::cli::{CliArgs, Command, ConvertArgs};
use crate::config::ChunkmarkConfig;
use crate::config_handlers;
use chunkmark_content::{FrontmatterPolicy, Processor, RenderOptions};
use chunkmark_core::util::files::collect_inputs;
use chunkmark_core::{Error, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// ============================================================================
// ChunkmarkCli
// ============================================================================

/// The CLI application.
pub struct ChunkmarkCli {
    config: ChunkmarkConfig,
    version: String,
}

impl ChunkmarkCli {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        let config = ChunkmarkConfig::load(args.config.as_deref())?;
        Ok(Self::new(config))
    }

    /// Create an application with an already loaded config.
    pub fn new(config: ChunkmarkConfig) -> Self {
        Self {
            config,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// The loaded configuration.
    pub fn config(&self) -> &ChunkmarkConfig {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` if set, otherwise defaults based on verbosity flags.
    /// Records from the `log` facade are forwarded to the same subscriber.
    pub fn init_logging(verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // A subscriber may already be installed (tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run a command.
    ///
    /// Returns a failing exit code when any document failed to convert.
    pub async fn run(&self, args: CliArgs) -> Result<ExitCode> {
        match args.command {
            Some(Command::Convert(convert)) => {
                let report = self.convert(convert).await?;
                Ok(if report.is_success() {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                })
            }
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(
                    args.config.as_deref(),
                    config_cmd.command,
                )?;
                Ok(ExitCode::SUCCESS)
            }
            Some(Command::Version) => {
                println!("chunkmark {}", self.version);
                Ok(ExitCode::SUCCESS)
            }
            None => {
                println!("chunkmark {} (use --help for usage)", self.version);
                Ok(ExitCode::SUCCESS)
            }
        }
    }

    /// Convert the inputs named on the command line, or the configured
    /// default input.
    pub async fn convert(&self, args: ConvertArgs) -> Result<BatchReport> {
        let inputs = self.resolve_inputs(&args)?;
        let files = collect_inputs(&inputs, &self.config.input.extension).await?;

        let options = BatchOptions {
            output_dir: args
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(&self.config.output.path)),
            manifest: args.manifest || self.config.output.manifest,
        };
        let processor = Arc::new(Processor::new(self.render_options(&args)));

        log::info!(
            "Converting {} document(s) into {}",
            files.len(),
            options.output_dir.display()
        );
        let report = run_batch(processor, files, options).await?;

        if report.is_success() {
            log::info!("Converted {} document(s)", report.converted.len());
        } else {
            log::warn!(
                "Converted {} document(s), {} failed",
                report.converted.len(),
                report.failed.len()
            );
        }
        Ok(report)
    }

    fn resolve_inputs(&self, args: &ConvertArgs) -> Result<Vec<PathBuf>> {
        if !args.inputs.is_empty() {
            return Ok(args.inputs.clone());
        }
        match &self.config.input.path {
            Some(path) => Ok(vec![PathBuf::from(path)]),
            None => Err(Error::config(
                "No inputs given and input.path is not configured",
            )),
        }
    }

    fn render_options(&self, args: &ConvertArgs) -> RenderOptions {
        let mut options = self.config.render_options();
        if args.strict {
            options.frontmatter = FrontmatterPolicy::Strict;
        }
        if args.auto_slug {
            options.auto_slug = true;
        }
        options
    }
}

// ============================================================================
// Tests
// ============================================================================
