use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use folio_lib::{Mode, Options};

#[derive(Parser)]
#[command(name = "folio", version, about = "Generates the score catalog pages of the edition website")]
struct CliArgs {
  /// Configuration file (default: $FOLIO_BASE_DIR/config/folio.toml or the platform config dir).
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// Output directory, overrides `site.output_dir`.
  #[arg(long, global = true)]
  output: Option<PathBuf>,

  /// Abort on the first record that cannot be formatted.
  #[arg(long, global = true)]
  strict: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Build the catalog and write pages and navigation.
  Build,
  /// Build the catalog and report failures without writing anything.
  Check,
  /// Write the default configuration.
  InitConfig,
}

fn init_tracing() {
  let _ = tracing_subscriber::registry()
    .with(fmt::layer())
    .with(EnvFilter::builder().with_default_directive(LevelFilter::INFO.into()).with_env_var("LOG_LEVEL").from_env_lossy())
    .try_init();
}

fn run(cli: CliArgs) -> Result<ExitCode> {
  let opts = Options { config: cli.config, output: cli.output, strict: cli.strict };

  match cli.command {
    Command::Build => {
      folio_lib::run(&opts, Mode::Write)?;
      Ok(ExitCode::SUCCESS)
    }
    Command::Check => {
      let outcome = folio_lib::run(&opts, Mode::Check)?;
      for failure in &outcome.report.failures {
        error!("{failure}");
      }
      if outcome.report.is_clean() {
        info!("All records are valid");
        Ok(ExitCode::SUCCESS)
      } else {
        Ok(ExitCode::FAILURE)
      }
    }
    Command::InitConfig => {
      let path = folio_lib::write_default_config(opts.config.as_deref())?;
      info!("Default configuration written to {}", path.display());
      Ok(ExitCode::SUCCESS)
    }
  }
}

fn main() -> ExitCode {
  init_tracing();

  match run(CliArgs::parse()) {
    Ok(code) => code,
    Err(err) => {
      error!("{err:#}");
      ExitCode::FAILURE
    }
  }
}
