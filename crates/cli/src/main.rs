mod cmd;
mod output;
mod prompts;
mod reporter;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use ttpgpack_lib::PackError;

use cmd::{
  cmd_build, cmd_clean, cmd_dev, cmd_guid, cmd_postpublish, cmd_purge, cmd_reset, cmd_setup, cmd_status,
};
use output::{OutputFormat, print_error, print_warning};

/// ttpg - build, link and publish Tabletop Playground packages
#[derive(Parser)]
#[command(name = "ttpg")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Project directory (default: current directory)
  #[arg(long, global = true, value_name = "DIR")]
  project: Option<PathBuf>,

  /// Defaults to `setup`
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Create missing config files and asset directories
  Setup,

  /// Show the resolved config and which packages exist
  Status {
    #[arg(short, long, value_enum, default_value_t)]
    format: OutputFormat,
  },

  /// Link the project into TTPG for live development
  Dev,

  /// Build the production package
  Build,

  /// Build the production package, bundling only the scripts templates use
  Libpack,

  /// Remove local build output and the dev link
  Clean,

  /// Clean, then ask for the TTPG path again
  Reset,

  /// Delete the production package
  Purge {
    /// Answer yes to every confirmation, including ModID capture
    #[arg(short, long)]
    yes: bool,
  },

  /// Save the ModID of a published package into the project config
  Postpublish,

  /// Print fresh package GUIDs
  Guid {
    /// Number of GUIDs to print
    #[arg(default_value_t = 1)]
    count: usize,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let project = cli.project.as_deref();
  let result = match cli.command.unwrap_or(Commands::Setup) {
    Commands::Setup => cmd_setup(project),
    Commands::Status { format } => cmd_status(project, format),
    Commands::Dev => cmd_dev(project, cli.verbose),
    Commands::Build => cmd_build(project, false, cli.verbose),
    Commands::Libpack => cmd_build(project, true, cli.verbose),
    Commands::Clean => cmd_clean(project),
    Commands::Reset => cmd_reset(project),
    Commands::Purge { yes } => cmd_purge(project, yes),
    Commands::Postpublish => cmd_postpublish(project),
    Commands::Guid { count } => cmd_guid(count),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => report_failure(&err),
  }
}

fn init_tracing(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

/// Non-fatal workflow errors are warnings and still exit 0.
fn report_failure(err: &anyhow::Error) -> ExitCode {
  if let Some(pack) = err.downcast_ref::<PackError>() {
    if !pack.is_fatal() {
      print_warning(&pack.to_string());
      return ExitCode::SUCCESS;
    }
  }

  print_error(&format!("{:#}", err));
  ExitCode::FAILURE
}
