mod cmd;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::{ResolveArgs, cmd_info, cmd_resolve, cmd_variants};
use crate::output::{OutputFormat, print_error};

/// varcfg - resolve which modules of the native library a build compiles
#[derive(Parser)]
#[command(name = "varcfg")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Resolve the build configuration for a variant
  Resolve(ResolveArgs),

  /// List the known build variants
  Variants {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
  },

  /// Show the detected platform
  Info,
}

fn main() {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::Resolve(args) => cmd_resolve(args, cli.verbose),
    Commands::Variants { output } => cmd_variants(output),
    Commands::Info => {
      cmd_info();
      Ok(())
    }
  };

  if let Err(err) = result {
    print_error(&format!("{:#}", err));
    std::process::exit(1);
  }
}
