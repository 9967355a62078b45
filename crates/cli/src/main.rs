mod cmd;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{GraphArgs, cmd_check, cmd_generate, cmd_plan};
use output::{OutputFormat, print_error};

/// mkgraph - Build graph generator for the game mod
#[derive(Parser)]
#[command(name = "mkgraph")]
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
  /// Compile the manifest and write the graph file
  Generate(GraphArgs),

  /// Summarize the graph without writing it
  Plan {
    #[command(flatten)]
    args: GraphArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
  },

  /// Exit non-zero if the graph file is missing or out of date
  Check(GraphArgs),
}

fn main() {
  let cli = Cli::parse();

  // RUST_LOG wins; otherwise --verbose switches on debug output.
  let default_level = if cli.verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::Generate(args) => cmd_generate(&args),
    Commands::Plan { args, format } => cmd_plan(&args, format, cli.verbose),
    Commands::Check(args) => cmd_check(&args),
  };

  if let Err(err) = result {
    print_error(&format!("{err:#}"));
    std::process::exit(1);
  }
}
