mod check;
mod generate;
mod plan;

pub use check::cmd_check;
pub use generate::cmd_generate;
pub use plan::cmd_plan;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use mkgraph_lib::config::Config;
use mkgraph_lib::graph::{BuildGraph, compile};
use mkgraph_lib::manifest::Manifest;

/// Overrides shared by every subcommand that compiles the graph.
#[derive(Debug, Clone, Default, Args)]
pub struct GraphArgs {
  /// Directory for intermediate build outputs
  #[arg(long)]
  pub builddir: Option<String>,

  /// Directory for final build outputs
  #[arg(long)]
  pub outdir: Option<String>,

  /// Path of the graph file
  #[arg(short, long)]
  pub output: Option<String>,
}

impl GraphArgs {
  /// Environment configuration with the command-line overrides applied.
  pub fn config(&self) -> Result<Config> {
    let mut config = Config::from_env()?;
    if let Some(builddir) = &self.builddir {
      config = config.with_builddir(builddir);
    }
    if let Some(outdir) = &self.outdir {
      config = config.with_outdir(outdir);
    }
    if let Some(output) = &self.output {
      config = config.with_graph_file(output);
    }

    let exe = std::env::current_exe().context("Failed to locate the mkgraph executable")?;
    let config = config.with_generator(&exe.to_string_lossy());
    debug!(
      builddir = %config.builddir,
      outdir = %config.outdir,
      graph_file = %config.graph_file,
      generator = %config.generator,
      "resolved configuration"
    );
    Ok(config)
  }
}

/// Compile the built-in manifest under the resolved configuration.
pub fn compile_builtin(config: &Config) -> Result<BuildGraph> {
  compile(&Manifest::builtin(), config).context("Failed to compile build graph")
}
