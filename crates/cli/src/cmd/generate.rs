//! Implementation of the `mkgraph generate` command.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use mkgraph_lib::emit::write_graph;

use super::{GraphArgs, compile_builtin};
use crate::output::{format_duration, print_stat, print_success, truncate_hash};

pub fn cmd_generate(args: &GraphArgs) -> Result<()> {
  let start = Instant::now();
  let config = args.config()?;
  let graph = compile_builtin(&config)?;

  let path = Path::new(&config.graph_file);
  let hash = write_graph(&graph, path).with_context(|| format!("Failed to write graph file: {}", path.display()))?;
  info!(path = %path.display(), hash = %hash, "graph file written");

  print_success(&format!("Wrote {}", path.display()));
  print_stat("Rules", &graph.rules.len().to_string());
  print_stat("Edges", &graph.edges.len().to_string());
  print_stat("Hash", truncate_hash(&hash.0));
  print_stat("Duration", &format_duration(start.elapsed()));

  Ok(())
}
