//! Implementation of the `mkgraph plan` command.
//!
//! Compiles the graph in memory and reports what `generate` would write,
//! without touching the filesystem.

use anyhow::{Context, Result};
use serde::Serialize;

use mkgraph_lib::graph::GraphStats;
use mkgraph_lib::util::hash::{Hashable, ObjectHash};

use super::{GraphArgs, compile_builtin};
use crate::output::{OutputFormat, print_info, print_json, print_stat, symbols};

#[derive(Debug, Serialize)]
struct PlanSummary<'a> {
  graph_file: &'a str,
  hash: ObjectHash,
  #[serde(flatten)]
  stats: GraphStats,
}

pub fn cmd_plan(args: &GraphArgs, format: OutputFormat, verbose: bool) -> Result<()> {
  let config = args.config()?;
  let graph = compile_builtin(&config)?;
  let stats = graph.stats().context("Failed to analyze build graph")?;
  let hash = graph.compute_hash().context("Failed to compute graph hash")?;

  if format.is_json() {
    return print_json(&PlanSummary {
      graph_file: &config.graph_file,
      hash,
      stats,
    });
  }

  print_info(&format!("Plan for {}", config.graph_file));
  print_stat("Hash", &hash.0);
  print_stat("Rules", &stats.rules.to_string());
  print_stat("Edges", &stats.edges.to_string());
  print_stat("Depth", &stats.depth.to_string());

  println!();
  println!("Edges by rule:");
  for (rule, count) in &stats.by_rule {
    println!("  {} {:<10} {}", symbols::INFO, rule, count);
  }

  if verbose {
    println!();
    println!("Outputs:");
    for edge in &graph.edges {
      println!("  {} {} {} {}", symbols::PLUS, edge.rule, symbols::ARROW, edge.outputs.join(" "));
    }
  }

  Ok(())
}
