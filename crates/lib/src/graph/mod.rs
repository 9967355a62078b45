//! Manifest to build graph compilation.
//!
//! Compilation runs the builders bottom-up against a single [`GraphCtx`]:
//!
//! 1. [`code`] - one compile edge per source file
//! 2. [`variant`] - region linker scripts and per-region link edges
//! 3. [`asset`] - merge/encode/copy edges into the shared intermediates pool
//! 4. [`pack`] - one pack edge per archive
//! 5. the regeneration edge for the graph file itself
//!
//! The result is checked once more by [`BuildGraph::validate`] before it is
//! handed back, so callers never see a graph that breaks the one-producer
//! rule or contains a cycle.

pub mod asset;
pub mod code;
mod context;
pub mod dag;
pub mod merge;
pub mod pack;
mod types;
pub mod variant;

pub use context::GraphCtx;
pub use types::*;

use tracing::info;

use crate::config::Config;
use crate::consts::{ENCODER_TOOL, MERGE_TOOL, NINJA_REQUIRED_VERSION, PORT_TOOL};
use crate::manifest::Manifest;
use crate::rule::{RuleName, RuleRegistry, flags};

use dag::EdgeDag;

/// Compile a manifest into a validated build graph.
pub fn compile(manifest: &Manifest, config: &Config) -> Result<BuildGraph, GraphError> {
  let registry = RuleRegistry::standard();
  let mut ctx = GraphCtx::new();

  let objects = code::build_code_edges(&manifest.code_targets, &registry, &mut ctx)?;
  let compiled = ctx.len();
  info!(edges = compiled, targets = objects.len(), "compiled code targets");

  variant::expand_regions(manifest, &objects, &mut ctx)?;
  info!(edges = ctx.len() - compiled, regions = manifest.regions.len(), "expanded regions");

  let archives = variant::expand_archives(manifest);
  let before_assets = ctx.len();
  let outputs = asset::build_asset_edges(&archives, &mut ctx)?;
  info!(edges = ctx.len() - before_assets, archives = archives.len(), "built asset edges");

  pack::build_pack_edges(&outputs, &manifest.renames, &mut ctx)?;

  ctx.push(regeneration_edge(config))?;

  let graph = BuildGraph {
    variables: global_variables(config),
    rules: registry.into_rules(),
    edges: ctx.into_edges(),
  };
  graph.validate()?;

  info!(rules = graph.rules.len(), edges = graph.edges.len(), "graph compiled");
  Ok(graph)
}

/// The edge that rewrites the graph file whenever the generator changes.
///
/// The implicit input is the raw executable path; `$configure` holds the
/// shell-quoted form used by the command.
fn regeneration_edge(config: &Config) -> BuildEdge {
  BuildEdge::new(RuleName::Configure, config.graph_file.clone()).implicit(config.generator.clone())
}

fn global_variables(config: &Config) -> Vec<(String, String)> {
  let vars = [
    ("ninja_required_version", NINJA_REQUIRED_VERSION.to_string()),
    ("builddir", config.builddir.clone()),
    ("outdir", config.outdir.clone()),
    ("python", config.python.clone()),
    ("cc", config.cc()),
    ("cpp", config.cpp()),
    ("asflags", flags::join(flags::ASFLAGS)),
    ("cflags", flags::join(flags::CFLAGS)),
    ("cppflags", flags::join(flags::CPPFLAGS)),
    ("ldflags", flags::join(flags::LDFLAGS)),
    ("port", PORT_TOOL.to_string()),
    ("merge", MERGE_TOOL.to_string()),
    ("wuj5", ENCODER_TOOL.to_string()),
    ("configure", config.generator_command().into_owned()),
    ("configure_args", config.regenerate_args()),
  ];
  vars.into_iter().map(|(key, value)| (key.to_string(), value)).collect()
}

impl BuildGraph {
  /// Re-check the structural invariants: every edge uses a declared rule,
  /// every output has exactly one producer and there are no cycles.
  pub fn validate(&self) -> Result<(), GraphError> {
    for edge in &self.edges {
      if !self.rules.iter().any(|rule| rule.name == edge.rule) {
        return Err(GraphError::UnregisteredRule(edge.rule));
      }
    }
    EdgeDag::new(&self.edges)?.verify_acyclic()
  }

  pub fn stats(&self) -> Result<GraphStats, GraphError> {
    Ok(GraphStats {
      rules: self.rules.len(),
      edges: self.edges.len(),
      by_rule: self.counts_by_rule(),
      depth: EdgeDag::new(&self.edges)?.depth()?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::manifest::{ArchiveTarget, CodeTarget, LinkSpec, Region, RenameTable};

  fn config() -> Config {
    Config::with_toolchain("/opt/devkitPPC").with_generator("/usr/local/bin/mkgraph")
  }

  fn small_manifest() -> Manifest {
    Manifest {
      code_targets: vec![CodeTarget::new(
        "payload",
        &["sp/Fatal.c", "game/kart/KartMove.S"],
        LinkSpec::PerRegion {
          dir: "$outdir/disc/bin".to_string(),
          stem: "payload".to_string(),
        },
      )],
      symbol_map: "symbols.txt".to_string(),
      regions: vec![Region::P, Region::E],
      archives: vec![
        ArchiveTarget::new("A.szs", &["timg/icon.tpl"]),
        ArchiveTarget::new("B.szs", &["timg/icon.tpl"]),
      ],
      renames: RenameTable::new().with("icon_E.tpl", "icon.tpl"),
      ..Default::default()
    }
  }

  #[test]
  fn compile_emits_every_stage() {
    let graph = compile(&small_manifest(), &config()).unwrap();
    let counts = graph.counts_by_rule();
    assert_eq!(counts[&RuleName::Cc], 1);
    assert_eq!(counts[&RuleName::As], 1);
    assert_eq!(counts[&RuleName::Port], 2);
    assert_eq!(counts[&RuleName::Ld], 2);
    assert_eq!(counts[&RuleName::Cp], 1);
    assert_eq!(counts[&RuleName::Szs], 2);
    assert_eq!(counts[&RuleName::Configure], 1);
  }

  #[test]
  fn regeneration_edge_depends_on_generator() {
    let graph = compile(&small_manifest(), &config()).unwrap();
    let regen = graph.producer_of("build.ninja").unwrap();
    assert_eq!(regen.rule, RuleName::Configure);
    assert!(regen.inputs.is_empty());
    assert_eq!(regen.implicit, vec!["/usr/local/bin/mkgraph"]);
    assert_eq!(graph.variable_value("configure"), Some("/usr/local/bin/mkgraph"));
  }

  #[test]
  fn regeneration_command_survives_spaces() {
    let config = config()
      .with_generator("/opt/Mod Tools/mkgraph")
      .with_builddir("my build");
    let graph = compile(&small_manifest(), &config).unwrap();
    let regen = graph.producer_of("build.ninja").unwrap();
    assert_eq!(regen.implicit, vec!["/opt/Mod Tools/mkgraph"]);
    assert_eq!(graph.variable_value("configure"), Some("'/opt/Mod Tools/mkgraph'"));
    assert_eq!(
      graph.variable_value("configure_args"),
      Some("generate --builddir 'my build' --outdir out --output build.ninja")
    );
  }

  #[test]
  fn globals_carry_configuration() {
    let graph = compile(&small_manifest(), &config().with_builddir("obj")).unwrap();
    assert_eq!(graph.variable_value("ninja_required_version"), Some("1.3"));
    assert_eq!(graph.variable_value("builddir"), Some("obj"));
    assert_eq!(graph.variable_value("python"), Some("python3"));
  }

  #[test]
  fn validate_rejects_edges_with_unknown_rules() {
    let mut graph = compile(&small_manifest(), &config()).unwrap();
    graph.rules.retain(|rule| rule.name != RuleName::Cp);
    assert_eq!(graph.validate(), Err(GraphError::UnregisteredRule(RuleName::Cp)));
  }

  #[test]
  fn validate_rejects_duplicates_introduced_after_compilation() {
    let mut graph = compile(&small_manifest(), &config()).unwrap();
    let copy = graph.edges_for(RuleName::Cp).next().unwrap().clone();
    graph.edges.push(copy);
    let err = graph.validate().unwrap_err();
    assert!(err.is_invariant_violation());
  }

  #[test]
  fn stats_report_depth() {
    let graph = compile(&small_manifest(), &config()).unwrap();
    let stats = graph.stats().unwrap();
    assert_eq!(stats.edges, graph.edges.len());
    // compile -> link, and port -> link
    assert_eq!(stats.depth, 2);
  }
}
