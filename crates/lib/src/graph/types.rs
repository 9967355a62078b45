use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;
use crate::rule::{Rule, RuleName};
use crate::util::hash::Hashable;

/// Errors that abort graph compilation.
///
/// None of these are recoverable: a partially correct graph is never
/// emitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
  /// Missing environment value or malformed manifest data.
  #[error(transparent)]
  Configuration(#[from] ConfigError),

  /// A source or asset whose extension has no registered rule.
  #[error("no rule registered for extension {extension:?} of {path}")]
  UnrecognizedInput { path: String, extension: String },

  /// A rule name that the registry in use does not define.
  #[error("rule {0} is not registered")]
  UnregisteredRule(RuleName),

  /// Two edges declare the same output.
  #[error("output {output} is produced by both a {first} edge and a {second} edge")]
  DuplicateOutput {
    output: String,
    first: RuleName,
    second: RuleName,
  },

  /// An edge depends, directly or transitively, on its own output.
  #[error("dependency cycle through {0}")]
  CycleDetected(String),
}

impl GraphError {
  /// True for errors that indicate a bug in graph construction rather than
  /// bad input.
  pub fn is_invariant_violation(&self) -> bool {
    matches!(
      self,
      GraphError::DuplicateOutput { .. } | GraphError::CycleDetected(_) | GraphError::UnregisteredRule(_)
    )
  }
}

/// One producer step: outputs, the rule invoked and its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildEdge {
  pub outputs: Vec<String>,
  pub rule: RuleName,
  /// Positional inputs, in command order.
  pub inputs: Vec<String>,
  /// Inputs that force a rebuild but are not passed as `$in`.
  pub implicit: Vec<String>,
  /// Per-edge variable overrides, in declaration order.
  pub variables: Vec<(String, String)>,
}

impl BuildEdge {
  pub fn new(rule: RuleName, output: impl Into<String>) -> Self {
    Self {
      outputs: vec![output.into()],
      rule,
      inputs: Vec::new(),
      implicit: Vec::new(),
      variables: Vec::new(),
    }
  }

  pub fn input(mut self, input: impl Into<String>) -> Self {
    self.inputs.push(input.into());
    self
  }

  pub fn inputs<I, S>(mut self, inputs: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.inputs.extend(inputs.into_iter().map(Into::into));
    self
  }

  pub fn implicit(mut self, input: impl Into<String>) -> Self {
    self.implicit.push(input.into());
    self
  }

  pub fn variable(mut self, key: &str, value: impl Into<String>) -> Self {
    self.variables.push((key.to_string(), value.into()));
    self
  }

  /// The primary output.
  pub fn output(&self) -> &str {
    self.outputs.first().map(String::as_str).unwrap_or_default()
  }

  pub fn variable_value(&self, key: &str) -> Option<&str> {
    self
      .variables
      .iter()
      .find(|(k, _)| k == key)
      .map(|(_, v)| v.as_str())
  }
}

/// The compiled graph: global variables, rules and edges, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildGraph {
  pub variables: Vec<(String, String)>,
  pub rules: Vec<Rule>,
  pub edges: Vec<BuildEdge>,
}

impl Hashable for BuildGraph {}

impl BuildGraph {
  pub fn edges_for(&self, rule: RuleName) -> impl Iterator<Item = &BuildEdge> {
    self.edges.iter().filter(move |edge| edge.rule == rule)
  }

  pub fn producer_of(&self, output: &str) -> Option<&BuildEdge> {
    self.edges.iter().find(|edge| edge.outputs.iter().any(|o| o == output))
  }

  pub fn variable_value(&self, key: &str) -> Option<&str> {
    self
      .variables
      .iter()
      .find(|(k, _)| k == key)
      .map(|(_, v)| v.as_str())
  }

  /// Edge count per rule.
  pub fn counts_by_rule(&self) -> BTreeMap<RuleName, usize> {
    let mut counts = BTreeMap::new();
    for edge in &self.edges {
      *counts.entry(edge.rule).or_insert(0) += 1;
    }
    counts
  }
}

/// Summary figures for a compiled graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphStats {
  pub rules: usize,
  pub edges: usize,
  pub by_rule: BTreeMap<RuleName, usize>,
  /// Length of the longest dependency chain, counted in edges.
  pub depth: usize,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builder_preserves_declaration_order() {
    let edge = BuildEdge::new(RuleName::Ld, "$outdir/loader.bin")
      .inputs(["b.o", "a.o"])
      .input("c.o")
      .implicit("loader/RMC.ld")
      .variable("base", "0x80004000")
      .variable("script", "loader/RMC.ld");

    assert_eq!(edge.output(), "$outdir/loader.bin");
    assert_eq!(edge.inputs, vec!["b.o", "a.o", "c.o"]);
    assert_eq!(edge.implicit, vec!["loader/RMC.ld"]);
    assert_eq!(edge.variable_value("base"), Some("0x80004000"));
    assert_eq!(edge.variable_value("region"), None);
    assert_eq!(edge.variables[0].0, "base");
  }

  #[test]
  fn counts_by_rule_groups_edges() {
    let graph = BuildGraph {
      variables: Vec::new(),
      rules: Vec::new(),
      edges: vec![
        BuildEdge::new(RuleName::Cc, "a.o"),
        BuildEdge::new(RuleName::Cc, "b.o"),
        BuildEdge::new(RuleName::As, "c.o"),
      ],
    };
    let counts = graph.counts_by_rule();
    assert_eq!(counts[&RuleName::Cc], 2);
    assert_eq!(counts[&RuleName::As], 1);
    assert_eq!(graph.producer_of("c.o").map(|e| e.rule), Some(RuleName::As));
  }

  #[test]
  fn invariant_violations_are_distinguished() {
    let duplicate = GraphError::DuplicateOutput {
      output: "x".to_string(),
      first: RuleName::Cp,
      second: RuleName::Wuj5,
    };
    let unknown = GraphError::UnrecognizedInput {
      path: "x.png".to_string(),
      extension: ".png".to_string(),
    };
    assert!(duplicate.is_invariant_violation());
    assert!(!unknown.is_invariant_violation());
  }
}
