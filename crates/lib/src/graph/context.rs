//! Accumulator threaded through the graph builders.

use std::collections::HashMap;

use crate::rule::RuleName;

use super::types::{BuildEdge, GraphError};

/// Edges emitted so far and the outputs they produce.
///
/// Builders run in manifest order against one context, so the "already
/// produced" set is deterministic without any locking.
#[derive(Debug, Default)]
pub struct GraphCtx {
  edges: Vec<BuildEdge>,
  produced: HashMap<String, RuleName>,
}

impl GraphCtx {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_produced(&self, output: &str) -> bool {
    self.produced.contains_key(output)
  }

  /// Record an edge.
  ///
  /// # Errors
  ///
  /// Returns `DuplicateOutput` if any of the edge's outputs already has a
  /// producer. The context is left unchanged in that case.
  pub fn push(&mut self, edge: BuildEdge) -> Result<(), GraphError> {
    for output in &edge.outputs {
      if let Some(&first) = self.produced.get(output) {
        return Err(GraphError::DuplicateOutput {
          output: output.clone(),
          first,
          second: edge.rule,
        });
      }
    }
    for output in &edge.outputs {
      self.produced.insert(output.clone(), edge.rule);
    }
    self.edges.push(edge);
    Ok(())
  }

  pub fn edges(&self) -> &[BuildEdge] {
    &self.edges
  }

  pub fn len(&self) -> usize {
    self.edges.len()
  }

  pub fn is_empty(&self) -> bool {
    self.edges.is_empty()
  }

  pub fn into_edges(self) -> Vec<BuildEdge> {
    self.edges
  }
}
