//! Producer/consumer DAG over build edges.
//!
//! Used to re-check the graph before emission: every output has one
//! producer and no edge depends on its own output, directly or through other
//! edges.

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use super::types::{BuildEdge, GraphError};

/// Edges as nodes, with a link from each producer to every edge consuming
/// one of its outputs.
pub struct EdgeDag<'a> {
  graph: DiGraph<&'a BuildEdge, ()>,
}

impl<'a> EdgeDag<'a> {
  /// Build the DAG, rejecting outputs declared by more than one edge.
  pub fn new(edges: &'a [BuildEdge]) -> Result<Self, GraphError> {
    let mut graph = DiGraph::new();
    let mut producers: HashMap<&str, NodeIndex> = HashMap::new();

    let nodes: Vec<NodeIndex> = edges.iter().map(|edge| graph.add_node(edge)).collect();

    for (edge, &node) in edges.iter().zip(&nodes) {
      for output in &edge.outputs {
        if let Some(&existing) = producers.get(output.as_str()) {
          let first: &BuildEdge = graph[existing];
          return Err(GraphError::DuplicateOutput {
            output: output.clone(),
            first: first.rule,
            second: edge.rule,
          });
        }
        producers.insert(output.as_str(), node);
      }
    }

    for (edge, &node) in edges.iter().zip(&nodes) {
      for input in edge.inputs.iter().chain(&edge.implicit) {
        if let Some(&producer) = producers.get(input.as_str()) {
          graph.add_edge(producer, node, ());
        }
      }
    }

    Ok(Self { graph })
  }

  /// Verify that no edge depends on itself.
  pub fn verify_acyclic(&self) -> Result<(), GraphError> {
    self.sorted().map(|_| ())
  }

  /// Length of the longest producer chain, counted in edges.
  pub fn depth(&self) -> Result<usize, GraphError> {
    let mut level: HashMap<NodeIndex, usize> = HashMap::new();
    let mut deepest = 0;

    for node in self.sorted()? {
      let here = self
        .graph
        .neighbors_directed(node, Direction::Incoming)
        .filter_map(|dep| level.get(&dep))
        .max()
        .map_or(1, |&below| below + 1);
      deepest = deepest.max(here);
      level.insert(node, here);
    }

    Ok(deepest)
  }

  fn sorted(&self) -> Result<Vec<NodeIndex>, GraphError> {
    toposort(&self.graph, None).map_err(|cycle| GraphError::CycleDetected(self.graph[cycle.node_id()].output().to_string()))
  }
}
