//! Graph emission.
//!
//! Serializes a [`BuildGraph`] into the executor's file format and writes it
//! atomically: the file is rendered in memory, written to a temporary file
//! next to the destination, then persisted over it. A failed run leaves any
//! previous graph file untouched.

pub mod writer;

use std::fs;
use std::io::Write;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::graph::{BuildGraph, GraphError};
use crate::util::hash::{ContentHash, hash_bytes, hash_file};

pub use writer::{Writer, escape_path};

#[derive(Debug, Error)]
pub enum EmitError {
  #[error("refusing to emit an inconsistent graph: {0}")]
  Graph(#[from] GraphError),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("failed to persist graph file: {0}")]
  Persist(#[from] tempfile::PersistError),
}

/// State of an existing graph file compared with a freshly compiled graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Freshness {
  UpToDate,
  Stale { existing: ContentHash, expected: ContentHash },
  Missing,
}

/// Render the graph file contents.
///
/// The graph is validated again first; rendering the same graph always
/// produces the same bytes.
pub fn render(graph: &BuildGraph) -> Result<String, EmitError> {
  graph.validate()?;

  let mut writer = Writer::new();
  writer.comment(&format!("Generated by {}. Do not edit.", crate::consts::APP_NAME));
  writer.newline();

  for (key, value) in &graph.variables {
    writer.variable(key, value, 0);
  }
  writer.newline();

  for rule in &graph.rules {
    writer.rule(rule);
    writer.newline();
  }

  let mut previous = None;
  for edge in &graph.edges {
    if previous.is_some_and(|rule| rule != edge.rule) {
      writer.newline();
    }
    writer.build(edge);
    previous = Some(edge.rule);
  }

  Ok(writer.finish())
}

/// Render and atomically write the graph file, returning its content hash.
pub fn write_graph(graph: &BuildGraph, path: &Path) -> Result<ContentHash, EmitError> {
  let rendered = render(graph)?;
  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };
  fs::create_dir_all(dir)?;

  let mut file = tempfile::NamedTempFile::new_in(dir)?;
  file.write_all(rendered.as_bytes())?;
  file.flush()?;
  debug!(temp = %file.path().display(), "graph rendered to temporary file");
  file.persist(path)?;

  let hash = hash_bytes(rendered.as_bytes());
  info!(path = %path.display(), bytes = rendered.len(), "graph written");
  Ok(hash)
}

/// Compare an existing graph file's content hash with what `graph` would
/// render to.
pub fn freshness(graph: &BuildGraph, path: &Path) -> Result<Freshness, EmitError> {
  let expected = hash_bytes(render(graph)?.as_bytes());
  let existing = match hash_file(path) {
    Ok(hash) => hash,
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Freshness::Missing),
    Err(e) => return Err(e.into()),
  };

  if existing == expected {
    Ok(Freshness::UpToDate)
  } else {
    debug!(path = %path.display(), %existing, %expected, "graph file differs");
    Ok(Freshness::Stale { existing, expected })
  }
}
