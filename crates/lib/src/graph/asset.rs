//! Asset edges: merge, encode or copy each archive member into the shared
//! intermediates pool.
//!
//! Intermediates are keyed by the member's path, not by the archive, so a
//! member listed by several archives is produced by exactly one edge and
//! reused everywhere else. Source existence is not checked here; the
//! executor reports missing inputs when it runs the graph.

use tracing::debug;

use crate::consts::{ASSETS_ROOT, BUILDDIR_VAR, SHARED_ASSETS_DIR};
use crate::manifest::ArchiveTarget;
use crate::rule::AssetKind;

use super::context::GraphCtx;
use super::merge::MergeSpec;
use super::types::{BuildEdge, GraphError};

/// Intermediates an archive packs, in manifest member order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOutputs {
  pub archive: String,
  pub outputs: Vec<String>,
}

/// Directory every intermediate lives under; handed to the encoder as the pack root.
pub fn shared_dir() -> String {
  format!("{BUILDDIR_VAR}/{SHARED_ASSETS_DIR}")
}

/// Shared intermediate path for an archive member.
pub fn intermediate_path(kind: AssetKind, member: &str) -> String {
  format!("{}/{}", shared_dir(), kind.output_key(member))
}

/// Emit the edges producing every archive's members.
pub fn build_asset_edges(archives: &[ArchiveTarget], ctx: &mut GraphCtx) -> Result<Vec<ArchiveOutputs>, GraphError> {
  let mut all = Vec::with_capacity(archives.len());

  for archive in archives {
    let mut outputs = Vec::with_capacity(archive.members.len());
    for member in &archive.members {
      outputs.push(produce_member(member, ctx)?);
    }
    all.push(ArchiveOutputs {
      archive: archive.name.clone(),
      outputs,
    });
  }

  Ok(all)
}

fn produce_member(member: &str, ctx: &mut GraphCtx) -> Result<String, GraphError> {
  let kind = AssetKind::classify(member)?;
  let output = intermediate_path(kind, member);

  if ctx.is_produced(&output) {
    debug!(output = %output, "reusing shared asset output");
    return Ok(output);
  }

  let input = match kind {
    AssetKind::LocalizedText => {
      let spec = MergeSpec::for_asset(member)?;
      let edge = spec.edge(member);
      let merged = edge.output().to_string();
      ctx.push(edge)?;
      merged
    }
    AssetKind::Layout | AssetKind::Texture | AssetKind::Encodable => format!("{ASSETS_ROOT}/{member}"),
  };

  ctx.push(BuildEdge::new(kind.rule(), output.clone()).input(input))?;
  Ok(output)
}
