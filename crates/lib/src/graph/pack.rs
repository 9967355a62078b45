//! Archive pack edges.

use crate::consts::OUTDIR_VAR;
use crate::manifest::RenameTable;
use crate::rule::RuleName;

use super::asset::{ArchiveOutputs, shared_dir};
use super::context::GraphCtx;
use super::types::{BuildEdge, GraphError};

/// Packed archive location on the disc image.
pub fn archive_path(archive: &str) -> String {
  format!("{OUTDIR_VAR}/disc/Scene/UI/{archive}")
}

/// Emit one pack edge per archive.
///
/// Inputs keep the manifest's member order: the encoder lets later entries
/// override earlier ones that share a canonical name. The rename table is the
/// same for every archive.
pub fn build_pack_edges(archives: &[ArchiveOutputs], renames: &RenameTable, ctx: &mut GraphCtx) -> Result<(), GraphError> {
  let args = renames.to_args();
  for archive in archives {
    ctx.push(
      BuildEdge::new(RuleName::Szs, archive_path(&archive.archive))
        .inputs(archive.outputs.iter().cloned())
        .variable("szsin", shared_dir())
        .variable("args", args.clone()),
    )?;
  }
  Ok(())
}
