//! Compile edges for code targets.

use tracing::debug;

use crate::consts::{BUILDDIR_VAR, OBJECT_SUFFIX};
use crate::manifest::CodeTarget;
use crate::rule::RuleRegistry;

use super::context::GraphCtx;
use super::types::{BuildEdge, GraphError};

/// Objects produced for one code target, in manifest source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetObjects {
  pub target: String,
  pub objects: Vec<String>,
}

/// Object path for a source, mirroring its directory under the build root so
/// same-named files in different directories never collide.
pub fn object_path(source_path: &str) -> String {
  format!("{BUILDDIR_VAR}/{source_path}{OBJECT_SUFFIX}")
}

/// Emit one compile edge per source file of every target.
///
/// The returned object lists keep manifest order; they become link order.
pub fn build_code_edges(
  targets: &[CodeTarget],
  registry: &RuleRegistry,
  ctx: &mut GraphCtx,
) -> Result<Vec<TargetObjects>, GraphError> {
  let mut all = Vec::with_capacity(targets.len());

  for target in targets {
    let mut objects = Vec::with_capacity(target.sources.len());
    for source in &target.sources {
      let source_path = target.source_path(source);
      let rule = registry.rule_for(&source_path)?;
      let object = object_path(&source_path);
      ctx.push(BuildEdge::new(rule.name, object.clone()).input(source_path))?;
      objects.push(object);
    }
    debug!(target = %target.name, objects = objects.len(), "compiled code target");
    all.push(TargetObjects {
      target: target.name.clone(),
      objects,
    });
  }

  Ok(all)
}
