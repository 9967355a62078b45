//! Implementation of the `mkgraph check` command.

use std::path::Path;

use anyhow::{Result, bail};
use tracing::info;

use mkgraph_lib::emit::{Freshness, freshness};

use super::{GraphArgs, compile_builtin};
use crate::output::{print_success, print_warning, truncate_hash};

pub fn cmd_check(args: &GraphArgs) -> Result<()> {
  let config = args.config()?;
  let graph = compile_builtin(&config)?;
  let path = Path::new(&config.graph_file);

  let state = freshness(&graph, path)?;
  info!(path = %path.display(), ?state, "checked graph file");

  match state {
    Freshness::UpToDate => {
      print_success(&format!("{} is up to date", path.display()));
      Ok(())
    }
    Freshness::Stale { existing, expected } => {
      print_warning(&format!(
        "{} differs from the compiled graph ({} != {})",
        path.display(),
        truncate_hash(&existing.0),
        truncate_hash(&expected.0)
      ));
      bail!("{} is stale; run 'mkgraph generate'", path.display())
    }
    Freshness::Missing => bail!("{} does not exist; run 'mkgraph generate'", path.display()),
  }
}
