//! Region and language expansion.
//!
//! Regions parametrize the link step: each region gets its own linker script
//! ported from the shared symbol map and its own base address, while every
//! region links the exact same object sequence. Languages parametrize the
//! localized archive families.

use tracing::debug;

use crate::config::ConfigError;
use crate::consts::BUILDDIR_VAR;
use crate::manifest::{ArchiveTarget, CodeTarget, LinkSpec, Manifest, Region};
use crate::rule::RuleName;

use super::code::TargetObjects;
use super::context::GraphCtx;
use super::types::{BuildEdge, GraphError};

/// Emit the script-porting edges and the link edges.
///
/// `objects` must be the result of compiling `manifest.code_targets`: one
/// entry per target, matched by name.
pub fn expand_regions(manifest: &Manifest, objects: &[TargetObjects], ctx: &mut GraphCtx) -> Result<(), GraphError> {
  if objects.len() != manifest.code_targets.len() {
    return Err(
      ConfigError::InvalidManifest(format!(
        "{} code targets but {} compiled object lists",
        manifest.code_targets.len(),
        objects.len()
      ))
      .into(),
    );
  }

  for &region in &manifest.regions {
    ctx.push(port_edge(&manifest.symbol_map, region))?;
  }

  for compiled in objects {
    let target = manifest
      .code_targets
      .iter()
      .find(|target| target.name == compiled.target)
      .ok_or_else(|| ConfigError::InvalidManifest(format!("objects for unknown code target {}", compiled.target)))?;
    for edge in link_edges(target, &compiled.objects, &manifest.regions) {
      ctx.push(edge)?;
    }
  }

  Ok(())
}

fn port_edge(symbol_map: &str, region: Region) -> BuildEdge {
  BuildEdge::new(RuleName::Port, region.linker_script(BUILDDIR_VAR))
    .input(symbol_map)
    .implicit("$port")
    .variable("region", region.code())
}

/// Link edges for one target: one for a fixed image, one per region otherwise.
pub fn link_edges(target: &CodeTarget, objects: &[String], regions: &[Region]) -> Vec<BuildEdge> {
  match &target.link {
    LinkSpec::Fixed { output, base, script } => vec![
      BuildEdge::new(RuleName::Ld, output.clone())
        .inputs(objects.iter().cloned())
        .implicit(script.clone())
        .variable("base", base.clone())
        .variable("script", script.clone()),
    ],
    LinkSpec::PerRegion { dir, stem } => regions
      .iter()
      .map(|&region| {
        let script = region.linker_script(BUILDDIR_VAR);
        BuildEdge::new(RuleName::Ld, format!("{dir}/{stem}{}.bin", region.code()))
          .inputs(objects.iter().cloned())
          .implicit(script.clone())
          .variable("base", region.base_address())
          .variable("script", script)
      })
      .collect(),
  }
}

/// Every archive to pack: plain archives first, then each language's copy of
/// every localized family.
pub fn expand_archives(manifest: &Manifest) -> Vec<ArchiveTarget> {
  let mut archives = manifest.archives.clone();
  for &language in &manifest.languages {
    for family in &manifest.localized_archives {
      archives.push(family.for_language(language));
    }
  }
  debug!(count = archives.len(), "expanded archive targets");
  archives
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::manifest::{Language, LocalizedArchive};

  fn per_region_target() -> CodeTarget {
    CodeTarget::new(
      "payload",
      &["sp/Fatal.c", "sp/Keyboard.c"],
      LinkSpec::PerRegion {
        dir: "$outdir/disc/bin".to_string(),
        stem: "payload".to_string(),
      },
    )
  }

  fn objects() -> Vec<String> {
    vec![
      "$builddir/payload/sp/Fatal.c.o".to_string(),
      "$builddir/payload/sp/Keyboard.c.o".to_string(),
    ]
  }

  #[test]
  fn regions_share_inputs_but_nothing_else() {
    let edges = link_edges(&per_region_target(), &objects(), &[Region::P, Region::E]);
    assert_eq!(edges.len(), 2);
    let (p, e) = (&edges[0], &edges[1]);

    assert_eq!(p.inputs, e.inputs);
    assert_eq!(p.output(), "$outdir/disc/bin/payloadP.bin");
    assert_eq!(e.output(), "$outdir/disc/bin/payloadE.bin");
    assert_eq!(p.variable_value("base"), Some("0x8076db60"));
    assert_eq!(e.variable_value("base"), Some("0x80769400"));
    assert_eq!(p.implicit, vec!["$builddir/scripts/RMCP.ld"]);
    assert_eq!(e.implicit, vec!["$builddir/scripts/RMCE.ld"]);
    assert_eq!(p.variable_value("script"), Some("$builddir/scripts/RMCP.ld"));
  }

  #[test]
  fn fixed_target_links_once_with_checked_in_script() {
    let target = CodeTarget::new(
      "loader",
      &["Loader.c"],
      LinkSpec::Fixed {
        output: "$outdir/loader.bin".to_string(),
        base: "0x80004000".to_string(),
        script: "loader/RMC.ld".to_string(),
      },
    );
    let edges = link_edges(&target, &["$builddir/loader/Loader.c.o".to_string()], &Region::ALL);
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].implicit, vec!["loader/RMC.ld"]);
    assert_eq!(edges[0].variable_value("base"), Some("0x80004000"));
  }

  #[test]
  fn port_edges_depend_on_the_tool() {
    let manifest = Manifest {
      code_targets: vec![per_region_target()],
      symbol_map: "symbols.txt".to_string(),
      regions: vec![Region::J, Region::K],
      ..Default::default()
    };
    let compiled = vec![TargetObjects {
      target: "payload".to_string(),
      objects: objects(),
    }];
    let mut ctx = GraphCtx::new();
    expand_regions(&manifest, &compiled, &mut ctx).unwrap();

    let ports: Vec<_> = ctx.edges().iter().filter(|e| e.rule == RuleName::Port).collect();
    assert_eq!(ports.len(), 2);
    assert_eq!(ports[0].output(), "$builddir/scripts/RMCJ.ld");
    assert_eq!(ports[0].inputs, vec!["symbols.txt"]);
    assert_eq!(ports[0].implicit, vec!["$port"]);
    assert_eq!(ports[0].variable_value("region"), Some("J"));

    let links = ctx.edges().iter().filter(|e| e.rule == RuleName::Ld).count();
    assert_eq!(links, 2);
  }

  #[test]
  fn missing_object_list_is_rejected() {
    let manifest = Manifest {
      code_targets: vec![per_region_target()],
      regions: vec![Region::P],
      ..Default::default()
    };
    let mut ctx = GraphCtx::new();
    let err = expand_regions(&manifest, &[], &mut ctx).unwrap_err();
    assert!(matches!(err, GraphError::Configuration(ConfigError::InvalidManifest(_))));
    assert!(ctx.is_empty());
  }

  #[test]
  fn object_list_for_unknown_target_is_rejected() {
    let manifest = Manifest {
      code_targets: vec![per_region_target()],
      regions: vec![Region::P],
      ..Default::default()
    };
    let compiled = vec![TargetObjects {
      target: "loader".to_string(),
      objects: objects(),
    }];
    let mut ctx = GraphCtx::new();
    let err = expand_regions(&manifest, &compiled, &mut ctx).unwrap_err();
    assert!(matches!(err, GraphError::Configuration(ConfigError::InvalidManifest(ref msg)) if msg.contains("loader")));
  }

  #[test]
  fn archives_expand_language_major() {
    let manifest = Manifest {
      archives: vec![ArchiveTarget::new("TitleSP.szs", &["button/timg/tt_license_icon_004.tpl"])],
      localized_archives: vec![
        LocalizedArchive::new("AwardSP", &["message/Common_{lang}.bmg.json5"]),
        LocalizedArchive::new("TitleSP", &["message/Menu_{lang}.bmg.json5"]),
      ],
      languages: vec![Language::E, Language::F],
      ..Default::default()
    };
    let names: Vec<_> = expand_archives(&manifest).into_iter().map(|a| a.name).collect();
    assert_eq!(
      names,
      vec!["TitleSP.szs", "AwardSP_E.szs", "TitleSP_E.szs", "AwardSP_F.szs", "TitleSP_F.szs"]
    );
  }
}
