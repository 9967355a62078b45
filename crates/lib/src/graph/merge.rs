//! Localized text merge inputs.
//!
//! A message table such as `message/Menu_F.bmg.json5` is merged from three
//! sources before it is encoded:
//!
//! 1. the language-specific table: `assets/message/Menu_F.bmg.json5`
//! 2. the project table for the universal language: `assets/message/MenuSP_U.bmg.json5`
//! 3. the project table for this language: `assets/message/MenuSP_F.bmg.json5`
//!
//! Which source wins on conflicting entries is decided by the merge tool.
//! This module only guarantees that the three paths are derived the same way
//! from the table name for every language.

use serde::Serialize;

use crate::config::ConfigError;
use crate::consts::{ASSETS_ROOT, BUILDDIR_VAR, MERGED_ASSETS_DIR};
use crate::manifest::Language;
use crate::rule::RuleName;

use super::types::{BuildEdge, GraphError};

/// Extension chain of a message table source.
pub const TEXT_TABLE_SUFFIX: &str = ".bmg.json5";

/// Infix marking tables owned by this project rather than the base game.
pub const PROJECT_INFIX: &str = "SP";

/// The ordered merge inputs for one localized text table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeSpec {
  pub language_specific: String,
  pub universal: String,
  pub shared: String,
}

impl MergeSpec {
  /// Derive the merge inputs for a manifest member like `message/Menu_F.bmg.json5`.
  ///
  /// # Errors
  ///
  /// Returns a configuration error if the member is not a message table or its
  /// name carries no `_<language>` suffix.
  pub fn for_asset(member: &str) -> Result<Self, GraphError> {
    let stem = member.strip_suffix(TEXT_TABLE_SUFFIX).ok_or_else(|| invalid(member, "not a message table"))?;
    let (dir, name) = match stem.rsplit_once('/') {
      Some((dir, name)) => (format!("{dir}/"), name),
      None => (String::new(), stem),
    };
    let (table, language) = name
      .rsplit_once('_')
      .filter(|(table, language)| !table.is_empty() && !language.is_empty())
      .ok_or_else(|| invalid(member, "missing language suffix"))?;

    let project_table = |language: &str| format!("{ASSETS_ROOT}/{dir}{table}{PROJECT_INFIX}_{language}{TEXT_TABLE_SUFFIX}");

    Ok(Self {
      language_specific: format!("{ASSETS_ROOT}/{member}"),
      universal: project_table(Language::UNIVERSAL.code()),
      shared: project_table(language),
    })
  }

  /// Inputs in the order the merge tool receives them.
  pub fn inputs(&self) -> [&str; 3] {
    [
      self.language_specific.as_str(),
      self.universal.as_str(),
      self.shared.as_str(),
    ]
  }

  /// Intermediate holding the merged table.
  pub fn merged_path(member: &str) -> String {
    format!("{BUILDDIR_VAR}/{MERGED_ASSETS_DIR}/{member}")
  }

  pub fn edge(&self, member: &str) -> BuildEdge {
    BuildEdge::new(RuleName::Merge, Self::merged_path(member)).inputs(self.inputs())
  }
}

fn invalid(member: &str, reason: &str) -> GraphError {
  ConfigError::InvalidManifest(format!("{member}: {reason}")).into()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn derives_three_candidates() {
    let spec = MergeSpec::for_asset("message/Menu_F.bmg.json5").unwrap();
    assert_eq!(spec.language_specific, "assets/message/Menu_F.bmg.json5");
    assert_eq!(spec.universal, "assets/message/MenuSP_U.bmg.json5");
    assert_eq!(spec.shared, "assets/message/MenuSP_F.bmg.json5");
  }

  #[test]
  fn derivation_is_uniform_across_languages() {
    for language in Language::ALL {
      let member = format!("message/Common_{language}.bmg.json5");
      let spec = MergeSpec::for_asset(&member).unwrap();
      assert_eq!(spec.language_specific, format!("assets/{member}"));
      assert_eq!(spec.universal, "assets/message/CommonSP_U.bmg.json5");
      assert_eq!(spec.shared, format!("assets/message/CommonSP_{language}.bmg.json5"));
    }
  }

  #[test]
  fn only_the_last_underscore_separates_the_language() {
    let spec = MergeSpec::for_asset("race_text/Race_Result_G.bmg.json5").unwrap();
    assert_eq!(spec.universal, "assets/race_text/Race_ResultSP_U.bmg.json5");
    assert_eq!(spec.shared, "assets/race_text/Race_ResultSP_G.bmg.json5");
  }

  #[test]
  fn directory_underscores_are_left_alone() {
    let spec = MergeSpec::for_asset("game_image/Race_Result_G.bmg.json5").unwrap();
    assert_eq!(spec.language_specific, "assets/game_image/Race_Result_G.bmg.json5");
    assert_eq!(spec.universal, "assets/game_image/Race_ResultSP_U.bmg.json5");
    assert_eq!(spec.shared, "assets/game_image/Race_ResultSP_G.bmg.json5");
  }

  #[test]
  fn tables_at_the_asset_root_are_supported() {
    let spec = MergeSpec::for_asset("Menu_E.bmg.json5").unwrap();
    assert_eq!(spec.universal, "assets/MenuSP_U.bmg.json5");
  }

  #[test]
  fn missing_language_suffix_is_a_configuration_error() {
    let err = MergeSpec::for_asset("message/Menu.bmg.json5").unwrap_err();
    assert!(matches!(err, GraphError::Configuration(ConfigError::InvalidManifest(_))));
    assert!(MergeSpec::for_asset("message/_F.bmg.json5").is_err());
  }

  #[test]
  fn merge_edge_targets_the_merged_intermediate() {
    let spec = MergeSpec::for_asset("message/Race_K.bmg.json5").unwrap();
    let edge = spec.edge("message/Race_K.bmg.json5");
    assert_eq!(edge.rule, RuleName::Merge);
    assert_eq!(edge.output(), "$builddir/merged/message/Race_K.bmg.json5");
    assert_eq!(edge.inputs, spec.inputs());
  }
}
