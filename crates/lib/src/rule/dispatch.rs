//! Extension dispatch for code sources and assets.
//!
//! Both tables are closed: an extension missing from them aborts graph
//! compilation with [`GraphError::UnrecognizedInput`].

use serde::Serialize;

use crate::graph::GraphError;

use super::types::RuleName;

/// Extension of the last path component, including the leading dot.
///
/// A leading dot on the file name (`.hidden`) does not count as an extension.
pub fn extension(path: &str) -> Option<&str> {
  let name = path.rsplit('/').next().unwrap_or(path);
  match name.rfind('.') {
    Some(0) | None => None,
    Some(index) => Some(&name[index..]),
  }
}

/// Path with its final extension removed.
pub fn strip_extension(path: &str) -> &str {
  match extension(path) {
    Some(ext) => &path[..path.len() - ext.len()],
    None => path,
  }
}

fn unrecognized(path: &str) -> GraphError {
  GraphError::UnrecognizedInput {
    path: path.to_string(),
    extension: extension(path).unwrap_or("").to_string(),
  }
}

/// Rule that turns a code source into an object file.
pub fn rule_for_source(path: &str) -> Result<RuleName, GraphError> {
  match extension(path) {
    Some(".S") => Ok(RuleName::As),
    Some(".c") => Ok(RuleName::Cc),
    Some(".cpp") => Ok(RuleName::Cpp),
    _ => Err(unrecognized(path)),
  }
}

/// Semantic kind of an asset, derived from its extension chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
  /// Prebuilt binary layout, copied as-is.
  Layout,
  /// Raw texture, copied as-is.
  Texture,
  /// Message table (`.bmg.json5`), merged per language before encoding.
  LocalizedText,
  /// Any other text resource the encoder understands.
  Encodable,
}

impl AssetKind {
  pub fn classify(path: &str) -> Result<Self, GraphError> {
    match extension(path) {
      Some(".brlyt") => Ok(AssetKind::Layout),
      Some(".tpl") => Ok(AssetKind::Texture),
      Some(".json5") => match extension(strip_extension(path)) {
        Some(".bmg") => Ok(AssetKind::LocalizedText),
        _ => Ok(AssetKind::Encodable),
      },
      _ => Err(unrecognized(path)),
    }
  }

  /// Rule producing the shared intermediate for this kind.
  pub fn rule(self) -> RuleName {
    match self {
      AssetKind::Layout | AssetKind::Texture => RuleName::Cp,
      AssetKind::LocalizedText | AssetKind::Encodable => RuleName::Wuj5,
    }
  }

  /// Intermediate path key: encoded kinds lose their `.json5` suffix.
  pub fn output_key(self, path: &str) -> &str {
    match self {
      AssetKind::Layout | AssetKind::Texture => path,
      AssetKind::LocalizedText | AssetKind::Encodable => strip_extension(path),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  mod sources {
    use super::*;

    #[test]
    fn known_extensions_dispatch() {
      assert_eq!(rule_for_source("game/kart/KartMove.S").unwrap(), RuleName::As);
      assert_eq!(rule_for_source("game/kart/KartObjectManager.c").unwrap(), RuleName::Cc);
      assert_eq!(rule_for_source("game/kart/Kart.cpp").unwrap(), RuleName::Cpp);
    }

    #[test]
    fn extension_match_is_case_sensitive() {
      assert!(rule_for_source("game/kart/KartMove.s").is_err());
      assert!(rule_for_source("game/kart/Kart.C").is_err());
    }

    #[test]
    fn missing_extension_is_rejected() {
      let err = rule_for_source("game/kart/Makefile").unwrap_err();
      match err {
        GraphError::UnrecognizedInput { path, extension } => {
          assert_eq!(path, "game/kart/Makefile");
          assert_eq!(extension, "");
        }
        other => panic!("unexpected error: {other}"),
      }
    }

    #[test]
    fn dots_in_directories_are_ignored() {
      assert!(rule_for_source("lib.c/Makefile").is_err());
      assert_eq!(extension("lib.c/Makefile"), None);
    }
  }

  mod assets {
    use super::*;

    #[test]
    fn classify_by_extension_chain() {
      assert_eq!(AssetKind::classify("message/Menu_F.bmg.json5").unwrap(), AssetKind::LocalizedText);
      assert_eq!(
        AssetKind::classify("button/ctrl/SingleTop.brctr.json5").unwrap(),
        AssetKind::Encodable
      );
      assert_eq!(AssetKind::classify("game_image/timg/tt_speed_E.tpl").unwrap(), AssetKind::Texture);
      assert_eq!(
        AssetKind::classify("game_image/blyt/race_message_half.brlyt").unwrap(),
        AssetKind::Layout
      );
    }

    #[test]
    fn unknown_asset_extension_is_rejected() {
      assert!(matches!(
        AssetKind::classify("game_image/timg/icon.png"),
        Err(GraphError::UnrecognizedInput { .. })
      ));
    }

    #[test]
    fn output_key_drops_only_the_text_suffix() {
      assert_eq!(
        AssetKind::Encodable.output_key("control/ctrl/LicenseDisplay.brctr.json5"),
        "control/ctrl/LicenseDisplay.brctr"
      );
      assert_eq!(AssetKind::Texture.output_key("button/timg/icon.tpl"), "button/timg/icon.tpl");
    }

    #[test]
    fn copy_kinds_use_cp_and_text_kinds_encode() {
      assert_eq!(AssetKind::Layout.rule(), RuleName::Cp);
      assert_eq!(AssetKind::Texture.rule(), RuleName::Cp);
      assert_eq!(AssetKind::LocalizedText.rule(), RuleName::Wuj5);
      assert_eq!(AssetKind::Encodable.rule(), RuleName::Wuj5);
    }
  }
}
