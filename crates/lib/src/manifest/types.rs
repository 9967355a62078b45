//! Manifest record types.
//!
//! # Structure
//!
//! - `code_targets`: linked binaries and their ordered source lists
//! - `regions`: binary regions each per-region target is linked for
//! - `archives` / `localized_archives`: packed archives and their ordered members
//! - `languages`: language codes the localized archives are expanded for
//! - `renames`: canonical names applied inside every packed archive
//!
//! Member and source order is significant everywhere: it becomes link order
//! and pack order in the emitted graph.

use serde::Serialize;

use crate::util::hash::Hashable;

/// A discrete binary region of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Region {
  P,
  E,
  J,
  K,
}

impl Region {
  pub const ALL: [Region; 4] = [Region::P, Region::E, Region::J, Region::K];

  pub fn code(self) -> &'static str {
    match self {
      Region::P => "P",
      Region::E => "E",
      Region::J => "J",
      Region::K => "K",
    }
  }

  /// Load address of the payload image in this region's executable.
  pub fn base_address(self) -> &'static str {
    match self {
      Region::P => "0x8076db60",
      Region::E => "0x80769400",
      Region::J => "0x8076cca0",
      Region::K => "0x8075bfe0",
    }
  }

  /// Linker script ported from the symbol map for this region.
  pub fn linker_script(self, builddir: &str) -> String {
    format!("{builddir}/scripts/RMC{}.ld", self.code())
  }
}

impl std::fmt::Display for Region {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.code())
  }
}

/// A text/asset language code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Language {
  E,
  F,
  G,
  I,
  J,
  K,
  M,
  Q,
  S,
  U,
}

impl Language {
  pub const ALL: [Language; 10] = [
    Language::E,
    Language::F,
    Language::G,
    Language::I,
    Language::J,
    Language::K,
    Language::M,
    Language::Q,
    Language::S,
    Language::U,
  ];

  /// Language whose tables fill in anything a specific language lacks.
  pub const UNIVERSAL: Language = Language::U;

  pub fn code(self) -> &'static str {
    match self {
      Language::E => "E",
      Language::F => "F",
      Language::G => "G",
      Language::I => "I",
      Language::J => "J",
      Language::K => "K",
      Language::M => "M",
      Language::Q => "Q",
      Language::S => "S",
      Language::U => "U",
    }
  }

  /// Suffix distinguishing this language's archive.
  pub fn archive_suffix(self) -> String {
    format!("_{}", self.code())
  }
}

impl std::fmt::Display for Language {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.code())
  }
}

/// How a code target is linked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum LinkSpec {
  /// One image at a fixed address with a checked-in script.
  Fixed { output: String, base: String, script: String },
  /// One image per region, named `<dir>/<stem><region>.bin`.
  PerRegion { dir: String, stem: String },
}

/// A linked binary and its ordered sources.
///
/// Source paths are relative to the directory named after the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeTarget {
  pub name: String,
  pub sources: Vec<String>,
  pub link: LinkSpec,
}

impl CodeTarget {
  pub fn new(name: &str, sources: &[&str], link: LinkSpec) -> Self {
    Self {
      name: name.to_string(),
      sources: sources.iter().map(|s| s.to_string()).collect(),
      link,
    }
  }

  /// Source path relative to the project root.
  pub fn source_path(&self, source: &str) -> String {
    format!("{}/{}", self.name, source)
  }
}

/// A packed archive and its ordered asset members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveTarget {
  pub name: String,
  pub members: Vec<String>,
}

impl ArchiveTarget {
  pub fn new(name: &str, members: &[&str]) -> Self {
    Self {
      name: name.to_string(),
      members: members.iter().map(|s| s.to_string()).collect(),
    }
  }
}

/// An archive family produced once per language.
///
/// Members may contain [`LocalizedArchive::LANGUAGE_PLACEHOLDER`], replaced
/// by the language code on expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedArchive {
  pub stem: String,
  pub members: Vec<String>,
}

impl LocalizedArchive {
  pub const LANGUAGE_PLACEHOLDER: &'static str = "{lang}";

  pub fn new(stem: &str, members: &[&str]) -> Self {
    Self {
      stem: stem.to_string(),
      members: members.iter().map(|s| s.to_string()).collect(),
    }
  }

  /// The concrete archive for one language.
  pub fn for_language(&self, language: Language) -> ArchiveTarget {
    ArchiveTarget {
      name: format!("{}{}.szs", self.stem, language.archive_suffix()),
      members: self
        .members
        .iter()
        .map(|member| member.replace(Self::LANGUAGE_PLACEHOLDER, language.code()))
        .collect(),
    }
  }
}

/// Filenames collapsed to a canonical name inside packed archives.
///
/// Applied only by the packer; intermediate output paths keep their
/// region/language-suffixed names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenameTable {
  entries: Vec<(String, String)>,
}

impl RenameTable {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, from: &str, to: &str) {
    self.entries.push((from.to_string(), to.to_string()));
  }

  pub fn with(mut self, from: &str, to: &str) -> Self {
    self.insert(from, to);
    self
  }

  #[cfg(test)]
  pub(crate) fn canonical_name<'a>(&'a self, name: &'a str) -> &'a str {
    self
      .entries
      .iter()
      .find(|(from, _)| from == name)
      .map(|(_, to)| to.as_str())
      .unwrap_or(name)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.entries.iter().map(|(from, to)| (from.as_str(), to.as_str()))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Flattened `--renamed <from> <to>` arguments for the encoder.
  pub fn to_args(&self) -> String {
    self
      .iter()
      .map(|(from, to)| format!("--renamed {from} {to}"))
      .collect::<Vec<_>>()
      .join(" ")
  }
}

/// The complete declarative description the graph is compiled from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Manifest {
  pub code_targets: Vec<CodeTarget>,
  /// Symbol map every region linker script is ported from.
  pub symbol_map: String,
  pub regions: Vec<Region>,
  pub archives: Vec<ArchiveTarget>,
  pub localized_archives: Vec<LocalizedArchive>,
  pub languages: Vec<Language>,
  pub renames: RenameTable,
}

impl Hashable for Manifest {}
