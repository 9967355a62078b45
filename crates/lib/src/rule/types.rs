use serde::Serialize;

/// Identity of every rule the graph may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleName {
  /// Assemble a `.S` source.
  As,
  /// Compile a C source.
  Cc,
  /// Compile a C++ source.
  Cpp,
  /// Derive a region linker script from the symbol map.
  Port,
  /// Link objects into a flat binary.
  Ld,
  /// Merge the three localized text candidates.
  Merge,
  /// Encode a text asset into its binary form.
  Wuj5,
  /// Copy an asset unchanged.
  Cp,
  /// Pack an archive.
  Szs,
  /// Regenerate the graph file itself.
  Configure,
}

impl RuleName {
  pub const ALL: [RuleName; 10] = [
    RuleName::As,
    RuleName::Cc,
    RuleName::Cpp,
    RuleName::Port,
    RuleName::Ld,
    RuleName::Merge,
    RuleName::Wuj5,
    RuleName::Cp,
    RuleName::Szs,
    RuleName::Configure,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      RuleName::As => "as",
      RuleName::Cc => "cc",
      RuleName::Cpp => "cpp",
      RuleName::Port => "port",
      RuleName::Ld => "ld",
      RuleName::Merge => "merge",
      RuleName::Wuj5 => "wuj5",
      RuleName::Cp => "cp",
      RuleName::Szs => "szs",
      RuleName::Configure => "configure",
    }
  }
}

impl std::fmt::Display for RuleName {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// How the executor learns about headers a command read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DepsMode {
  /// No dependency file.
  None,
  /// The toolchain writes a gcc-style dependency file next to the output.
  Gcc,
}

/// A named command template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
  pub name: RuleName,
  pub command: String,
  pub description: Option<String>,
  pub deps: DepsMode,
  /// Marks the rule that rewrites the graph file.
  pub generator: bool,
}

impl Rule {
  pub fn new(name: RuleName, command: impl Into<String>) -> Self {
    Self {
      name,
      command: command.into(),
      description: None,
      deps: DepsMode::None,
      generator: false,
    }
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }

  pub fn with_gcc_deps(mut self) -> Self {
    self.deps = DepsMode::Gcc;
    self
  }

  pub fn as_generator(mut self) -> Self {
    self.generator = true;
    self
  }

  /// Dependency file written by the command, if any.
  pub fn depfile(&self) -> Option<&'static str> {
    match self.deps {
      DepsMode::None => None,
      DepsMode::Gcc => Some("$out.d"),
    }
  }
}
