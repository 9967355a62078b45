//! Environment configuration for a graph compilation run.
//!
//! Values are read from the environment with compiled-in defaults, then
//! individual fields can be overridden by the caller (the CLI maps its flags
//! onto the `with_*` methods). Toolchain presence is never checked here: the
//! paths are passed through to the emitted graph as opaque variables.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::consts::{APP_NAME, DEFAULT_BUILDDIR, DEFAULT_GRAPH_FILE, DEFAULT_OUTDIR, DEFAULT_PYTHON};

pub const DEVKITPPC_ENV: &str = "DEVKITPPC";
pub const PYTHON_ENV: &str = "MKGRAPH_PYTHON";
pub const BUILDDIR_ENV: &str = "MKGRAPH_BUILDDIR";
pub const OUTDIR_ENV: &str = "MKGRAPH_OUTDIR";

/// Fatal problems with the environment or the manifest data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
  #[error("required environment variable {0} is not set")]
  MissingEnv(String),

  #[error("invalid manifest: {0}")]
  InvalidManifest(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  /// Root of the PowerPC toolchain.
  pub devkitppc: PathBuf,
  /// Interpreter for the port, merge and encoder tools.
  pub python: String,
  pub builddir: String,
  pub outdir: String,
  /// Where the graph file is written, relative to the invocation directory.
  pub graph_file: String,
  /// Executable re-run by the regeneration edge.
  pub generator: String,
}

impl Config {
  /// Load configuration from the environment.
  ///
  /// # Errors
  ///
  /// Returns `ConfigError::MissingEnv` if `DEVKITPPC` is unset or empty.
  pub fn from_env() -> Result<Self, ConfigError> {
    let devkitppc = match std::env::var(DEVKITPPC_ENV) {
      Ok(value) if !value.is_empty() => PathBuf::from(value),
      _ => return Err(ConfigError::MissingEnv(DEVKITPPC_ENV.to_string())),
    };

    Ok(Self {
      devkitppc,
      python: env_or(PYTHON_ENV, DEFAULT_PYTHON),
      builddir: env_or(BUILDDIR_ENV, DEFAULT_BUILDDIR),
      outdir: env_or(OUTDIR_ENV, DEFAULT_OUTDIR),
      graph_file: DEFAULT_GRAPH_FILE.to_string(),
      generator: APP_NAME.to_string(),
    })
  }

  /// Configuration with a fixed toolchain root and defaults everywhere else.
  pub fn with_toolchain(devkitppc: impl Into<PathBuf>) -> Self {
    Self {
      devkitppc: devkitppc.into(),
      python: DEFAULT_PYTHON.to_string(),
      builddir: DEFAULT_BUILDDIR.to_string(),
      outdir: DEFAULT_OUTDIR.to_string(),
      graph_file: DEFAULT_GRAPH_FILE.to_string(),
      generator: APP_NAME.to_string(),
    }
  }

  pub fn with_builddir(mut self, builddir: &str) -> Self {
    self.builddir = builddir.to_string();
    self
  }

  pub fn with_outdir(mut self, outdir: &str) -> Self {
    self.outdir = outdir.to_string();
    self
  }

  pub fn with_graph_file(mut self, graph_file: &str) -> Self {
    self.graph_file = graph_file.to_string();
    self
  }

  pub fn with_generator(mut self, generator: &str) -> Self {
    self.generator = generator.to_string();
    self
  }

  pub fn cc(&self) -> String {
    tool_path(&self.devkitppc, "powerpc-eabi-gcc")
  }

  pub fn cpp(&self) -> String {
    tool_path(&self.devkitppc, "powerpc-eabi-g++")
  }

  /// Generator path as a single shell word.
  pub fn generator_command(&self) -> Cow<'_, str> {
    shell_quote(&self.generator)
  }

  /// Arguments the regeneration edge passes back to the generator so the
  /// rebuilt graph matches this one. Each value is one shell word.
  pub fn regenerate_args(&self) -> String {
    format!(
      "generate --builddir {} --outdir {} --output {}",
      shell_quote(&self.builddir),
      shell_quote(&self.outdir),
      shell_quote(&self.graph_file)
    )
  }
}

/// Quote `value` for `/bin/sh` unless it is made of safe characters only.
fn shell_quote(value: &str) -> Cow<'_, str> {
  let safe = |c: char| c.is_ascii_alphanumeric() || "-_./=:+,@%".contains(c);
  if !value.is_empty() && value.chars().all(safe) {
    Cow::Borrowed(value)
  } else {
    Cow::Owned(format!("'{}'", value.replace('\'', "'\\''")))
  }
}

fn env_or(name: &str, default: &str) -> String {
  match std::env::var(name) {
    Ok(value) if !value.is_empty() => value,
    _ => default.to_string(),
  }
}

fn tool_path(root: &Path, tool: &str) -> String {
  root.join("bin").join(tool).to_string_lossy().into_owned()
}
