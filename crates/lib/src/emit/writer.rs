//! Low-level writer for the executor's file syntax.

use crate::graph::BuildEdge;
use crate::rule::{DepsMode, Rule};

/// Column at which long lines are wrapped.
pub const DEFAULT_WIDTH: usize = 78;

/// Escape a path for use in a build statement.
pub fn escape_path(word: &str) -> String {
  word.replace("$ ", "$$ ").replace(' ', "$ ").replace(':', "$:")
}

/// Accumulates the graph file in memory.
pub struct Writer {
  out: String,
  width: usize,
}

impl Default for Writer {
  fn default() -> Self {
    Self::new()
  }
}

impl Writer {
  pub fn new() -> Self {
    Self::with_width(DEFAULT_WIDTH)
  }

  pub fn with_width(width: usize) -> Self {
    Self {
      out: String::new(),
      width,
    }
  }

  pub fn newline(&mut self) {
    self.out.push('\n');
  }

  pub fn comment(&mut self, text: &str) {
    for line in text.lines() {
      self.out.push_str("# ");
      self.out.push_str(line);
      self.out.push('\n');
    }
  }

  pub fn variable(&mut self, key: &str, value: &str, indent: usize) {
    self.line(&format!("{key} = {value}"), indent);
  }

  pub fn rule(&mut self, rule: &Rule) {
    self.line(&format!("rule {}", rule.name), 0);
    self.variable("command", &rule.command, 1);
    if let Some(description) = &rule.description {
      self.variable("description", description, 1);
    }
    if let Some(depfile) = rule.depfile() {
      self.variable("depfile", depfile, 1);
    }
    if rule.generator {
      self.variable("generator", "1", 1);
    }
    if rule.deps == DepsMode::Gcc {
      self.variable("deps", "gcc", 1);
    }
  }

  pub fn build(&mut self, edge: &BuildEdge) {
    let outputs: Vec<String> = edge.outputs.iter().map(|o| escape_path(o)).collect();
    let mut parts = vec![edge.rule.to_string()];
    parts.extend(edge.inputs.iter().map(|i| escape_path(i)));
    if !edge.implicit.is_empty() {
      parts.push("|".to_string());
      parts.extend(edge.implicit.iter().map(|i| escape_path(i)));
    }

    self.line(&format!("build {}: {}", outputs.join(" "), parts.join(" ")), 0);
    for (key, value) in &edge.variables {
      self.variable(key, value, 1);
    }
  }

  pub fn finish(self) -> String {
    self.out
  }

  /// Write `text`, wrapping at unescaped spaces with ` $` continuations.
  fn line(&mut self, text: &str, indent: usize) {
    let mut leading = "  ".repeat(indent);
    let mut text = text;

    while leading.len() + text.len() > self.width {
      let available = self.width.saturating_sub(leading.len() + 2);
      let Some(split) = find_break(text.as_bytes(), available) else {
        break;
      };
      self.out.push_str(&leading);
      self.out.push_str(&text[..split]);
      self.out.push_str(" $\n");
      text = &text[split + 1..];
      // continuations hang two levels deeper
      leading = "  ".repeat(indent + 2);
    }

    self.out.push_str(&leading);
    self.out.push_str(text);
    self.out.push('\n');
  }
}

/// Rightmost unescaped space before `available`, else the first one after it.
fn find_break(bytes: &[u8], available: usize) -> Option<usize> {
  let unescaped = |index: usize| dollars_before(bytes, index) % 2 == 0;

  let mut end = available.min(bytes.len());
  while let Some(index) = bytes[..end].iter().rposition(|&b| b == b' ') {
    if unescaped(index) {
      return Some(index);
    }
    end = index;
  }

  let mut start = available;
  while start < bytes.len() {
    let index = start + bytes[start..].iter().position(|&b| b == b' ')?;
    if unescaped(index) {
      return Some(index);
    }
    start = index + 1;
  }
  None
}

/// Number of consecutive `$` immediately before `index`, not counting the
/// first byte of the line.
fn dollars_before(bytes: &[u8], index: usize) -> usize {
  let mut count = 0;
  let mut cursor = index;
  while cursor > 1 && bytes[cursor - 1] == b'$' {
    count += 1;
    cursor -= 1;
  }
  count
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::rule::{RuleName, RuleRegistry};

  #[test]
  fn escapes_spaces_and_colons() {
    assert_eq!(escape_path("a b"), "a$ b");
    assert_eq!(escape_path("c:/dir"), "c$:/dir");
    assert_eq!(escape_path("$builddir/x.o"), "$builddir/x.o");
  }

  #[test]
  fn short_lines_are_not_wrapped() {
    let mut writer = Writer::new();
    writer.variable("builddir", "build", 0);
    assert_eq!(writer.finish(), "builddir = build\n");
  }

  #[test]
  fn long_lines_wrap_at_width() {
    let mut writer = Writer::with_width(20);
    writer.variable("flags", "-aaaa -bbbb -cccc -dddd", 0);
    let out = writer.finish();
    assert_eq!(out, "flags = -aaaa $\n    -bbbb -cccc $\n    -dddd\n");
    assert!(out.lines().all(|line| line.len() <= 20));
  }

  #[test]
  fn escaped_spaces_are_never_break_points() {
    let mut writer = Writer::with_width(18);
    writer.line("build a$ b$ c$ d: x", 0);
    assert_eq!(writer.finish(), "build $\n    a$ b$ c$ d: x\n");
  }

  #[test]
  fn unbreakable_lines_are_left_long() {
    let mut writer = Writer::with_width(8);
    writer.line("abcdefghijkl", 0);
    assert_eq!(writer.finish(), "abcdefghijkl\n");
  }

  #[test]
  fn rule_lists_attributes_in_order() {
    let registry = RuleRegistry::standard();
    let mut writer = Writer::new();
    writer.rule(registry.get(RuleName::Cc).unwrap());
    assert_eq!(
      writer.finish(),
      "rule cc\n  command = $cc -MD -MT $out -MF $out.d $cflags -c $in -o $out\n  description = CC $out\n  depfile = $out.d\n  deps = gcc\n"
    );
  }

  #[test]
  fn generator_rule_is_flagged() {
    let registry = RuleRegistry::standard();
    let mut writer = Writer::new();
    writer.rule(registry.get(RuleName::Configure).unwrap());
    assert!(writer.finish().contains("  generator = 1\n"));
  }

  #[test]
  fn build_separates_implicit_inputs() {
    let edge = BuildEdge::new(RuleName::Port, "$builddir/scripts/RMCP.ld")
      .input("symbols.txt")
      .implicit("$port")
      .variable("region", "P");
    let mut writer = Writer::new();
    writer.build(&edge);
    assert_eq!(
      writer.finish(),
      "build $builddir/scripts/RMCP.ld: port symbols.txt | $port\n  region = P\n"
    );
  }
}
