//! The fixed rule catalogue.

use crate::graph::GraphError;

use super::dispatch::rule_for_source;
use super::types::{Rule, RuleName};

/// Every rule the graph can reference, in emission order.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
  rules: Vec<Rule>,
}

impl RuleRegistry {
  /// Build the standard catalogue.
  ///
  /// Commands refer to global variables (`$cc`, `$python`, flag tables, tool
  /// scripts) so the catalogue itself does not depend on configuration.
  pub fn standard() -> Self {
    let compile = |tool: &str, flags: &str| format!("{tool} -MD -MT $out -MF $out.d {flags} -c $in -o $out");

    let rules = vec![
      Rule::new(RuleName::As, compile("$cc", "$asflags"))
        .with_description("AS $out")
        .with_gcc_deps(),
      Rule::new(RuleName::Cc, compile("$cc", "$cflags"))
        .with_description("CC $out")
        .with_gcc_deps(),
      Rule::new(RuleName::Cpp, compile("$cpp", "$cppflags"))
        .with_description("CPP $out")
        .with_gcc_deps(),
      Rule::new(RuleName::Port, "$python $port $region $in $out").with_description("PORT $out"),
      Rule::new(
        RuleName::Ld,
        "$cc $ldflags -Wl,--defsym,base=$base -Wl,-T,$script $in -o $out",
      )
      .with_description("LD $out"),
      Rule::new(RuleName::Merge, "$python $merge $in -o $out").with_description("MERGE $out"),
      Rule::new(RuleName::Wuj5, "$python $wuj5 encode $in -o $out").with_description("WUJ5 $out"),
      Rule::new(RuleName::Cp, "cp $in $out").with_description("CP $out"),
      Rule::new(
        RuleName::Szs,
        "$python $wuj5 encode $szsin -o $out --retained $in $args",
      )
      .with_description("SZS $out"),
      Rule::new(RuleName::Configure, "$configure $configure_args")
        .with_description("CONFIGURE $out")
        .as_generator(),
    ];

    Self { rules }
  }

  /// Look up a registered rule.
  ///
  /// Every [`RuleName`] is registered by [`RuleRegistry::standard`], so a
  /// miss means the catalogue was built some other way.
  pub fn get(&self, name: RuleName) -> Option<&Rule> {
    self.rules.iter().find(|rule| rule.name == name)
  }

  /// Rule that compiles the given source file, chosen by its extension.
  pub fn rule_for(&self, path: &str) -> Result<&Rule, GraphError> {
    let name = rule_for_source(path)?;
    self.get(name).ok_or(GraphError::UnregisteredRule(name))
  }

  pub fn iter(&self) -> impl Iterator<Item = &Rule> {
    self.rules.iter()
  }

  pub fn len(&self) -> usize {
    self.rules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rules.is_empty()
  }

  pub fn into_rules(self) -> Vec<Rule> {
    self.rules
  }
}
