//! Rule catalogue and source dispatch.
//!
//! Rules are the named command templates shared by many build edges. The
//! catalogue is fixed: every rule is registered once at startup by
//! [`RuleRegistry::standard`], and the dispatch tables map each known
//! file extension to exactly one rule with no fallback.
//!
//! # Submodules
//!
//! - [`registry`] - the fixed rule catalogue
//! - [`dispatch`] - extension to rule mapping for sources and assets
//! - [`flags`] - toolchain flag tables emitted as global variables

pub mod dispatch;
pub mod flags;
pub mod registry;
mod types;

pub use dispatch::{AssetKind, rule_for_source};
pub use registry::RuleRegistry;
pub use types::*;
