//! mkgraph-lib: compiles the project manifest into a build graph
//!
//! This crate provides the pieces the `mkgraph` CLI strings together:
//! - `Manifest`: the declarative list of code targets and asset archives
//! - `RuleRegistry`: the fixed catalogue of command templates
//! - `graph::compile`: manifest to `BuildGraph`, with the one-producer check
//! - `emit`: the graph file writer

pub mod config;
pub mod consts;
pub mod emit;
pub mod graph;
pub mod manifest;
pub mod rule;
pub mod util;
