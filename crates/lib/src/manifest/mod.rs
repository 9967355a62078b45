//! The declarative manifest compiled into the build graph.
//!
//! The manifest is a set of immutable, strongly-typed records built once at
//! startup. [`Manifest::builtin`] returns the project manifest; tests build
//! smaller ones directly from the record types.

mod builtin;
mod types;

pub use types::*;
