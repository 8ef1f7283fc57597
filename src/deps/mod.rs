// src/deps/mod.rs

//! Dependency references and their file closure.
//!
//! This module is responsible for:
//! - Classifying declared dependency tokens into package and file references.
//! - Recognising `-r` / `-c` (and long-form) include directives.
//! - Expanding root references into the full set of files to watch.
//!
//! It never writes anything; change detection lives in [`crate::detect`].

pub mod closure;
pub mod reference;

pub use closure::ClosureResolver;
pub use reference::{DependencyReference, DirectiveKind, parse_directive};
