//! Renderers for a loaded session.
//!
//! - [`terminal`] — summary box and colored package table.
//! - [`tree`] — the dependency graph drawn as an indented tree.
//! - [`json`] — both views serialized for other tools.

pub mod json;
pub mod terminal;
pub mod tree;
