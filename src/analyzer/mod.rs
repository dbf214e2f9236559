//! Turn an uploaded JSON document into the two views the rest of the tool works on:
//! a flat [`DeclaredPackage`] list and a [`DependencyNode`] forest.
//!
//! - [`package_json`] reads `dependencies` / `devDependencies` of a simple manifest.
//! - [`package_lock`] builds the nested tree of a `package-lock.json`.

use serde_json::Value;
use tracing::debug;

use crate::detector::{detect_kind, ManifestKind};
use crate::error::{ManifestError, Result};
use crate::models::{DeclaredPackage, DependencyNode};

pub mod package_json;
pub mod package_lock;

/// Deepest lockfile nesting `serde_json` can read. Its parser stops at 128 nested
/// JSON values and every lockfile level takes two (the entry and its
/// `dependencies` map), so a node one level past this bound must still parse.
pub const MAX_SUPPORTED_DEPTH: usize = 62;

/// Recursion limit used when no configuration overrides it.
pub const DEFAULT_MAX_DEPTH: usize = 48;

/// Both views derived from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedManifest {
    pub packages: Vec<DeclaredPackage>,
    pub forest: Vec<DependencyNode>,
}

pub trait Analyzer {
    fn analyze(&self, file_identifier: &str, document: &Value) -> Result<ParsedManifest>;
}

/// Parse `text` according to the kind implied by `file_identifier`.
pub fn parse(text: &str, file_identifier: &str, max_depth: usize) -> Result<ParsedManifest> {
    let document: Value =
        serde_json::from_str(text).map_err(|source| ManifestError::MalformedInput {
            file: file_identifier.to_string(),
            source,
        })?;

    let kind = detect_kind(file_identifier);
    let parsed = match kind {
        ManifestKind::Lockfile => {
            package_lock::PackageLockAnalyzer::new(max_depth).analyze(file_identifier, &document)?
        }
        ManifestKind::Manifest => package_json::PackageJsonAnalyzer.analyze(file_identifier, &document)?,
    };

    debug!(
        file = file_identifier,
        ?kind,
        packages = parsed.packages.len(),
        roots = parsed.forest.len(),
        "parsed manifest"
    );

    Ok(parsed)
}
