use serde_json::{Map, Value};

use super::{Analyzer, ParsedManifest};
use crate::error::{ManifestError, Result};
use crate::models::{Classification, DeclaredPackage, DependencyNode};

/// Returned by [`PackageLockAnalyzer::build`] when the forest nests deeper than allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthExceeded {
    pub limit: usize,
}

/// Builds the dependency forest of a `package-lock.json`.
///
/// Roots are the top-level `dependencies` entries that the root package
/// (`packages[""]`) declares. Production roots come first, in lockfile order,
/// then development roots in the order of `devDependencies`. Subtrees are copied
/// as nested in the lockfile; a package reachable through several paths appears
/// once per path, and every node inherits its root's classification.
pub struct PackageLockAnalyzer {
    max_depth: usize,
}

impl PackageLockAnalyzer {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Build the forest only.
    pub fn build(&self, document: &Value) -> std::result::Result<Vec<DependencyNode>, DepthExceeded> {
        let mut forest = Vec::new();

        let Some(entries) = document.get("dependencies").and_then(|v| v.as_object()) else {
            return Ok(forest);
        };

        let root_package = document.get("packages").and_then(|p| p.get(""));
        let declared_prod = root_package
            .and_then(|r| r.get("dependencies"))
            .and_then(|v| v.as_object());
        let declared_dev = root_package
            .and_then(|r| r.get("devDependencies"))
            .and_then(|v| v.as_object());

        if let Some(prod) = declared_prod {
            for (name, entry) in entries {
                if prod.contains_key(name) {
                    forest.push(self.build_node(name, entry, Classification::Production, 1)?);
                }
            }
        }

        if let Some(dev) = declared_dev {
            for name in dev.keys() {
                if let Some(entry) = entries.get(name) {
                    forest.push(self.build_node(name, entry, Classification::Development, 1)?);
                }
            }
        }

        Ok(forest)
    }

    fn build_node(
        &self,
        name: &str,
        entry: &Value,
        classification: Classification,
        depth: usize,
    ) -> std::result::Result<DependencyNode, DepthExceeded> {
        if depth > self.max_depth {
            return Err(DepthExceeded {
                limit: self.max_depth,
            });
        }

        let resolved_version = entry
            .get("version")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        let children = match entry.get("dependencies").and_then(|v| v.as_object()) {
            Some(nested) => self.build_children(nested, classification, depth + 1)?,
            None => Vec::new(),
        };

        Ok(DependencyNode {
            name: name.to_string(),
            resolved_version,
            classification,
            children,
        })
    }

    fn build_children(
        &self,
        nested: &Map<String, Value>,
        classification: Classification,
        depth: usize,
    ) -> std::result::Result<Vec<DependencyNode>, DepthExceeded> {
        nested
            .iter()
            .map(|(name, entry)| self.build_node(name, entry, classification, depth))
            .collect()
    }
}

impl Analyzer for PackageLockAnalyzer {
    fn analyze(&self, file_identifier: &str, document: &Value) -> Result<ParsedManifest> {
        let forest = self.build(document).map_err(|e| ManifestError::NestingTooDeep {
            file: file_identifier.to_string(),
            limit: e.limit,
        })?;

        let mut packages = Vec::new();
        for root in &forest {
            root.walk(&mut |node| {
                packages.push(DeclaredPackage::new(
                    node.name.clone(),
                    node.resolved_version.clone(),
                    node.classification,
                ));
            });
        }

        Ok(ParsedManifest { packages, forest })
    }
}
