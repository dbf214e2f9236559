use chrono::{DateTime, Utc};
use serde::Serialize;

/// Sentinel recorded when registry metadata could not be obtained.
pub const UNAVAILABLE: &str = "N/A";

/// Whether a package was declared as a runtime or a development dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Classification {
    #[serde(rename = "dependency")]
    Production,
    #[serde(rename = "devDependency")]
    Development,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Production => write!(f, "dependency"),
            Classification::Development => write!(f, "devDependency"),
        }
    }
}

/// A package as listed in the uploaded document.
///
/// For a lockfile the constraint is the pinned version of the tree node the
/// entry was flattened from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredPackage {
    pub name: String,
    pub version_constraint: String,
    pub classification: Classification,
}

impl DeclaredPackage {
    pub fn new(
        name: impl Into<String>,
        version_constraint: impl Into<String>,
        classification: Classification,
    ) -> Self {
        Self {
            name: name.into(),
            version_constraint: version_constraint.into(),
            classification,
        }
    }
}

/// One node of the lockfile forest. Children are never shared between nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyNode {
    pub name: String,
    pub resolved_version: String,
    pub classification: Classification,
    pub children: Vec<DependencyNode>,
}

impl DependencyNode {
    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(DependencyNode::node_count).sum::<usize>()
    }

    /// Pre-order walk: parent first, then each child subtree in order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a DependencyNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// Metadata returned by a registry lookup, or the `N/A` pair on soft-failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryInfo {
    pub latest_version: String,
    pub last_published: String,
}

impl RegistryInfo {
    pub fn unavailable() -> Self {
        Self {
            latest_version: UNAVAILABLE.to_string(),
            last_published: UNAVAILABLE.to_string(),
        }
    }

    /// Parses `last_published` as an RFC 3339 timestamp.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.last_published)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Enrichment lifecycle of a single row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EnrichmentState {
    #[default]
    NotFetched,
    Fetching,
    Fetched(RegistryInfo),
}

impl EnrichmentState {
    pub fn info(&self) -> Option<&RegistryInfo> {
        match self {
            EnrichmentState::Fetched(info) => Some(info),
            _ => None,
        }
    }
}

impl std::fmt::Display for EnrichmentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnrichmentState::NotFetched => write!(f, "not fetched"),
            EnrichmentState::Fetching => write!(f, "fetching"),
            EnrichmentState::Fetched(_) => write!(f, "fetched"),
        }
    }
}
