//! View models shared by every renderer.
//!
//! Table rows pair each declared package with its enrichment state; the graph
//! wraps a multi-root forest in a synthetic container so renderers always get
//! a single root.

use serde::Serialize;

use crate::models::{Classification, DeclaredPackage, DependencyNode, EnrichmentState, UNAVAILABLE};
use crate::outdated::{is_outdated, update_kind, UpdateKind};
use crate::session::Session;

/// Label of the synthetic root inserted above several real roots.
pub const CONTAINER_LABEL: &str = "Dependencies";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFilter {
    #[default]
    All,
    Production,
    Development,
}

impl TableFilter {
    pub fn accepts(&self, classification: Classification) -> bool {
        match self {
            TableFilter::All => true,
            TableFilter::Production => classification == Classification::Production,
            TableFilter::Development => classification == Classification::Development,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TableRow {
    pub name: String,
    pub current: String,
    pub latest: String,
    pub last_published: String,
    #[serde(rename = "type")]
    pub classification: Classification,
    pub state: String,
    pub outdated: bool,
    #[serde(skip)]
    pub update: Option<UpdateKind>,
}

/// `MMM d, yyyy`, or `N/A` when the timestamp is missing or unparseable.
fn format_published(state: &EnrichmentState) -> String {
    state
        .info()
        .and_then(|info| info.published_at())
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| UNAVAILABLE.to_string())
}

fn table_row(pkg: &DeclaredPackage, state: &EnrichmentState) -> TableRow {
    let latest = state
        .info()
        .map(|info| info.latest_version.clone())
        .unwrap_or_else(|| UNAVAILABLE.to_string());

    TableRow {
        name: pkg.name.clone(),
        current: pkg.version_constraint.clone(),
        outdated: is_outdated(&pkg.version_constraint, &latest),
        update: update_kind(&pkg.version_constraint, &latest),
        latest,
        last_published: format_published(state),
        classification: pkg.classification,
        state: state.to_string(),
    }
}

pub fn table_rows(session: &Session, filter: TableFilter) -> Vec<TableRow> {
    session
        .rows()
        .filter(|(_, pkg, _)| filter.accepts(pkg.classification))
        .map(|(_, pkg, state)| table_row(pkg, state))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    #[serde(rename = "dependency")]
    Production,
    #[serde(rename = "devDependency")]
    Development,
    /// Synthetic root. Renderers show no classification badge for it.
    #[serde(rename = "root")]
    Container,
}

impl From<Classification> for NodeKind {
    fn from(c: Classification) -> Self {
        match c {
            Classification::Production => NodeKind::Production,
            Classification::Development => NodeKind::Development,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub children: Vec<GraphNode>,
}

impl GraphNode {
    fn from_node(node: &DependencyNode) -> Self {
        Self {
            label: format!("{}@{}", node.name, node.resolved_version),
            kind: node.classification.into(),
            children: node.children.iter().map(GraphNode::from_node).collect(),
        }
    }
}

/// Single-rooted graph for the forest, or `None` when there is nothing to draw.
pub fn graph_root(forest: &[DependencyNode]) -> Option<GraphNode> {
    match forest {
        [] => None,
        [only] => Some(GraphNode::from_node(only)),
        roots => Some(GraphNode {
            label: CONTAINER_LABEL.to_string(),
            kind: NodeKind::Container,
            children: roots.iter().map(GraphNode::from_node).collect(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub production: usize,
    pub development: usize,
    /// Nodes across the whole forest, roots included.
    pub nested: usize,
    pub outdated: usize,
}

pub fn summarize(session: &Session) -> Summary {
    let count = |c: Classification| {
        session
            .packages()
            .iter()
            .filter(|p| p.classification == c)
            .count()
    };

    Summary {
        total: session.packages().len(),
        production: count(Classification::Production),
        development: count(Classification::Development),
        nested: session.forest().iter().map(DependencyNode::node_count).sum(),
        outdated: table_rows(session, TableFilter::All)
            .iter()
            .filter(|r| r.outdated)
            .count(),
    }
}
