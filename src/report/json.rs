use anyhow::Result;
use serde::Serialize;

use crate::session::Session;
use crate::view::{graph_root, summarize, table_rows, GraphNode, Summary, TableFilter, TableRow};

/// Machine-readable form of both views.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub file: Option<String>,
    pub summary: Summary,
    pub packages: Vec<TableRow>,
    pub graph: Option<GraphNode>,
}

impl JsonReport {
    pub fn build(session: &Session, filter: TableFilter) -> Self {
        Self {
            file: session.source().map(str::to_string),
            summary: summarize(session),
            packages: table_rows(session, filter),
            graph: graph_root(session.forest()),
        }
    }
}

pub fn render(session: &Session, filter: TableFilter) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&JsonReport::build(session, filter))?);
    Ok(())
}
