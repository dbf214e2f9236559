//! The currently loaded document and the enrichment state of its rows.
//!
//! Parsed records stay immutable; enrichment status lives beside them in a map
//! keyed by [`RowId`]. Every successful [`Session::load`] bumps the generation,
//! and tickets issued for an older generation are rejected on completion.

use std::collections::HashMap;

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, info};

use crate::analyzer::{self, DEFAULT_MAX_DEPTH};
use crate::error::Result;
use crate::models::{DeclaredPackage, DependencyNode, EnrichmentState, RegistryInfo};
use crate::registry::{fetch_all, fetch_latest, PackageRegistry};

static NOT_FETCHED: EnrichmentState = EnrichmentState::NotFetched;

/// Position of a package in the flat list of the current generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub usize);

/// An in-flight single-row request.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    generation: u64,
    row: RowId,
    name: String,
}

impl FetchTicket {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// An in-flight bulk request covering every row.
#[derive(Debug, Clone)]
pub struct BulkTicket {
    generation: u64,
    names: Vec<String>,
}

impl BulkTicket {
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

pub struct Session {
    generation: u64,
    source: Option<String>,
    packages: Vec<DeclaredPackage>,
    forest: Vec<DependencyNode>,
    enrichment: HashMap<RowId, EnrichmentState>,
    max_depth: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl Session {
    pub fn new(max_depth: usize) -> Self {
        Self {
            generation: 0,
            source: None,
            packages: Vec::new(),
            forest: Vec::new(),
            enrichment: HashMap::new(),
            max_depth,
        }
    }

    /// Parse `text` and replace everything held by the session.
    ///
    /// On error the previous document, forest and enrichment state are kept.
    pub fn load(&mut self, text: &str, file_identifier: &str) -> Result<()> {
        let parsed = analyzer::parse(text, file_identifier, self.max_depth)?;

        self.generation += 1;
        self.source = Some(file_identifier.to_string());
        self.packages = parsed.packages;
        self.forest = parsed.forest;
        self.enrichment.clear();

        info!(
            file = file_identifier,
            generation = self.generation,
            packages = self.packages.len(),
            "loaded manifest"
        );
        Ok(())
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn packages(&self) -> &[DeclaredPackage] {
        &self.packages
    }

    pub fn forest(&self) -> &[DependencyNode] {
        &self.forest
    }

    pub fn state(&self, row: RowId) -> &EnrichmentState {
        self.enrichment.get(&row).unwrap_or(&NOT_FETCHED)
    }

    pub fn rows(&self) -> impl Iterator<Item = (RowId, &DeclaredPackage, &EnrichmentState)> {
        self.packages
            .iter()
            .enumerate()
            .map(move |(i, pkg)| (RowId(i), pkg, self.state(RowId(i))))
    }

    /// Every row whose package is called `name`.
    pub fn rows_named(&self, name: &str) -> Vec<RowId> {
        self.rows()
            .filter(|(_, pkg, _)| pkg.name == name)
            .map(|(row, _, _)| row)
            .collect()
    }

    /// Mark `row` as fetching. `None` if the row does not exist.
    pub fn begin_fetch(&mut self, row: RowId) -> Option<FetchTicket> {
        let name = self.packages.get(row.0)?.name.clone();
        self.enrichment.insert(row, EnrichmentState::Fetching);
        Some(FetchTicket {
            generation: self.generation,
            row,
            name,
        })
    }

    /// Store the result of a single-row request. Returns false for a stale ticket.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, info: RegistryInfo) -> bool {
        if ticket.generation != self.generation {
            debug!(
                package = %ticket.name,
                ticket_generation = ticket.generation,
                generation = self.generation,
                "dropping stale fetch result"
            );
            return false;
        }
        self.enrichment.insert(ticket.row, EnrichmentState::Fetched(info));
        true
    }

    /// Mark every row as fetching and hand out the names to look up.
    pub fn begin_bulk(&mut self) -> BulkTicket {
        let names: Vec<String> = self.packages.iter().map(|p| p.name.clone()).collect();
        self.enrichment = (0..names.len())
            .map(|i| (RowId(i), EnrichmentState::Fetching))
            .collect();
        BulkTicket {
            generation: self.generation,
            names,
        }
    }

    /// Replace the whole enrichment map in one step.
    ///
    /// `results` must be in ticket order. Returns false for a stale ticket or a
    /// result count that does not match.
    pub fn complete_bulk(&mut self, ticket: BulkTicket, results: Vec<RegistryInfo>) -> bool {
        if ticket.generation != self.generation || results.len() != ticket.names.len() {
            debug!(
                ticket_generation = ticket.generation,
                generation = self.generation,
                "dropping stale bulk result"
            );
            return false;
        }
        self.enrichment = results
            .into_iter()
            .enumerate()
            .map(|(i, info)| (RowId(i), EnrichmentState::Fetched(info)))
            .collect();
        true
    }

    /// Fetch registry info for every row and apply it once all lookups settle.
    pub async fn enrich_all(
        &mut self,
        registry: &dyn PackageRegistry,
        on_settled: impl Fn() + Sync,
    ) -> bool {
        let ticket = self.begin_bulk();
        let results = fetch_all(registry, ticket.names(), on_settled).await;
        self.complete_bulk(ticket, results)
    }

    /// Refresh individual rows concurrently. Each row is updated as soon as its
    /// own lookup finishes. Returns how many rows were updated.
    pub async fn refresh_rows(&mut self, registry: &dyn PackageRegistry, rows: &[RowId]) -> usize {
        let tickets: Vec<FetchTicket> = rows.iter().filter_map(|row| self.begin_fetch(*row)).collect();

        let mut pending: FuturesUnordered<_> = tickets
            .into_iter()
            .map(|ticket| async move {
                let info = fetch_latest(registry, ticket.name()).await;
                (ticket, info)
            })
            .collect();

        let mut updated = 0;
        while let Some((ticket, info)) = pending.next().await {
            if self.complete_fetch(ticket, info) {
                updated += 1;
            }
        }
        updated
    }
}
