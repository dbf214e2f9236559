//! Package registry lookups.
//!
//! [`PackageRegistry::lookup`] is the fallible transport call. The free functions
//! [`fetch_latest`] and [`fetch_all`] absorb every failure into
//! [`RegistryInfo::unavailable`], so callers never see a registry error.

pub mod npm;

use anyhow::Result;
use async_trait::async_trait;
use futures::future::join_all;
use tracing::{debug, warn};

use crate::models::RegistryInfo;

#[async_trait]
pub trait PackageRegistry: Send + Sync {
    /// Latest published version and last-modified timestamp of `name`.
    async fn lookup(&self, name: &str) -> Result<RegistryInfo>;
}

/// Look up `name`, substituting the `N/A` pair on any failure.
pub async fn fetch_latest(registry: &dyn PackageRegistry, name: &str) -> RegistryInfo {
    match registry.lookup(name).await {
        Ok(info) => {
            debug!(package = name, latest = %info.latest_version, "fetched registry info");
            info
        }
        Err(e) => {
            warn!(package = name, error = %format!("{e:#}"), "registry lookup failed");
            RegistryInfo::unavailable()
        }
    }
}

/// Look up every name concurrently. Results are in input order and the call
/// returns only once all lookups have settled.
pub async fn fetch_all<S: AsRef<str>>(
    registry: &dyn PackageRegistry,
    names: &[S],
    on_settled: impl Fn() + Sync,
) -> Vec<RegistryInfo> {
    let on_settled = &on_settled;
    let lookups = names.iter().map(|name| async move {
        let info = fetch_latest(registry, name.as_ref()).await;
        on_settled();
        info
    });
    join_all(lookups).await
}
