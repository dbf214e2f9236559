use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::PackageRegistry;
use crate::models::RegistryInfo;

pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

#[derive(Debug, Deserialize)]
struct Packument {
    #[serde(rename = "dist-tags")]
    dist_tags: DistTags,
    time: PublishTimes,
}

#[derive(Debug, Deserialize)]
struct DistTags {
    latest: String,
}

#[derive(Debug, Deserialize)]
struct PublishTimes {
    modified: String,
}

/// Reads package documents from an npm-compatible registry.
pub struct NpmRegistry {
    client: Client,
    base_url: String,
}

impl NpmRegistry {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pkglens/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn package_url(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, encode_name(name))
    }
}

/// Scoped packages need URL encoding: `@scope/pkg` → `%40scope%2Fpkg`.
pub fn encode_name(name: &str) -> String {
    name.replace('@', "%40").replace('/', "%2F")
}

#[async_trait]
impl PackageRegistry for NpmRegistry {
    #[tracing::instrument(skip(self))]
    async fn lookup(&self, name: &str) -> Result<RegistryInfo> {
        let url = self.package_url(name);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to reach registry for {name}"))?;

        if !response.status().is_success() {
            bail!("Registry returned {} for {}", response.status(), name);
        }

        let doc: Packument = response
            .json()
            .await
            .with_context(|| format!("Unexpected registry document for {name}"))?;

        Ok(RegistryInfo {
            latest_version: doc.dist_tags.latest,
            last_published: doc.time.modified,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::fetch_latest;

    #[test]
    fn test_encode_scoped_name() {
        assert_eq!(encode_name("@types/node"), "%40types%2Fnode");
        assert_eq!(encode_name("left-pad"), "left-pad");
    }

    #[test]
    fn test_package_url_trims_trailing_slash() {
        let registry = NpmRegistry::with_client(Client::new(), "http://localhost:1234/");
        assert_eq!(registry.package_url("react"), "http://localhost:1234/react");
    }

    #[tokio::test]
    async fn test_lookup_reads_latest_and_modified() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/left-pad")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
  "name": "left-pad",
  "dist-tags": { "latest": "1.3.0" },
  "time": { "created": "2014-03-14T00:00:00.000Z", "modified": "2022-06-19T12:34:56.000Z" }
}"#,
            )
            .create_async()
            .await;

        let registry = NpmRegistry::with_client(Client::new(), server.url());
        let info = registry.lookup("left-pad").await.unwrap();

        mock.assert_async().await;
        assert_eq!(info.latest_version, "1.3.0");
        assert_eq!(info.last_published, "2022-06-19T12:34:56.000Z");
    }

    #[tokio::test]
    async fn test_lookup_not_found_is_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/does-not-exist")
            .with_status(404)
            .with_body(r#"{"error":"Not found"}"#)
            .create_async()
            .await;

        let registry = NpmRegistry::with_client(Client::new(), server.url());
        let result = registry.lookup("does-not-exist").await;

        mock.assert_async().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_soft_failure_on_unexpected_document() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/broken")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name":"broken"}"#)
            .create_async()
            .await;

        let registry = NpmRegistry::with_client(Client::new(), server.url());
        let info = fetch_latest(&registry, "broken").await;
        assert_eq!(info, RegistryInfo::unavailable());
    }

    #[tokio::test]
    async fn test_soft_failure_on_unreachable_registry() {
        let registry = NpmRegistry::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        let info = fetch_latest(&registry, "react").await;
        assert_eq!(info, RegistryInfo::unavailable());
    }
}
