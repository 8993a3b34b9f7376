//! HTTP client for The Met Collection API
//!
//! Two endpoints are used:
//! - `GET /public/collection/v1/objects?departmentIds={id}`: every object
//!   identifier of a department (the collection index)
//! - `GET /public/collection/v1/objects/{id}`: one object record
//!
//! # Example
//!
//! ```no_run
//! use arxcollection::CollectionClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CollectionClient::new().await?;
//!     let index = client.fetch_index().await?;
//!     println!("{} objects", index.len());
//!
//!     // Never fails: errors become ArtworkRecord::Error
//!     let record = client.fetch_random_artwork(&index).await;
//!     println!("{:?}", record.artwork().map(|a| &a.title));
//!     Ok(())
//! }
//! ```

use crate::error::{Error, Result};
use crate::models::{ArtObject, ArtworkRecord, CollectionIndex, ObjectId, ObjectsResponse};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Default Collection API base URL
pub const DEFAULT_BASE_URL: &str = "https://collectionapi.metmuseum.org";

/// Path prefix of the objects endpoints
pub const OBJECTS_PATH: &str = "/public/collection/v1/objects";

/// Default department (19 = Photographs)
pub const DEFAULT_DEPARTMENT_ID: u32 = 19;

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = "ArtXR/0.1.0 (arxcollection)";

/// Collection API HTTP client
///
/// Stateless: the index is returned to the caller, who keeps it for the
/// lifetime of the process.
#[derive(Debug, Clone)]
pub struct CollectionClient {
    pub(crate) client: Client,
    base_url: String,
    department_id: u32,
    timeout: Duration,
}

impl CollectionClient {
    /// Create a new client with default settings
    pub async fn new() -> Result<Self> {
        Self::builder().build().await
    }

    /// Create a builder for configuring the client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client with a custom reqwest::Client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            department_id: DEFAULT_DEPARTMENT_ID,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn department_id(&self) -> u32 {
        self.department_id
    }

    /// URL of the department index
    pub fn index_url(&self) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, OBJECTS_PATH))?;
        url.query_pairs_mut()
            .append_pair("departmentIds", &self.department_id.to_string());
        Ok(url)
    }

    /// URL of one object record
    pub fn object_url(&self, id: ObjectId) -> Result<Url> {
        Ok(Url::parse(&format!("{}{}/{}", self.base_url, OBJECTS_PATH, id))?)
    }

    // ========================================================================
    // Index
    // ========================================================================

    /// Fetch every object identifier of the configured department
    ///
    /// This is a startup precondition: any failure (transport, non-2xx,
    /// malformed body, `null` identifier list) is returned to the caller.
    pub async fn fetch_index(&self) -> Result<CollectionIndex> {
        let url = self.index_url()?;
        debug!(%url, "Fetching collection index");

        let response = self
            .client
            .get(url.clone())
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Status {
                status: response.status(),
                url: url.to_string(),
            });
        }

        let body: ObjectsResponse = serde_json::from_slice(&response.bytes().await?)?;
        let ids = match body.object_ids {
            Some(ids) if !ids.is_empty() => ids,
            _ => return Err(Error::EmptyIndex(self.department_id)),
        };

        debug!(
            department = self.department_id,
            total = body.total,
            count = ids.len(),
            "Collection index received"
        );
        Ok(CollectionIndex::new(ids))
    }

    // ========================================================================
    // Records
    // ========================================================================

    /// Fetch one object record, propagating errors
    pub async fn fetch_object(&self, id: ObjectId) -> Result<ArtObject> {
        let url = self.object_url(id)?;
        debug!(%url, "Fetching object record");

        let response = self
            .client
            .get(url.clone())
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Status {
                status: response.status(),
                url: url.to_string(),
            });
        }

        Ok(serde_json::from_slice(&response.bytes().await?)?)
    }

    /// Fetch one object record, normalizing any failure into the sentinel
    pub async fn fetch_artwork(&self, id: ObjectId) -> ArtworkRecord {
        match self.fetch_object(id).await {
            Ok(object) => {
                debug!(
                    object_id = id,
                    title = %object.title,
                    artist = %object.artist_display_name,
                    has_image = object.has_image(),
                    "Object record received"
                );
                ArtworkRecord::Artwork(object)
            }
            Err(err) => {
                warn!(object_id = id, "Failed to fetch object record: {}", err);
                ArtworkRecord::Error
            }
        }
    }

    /// Pick a random identifier from `index` and fetch its record
    ///
    /// Never fails: errors are logged and reported as [`ArtworkRecord::Error`].
    pub async fn fetch_random_artwork(&self, index: &CollectionIndex) -> ArtworkRecord {
        let picked = index.choose(&mut rand::rng());
        match picked {
            Some(id) => self.fetch_artwork(id).await,
            None => {
                warn!("Collection index is empty, nothing to fetch");
                ArtworkRecord::Error
            }
        }
    }
}

/// Builder for configuring a CollectionClient
#[derive(Debug)]
pub struct ClientBuilder {
    client: Option<Client>,
    base_url: String,
    department_id: u32,
    timeout: Duration,
    user_agent: String,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            client: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            department_id: DEFAULT_DEPARTMENT_ID,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom HTTP client
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the base URL (scheme and host, no trailing slash needed)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the department used for the index
    pub fn department_id(mut self, department_id: u32) -> Self {
        self.department_id = department_id;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client
    pub async fn build(self) -> Result<CollectionClient> {
        let client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .user_agent(&self.user_agent)
                .timeout(self.timeout)
                .build()?,
        };

        Ok(CollectionClient {
            client,
            base_url: self.base_url,
            department_id: self.department_id,
            timeout: self.timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Unit Tests (no network)
    // ========================================================================

    #[test]
    fn test_builder_defaults() {
        let builder = ClientBuilder::default();
        assert_eq!(builder.base_url, DEFAULT_BASE_URL);
        assert_eq!(builder.department_id, 19);
        assert_eq!(
            builder.timeout,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let builder = ClientBuilder::new().base_url("http://localhost:1234/");
        assert_eq!(builder.base_url, "http://localhost:1234");
    }

    #[tokio::test]
    async fn test_urls() {
        let client = CollectionClient::builder()
            .department_id(11)
            .build()
            .await
            .unwrap();
        assert_eq!(
            client.index_url().unwrap().as_str(),
            "https://collectionapi.metmuseum.org/public/collection/v1/objects?departmentIds=11"
        );
        assert_eq!(
            client.object_url(436535).unwrap().as_str(),
            "https://collectionapi.metmuseum.org/public/collection/v1/objects/436535"
        );
    }

    // ========================================================================
    // Integration Tests (real API calls)
    //
    // Run with: cargo test -p arxcollection -- --ignored
    // ========================================================================

    #[tokio::test]
    #[ignore = "Integration test - calls real Collection API"]
    async fn test_real_index_and_record() {
        let client = CollectionClient::new()
            .await
            .expect("Failed to create client");
        let index = client.fetch_index().await.expect("index");
        assert!(!index.is_empty());

        let record = client.fetch_random_artwork(&index).await;
        if let Some(object) = record.artwork() {
            assert!(index.ids().contains(&object.object_id));
        }
    }
}
