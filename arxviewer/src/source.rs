//! Artwork sources
//!
//! [`ArtworkSource`] is the seam between the display cycle and the place
//! artworks come from. [`CollectionSource`] draws them at random from a
//! department of the Met collection.

use crate::error::Result;
use arxcollection::{ArtworkRecord, CollectionClient, CollectionIndex};
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::info;

/// Supplies one record per display cycle
#[async_trait]
pub trait ArtworkSource: Debug + Send + Sync {
    /// Next record to display; failures come back as [`ArtworkRecord::Error`]
    async fn next_artwork(&self) -> ArtworkRecord;
}

/// Random artworks from a collection index fetched once at startup
#[derive(Debug, Clone)]
pub struct CollectionSource {
    client: CollectionClient,
    index: Arc<CollectionIndex>,
}

impl CollectionSource {
    pub fn new(client: CollectionClient, index: Arc<CollectionIndex>) -> Self {
        Self { client, index }
    }

    /// Fetches the department index, the startup precondition of the viewer
    pub async fn connect(client: CollectionClient) -> Result<Self> {
        let index = client.fetch_index().await?;
        info!(
            department = client.department_id(),
            objects = index.len(),
            "Collection index loaded"
        );
        Ok(Self::new(client, Arc::new(index)))
    }

    pub fn index(&self) -> &CollectionIndex {
        &self.index
    }
}

#[async_trait]
impl ArtworkSource for CollectionSource {
    async fn next_artwork(&self) -> ArtworkRecord {
        self.client.fetch_random_artwork(&self.index).await
    }
}
