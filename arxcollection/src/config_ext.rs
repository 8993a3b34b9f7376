//! Extension integrating the Collection API settings into arxconfig
//!
//! ```no_run
//! use arxconfig::get_config;
//! use arxcollection::{ClientBuilder, CollectionConfigExt};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = get_config();
//! let client = ClientBuilder::from_config(&config).build().await?;
//! println!("department {}", client.department_id());
//! # Ok(())
//! # }
//! ```

use crate::client::{
    ClientBuilder, DEFAULT_BASE_URL, DEFAULT_DEPARTMENT_ID, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_USER_AGENT,
};
use anyhow::Result;
use arxconfig::Config;
use serde_yaml::Value;
use std::time::Duration;

/// Extension trait exposing the `collection.*` section of the configuration
pub trait CollectionConfigExt {
    /// API base URL (default: the public Met Collection API)
    fn get_collection_base_url(&self) -> String;

    fn set_collection_base_url(&self, url: &str) -> Result<()>;

    /// Department whose objects make up the index (default: 19)
    fn get_collection_department_id(&self) -> u32;

    fn set_collection_department_id(&self, department_id: u32) -> Result<()>;

    /// Per-request timeout (default: 30 s)
    fn get_collection_timeout(&self) -> Duration;

    fn get_collection_user_agent(&self) -> String;
}

impl CollectionConfigExt for Config {
    fn get_collection_base_url(&self) -> String {
        self.get_string(&["collection", "base_url"], DEFAULT_BASE_URL)
    }

    fn set_collection_base_url(&self, url: &str) -> Result<()> {
        self.set_value(&["collection", "base_url"], Value::String(url.to_string()))
    }

    fn get_collection_department_id(&self) -> u32 {
        let id = self.get_u64(&["collection", "department_id"], DEFAULT_DEPARTMENT_ID as u64);
        u32::try_from(id).unwrap_or_else(|_| {
            tracing::warn!(
                "Department id {} out of range, using default {}",
                id,
                DEFAULT_DEPARTMENT_ID
            );
            DEFAULT_DEPARTMENT_ID
        })
    }

    fn set_collection_department_id(&self, department_id: u32) -> Result<()> {
        self.set_u64(&["collection", "department_id"], department_id as u64)
    }

    fn get_collection_timeout(&self) -> Duration {
        Duration::from_secs(self.get_u64(
            &["collection", "timeout_secs"],
            DEFAULT_REQUEST_TIMEOUT_SECS,
        ))
    }

    fn get_collection_user_agent(&self) -> String {
        self.get_string(&["collection", "user_agent"], DEFAULT_USER_AGENT)
    }
}

impl ClientBuilder {
    /// Builder preloaded with the `collection.*` settings
    pub fn from_config(config: &Config) -> Self {
        ClientBuilder::new()
            .base_url(config.get_collection_base_url())
            .department_id(config.get_collection_department_id())
            .timeout(config.get_collection_timeout())
            .user_agent(config.get_collection_user_agent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_from_embedded_config() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();

        assert_eq!(config.get_collection_base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.get_collection_department_id(), 19);
        assert_eq!(config.get_collection_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_department_roundtrip() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        config.set_collection_department_id(11).unwrap();
        config.set_collection_base_url("http://127.0.0.1:9").unwrap();

        assert_eq!(config.get_collection_department_id(), 11);
        assert_eq!(config.get_collection_base_url(), "http://127.0.0.1:9");
    }
}
