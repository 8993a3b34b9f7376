//! The Met Collection API client for ArtXR
//!
//! This crate fetches the object index of one museum department and the
//! records of individual objects.
//!
//! - [`CollectionClient::fetch_index`] is a startup precondition and returns
//!   errors to the caller.
//! - [`CollectionClient::fetch_random_artwork`] never fails: any problem is
//!   logged and reported as [`ArtworkRecord::Error`].
//!
//! # Example
//!
//! ```no_run
//! use arxcollection::{ArtworkRecord, CollectionClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CollectionClient::builder().department_id(19).build().await?;
//!     let index = client.fetch_index().await?;
//!
//!     match client.fetch_random_artwork(&index).await {
//!         ArtworkRecord::Artwork(object) => println!("{} by {}", object.title, object.artist_display_name),
//!         ArtworkRecord::Error => println!("no artwork this time"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod models;

#[cfg(feature = "arxconfig")]
pub mod config_ext;

// Re-exports
pub use client::{ClientBuilder, CollectionClient};
pub use error::{Error, Result};
pub use models::{ArtObject, ArtworkRecord, CollectionIndex, ObjectId, ObjectsResponse};

#[cfg(feature = "arxconfig")]
pub use config_ext::CollectionConfigExt;
