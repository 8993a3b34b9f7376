//! Data models for Collection API responses
//!
//! Only the fields the viewer reads are modelled; unknown fields are ignored.

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

/// Object identifier in the collection
pub type ObjectId = u64;

// ============================================================================
// Object index
// ============================================================================

/// Response from `/public/collection/v1/objects?departmentIds=…`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectsResponse {
    /// Number of identifiers reported by the API
    #[serde(default)]
    pub total: u64,
    /// Identifiers; the API sends `null` when nothing matches
    #[serde(rename = "objectIDs", default)]
    pub object_ids: Option<Vec<ObjectId>>,
}

/// Ordered, immutable list of object identifiers for one department
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollectionIndex {
    ids: Vec<ObjectId>,
}

impl CollectionIndex {
    pub fn new(ids: Vec<ObjectId>) -> Self {
        Self { ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Identifier stored at `position`
    pub fn get(&self, position: usize) -> Option<ObjectId> {
        self.ids.get(position).copied()
    }

    pub fn ids(&self) -> &[ObjectId] {
        &self.ids
    }

    /// Uniformly random position in `[0, len)`, `None` for an empty index
    pub fn pick_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if self.ids.is_empty() {
            None
        } else {
            Some(rng.random_range(0..self.ids.len()))
        }
    }

    /// Uniformly random identifier
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<ObjectId> {
        self.pick_position(rng).and_then(|pos| self.get(pos))
    }
}

impl From<Vec<ObjectId>> for CollectionIndex {
    fn from(ids: Vec<ObjectId>) -> Self {
        Self::new(ids)
    }
}

// ============================================================================
// Object record
// ============================================================================

/// Response from `/public/collection/v1/objects/{id}`
///
/// String fields may be empty; `null` is read as empty as well.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArtObject {
    #[serde(rename = "objectID", default)]
    pub object_id: ObjectId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub primary_image: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub artist_display_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub object_date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub department: String,
    #[serde(rename = "objectURL", default, deserialize_with = "null_as_empty")]
    pub object_url: String,
}

impl ArtObject {
    pub fn has_image(&self) -> bool {
        !self.primary_image.is_empty()
    }
}

/// One display cycle's worth of artwork data
///
/// `Error` is the sentinel produced when the record could not be fetched.
#[derive(Debug, Clone, PartialEq)]
pub enum ArtworkRecord {
    Artwork(ArtObject),
    Error,
}

impl ArtworkRecord {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    pub fn artwork(&self) -> Option<&ArtObject> {
        match self {
            Self::Artwork(object) => Some(object),
            Self::Error => None,
        }
    }
}

impl From<ArtObject> for ArtworkRecord {
    fn from(object: ArtObject) -> Self {
        Self::Artwork(object)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
