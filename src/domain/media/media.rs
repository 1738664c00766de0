use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::MediaStatus;

/// Kind of media (video, slides, audio...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaType {
    pub id: Uuid,
    pub name: String,
}

/// A person presenting in one or more media items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

/// Category a media item is filed under
///
/// Media are attached to categories per language, so `language` records
/// which language listing the attachment belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub language: String,
}

/// A single user rating of a media item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub id: Uuid,
    pub media_id: Uuid,
    pub rating: i32,
}

/// Media item (talk or video) as read from the catalog
///
/// The media type is always loaded together with the item. Speakers, tags
/// and categories are only used for filtering and are not carried here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub status: MediaStatus,
    pub hosted_url: String,
    pub visits: i64,
    pub date: DateTime<Utc>,
    pub media_type: MediaType,
}

impl Media {
    /// Whether end users may see this item
    pub fn is_visible(&self) -> bool {
        self.status.is_visible()
    }

    /// Bumps the in-memory visit counter and returns the new value
    ///
    /// Persisting the count is the repository's job; see
    /// `MediaRepository::increment_visit_count`.
    pub fn record_visit(&mut self) -> i64 {
        self.visits += 1;
        self.visits
    }
}
