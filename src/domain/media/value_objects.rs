use serde::{Deserialize, Serialize};

/// Visibility status of a media item
///
/// Only `Published` items are returned to end users. Existence checks used
/// by importers ignore the status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "media_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MediaStatus {
    /// Submitted, awaiting review
    Pending,
    /// Visible to end users
    Published,
    /// Taken down or never released
    Unpublished,
}

impl MediaStatus {
    /// Whether items in this status may be shown to end users
    ///
    /// # Example
    /// ```
    /// use media_catalog::domain::media::MediaStatus;
    ///
    /// assert!(MediaStatus::Published.is_visible());
    /// assert!(!MediaStatus::Pending.is_visible());
    /// ```
    pub fn is_visible(&self) -> bool {
        matches!(self, MediaStatus::Published)
    }
}

impl std::fmt::Display for MediaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaStatus::Pending => write!(f, "pending"),
            MediaStatus::Published => write!(f, "published"),
            MediaStatus::Unpublished => write!(f, "unpublished"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_published_is_visible() {
        assert!(MediaStatus::Published.is_visible());
        assert!(!MediaStatus::Pending.is_visible());
        assert!(!MediaStatus::Unpublished.is_visible());
    }

    #[test]
    fn status_display() {
        assert_eq!(MediaStatus::Pending.to_string(), "pending");
        assert_eq!(MediaStatus::Published.to_string(), "published");
        assert_eq!(MediaStatus::Unpublished.to_string(), "unpublished");
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&MediaStatus::Published).unwrap();
        assert_eq!(json, "\"published\"");
    }
}
