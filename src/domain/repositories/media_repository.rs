use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::errors::CatalogResult;
use crate::domain::media::{Media, MediaOrdering};
use crate::domain::pagination::{Page, PageRequest};

/// Repository trait for the media catalog
///
/// Every listing is limited to published media and returns the total match
/// count alongside the requested page. Implementations handle the
/// storage-specific details.
#[async_trait]
pub trait MediaRepository: Send + Sync {
    /// List published media in the given order
    async fn list_published(
        &self,
        ordering: &MediaOrdering,
        page: PageRequest,
    ) -> CatalogResult<Page<Media>>;

    /// Case-insensitive substring search over category, tag, speaker and
    /// media type names plus title and description
    async fn search(
        &self,
        term: &str,
        ordering: &MediaOrdering,
        page: PageRequest,
    ) -> CatalogResult<Page<Media>>;

    /// Find one published media item by slug, media type included
    async fn find_by_slug(&self, slug: &str) -> CatalogResult<Option<Media>>;

    /// List published media filed under a category slug
    async fn find_by_category(
        &self,
        category_slug: &str,
        ordering: &MediaOrdering,
        page: PageRequest,
    ) -> CatalogResult<Page<Media>>;

    /// List published media carrying a tag slug
    async fn find_by_tag(
        &self,
        tag_slug: &str,
        ordering: &MediaOrdering,
        page: PageRequest,
    ) -> CatalogResult<Page<Media>>;

    /// List published media presented by a speaker
    async fn find_by_speaker(
        &self,
        speaker_id: Uuid,
        ordering: &MediaOrdering,
        page: PageRequest,
    ) -> CatalogResult<Page<Media>>;

    /// Whether any media, in any status, has exactly this title
    async fn exists_by_title(&self, title: &str) -> CatalogResult<bool>;

    /// Whether any media, in any status, is hosted at exactly this URL
    async fn exists_by_hosted_url(&self, hosted_url: &str) -> CatalogResult<bool>;

    /// Persist one more visit and refresh `media.visits` with the stored count
    async fn increment_visit_count(&self, media: &mut Media) -> CatalogResult<i64>;

    /// Mean rating of a media item, `None` when it has no ratings
    async fn average_rating(&self, media_id: Uuid) -> CatalogResult<Option<Decimal>>;
}
