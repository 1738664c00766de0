use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;
use uuid::Uuid;

use crate::domain::errors::{CatalogError, CatalogResult};
use crate::domain::media::{Category, Media, MediaOrdering, Rating, Speaker, Tag};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::repositories::MediaRepository;

/// A media item together with the relations used for filtering
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub media: Media,
    pub speakers: Vec<Speaker>,
    pub tags: Vec<Tag>,
    pub categories: Vec<Category>,
}

impl CatalogEntry {
    pub fn new(media: Media) -> Self {
        Self {
            media,
            speakers: Vec::new(),
            tags: Vec::new(),
            categories: Vec::new(),
        }
    }

    pub fn with_speaker(mut self, speaker: Speaker) -> Self {
        self.speakers.push(speaker);
        self
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    fn matches_term(&self, needle: &str) -> bool {
        let contains = |haystack: &str| haystack.to_lowercase().contains(needle);

        self.categories.iter().any(|c| contains(&c.name))
            || self.tags.iter().any(|t| contains(&t.name))
            || self.speakers.iter().any(|s| contains(&s.name))
            || contains(&self.media.title)
            || contains(&self.media.description)
            || contains(&self.media.media_type.name)
    }
}

/// In-memory implementation of MediaRepository for development/testing
///
/// Applies the same visibility, ordering and paging rules as the
/// PostgreSQL adapter over a process-local store.
pub struct InMemoryMediaRepository {
    entries: Arc<Mutex<HashMap<Uuid, CatalogEntry>>>,
    ratings: Arc<Mutex<Vec<Rating>>>,
}

impl Default for InMemoryMediaRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl InMemoryMediaRepository {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ratings: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds or replaces a catalog entry, keyed by media id
    pub fn insert(&self, entry: CatalogEntry) {
        debug!("Stored media: {} with id {}", entry.media.slug, entry.media.id);
        lock(&self.entries).insert(entry.media.id, entry);
    }

    pub fn add_rating(&self, rating: Rating) {
        lock(&self.ratings).push(rating);
    }

    fn page_where<F>(&self, ordering: &MediaOrdering, page: PageRequest, keep: F) -> Page<Media>
    where
        F: Fn(&CatalogEntry) -> bool,
    {
        let mut matches: Vec<Media> = lock(&self.entries)
            .values()
            .filter(|entry| entry.media.is_visible() && keep(entry))
            .map(|entry| entry.media.clone())
            .collect();
        matches.sort_by(|a, b| ordering.compare(a, b));

        Page::from_all(matches, &page)
    }
}

#[async_trait]
impl MediaRepository for InMemoryMediaRepository {
    async fn list_published(
        &self,
        ordering: &MediaOrdering,
        page: PageRequest,
    ) -> CatalogResult<Page<Media>> {
        Ok(self.page_where(ordering, page, |_| true))
    }

    async fn search(
        &self,
        term: &str,
        ordering: &MediaOrdering,
        page: PageRequest,
    ) -> CatalogResult<Page<Media>> {
        let needle = term.to_lowercase();
        Ok(self.page_where(ordering, page, |entry| entry.matches_term(&needle)))
    }

    async fn find_by_slug(&self, slug: &str) -> CatalogResult<Option<Media>> {
        Ok(lock(&self.entries)
            .values()
            .find(|entry| entry.media.is_visible() && entry.media.slug == slug)
            .map(|entry| entry.media.clone()))
    }

    async fn find_by_category(
        &self,
        category_slug: &str,
        ordering: &MediaOrdering,
        page: PageRequest,
    ) -> CatalogResult<Page<Media>> {
        Ok(self.page_where(ordering, page, |entry| {
            entry.categories.iter().any(|c| c.slug == category_slug)
        }))
    }

    async fn find_by_tag(
        &self,
        tag_slug: &str,
        ordering: &MediaOrdering,
        page: PageRequest,
    ) -> CatalogResult<Page<Media>> {
        Ok(self.page_where(ordering, page, |entry| {
            entry.tags.iter().any(|t| t.slug == tag_slug)
        }))
    }

    async fn find_by_speaker(
        &self,
        speaker_id: Uuid,
        ordering: &MediaOrdering,
        page: PageRequest,
    ) -> CatalogResult<Page<Media>> {
        Ok(self.page_where(ordering, page, |entry| {
            entry.speakers.iter().any(|s| s.id == speaker_id)
        }))
    }

    async fn exists_by_title(&self, title: &str) -> CatalogResult<bool> {
        Ok(lock(&self.entries)
            .values()
            .any(|entry| entry.media.title == title))
    }

    async fn exists_by_hosted_url(&self, hosted_url: &str) -> CatalogResult<bool> {
        Ok(lock(&self.entries)
            .values()
            .any(|entry| entry.media.hosted_url == hosted_url))
    }

    async fn increment_visit_count(&self, media: &mut Media) -> CatalogResult<i64> {
        let mut entries = lock(&self.entries);
        let stored = entries
            .get_mut(&media.id)
            .ok_or_else(|| CatalogError::NotFound(media.id.to_string()))?;

        let visits = stored.media.record_visit();
        media.visits = visits;
        debug!("Recorded visit for media {}: {}", media.id, visits);

        Ok(visits)
    }

    async fn average_rating(&self, media_id: Uuid) -> CatalogResult<Option<Decimal>> {
        let ratings = lock(&self.ratings);
        let (sum, count) = ratings
            .iter()
            .filter(|r| r.media_id == media_id)
            .fold((0i64, 0i64), |(sum, count), r| (sum + i64::from(r.rating), count + 1));

        if count == 0 {
            return Ok(None);
        }

        Ok(Some((Decimal::from(sum) / Decimal::from(count)).normalize()))
    }
}
