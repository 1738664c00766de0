use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::errors::{CatalogError, CatalogResult};
use crate::domain::media::{Media, MediaOrdering, MediaStatus, MediaType};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::repositories::MediaRepository;

const SELECT_MEDIA: &str = r#"
    SELECT
        m.id, m.title, m.slug, m.description, m.status,
        m.hosted_url, m.visits, m.date,
        mt.id AS media_type_id, mt.name AS media_type_name
    FROM media m
    JOIN media_types mt ON mt.id = m.media_type_id
"#;

const COUNT_MEDIA: &str = r#"
    SELECT COUNT(*)
    FROM media m
    JOIN media_types mt ON mt.id = m.media_type_id
"#;

/// Restriction applied on top of the published-status filter
enum MediaFilter {
    Published,
    Search(String),
    Category(String),
    Tag(String),
    Speaker(Uuid),
}

#[derive(FromRow)]
struct MediaRow {
    id: Uuid,
    title: String,
    slug: String,
    description: String,
    status: MediaStatus,
    hosted_url: String,
    visits: i64,
    date: DateTime<Utc>,
    media_type_id: Uuid,
    media_type_name: String,
}

impl From<MediaRow> for Media {
    fn from(r: MediaRow) -> Self {
        Media {
            id: r.id,
            title: r.title,
            slug: r.slug,
            description: r.description,
            status: r.status,
            hosted_url: r.hosted_url,
            visits: r.visits,
            date: r.date,
            media_type: MediaType {
                id: r.media_type_id,
                name: r.media_type_name,
            },
        }
    }
}

/// Builds a `LIKE` pattern matching `term` anywhere, case-folded, with
/// wildcard characters in the term matched literally
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.to_lowercase().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn push_where(qb: &mut QueryBuilder<'_, Postgres>, filter: &MediaFilter) {
    qb.push(" WHERE m.status = ");
    qb.push_bind(MediaStatus::Published);

    match filter {
        MediaFilter::Published => {}
        MediaFilter::Search(pattern) => {
            qb.push(" AND (LOWER(m.title) LIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR LOWER(m.description) LIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR LOWER(mt.name) LIKE ");
            qb.push_bind(pattern.clone());
            qb.push(
                " OR EXISTS (SELECT 1 FROM media_categories mc \
                 JOIN categories c ON c.id = mc.category_id \
                 WHERE mc.media_id = m.id AND LOWER(c.name) LIKE ",
            );
            qb.push_bind(pattern.clone());
            qb.push(
                ") OR EXISTS (SELECT 1 FROM media_tags mtg \
                 JOIN tags t ON t.id = mtg.tag_id \
                 WHERE mtg.media_id = m.id AND LOWER(t.name) LIKE ",
            );
            qb.push_bind(pattern.clone());
            qb.push(
                ") OR EXISTS (SELECT 1 FROM media_speakers ms \
                 JOIN speakers s ON s.id = ms.speaker_id \
                 WHERE ms.media_id = m.id AND LOWER(s.name) LIKE ",
            );
            qb.push_bind(pattern.clone());
            qb.push("))");
        }
        MediaFilter::Category(slug) => {
            qb.push(
                " AND EXISTS (SELECT 1 FROM media_categories mc \
                 JOIN categories c ON c.id = mc.category_id \
                 WHERE mc.media_id = m.id AND c.slug = ",
            );
            qb.push_bind(slug.clone());
            qb.push(")");
        }
        MediaFilter::Tag(slug) => {
            qb.push(
                " AND EXISTS (SELECT 1 FROM media_tags mtg \
                 JOIN tags t ON t.id = mtg.tag_id \
                 WHERE mtg.media_id = m.id AND t.slug = ",
            );
            qb.push_bind(slug.clone());
            qb.push(")");
        }
        MediaFilter::Speaker(speaker_id) => {
            qb.push(
                " AND EXISTS (SELECT 1 FROM media_speakers ms \
                 WHERE ms.media_id = m.id AND ms.speaker_id = ",
            );
            qb.push_bind(*speaker_id);
            qb.push(")");
        }
    }
}

/// PostgreSQL implementation of MediaRepository
///
/// Paging happens in the database: each listing runs a `COUNT(*)` for the
/// total and a `LIMIT`/`OFFSET` query for the page itself.
pub struct PostgresMediaRepository {
    pool: PgPool,
}

impl PostgresMediaRepository {
    /// Creates a new PostgresMediaRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_page(
        &self,
        filter: MediaFilter,
        ordering: &MediaOrdering,
        page: PageRequest,
    ) -> CatalogResult<Page<Media>> {
        let mut count = QueryBuilder::<Postgres>::new(COUNT_MEDIA);
        push_where(&mut count, &filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        if total <= page.offset() {
            return Ok(Page::new(total, Vec::new()));
        }

        let mut select = QueryBuilder::<Postgres>::new(SELECT_MEDIA);
        push_where(&mut select, &filter);
        select.push(" ORDER BY ");
        select.push(ordering.to_sql());
        select.push(" LIMIT ");
        select.push_bind(page.limit());
        select.push(" OFFSET ");
        select.push_bind(page.offset());

        let rows: Vec<MediaRow> = select.build_query_as().fetch_all(&self.pool).await?;

        Ok(Page::new(total, rows.into_iter().map(Media::from).collect()))
    }
}

#[async_trait]
impl MediaRepository for PostgresMediaRepository {
    async fn list_published(
        &self,
        ordering: &MediaOrdering,
        page: PageRequest,
    ) -> CatalogResult<Page<Media>> {
        tracing::debug!(order = %ordering.to_sql(), page = page.page(), max = page.max(), "listing published media");
        self.fetch_page(MediaFilter::Published, ordering, page).await
    }

    async fn search(
        &self,
        term: &str,
        ordering: &MediaOrdering,
        page: PageRequest,
    ) -> CatalogResult<Page<Media>> {
        tracing::debug!(term, page = page.page(), max = page.max(), "searching media");
        self.fetch_page(MediaFilter::Search(like_pattern(term)), ordering, page)
            .await
    }

    async fn find_by_slug(&self, slug: &str) -> CatalogResult<Option<Media>> {
        tracing::debug!(slug, "finding media by slug");
        let mut select = QueryBuilder::<Postgres>::new(SELECT_MEDIA);
        push_where(&mut select, &MediaFilter::Published);
        select.push(" AND m.slug = ");
        select.push_bind(slug.to_string());

        let row: Option<MediaRow> = select
            .build_query_as()
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Media::from))
    }

    async fn find_by_category(
        &self,
        category_slug: &str,
        ordering: &MediaOrdering,
        page: PageRequest,
    ) -> CatalogResult<Page<Media>> {
        tracing::debug!(category_slug, page = page.page(), "listing media by category");
        self.fetch_page(
            MediaFilter::Category(category_slug.to_string()),
            ordering,
            page,
        )
        .await
    }

    async fn find_by_tag(
        &self,
        tag_slug: &str,
        ordering: &MediaOrdering,
        page: PageRequest,
    ) -> CatalogResult<Page<Media>> {
        tracing::debug!(tag_slug, page = page.page(), "listing media by tag");
        self.fetch_page(MediaFilter::Tag(tag_slug.to_string()), ordering, page)
            .await
    }

    async fn find_by_speaker(
        &self,
        speaker_id: Uuid,
        ordering: &MediaOrdering,
        page: PageRequest,
    ) -> CatalogResult<Page<Media>> {
        tracing::debug!(%speaker_id, page = page.page(), "listing media by speaker");
        self.fetch_page(MediaFilter::Speaker(speaker_id), ordering, page)
            .await
    }

    async fn exists_by_title(&self, title: &str) -> CatalogResult<bool> {
        tracing::debug!(title, "checking media title");
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (SELECT 1 FROM media WHERE title = $1)
            "#,
        )
        .bind(title)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_hosted_url(&self, hosted_url: &str) -> CatalogResult<bool> {
        tracing::debug!(hosted_url, "checking media hosted url");
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (SELECT 1 FROM media WHERE hosted_url = $1)
            "#,
        )
        .bind(hosted_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn increment_visit_count(&self, media: &mut Media) -> CatalogResult<i64> {
        let visits = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE media
            SET visits = visits + 1
            WHERE id = $1
            RETURNING visits
            "#,
        )
        .bind(media.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| CatalogError::NotFound(media.id.to_string()))?;

        media.visits = visits;
        tracing::debug!(media_id = %media.id, visits, "recorded media visit");

        Ok(visits)
    }

    async fn average_rating(&self, media_id: Uuid) -> CatalogResult<Option<Decimal>> {
        tracing::debug!(%media_id, "averaging media ratings");
        let average = sqlx::query_scalar::<_, Option<Decimal>>(
            r#"
            SELECT AVG(rating)
            FROM ratings
            WHERE media_id = $1
            "#,
        )
        .bind(media_id)
        .fetch_one(&self.pool)
        .await?;

        // NUMERIC averages come back with trailing zeros, e.g. 3.7500000000000000
        Ok(average.map(|avg| avg.normalize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_wraps_and_lowercases() {
        assert_eq!(like_pattern("Rust"), "%rust%");
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("100%_done\\"), "%100\\%\\_done\\\\%");
    }

    #[test]
    fn search_filter_binds_every_field() {
        let mut qb = QueryBuilder::<Postgres>::new(COUNT_MEDIA);
        push_where(&mut qb, &MediaFilter::Search(like_pattern("rust")));
        let sql = qb.sql();

        assert!(sql.contains("m.status = $1"));
        assert!(sql.contains("LOWER(c.name) LIKE"));
        assert!(sql.contains("LOWER(t.name) LIKE"));
        assert!(sql.contains("LOWER(s.name) LIKE"));
        assert!(sql.contains("LOWER(mt.name) LIKE"));
        assert!(sql.contains("$7"));
    }

    #[test]
    fn speaker_filter_uses_join_table() {
        let mut qb = QueryBuilder::<Postgres>::new(SELECT_MEDIA);
        push_where(&mut qb, &MediaFilter::Speaker(Uuid::nil()));
        assert!(qb.sql().contains("ms.speaker_id = $2"));
    }
}
