use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use super::Command;
use crate::domain::errors::{CatalogError, CatalogResult};
use crate::domain::media::Media;
use crate::domain::repositories::MediaRepository;

/// Output of `show`: the media item after the visit, with its rating
#[derive(Debug, Serialize)]
pub struct MediaDetails {
    pub media: Media,
    pub average_rating: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct ExistsResponse {
    pub exists: bool,
}

/// Runs one CLI command against `repo` and renders the result as JSON
///
/// `page_size` is used for listings that do not pass `--max`.
pub async fn execute(
    command: &Command,
    repo: &dyn MediaRepository,
    page_size: u32,
) -> CatalogResult<Value> {
    let value = match command {
        Command::List(list) => {
            let page = repo
                .list_published(&list.ordering()?, list.page_request(page_size)?)
                .await?;
            serde_json::to_value(page)?
        }
        Command::Search { term, list } => {
            let page = repo
                .search(term, &list.ordering()?, list.page_request(page_size)?)
                .await?;
            serde_json::to_value(page)?
        }
        Command::Show { slug } => {
            let mut media = repo
                .find_by_slug(slug)
                .await?
                .ok_or_else(|| CatalogError::NotFound(slug.clone()))?;
            repo.increment_visit_count(&mut media).await?;
            let average_rating = repo.average_rating(media.id).await?;
            serde_json::to_value(MediaDetails {
                media,
                average_rating,
            })?
        }
        Command::Category { slug, list } => {
            let page = repo
                .find_by_category(slug, &list.ordering()?, list.page_request(page_size)?)
                .await?;
            serde_json::to_value(page)?
        }
        Command::Tag { slug, list } => {
            let page = repo
                .find_by_tag(slug, &list.ordering()?, list.page_request(page_size)?)
                .await?;
            serde_json::to_value(page)?
        }
        Command::Speaker { id, list } => {
            let page = repo
                .find_by_speaker(*id, &list.ordering()?, list.page_request(page_size)?)
                .await?;
            serde_json::to_value(page)?
        }
        Command::Exists(args) => {
            let exists = match (&args.title, &args.url) {
                (Some(title), None) => repo.exists_by_title(title).await?,
                (None, Some(url)) => repo.exists_by_hosted_url(url).await?,
                _ => {
                    return Err(CatalogError::InvalidQuery(
                        "exactly one of --title or --url is required".to_string(),
                    ))
                }
            };
            serde_json::to_value(ExistsResponse { exists })?
        }
    };

    Ok(value)
}
