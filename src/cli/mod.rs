//! Command-line adapter over the media repository
//!
//! Each subcommand maps onto one repository operation and renders its
//! result as JSON.

pub mod commands;

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use crate::domain::errors::CatalogResult;
use crate::domain::media::MediaOrdering;
use crate::domain::pagination::PageRequest;

pub use commands::execute;

#[derive(Debug, Parser)]
#[command(name = "media-catalog", version, about = "Query the talk and video catalog")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List published media
    List(ListArgs),
    /// Search titles, descriptions, speakers, tags, categories and media types
    Search {
        term: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show one published media item, recording a visit
    Show { slug: String },
    /// List published media in a category
    Category {
        slug: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// List published media with a tag
    Tag {
        slug: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// List published media by a speaker
    Speaker {
        id: Uuid,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Check whether a title or hosted URL is already in the catalog
    Exists(ExistsArgs),
}

/// Ordering and paging options shared by listing commands
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Field to sort by (title, slug, date, visits); repeatable
    #[arg(long = "sort")]
    pub sort: Vec<String>,
    /// Direction for the sort fields (asc, desc); repeatable
    #[arg(long = "order")]
    pub order: Vec<String>,
    /// 1-indexed page number
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Page size, defaults to CATALOG_PAGE_SIZE
    #[arg(long)]
    pub max: Option<u32>,
}

impl Default for ListArgs {
    fn default() -> Self {
        Self {
            sort: Vec::new(),
            order: Vec::new(),
            page: 1,
            max: None,
        }
    }
}

impl ListArgs {
    /// Validated ordering, sorting by date when no field is given
    pub fn ordering(&self) -> CatalogResult<MediaOrdering> {
        if self.sort.is_empty() && self.order.is_empty() {
            return Ok(MediaOrdering::default());
        }

        let fields: Vec<&str> = if self.sort.is_empty() {
            vec!["date"]
        } else {
            self.sort.iter().map(String::as_str).collect()
        };

        Ok(MediaOrdering::from_parts(fields.as_slice(), self.order.as_slice())?)
    }

    pub fn page_request(&self, default_page_size: u32) -> CatalogResult<PageRequest> {
        PageRequest::new(self.page, self.max.unwrap_or(default_page_size))
    }
}

#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct ExistsArgs {
    /// Exact media title
    #[arg(long)]
    pub title: Option<String>,
    /// Exact hosted URL
    #[arg(long)]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::CatalogError;
    use crate::domain::media::{OrderingError, SortDirection, SortField};

    #[test]
    fn parses_repeated_sort_flags() {
        let cli = Cli::try_parse_from([
            "media-catalog", "list", "--sort", "visits", "--sort", "title", "--order", "desc",
            "--order", "asc", "--page", "2", "--max", "5",
        ])
        .unwrap();

        let Command::List(list) = cli.command else {
            panic!("expected list command");
        };
        let ordering = list.ordering().unwrap();
        assert_eq!(
            ordering.keys(),
            &[
                (SortField::Visits, SortDirection::Desc),
                (SortField::Title, SortDirection::Asc)
            ]
        );
        let page = list.page_request(10).unwrap();
        assert_eq!((page.page(), page.max()), (2, 5));
    }

    #[test]
    fn default_page_size_applies_without_max() {
        let list = ListArgs::default();
        assert_eq!(list.page, 1);
        assert_eq!(list.page_request(10).unwrap().max(), 10);
        assert_eq!(list.ordering().unwrap(), MediaOrdering::default());
    }

    #[test]
    fn default_list_args_start_on_first_page() {
        let page = ListArgs::default().page_request(10).unwrap();
        assert_eq!((page.page(), page.offset()), (1, 0));
    }

    #[test]
    fn mismatched_orders_surface_as_catalog_error() {
        let list = ListArgs {
            sort: vec!["title".to_string()],
            order: vec!["asc".to_string(), "desc".to_string()],
            page: 1,
            max: None,
        };
        assert!(matches!(
            list.ordering(),
            Err(CatalogError::Ordering(OrderingError::SizeMismatch { .. }))
        ));
    }

    #[test]
    fn exists_requires_exactly_one_criterion() {
        assert!(Cli::try_parse_from(["media-catalog", "exists"]).is_err());
        assert!(Cli::try_parse_from([
            "media-catalog", "exists", "--title", "a", "--url", "b"
        ])
        .is_err());
        assert!(Cli::try_parse_from(["media-catalog", "exists", "--url", "b"]).is_ok());
    }
}
