//! End-to-end CLI tests
//!
//! Parse command lines the way the binary does and execute them against an
//! in-memory catalog, checking the JSON that would be printed.

use chrono::{TimeZone, Utc};
use clap::Parser;
use media_catalog::cli::{execute, Cli, Command, ExistsArgs};
use media_catalog::domain::media::{Media, MediaStatus, MediaType, Rating, Speaker};
use media_catalog::domain::CatalogError;
use media_catalog::infrastructure::repositories::{CatalogEntry, InMemoryMediaRepository};
use serde_json::{json, Value};
use uuid::Uuid;

const PAGE_SIZE: u32 = 10;

fn media(title: &str, slug: &str, visits: i64, day: u32) -> Media {
    Media {
        id: Uuid::new_v4(),
        title: title.to_string(),
        slug: slug.to_string(),
        description: String::new(),
        status: MediaStatus::Published,
        hosted_url: format!("https://video.example.com/{}", slug),
        visits,
        date: Utc.with_ymd_and_hms(2012, 10, day, 18, 0, 0).unwrap(),
        media_type: MediaType {
            id: Uuid::from_u128(7),
            name: "Video".to_string(),
        },
    }
}

/// Catalog with three published talks by one speaker, plus ratings on the first
fn setup_catalog() -> (InMemoryMediaRepository, Uuid) {
    let repo = InMemoryMediaRepository::new();
    let speaker = Speaker {
        id: Uuid::new_v4(),
        name: "Niko".to_string(),
        slug: "niko".to_string(),
    };

    let first = media("Borrowck Deep Dive", "borrowck", 12, 1);
    let first_id = first.id;
    repo.insert(CatalogEntry::new(first).with_speaker(speaker.clone()));
    repo.insert(CatalogEntry::new(media("Polonius", "polonius", 40, 2)).with_speaker(speaker.clone()));
    repo.insert(CatalogEntry::new(media("Chalk", "chalk", 3, 3)));

    for rating in [5, 4] {
        repo.add_rating(Rating {
            id: Uuid::new_v4(),
            media_id: first_id,
            rating,
        });
    }

    (repo, speaker.id)
}

async fn run(repo: &InMemoryMediaRepository, args: &[&str]) -> Result<Value, CatalogError> {
    let mut argv = vec!["media-catalog"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).expect("arguments should parse");
    execute(&cli.command, repo, PAGE_SIZE).await
}

fn slugs(output: &Value) -> Vec<String> {
    output["results"]
        .as_array()
        .expect("results array")
        .iter()
        .map(|m| m["slug"].as_str().expect("slug").to_string())
        .collect()
}

#[tokio::test]
async fn test_list_with_sort_and_paging() {
    let (repo, _) = setup_catalog();

    let output = run(&repo, &["list", "--sort", "visits", "--order", "asc", "--max", "2"])
        .await
        .expect("list should succeed");

    assert_eq!(output["total"], 3);
    assert_eq!(slugs(&output), vec!["chalk", "borrowck"]);
}

#[tokio::test]
async fn test_list_rejects_mismatched_orders() {
    let (repo, _) = setup_catalog();

    let result = run(
        &repo,
        &["list", "--sort", "visits", "--order", "asc", "--order", "desc"],
    )
    .await;

    assert!(matches!(result, Err(CatalogError::Ordering(_))));
}

#[tokio::test]
async fn test_list_rejects_page_zero() {
    let (repo, _) = setup_catalog();

    let result = run(&repo, &["list", "--page", "0"]).await;

    assert!(matches!(
        result,
        Err(CatalogError::InvalidPage { page: 0, max: 10 })
    ));
}

#[tokio::test]
async fn test_search_and_speaker_listing() {
    let (repo, speaker_id) = setup_catalog();

    let found = run(&repo, &["search", "NIKO"])
        .await
        .expect("search should succeed");
    assert_eq!(found["total"], 2);
    assert_eq!(slugs(&found), vec!["polonius", "borrowck"]);

    let speaker = speaker_id.to_string();
    let listed = run(&repo, &["speaker", speaker.as_str(), "--sort", "title", "--order", "asc"])
        .await
        .expect("speaker listing should succeed");
    assert_eq!(slugs(&listed), vec!["borrowck", "polonius"]);
}

#[tokio::test]
async fn test_show_records_visit_and_reports_rating() {
    let (repo, _) = setup_catalog();

    let output = run(&repo, &["show", "borrowck"])
        .await
        .expect("show should succeed");
    assert_eq!(output["media"]["visits"], 13);
    assert_eq!(output["media"]["status"], "published");
    assert_eq!(output["media"]["media_type"]["name"], "Video");
    assert_eq!(output["average_rating"], json!("4.5"));

    let again = run(&repo, &["show", "borrowck"])
        .await
        .expect("show should succeed");
    assert_eq!(again["media"]["visits"], 14);

    let unrated = run(&repo, &["show", "chalk"])
        .await
        .expect("show should succeed");
    assert_eq!(unrated["average_rating"], Value::Null);
}

#[tokio::test]
async fn test_show_unknown_slug_is_not_found() {
    let (repo, _) = setup_catalog();

    let result = run(&repo, &["show", "missing"]).await;

    assert!(matches!(result, Err(CatalogError::NotFound(slug)) if slug == "missing"));
}

#[tokio::test]
async fn test_exists_by_title_and_url() {
    let (repo, _) = setup_catalog();

    let by_title = run(&repo, &["exists", "--title", "Chalk"])
        .await
        .expect("exists should succeed");
    assert_eq!(by_title, json!({ "exists": true }));

    let by_url = run(&repo, &["exists", "--url", "https://video.example.com/nope"])
        .await
        .expect("exists should succeed");
    assert_eq!(by_url, json!({ "exists": false }));
}

#[tokio::test]
async fn test_exists_without_criterion_is_rejected() {
    let (repo, _) = setup_catalog();
    let command = Command::Exists(ExistsArgs {
        title: None,
        url: None,
    });

    let result = execute(&command, &repo, PAGE_SIZE).await;

    assert!(matches!(result, Err(CatalogError::InvalidQuery(_))));
}

#[tokio::test]
async fn test_exists_with_both_criteria_is_rejected() {
    let (repo, _) = setup_catalog();
    let command = Command::Exists(ExistsArgs {
        title: Some("Chalk".to_string()),
        url: Some("https://video.example.com/chalk".to_string()),
    });

    let result = execute(&command, &repo, PAGE_SIZE).await;

    assert!(matches!(result, Err(CatalogError::InvalidQuery(_))));
}

#[tokio::test]
async fn test_page_offset_overflow_is_invalid_page() {
    let (repo, _) = setup_catalog();

    let result = run(&repo, &["list", "--page", "4294967295", "--max", "4294967295"]).await;

    assert!(matches!(result, Err(CatalogError::InvalidPage { .. })));
}
