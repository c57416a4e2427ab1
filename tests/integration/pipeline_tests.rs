//! Integration tests for the harvest pipeline
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! discover → archive → extract → download cycle end-to-end against a
//! temporary content store.

use std::path::Path;
use tempfile::TempDir;
use unique_harvest::config::Config;
use unique_harvest::crawler::Coordinator;
use unique_harvest::state::{LedgerStore, Namespace};
use unique_harvest::url::url_suffix;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server and temp dir
fn create_test_config(base_url: &str, dir: &Path) -> Config {
    let mut config = Config::default();
    config.crawler.seed_url = format!("{}/us/Unique_item", base_url);
    config.crawler.request_delay = 10; // Very short for testing
    config.crawler.max_concurrent_downloads = 4;
    config.output.html_dir = dir.join("raw_html").to_string_lossy().to_string();
    config.output.image_dir = dir.join("images").to_string_lossy().to_string();
    config.output.state_file = dir.join("state.json").to_string_lossy().to_string();
    config
}

/// Mounts the seed listing: two valid categories, a short link, a fragment
/// duplicate and an excluded login link
async fn mount_seed(server: &MockServer, expected_calls: u64) {
    let base = server.uri();
    Mock::given(method("GET"))
        .and(path("/us/Unique_item"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"<html><body>
                <nav><a href="{base}/us/Unique_Navigation_Only">Nav</a></nav>
                <main>
                    <a href="{base}/us/Unique_Armours">Armours</a>
                    <a href="{base}/us/">Index</a>
                    <a href="{base}/us/Unique_Armours#Kaoms_Heart">Armours again</a>
                    <a href="/us/Unique_Boots">Boots</a>
                    <a href="/us/Login">Login</a>
                </main>
            </body></html>"#
        )))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Mounts both category pages; they share one image with different labels
async fn mount_pages(server: &MockServer, armours_calls: u64, boots_calls: u64) {
    let base = server.uri();
    Mock::given(method("GET"))
        .and(path("/us/Unique_Armours"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"<html><body>
                <img src="{base}/gen/image/heart.webp?v=2" alt="Kaom's Heart">
                <img data-src="{base}/gen/image/shared.png" alt="Shared From Armours">
                <img src="{base}/gen/image/favicon.png" alt="Site icon">
                <img data-src="{base}/static/logo.png">
            </body></html>"#
        )))
        .expect(armours_calls)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/us/Unique_Boots"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"<html><body>
                <img src="{base}/gen/image/shared.png" alt="Shared From Boots">
                <img data-lazy-src="/gen/image/Boots/Windscream.png" title="Windscream">
            </body></html>"#
        )))
        .expect(boots_calls)
        .mount(server)
        .await;
}

/// Mounts the three distinct item images
async fn mount_images(server: &MockServer, expected_calls: u64) {
    for image in ["/gen/image/heart.webp", "/gen/image/shared.png", "/gen/image/Boots/Windscream.png"] {
        Mock::given(method("GET"))
            .and(path(image))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(image.as_bytes().to_vec()))
            .expect(expected_calls)
            .mount(server)
            .await;
    }
}

fn image_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir.join("images"))
        .expect("Failed to read image dir")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_full_pipeline() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    mount_seed(&mock_server, 1).await;
    mount_pages(&mock_server, 1, 1).await;
    mount_images(&mock_server, 1).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&base, dir.path());

    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let stats = coordinator.run().await;

    assert_eq!(stats.categories_discovered, 2);
    assert_eq!(stats.pages.archived, 2);
    assert_eq!(stats.references_found, 4);
    assert_eq!(stats.unique_assets, 3);
    assert_eq!(stats.images.downloaded, 3);
    assert_eq!(stats.total_failures(), 0);

    // Archived markup under derived names
    assert!(dir.path().join("raw_html/Unique_Armours.html").is_file());
    assert!(dir.path().join("raw_html/Unique_Boots.html").is_file());

    // Shared image keeps the label from the first page (Unique_Armours.html)
    let heart = format!("{}/gen/image/heart.webp?v=2", base);
    let shared = format!("{}/gen/image/shared.png", base);
    let windscream = format!("{}/gen/image/Boots/Windscream.png", base);
    let mut expected = vec![
        format!("Kaoms Heart_{}.webp", url_suffix(&heart)),
        format!("Shared From Armours_{}.png", url_suffix(&shared)),
        format!("Windscream_{}.png", url_suffix(&windscream)),
    ];
    expected.sort();
    assert_eq!(image_names(dir.path()), expected);

    // Ledger persisted with every unit of work
    let ledger = LedgerStore::load(&dir.path().join("state.json"));
    assert!(ledger.is_done(Namespace::Pages, &format!("{}/us/Unique_Armours", base)));
    assert!(ledger.is_done(Namespace::Pages, &format!("{}/us/Unique_Boots", base)));
    assert!(ledger.is_done(Namespace::Images, &heart));
    assert!(ledger.is_done(Namespace::Images, &shared));
    assert!(ledger.is_done(Namespace::Images, &windscream));
    assert_eq!(ledger.done_count(Namespace::Images), 3);
}

#[tokio::test]
async fn test_second_run_is_idempotent() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    // Seed is fetched on every run; pages and images only once overall
    mount_seed(&mock_server, 2).await;
    mount_pages(&mock_server, 1, 1).await;
    mount_images(&mock_server, 1).await;

    let dir = TempDir::new().expect("Failed to create temp dir");

    let mut first = Coordinator::new(create_test_config(&base, dir.path())).unwrap();
    let first_stats = first.run().await;
    let files_after_first = image_names(dir.path());
    let ledger_after_first = LedgerStore::load(&dir.path().join("state.json"));

    let mut second = Coordinator::new(create_test_config(&base, dir.path())).unwrap();
    let second_stats = second.run().await;

    assert_eq!(first_stats.images.downloaded, 3);
    assert_eq!(second_stats.pages.archived, 0);
    assert_eq!(second_stats.pages.skipped, 2);
    assert_eq!(second_stats.images.downloaded, 0);
    assert_eq!(second_stats.images.skipped, 3);

    assert_eq!(image_names(dir.path()), files_after_first);
    assert_eq!(
        LedgerStore::load(&dir.path().join("state.json")).ledger(),
        ledger_after_first.ledger()
    );
}

#[tokio::test]
async fn test_resume_fetches_only_remaining_pages() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    mount_seed(&mock_server, 1).await;

    // Armours was finished by an earlier run; only Boots may be fetched
    mount_pages(&mock_server, 0, 1).await;

    Mock::given(method("GET"))
        .and(path("/gen/image/shared.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8]))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gen/image/Boots/Windscream.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![2u8]))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut ledger = LedgerStore::load(&dir.path().join("state.json"));
    ledger.mark_done(Namespace::Pages, &format!("{}/us/Unique_Armours", base));
    ledger.mark_done(Namespace::Images, &format!("{}/gen/image/Boots/Windscream.png", base));
    ledger.save().unwrap();

    let mut coordinator = Coordinator::new(create_test_config(&base, dir.path())).unwrap();
    let stats = coordinator.run().await;

    assert_eq!(stats.pages.archived, 1);
    assert_eq!(stats.pages.skipped, 1);
    assert_eq!(stats.images.downloaded, 1);
    assert_eq!(stats.images.skipped, 1);
    assert!(!dir.path().join("raw_html/Unique_Armours.html").exists());
}

#[tokio::test]
async fn test_failures_are_retried_on_next_run() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    mount_seed(&mock_server, 2).await;

    // Boots fails once, then succeeds
    Mock::given(method("GET"))
        .and(path("/us/Unique_Boots"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_pages(&mock_server, 1, 1).await;
    mount_images(&mock_server, 1).await;

    let dir = TempDir::new().expect("Failed to create temp dir");

    let mut first = Coordinator::new(create_test_config(&base, dir.path())).unwrap();
    let first_stats = first.run().await;
    assert_eq!(first_stats.pages.archived, 1);
    assert_eq!(first_stats.pages.failed, 1);
    assert!(!first
        .ledger()
        .is_done(Namespace::Pages, &format!("{}/us/Unique_Boots", base)));

    let mut second = Coordinator::new(create_test_config(&base, dir.path())).unwrap();
    let second_stats = second.run().await;
    assert_eq!(second_stats.pages.archived, 1);
    assert_eq!(second_stats.pages.skipped, 1);
    assert_eq!(second.ledger().done_count(Namespace::Pages), 2);
    assert_eq!(second.ledger().done_count(Namespace::Images), 3);
}

#[tokio::test]
async fn test_corrupt_ledger_is_treated_as_empty() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    mount_seed(&mock_server, 1).await;
    mount_pages(&mock_server, 1, 1).await;
    mount_images(&mock_server, 1).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("state.json"), "{\"pages\": [not json").unwrap();

    let mut coordinator = Coordinator::new(create_test_config(&base, dir.path())).unwrap();
    let stats = coordinator.run().await;

    assert_eq!(stats.pages.archived, 2);
    assert_eq!(stats.images.downloaded, 3);

    let ledger = LedgerStore::load(&dir.path().join("state.json"));
    assert_eq!(ledger.done_count(Namespace::Pages), 2);
}

#[tokio::test]
async fn test_seed_failure_still_processes_archived_pages() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/us/Unique_item"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gen/image/Rings/Mings_Heart.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![9u8]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    std::fs::create_dir_all(dir.path().join("raw_html")).unwrap();
    std::fs::write(
        dir.path().join("raw_html/Unique_Rings.html"),
        r#"<img src="/gen/image/Rings/Mings_Heart.png" alt="Ming's Heart">"#,
    )
    .unwrap();

    let mut coordinator = Coordinator::new(create_test_config(&base, dir.path())).unwrap();
    let stats = coordinator.run().await;

    assert_eq!(stats.categories_discovered, 0);
    assert_eq!(stats.images.downloaded, 1);

    let url = format!("{}/gen/image/Rings/Mings_Heart.png", base);
    assert_eq!(
        image_names(dir.path()),
        vec![format!("Mings Heart_{}.png", url_suffix(&url))]
    );
}
