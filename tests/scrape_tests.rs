//! End-to-end scrape tests
//!
//! These tests run the full coordinator loop against a wiremock server
//! serving portal-shaped listing fixtures.

use eis_scraper::config::{Config, ScraperConfig, StorageBackend, StorageConfig, UserAgentConfig};
use eis_scraper::records::PageType;
use eis_scraper::scrape::Coordinator;
use eis_scraper::storage::{MemoryStorage, SqliteStorage, StorageAdapter, StorageResult};
use eis_scraper::PageRecord;
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AUCTION_FIXTURE: &str = include_str!("fixtures/auction_results.html");

fn test_config(base_url: &str, page_type: PageType) -> Config {
    Config {
        scraper: ScraperConfig {
            base_url: base_url.to_string(),
            page_type,
            date_from: NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
            date_to: NaiveDate::from_ymd_opt(2020, 3, 31).unwrap(),
            max_result_pages: 20,
            records_per_page: 50,
            request_delay_ms: 0, // no politeness delay in tests
        },
        user_agent: UserAgentConfig {
            name: "eis-scraper-test".to_string(),
            version: "0.1.0".to_string(),
            contact_url: "https://example.com/about".to_string(),
        },
        storage: StorageConfig {
            backend: StorageBackend::Memory,
            database_path: None,
            csv_dir: None,
        },
    }
}

/// Third-party adapter exercising the single-capability storage seam:
/// shares an in-memory store with the test so results can be inspected
/// after the run.
struct SharedMemory(Arc<Mutex<MemoryStorage>>);

impl StorageAdapter for SharedMemory {
    fn write(&mut self, records: &[PageRecord]) -> StorageResult<()> {
        let mut inner = self.0.lock().unwrap();
        inner.write(records)
    }
}

#[tokio::test]
async fn test_full_run_into_memory_storage() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/epz/order/extendedsearch/results.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(AUCTION_FIXTURE))
        .mount(&server)
        .await;

    let store = Arc::new(Mutex::new(MemoryStorage::new()));
    let config = test_config(&server.uri(), PageType::Auction);

    let mut coordinator =
        Coordinator::with_storage(config, Box::new(SharedMemory(Arc::clone(&store))))
            .expect("failed to build coordinator");
    let report = coordinator.run().await.expect("scrape failed");

    // Fixture advertises 2 results: one slice, one result page, two records
    assert_eq!(report.slices, 1);
    assert_eq!(report.pages_fetched, 1);
    assert_eq!(report.pages_skipped, 0);
    assert_eq!(report.records_written, 2);

    let store = store.lock().unwrap();
    let auctions = store.auctions();
    assert_eq!(auctions.len(), 2);
    assert_eq!(auctions[0].reg_number, "0173200001420000123");
    assert_eq!(auctions[0].initial_price, Some(1_234_567.89));
    assert_eq!(auctions[1].reg_number, "0173200001420000456");
}

#[tokio::test]
async fn test_full_run_into_sqlite_storage() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/epz/order/extendedsearch/results.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(AUCTION_FIXTURE))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("scrape.db");

    let mut config = test_config(&server.uri(), PageType::Auction);
    config.storage.backend = StorageBackend::Sqlite;
    config.storage.database_path = Some(db_path.to_string_lossy().into_owned());

    let mut coordinator = Coordinator::new(config).expect("failed to build coordinator");
    let report = coordinator.run().await.expect("scrape failed");
    assert_eq!(report.records_written, 2);
    drop(coordinator);

    // Reopen the database: rows were persisted incrementally
    let storage = SqliteStorage::new(&db_path).unwrap();
    assert_eq!(storage.count(PageType::Auction).unwrap(), 2);
}

#[tokio::test]
async fn test_empty_result_set_yields_empty_plan() {
    let server = MockServer::start().await;

    // Portal omits the total counter when nothing matched
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .mount(&server)
        .await;

    let store = Arc::new(Mutex::new(MemoryStorage::new()));
    let config = test_config(&server.uri(), PageType::Contract);

    let mut coordinator =
        Coordinator::with_storage(config, Box::new(SharedMemory(Arc::clone(&store))))
            .expect("failed to build coordinator");
    let report = coordinator.run().await.expect("scrape failed");

    assert_eq!(report.slices, 0);
    assert_eq!(report.records_written, 0);
    assert_eq!(store.lock().unwrap().count(PageType::Contract), 0);
}

#[tokio::test]
async fn test_unreachable_portal_completes_with_empty_plan() {
    let server = MockServer::start().await;

    // Every request, planning probes included, comes back 404
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = Arc::new(Mutex::new(MemoryStorage::new()));
    let config = test_config(&server.uri(), PageType::Auction);

    let mut coordinator =
        Coordinator::with_storage(config, Box::new(SharedMemory(Arc::clone(&store))))
            .expect("failed to build coordinator");
    let report = coordinator.run().await.expect("fetch failures must not halt the run");

    assert_eq!(report.slices, 0);
    assert_eq!(report.pages_fetched, 0);
    assert_eq!(report.records_written, 0);
    assert_eq!(store.lock().unwrap().count(PageType::Auction), 0);
}

#[tokio::test]
async fn test_page_with_broken_entry_keeps_good_entries() {
    let server = MockServer::start().await;

    // First entry lacks its registry number; second is complete
    let body = format!(
        r#"<html><body>
        <div class="search-results__total">2 записи</div>
        <div class="search-registry-entry-block">
          <div class="registry-entry__header-mid__title">Подача заявок</div>
        </div>
        {}
        </body></html>"#,
        r#"<div class="search-registry-entry-block">
          <div class="registry-entry__header-mid__number"><a href="/view.html">№ 0173200001420000999</a></div>
          <div class="registry-entry__header-mid__title">Подача заявок</div>
          <div class="registry-entry__body-block">
            <div class="registry-entry__body-title">Объект закупки</div>
            <div class="registry-entry__body-value">Поставка аннулопластических колец</div>
          </div>
          <div class="registry-entry__body-block">
            <div class="registry-entry__body-title">Заказчик</div>
            <div class="registry-entry__body-href"><a href="/view.html">ФГБУ Кардиоцентр</a></div>
          </div>
          <div class="data-block">
            <div class="data-block__title">Размещено</div>
            <div class="data-block__value">10.03.2020</div>
          </div>
        </div>"#
    );

    Mock::given(method("GET"))
        .and(path("/epz/order/extendedsearch/results.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let store = Arc::new(Mutex::new(MemoryStorage::new()));
    let config = test_config(&server.uri(), PageType::Auction);

    let mut coordinator =
        Coordinator::with_storage(config, Box::new(SharedMemory(Arc::clone(&store))))
            .expect("failed to build coordinator");
    let report = coordinator.run().await.expect("scrape failed");

    // The malformed entry is dropped, the run continues
    assert_eq!(report.pages_fetched, 1);
    assert_eq!(report.pages_skipped, 0);
    assert_eq!(report.records_written, 1);

    let store = store.lock().unwrap();
    assert_eq!(store.auctions()[0].reg_number, "0173200001420000999");
}
