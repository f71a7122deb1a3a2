use std::collections::HashMap;
use std::sync::Mutex;

use cinelog_core::film::Rating;
use cinelog_core::site;
use cinelog_store::{Ledger, TitleCache};
use tempfile::TempDir;

use super::*;

const COMMUNITY: &str = "644202189144850472";
const START: &str = "https://letterboxd.com/ana-films/films/page/1/";

#[derive(Default)]
struct FakeFetcher {
    pages: HashMap<String, String>,
    films: HashMap<String, String>,
    rendered: Mutex<Vec<String>>,
    fetched: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl PageFetcher for FakeFetcher {
    async fn render_page(&self, url: &str) -> Result<String, ScrapeError> {
        self.rendered.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().ok_or(ScrapeError::Timeout {
            url: url.to_string(),
        })
    }

    async fn fetch_static(&self, url: &str) -> Result<String, ScrapeError> {
        self.fetched.lock().unwrap().push(url.to_string());
        self.films.get(url).cloned().ok_or(ScrapeError::Timeout {
            url: url.to_string(),
        })
    }
}

fn listing(entries: &[(&str, Option<u8>)]) -> String {
    let mut html = String::from("<html><body><ul class=\"poster-list\">");
    for (slug, rating) in entries {
        html.push_str("<li class=\"poster-container\">");
        html.push_str(&format!(
            "<div class=\"film-poster\" data-film-slug=\"{slug}\"></div>"
        ));
        if let Some(n) = rating {
            html.push_str(&format!("<span class=\"rating rated-{n}\"></span>"));
        }
        html.push_str("</li>");
    }
    html.push_str("</ul></body></html>");
    html
}

fn film_page(title: &str) -> String {
    format!("<html><head><title>{title}</title></head><body></body></html>")
}

fn page_url(n: u32) -> String {
    format!("https://letterboxd.com/ana-films/films/page/{n}/")
}

/// Two pages of logs, then an empty third page.
fn three_page_fetcher() -> FakeFetcher {
    let mut fetcher = FakeFetcher::default();
    fetcher
        .pages
        .insert(page_url(1), listing(&[("heat-1995", Some(9))]));
    fetcher
        .pages
        .insert(page_url(2), listing(&[("playtime", None)]));
    fetcher.pages.insert(page_url(3), listing(&[]));
    fetcher
        .films
        .insert(site::film_url("heat-1995"), film_page("Heat (1995)"));
    fetcher
        .films
        .insert(site::film_url("playtime"), film_page("\u{200E}Playtime (1967)"));
    fetcher
}

fn open_stores(dir: &TempDir) -> (TitleCache, Ledger) {
    let cache = TitleCache::open(dir.path().join("cache.json")).unwrap();
    let ledger = Ledger::open(dir.path().join("ratings.json")).unwrap();
    (cache, ledger)
}

#[tokio::test]
async fn pagination_halts_on_first_empty_page() {
    let dir = TempDir::new().unwrap();
    let fetcher = three_page_fetcher();
    let (mut cache, mut ledger) = open_stores(&dir);

    let report = ingest_user(
        &fetcher,
        &mut cache,
        &mut ledger,
        COMMUNITY,
        "ana",
        START,
        &IngestOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(report.pages, 2);
    assert_eq!(report.entries, 2);
    // Pages 1-3 were rendered in order; nothing past the empty page.
    assert_eq!(
        *fetcher.rendered.lock().unwrap(),
        vec![page_url(1), page_url(2), page_url(3)]
    );

    let films = ledger.films(COMMUNITY).unwrap();
    assert_eq!(films["heat 1995"].ratings["ana"], Rating::Stars(9));
    assert_eq!(films["playtime 1967"].ratings["ana"], Rating::Watched);

    // The walk persisted as it went.
    let reloaded = Ledger::open(dir.path().join("ratings.json")).unwrap();
    assert_eq!(reloaded.film_count(), 2);
}

#[tokio::test]
async fn repeated_films_cost_one_static_fetch() {
    let dir = TempDir::new().unwrap();
    let mut fetcher = FakeFetcher::default();
    fetcher
        .pages
        .insert(page_url(1), listing(&[("heat-1995", Some(9))]));
    fetcher
        .pages
        .insert(page_url(2), listing(&[("heat-1995", Some(8))]));
    fetcher.pages.insert(page_url(3), listing(&[]));
    fetcher
        .films
        .insert(site::film_url("heat-1995"), film_page("Heat (1995)"));

    let (mut cache, mut ledger) = open_stores(&dir);
    let report = ingest_user(
        &fetcher,
        &mut cache,
        &mut ledger,
        COMMUNITY,
        "ana",
        START,
        &IngestOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(report.cache_misses, 1);
    assert_eq!(report.cache_hits, 1);
    assert_eq!(fetcher.fetched.lock().unwrap().len(), 1);

    // A rerun is served entirely from the cache.
    let rerun = ingest_user(
        &fetcher,
        &mut cache,
        &mut ledger,
        COMMUNITY,
        "ana",
        START,
        &IngestOptions::default(),
    )
    .await
    .unwrap();
    assert_eq!(rerun.cache_misses, 0);
    assert_eq!(fetcher.fetched.lock().unwrap().len(), 1);

    // And converges to the same ledger state (last page wins the overwrite).
    let films = ledger.films(COMMUNITY).unwrap();
    assert_eq!(films.len(), 1);
    assert_eq!(films["heat 1995"].ratings["ana"], Rating::Stars(8));
}

#[tokio::test]
async fn fetch_failure_aborts_but_keeps_persisted_pages() {
    let dir = TempDir::new().unwrap();
    let mut fetcher = three_page_fetcher();
    // Page 2 now fails to load.
    fetcher.pages.remove(&page_url(2));

    let (mut cache, mut ledger) = open_stores(&dir);
    let result = ingest_user(
        &fetcher,
        &mut cache,
        &mut ledger,
        COMMUNITY,
        "ana",
        START,
        &IngestOptions::default(),
    )
    .await;

    assert!(matches!(result, Err(ScrapeError::Timeout { .. })));

    // Page 1 was merged and saved before the failure.
    let reloaded = Ledger::open(dir.path().join("ratings.json")).unwrap();
    let films = reloaded.films(COMMUNITY).unwrap();
    assert_eq!(films["heat 1995"].ratings["ana"], Rating::Stars(9));
}

#[tokio::test]
async fn page_cap_bounds_the_walk() {
    let dir = TempDir::new().unwrap();
    let fetcher = three_page_fetcher();
    let (mut cache, mut ledger) = open_stores(&dir);

    let options = IngestOptions {
        max_pages: 1,
        ..IngestOptions::default()
    };
    let report = ingest_user(
        &fetcher,
        &mut cache,
        &mut ledger,
        COMMUNITY,
        "ana",
        START,
        &options,
    )
    .await
    .unwrap();

    assert_eq!(report.pages, 1);
    assert_eq!(fetcher.rendered.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn start_ref_without_page_number_is_rejected() {
    let dir = TempDir::new().unwrap();
    let fetcher = FakeFetcher::default();
    let (mut cache, mut ledger) = open_stores(&dir);

    let result = ingest_user(
        &fetcher,
        &mut cache,
        &mut ledger,
        COMMUNITY,
        "ana",
        "https://letterboxd.com/ana-films/films/",
        &IngestOptions::default(),
    )
    .await;

    assert!(matches!(result, Err(ScrapeError::Parse(_))));
    assert!(fetcher.rendered.lock().unwrap().is_empty());
}
