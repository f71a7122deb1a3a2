//! The pagination walk: drive the fetcher and extractor across a member's
//! listing pages and merge every log entry into the ledger.

use cinelog_core::film::display_title;
use cinelog_core::site;
use cinelog_store::{Ledger, TitleCache};

use crate::error::ScrapeError;
use crate::extract;
use crate::fetch::PageFetcher;
use crate::report::IngestReport;

/// Options for one ingestion run.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Hard cap on pages walked. The site signals completion only by
    /// serving an empty page, so a cap bounds the walk if that signal
    /// never comes.
    pub max_pages: u32,
    /// Rewrite the ledger after every page, so an aborted run re-scrapes
    /// at most one page.
    pub persist_each_page: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            max_pages: 500,
            persist_each_page: true,
        }
    }
}

/// Walk a member's film-log pages from `start_ref` until a page yields no
/// log nodes, merging every entry into `ledger` under `community`/`user`.
///
/// Pages are fetched strictly in order — whether another page exists is
/// only known after extracting the current one. Titles resolve through
/// `cache`; each unseen film costs exactly one static fetch, ever. A fetch
/// failure aborts the run; everything merged before it is already saved
/// when `persist_each_page` is on.
pub async fn ingest_user(
    fetcher: &dyn PageFetcher,
    cache: &mut TitleCache,
    ledger: &mut Ledger,
    community: &str,
    user: &str,
    start_ref: &str,
    options: &IngestOptions,
) -> Result<IngestReport, ScrapeError> {
    let mut page_number = site::page_number(start_ref).ok_or_else(|| {
        ScrapeError::Parse(format!("listing ref has no page number: {start_ref}"))
    })?;
    let mut url = start_ref.to_string();
    let mut report = IngestReport::new(user);

    loop {
        let html = fetcher.render_page(&url).await?;
        let page = extract::extract_film_logs(&html);
        if page.found == 0 {
            log::info!("{} pages scraped for {user}", report.pages);
            break;
        }

        log::info!("Scraping page {page_number} for {user}");
        for raw in &page.logs {
            let film_url = site::film_url(&raw.slug);
            let resolved = match cache.get(&film_url) {
                Some(hit) => {
                    report.cache_hits += 1;
                    hit.clone()
                }
                None => {
                    let film_html = fetcher.fetch_static(&film_url).await?;
                    let resolved = extract::parse_film_title(&film_html);
                    cache.insert(&film_url, resolved.clone())?;
                    report.cache_misses += 1;
                    resolved
                }
            };

            let title = display_title(&resolved.title, &resolved.release_year);
            log::debug!("Merging {title:?} rated {} by {user}", raw.rating);
            ledger.merge(community, &title, &film_url, user, raw.rating);
            report.entries += 1;
        }
        report.skipped += page.found - page.logs.len();
        report.pages += 1;

        if options.persist_each_page {
            ledger.save()?;
        }

        if report.pages >= options.max_pages {
            log::warn!(
                "Stopping after {} pages for {user}; raise max_pages if the history is longer",
                options.max_pages,
            );
            break;
        }

        url = site::next_page(&url)
            .ok_or_else(|| ScrapeError::Parse(format!("cannot advance past {url}")))?;
        page_number += 1;
    }

    if !options.persist_each_page {
        ledger.save()?;
    }

    report.finish();
    Ok(report)
}

#[cfg(test)]
#[path = "tests/ingest_tests.rs"]
mod tests;
