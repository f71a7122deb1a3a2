//! Extraction of rating-log facts from scraped markup.
//!
//! A listing page carries one `li.poster-container` node per logged film.
//! The poster div's `data-film-slug` attribute identifies the film; an
//! optional `span.rating` encodes the numeric rating as the digit suffix of
//! its last class name (`rated-9` → 9). A film page's `<title>` is
//! `"Title (Year)"`, sometimes with a leading left-to-right mark.

use cinelog_core::film::Rating;
use cinelog_store::ResolvedTitle;
use scraper::{ElementRef, Html, Selector};

/// Title stored for film pages with no extractable `<title>` element.
pub const PLACEHOLDER_TITLE: &str = "No Title, No Year";

/// One rating-log node, before title resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLog {
    pub slug: String,
    pub rating: Rating,
}

/// Everything one listing page yielded.
///
/// `found` counts poster nodes whether or not they parsed; the walk
/// terminates on a page with zero nodes, not zero parsed logs.
#[derive(Debug, Default)]
pub struct PageLogs {
    pub found: usize,
    pub logs: Vec<RawLog>,
}

fn selector(pattern: &str) -> Selector {
    Selector::parse(pattern).expect("static selector")
}

/// Enumerate the rating-log nodes of one rendered listing page.
///
/// Malformed nodes are skipped; the rest of the page still processes.
pub fn extract_film_logs(html: &str) -> PageLogs {
    let doc = Html::parse_document(html);
    let node_sel = selector("li.poster-container");
    let poster_sel = selector("div.film-poster");
    let rating_sel = selector("span.rating");

    let mut page = PageLogs::default();
    for node in doc.select(&node_sel) {
        page.found += 1;
        match extract_log(node, &poster_sel, &rating_sel) {
            Some(log) => page.logs.push(log),
            None => log::debug!("Skipping malformed poster node"),
        }
    }
    page
}

fn extract_log(node: ElementRef<'_>, poster_sel: &Selector, rating_sel: &Selector) -> Option<RawLog> {
    let slug = node
        .select(poster_sel)
        .next()?
        .value()
        .attr("data-film-slug")?
        .to_string();

    // No rating span means the film was logged as watched only.
    let rating = match node.select(rating_sel).next() {
        Some(span) => {
            let class = span.value().attr("class")?;
            let digits = class.rsplit('-').next()?;
            Rating::Stars(digits.parse().ok()?)
        }
        None => Rating::Watched,
    };

    Some(RawLog { slug, rating })
}

/// Resolve title and release year from a film page document.
pub fn parse_film_title(html: &str) -> ResolvedTitle {
    let doc = Html::parse_document(html);
    let title_sel = selector("title");
    let Some(el) = doc.select(&title_sel).next() else {
        return ResolvedTitle {
            title: PLACEHOLDER_TITLE.to_string(),
            release_year: String::new(),
        };
    };
    split_title_year(&el.text().collect::<String>())
}

/// Split `"Title (Year)"` on the last `" ("`. No parenthesized year yields
/// an empty year and the full text as the title.
fn split_title_year(raw: &str) -> ResolvedTitle {
    match raw.rsplit_once(" (") {
        Some((title, rest)) => ResolvedTitle {
            title: strip_lrm(title.trim()).to_string(),
            release_year: rest.split(')').next().unwrap_or_default().to_string(),
        },
        None => ResolvedTitle {
            title: strip_lrm(raw.trim()).to_string(),
            release_year: String::new(),
        },
    }
}

/// Drop the zero-width left-to-right mark some titles lead with.
fn strip_lrm(text: &str) -> &str {
    text.strip_prefix('\u{200E}').unwrap_or(text)
}

#[cfg(test)]
#[path = "tests/extract_tests.rs"]
mod tests;
