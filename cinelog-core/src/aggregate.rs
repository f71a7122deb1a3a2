//! Aggregate statistics over a community's film entries.
//!
//! Pure computations — the ledger document is loaded elsewhere and the
//! results are rendered elsewhere.

use std::collections::HashMap;

use crate::film::{FilmEntry, Rating, film_key};

/// Maximum number of films returned by [`rank`].
pub const TOP_LIMIT: usize = 25;

/// One film's standing in a top-rated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct FilmStanding {
    pub title: String,
    pub average: f64,
    pub watchers: usize,
    pub url: String,
}

/// Arithmetic mean of the numeric ratings, rounded to two decimals.
///
/// Watched-only logs are excluded. An entry with no numeric ratings at all
/// averages to 0 — that is the served answer, not an error.
pub fn average_rating(entry: &FilmEntry) -> f64 {
    let mut sum = 0u32;
    let mut rated = 0u32;
    for rating in entry.ratings.values() {
        if let Some(n) = rating.stars() {
            sum += u32::from(n);
            rated += 1;
        }
    }
    if rated == 0 {
        return 0.0;
    }
    let avg = f64::from(sum) / f64::from(rated);
    (avg * 100.0).round() / 100.0
}

/// One `"member: rating"` line per numeric rating, in member order.
pub fn format_member_ratings(entry: &FilmEntry) -> String {
    let mut out = String::new();
    for (member, rating) in &entry.ratings {
        if let Rating::Stars(n) = rating {
            out.push_str(member);
            out.push_str(": ");
            out.push_str(&n.to_string());
            out.push('\n');
        }
    }
    out
}

/// Find a film by query: exact key match first, then the first
/// prefix match in sorted key order.
pub fn lookup_film<'a>(
    films: &'a HashMap<String, FilmEntry>,
    query: &str,
) -> Option<&'a FilmEntry> {
    let key = film_key(query);
    if let Some(entry) = films.get(&key) {
        return Some(entry);
    }
    films
        .iter()
        .filter(|(k, _)| k.starts_with(&key))
        .min_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, entry)| entry)
}

/// Standings for every film with at least `min_watchers` member logs.
pub fn top_films(films: &HashMap<String, FilmEntry>, min_watchers: usize) -> Vec<FilmStanding> {
    films
        .values()
        .filter(|entry| entry.watchers() >= min_watchers)
        .map(|entry| FilmStanding {
            title: entry.title.clone(),
            average: average_rating(entry),
            watchers: entry.watchers(),
            url: entry.url.clone(),
        })
        .collect()
}

/// Order standings best-first and keep the top 25.
pub fn rank(mut standings: Vec<FilmStanding>) -> Vec<FilmStanding> {
    standings.sort_by(|a, b| {
        b.average
            .total_cmp(&a.average)
            .then(b.watchers.cmp(&a.watchers))
            .then_with(|| a.title.cmp(&b.title))
    });
    standings.truncate(TOP_LIMIT);
    standings
}
