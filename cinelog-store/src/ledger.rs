//! The rating ledger: community → film key → member logs.
//!
//! Merging is idempotent — re-ingesting a user's history converges to the
//! same document. The persisted form orders each community's films
//! most-watched-first with shuffled ties, so readers of the raw file see
//! popular films up top; in memory the maps are unordered because no
//! lookup depends on order.

use std::collections::HashMap;
use std::path::PathBuf;

use cinelog_core::film::{FilmEntry, Rating, film_key};
use rand::seq::SliceRandom;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::StoreError;
use crate::util::{read_optional, write_atomic};

type Films = HashMap<String, FilmEntry>;

#[derive(Debug, Default)]
pub struct Ledger {
    path: PathBuf,
    communities: HashMap<String, Films>,
}

impl Ledger {
    /// Open the ledger document; a missing file is an empty ledger.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let communities = match read_optional(&path)? {
            Some(contents) => serde_json::from_str(&contents)?,
            None => HashMap::new(),
        };
        Ok(Self { path, communities })
    }

    /// Merge one log entry: create the film entry if absent, then set the
    /// user's rating, overwriting any prior value.
    pub fn merge(
        &mut self,
        community: &str,
        display_title: &str,
        url: &str,
        user: &str,
        rating: Rating,
    ) {
        let films = self.communities.entry(community.to_string()).or_default();
        let entry = films
            .entry(film_key(display_title))
            .or_insert_with(|| FilmEntry::new(url, display_title));
        entry.ratings.insert(user.to_string(), rating);
    }

    /// Drop a user's rating from every film entry in one community.
    ///
    /// Entries the user was the last member of stay in the document.
    /// Other communities are untouched.
    pub fn remove_user(&mut self, community: &str, user: &str) {
        if let Some(films) = self.communities.get_mut(community) {
            for entry in films.values_mut() {
                entry.ratings.remove(user);
            }
        }
    }

    /// A community's film entries, or `None` when nothing has been logged.
    pub fn films(&self, community: &str) -> Option<&Films> {
        self.communities.get(community)
    }

    /// Total film entries across all communities.
    pub fn film_count(&self) -> usize {
        self.communities.values().map(Films::len).sum()
    }

    /// Rewrite the document. Communities are written sorted by id; each
    /// community's films are shuffled, then stably sorted most-watched-first,
    /// so the stored order is popularity with randomized ties.
    pub fn save(&self) -> Result<(), StoreError> {
        let mut ids: Vec<&String> = self.communities.keys().collect();
        ids.sort();
        let order: Vec<(&String, Vec<String>)> = ids
            .into_iter()
            .map(|id| {
                let films = &self.communities[id];
                let mut keys = shuffled_keys(films);
                most_watched_first(&mut keys, films);
                (id, keys)
            })
            .collect();

        let json = serde_json::to_string_pretty(&PersistedLedger {
            ledger: self,
            order: &order,
        })?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }
}

/// Film keys in random order.
pub fn shuffled_keys(films: &Films) -> Vec<String> {
    let mut keys: Vec<String> = films.keys().cloned().collect();
    keys.shuffle(&mut rand::rng());
    keys
}

/// Stable sort by member count, descending. Ties keep their prior order.
pub fn most_watched_first(keys: &mut [String], films: &Films) {
    keys.sort_by_key(|k| std::cmp::Reverse(films.get(k).map_or(0, FilmEntry::watchers)));
}

/// Serialization wrapper that emits communities and films in a chosen order.
/// `serde_json` writes map entries in call order, which is what makes the
/// ordering stick in the document.
struct PersistedLedger<'a> {
    ledger: &'a Ledger,
    order: &'a [(&'a String, Vec<String>)],
}

impl Serialize for PersistedLedger<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.order.len()))?;
        for (id, film_order) in self.order {
            let films = &self.ledger.communities[*id];
            map.serialize_entry(id, &OrderedFilms {
                films,
                order: film_order,
            })?;
        }
        map.end()
    }
}

struct OrderedFilms<'a> {
    films: &'a Films,
    order: &'a [String],
}

impl Serialize for OrderedFilms<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.order.len()))?;
        for key in self.order {
            if let Some(entry) = self.films.get(key) {
                map.serialize_entry(key, entry)?;
            }
        }
        map.end()
    }
}
