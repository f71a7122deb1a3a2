//! Film identity and rating values.
//!
//! A film is keyed in the ledger by its normalized display title — lowercase
//! with parenthesis characters stripped — so "Heat (1995)" and "heat 1995"
//! resolve to the same entry. Ratings are letterboxd half-stars doubled to an
//! integer (★★★½ = 7); a film logged without a rating is marked watched.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Stored marker for a film logged as watched with no numeric rating.
pub const WATCHED_MARK: &str = "\u{2713}";

/// Ledger key for a film: lowercase display title with parens stripped.
pub fn film_key(display_title: &str) -> String {
    display_title
        .to_lowercase()
        .chars()
        .filter(|&c| c != '(' && c != ')')
        .collect()
}

/// Combined display title, `"Title (Year)"`.
///
/// A film with no known year keeps the empty parens (`"Title ()"`) —
/// existing ledgers store unresolved years in that form.
pub fn display_title(title: &str, release_year: &str) -> String {
    format!("{title} ({release_year})")
}

/// One member's log of a film.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    /// Half-star rating doubled to an integer, 1..=10.
    Stars(u8),
    /// Logged as watched, no numeric rating given.
    Watched,
}

impl Rating {
    /// The numeric value, or `None` for watched-only logs.
    pub fn stars(self) -> Option<u8> {
        match self {
            Rating::Stars(n) => Some(n),
            Rating::Watched => None,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Stars(n) => write!(f, "{n}"),
            Rating::Watched => write!(f, "{WATCHED_MARK}"),
        }
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Rating::Stars(n) => serializer.serialize_u8(*n),
            Rating::Watched => serializer.serialize_str(WATCHED_MARK),
        }
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RatingVisitor;

        impl Visitor<'_> for RatingVisitor {
            type Value = Rating;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "an integer rating or \"{WATCHED_MARK}\"")
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Rating, E> {
                u8::try_from(v)
                    .ok()
                    .filter(|n| (1..=10).contains(n))
                    .map(Rating::Stars)
                    .ok_or_else(|| E::custom(format!("rating out of range: {v}")))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Rating, E> {
                u64::try_from(v)
                    .map_err(|_| E::custom(format!("rating out of range: {v}")))
                    .and_then(|n| self.visit_u64(n))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Rating, E> {
                if v == WATCHED_MARK {
                    Ok(Rating::Watched)
                } else {
                    Err(E::custom(format!("unknown rating marker: {v:?}")))
                }
            }
        }

        deserializer.deserialize_any(RatingVisitor)
    }
}

/// One ledger entry: a film and every member log of it in one community.
///
/// Persists as a single JSON object with two reserved keys (`url`, `title`)
/// plus one key per member. A member actually named "url" or "title" would
/// collide with the reserved keys; that edge case is accepted, not defended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilmEntry {
    pub url: String,
    pub title: String,
    /// Member name → rating. Sorted so the stored form is stable.
    pub ratings: BTreeMap<String, Rating>,
}

impl FilmEntry {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            ratings: BTreeMap::new(),
        }
    }

    /// Number of members who logged this film, rated or not.
    pub fn watchers(&self) -> usize {
        self.ratings.len()
    }
}

impl Serialize for FilmEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2 + self.ratings.len()))?;
        map.serialize_entry("url", &self.url)?;
        map.serialize_entry("title", &self.title)?;
        for (member, rating) in &self.ratings {
            map.serialize_entry(member, rating)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FilmEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntryVisitor;

        impl<'de> Visitor<'de> for EntryVisitor {
            type Value = FilmEntry;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a film entry object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<FilmEntry, A::Error> {
                let mut entry = FilmEntry::default();
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "url" => entry.url = map.next_value()?,
                        "title" => entry.title = map.next_value()?,
                        _ => {
                            let rating = map.next_value()?;
                            entry.ratings.insert(key, rating);
                        }
                    }
                }
                Ok(entry)
            }
        }

        deserializer.deserialize_map(EntryVisitor)
    }
}
