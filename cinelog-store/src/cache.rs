//! Title/release cache keyed by canonical film URL.
//!
//! Film pages are static; once a title and release year have been resolved
//! they are treated as truth for the lifetime of the cache file. The cache
//! is loaded once per process and flushed after every newly resolved entry,
//! so an aborted ingestion run keeps everything it paid network round-trips
//! for.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::util::{read_optional, write_atomic};

/// A film's resolved metadata. `release_year` is empty when the film page
/// carried no parenthesized year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTitle {
    pub title: String,
    pub release_year: String,
}

#[derive(Debug)]
pub struct TitleCache {
    path: PathBuf,
    entries: HashMap<String, ResolvedTitle>,
}

impl TitleCache {
    /// Open the cache document; a missing file is an empty cache.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match read_optional(&path)? {
            Some(contents) => serde_json::from_str(&contents)?,
            None => HashMap::new(),
        };
        Ok(Self { path, entries })
    }

    pub fn get(&self, film_url: &str) -> Option<&ResolvedTitle> {
        self.entries.get(film_url)
    }

    /// Record a newly resolved film and flush the document.
    pub fn insert(&mut self, film_url: &str, resolved: ResolvedTitle) -> Result<(), StoreError> {
        self.entries.insert(film_url.to_string(), resolved);
        let json = serde_json::to_string_pretty(&self.entries)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
