//! Community registry: which members exist and their letterboxd handles.
//!
//! The document is `{ community: { user: handle } }`. Every mutating call
//! rewrites the file before returning, so the on-disk registry never lags
//! the in-memory one.

use std::collections::HashMap;
use std::path::PathBuf;

use cinelog_core::site;

use crate::error::StoreError;
use crate::util::{read_optional, write_atomic};

#[derive(Debug)]
pub struct RegistryStore {
    path: PathBuf,
    communities: HashMap<String, HashMap<String, String>>,
}

impl RegistryStore {
    /// Open the registry document; a missing file is an empty registry.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let communities = match read_optional(&path)? {
            Some(contents) => serde_json::from_str(&contents)?,
            None => HashMap::new(),
        };
        Ok(Self { path, communities })
    }

    /// Ensure a community exists (no-op when already present).
    pub fn add_community(&mut self, community: &str) -> Result<(), StoreError> {
        self.communities.entry(community.to_string()).or_default();
        self.persist()
    }

    /// Register a user, overwriting any previous handle.
    ///
    /// Returns the replaced handle when the user was already registered.
    pub fn register(
        &mut self,
        community: &str,
        user: &str,
        handle: &str,
    ) -> Result<Option<String>, StoreError> {
        let previous = self
            .communities
            .entry(community.to_string())
            .or_default()
            .insert(user.to_string(), handle.to_string());
        self.persist()?;
        Ok(previous)
    }

    /// Remove a user from a community. Returns whether they were registered.
    pub fn remove(&mut self, community: &str, user: &str) -> Result<bool, StoreError> {
        let removed = self
            .communities
            .get_mut(community)
            .and_then(|users| users.remove(user))
            .is_some();
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    /// The letterboxd handle a user registered with.
    pub fn handle(&self, community: &str, user: &str) -> Option<&str> {
        self.communities
            .get(community)?
            .get(user)
            .map(String::as_str)
    }

    /// First listing-page ref for a registered user, or `None` when the
    /// community or user is unknown.
    pub fn start_ref(&self, community: &str, user: &str) -> Option<String> {
        self.handle(community, user).map(site::films_first_page)
    }

    /// Registered `(user, handle)` pairs of a community, sorted by user.
    pub fn users(&self, community: &str) -> Vec<(&str, &str)> {
        let mut users: Vec<(&str, &str)> = self
            .communities
            .get(community)
            .map(|m| m.iter().map(|(u, h)| (u.as_str(), h.as_str())).collect())
            .unwrap_or_default();
        users.sort();
        users
    }

    fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.communities)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }
}
