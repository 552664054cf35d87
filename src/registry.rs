//! Entry lifecycle: setup, unload and removal of created entries.
//!
//! The host keeps the data of each created entry keyed by entry id. Here that store is
//! an ordinary value owned by whoever drives the lifecycle, not a process-wide map, and it
//! can be saved to and restored from a JSON file between runs.

use crate::error::RegistryError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

/// Title every entry created by the selection flow carries.
pub const ENTRY_TITLE: &str = "Trusted Networks";

/// Key under which the chosen user id is stored in the entry data.
pub const CONF_USER_ID: &str = "user_id";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// A created entry: its id, title and the opaque data submitted by the form.
pub struct Entry {
    /// Unique id assigned at creation.
    pub entry_id: String,
    /// Human-readable title.
    pub title: String,
    /// Submitted form data, stored as-is.
    pub data: BTreeMap<String, String>,
}

impl Entry {
    #[must_use]
    /// New entry for a chosen user, with a fresh id.
    pub fn for_user(user_id: &str) -> Self {
        Self {
            entry_id: uuid::Uuid::new_v4().simple().to_string(),
            title: ENTRY_TITLE.to_string(),
            data: BTreeMap::from([(CONF_USER_ID.to_string(), user_id.to_string())]),
        }
    }

    #[must_use]
    /// The chosen user id, if the data carries one.
    pub fn user_id(&self) -> Option<&str> {
        self.data.get(CONF_USER_ID).map(String::as_str)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Entry data keyed by entry id.
pub struct EntryRegistry {
    entries: BTreeMap<String, Entry>,
}

impl EntryRegistry {
    #[must_use]
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a registry file; a missing file is an empty registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes the registry as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), RegistryError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Setup hook: stores the entry's data under its id. Always succeeds.
    pub fn setup(&mut self, entry: Entry) -> bool {
        tracing::debug!("Setting up entry {}", entry.entry_id);
        self.entries.insert(entry.entry_id.clone(), entry);
        true
    }

    /// Unload hook: drops the entry's data if present. Always succeeds.
    pub fn unload(&mut self, entry_id: &str) -> bool {
        if self.entries.remove(entry_id).is_some() {
            tracing::debug!("Unloaded entry {entry_id}");
        }
        true
    }

    /// Removal hook: unloads, then discards the key whether or not unload found it.
    pub fn remove(&mut self, entry_id: &str) -> Option<Entry> {
        let existing = self.entries.get(entry_id).cloned();
        self.unload(entry_id);
        self.entries.remove(entry_id);
        existing
    }

    #[must_use]
    /// Data stored for an entry.
    pub fn get(&self, entry_id: &str) -> Option<&Entry> {
        self.entries.get(entry_id)
    }

    #[must_use]
    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    /// Whether no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored entries in id order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }
}

#[cfg(test)]
#[path = "tests/registry.rs"]
mod tests;
