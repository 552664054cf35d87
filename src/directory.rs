//! Identity lookup: which users may be chosen as the guest account.
//!
//! Only ordinary people qualify. Administrators, system-generated accounts and users
//! allowed to log in from outside the local network are filtered out.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// A user account as reported by the host.
pub struct User {
    /// Stable identifier written into the payload.
    pub id: String,
    /// Display name shown in the selection form.
    pub name: String,
    #[serde(default)]
    /// Whether the user administers the host.
    pub is_admin: bool,
    #[serde(default)]
    /// Whether the account was created by the host itself.
    pub system_generated: bool,
    #[serde(default)]
    /// Whether the user may only log in from the local network.
    pub local_only: bool,
}

impl User {
    #[must_use]
    /// Whether this user can be offered as the guest identity.
    pub fn is_candidate(&self) -> bool {
        !self.is_admin && !self.system_generated && self.local_only
    }
}

/// Source of user accounts.
pub trait Directory {
    /// Every known user.
    fn users(&self) -> Vec<User>;

    /// Eligible users as `id -> display name`, possibly empty.
    fn list_candidates(&self) -> BTreeMap<String, String> {
        self.users()
            .into_iter()
            .filter(User::is_candidate)
            .map(|user| (user.id, user.name))
            .collect()
    }
}

#[derive(Clone, Debug, Default)]
/// Directory backed by an in-memory list, typically loaded from a JSON export.
pub struct JsonDirectory {
    users: Vec<User>,
}

impl JsonDirectory {
    #[must_use]
    /// Directory over the given users.
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// Reads a JSON array of users.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON array of users.
    pub fn load(path: &Path) -> io::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let users: Vec<User> = serde_json::from_str(&contents)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Self::new(users))
    }
}

impl Directory for JsonDirectory {
    fn users(&self) -> Vec<User> {
        self.users.clone()
    }
}

#[cfg(test)]
#[path = "tests/directory.rs"]
mod tests;
