//! Deployment settings read from an optional `confsplice.toml`.
//!
//! Every field has a default, so a missing or partial file still yields a usable `Config`.
//! It names the document to rewrite, the anchor and token of the payload, and whether a
//! failed rewrite aborts the selection flow.

use crate::payload::{AuthHeader, AUTH_HEADER_ANCHOR, DEFAULT_TARGET_TOKEN};
use crate::rewrite::RewriteOptions;
use facet::Facet;
use std::fs;
use std::path::PathBuf;

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "confsplice.toml";

#[derive(Facet, Clone, Debug)]
/// Preferences loaded from confsplice.toml or falling back to defaults.
pub struct Config {
    #[facet(default = "configuration.yaml".to_string())]
    /// Document to rewrite.
    pub config_path: String,
    #[facet(default = AUTH_HEADER_ANCHOR.to_string())]
    /// Top-level key whose section receives the payload.
    pub anchor: String,
    #[facet(default = DEFAULT_TARGET_TOKEN.to_string())]
    /// Token written into the payload.
    pub target_token: String,
    #[facet(default = true)]
    /// Drop an earlier payload instead of leaving it behind as comments.
    pub replace_prior_payload: bool,
    #[facet(default = false)]
    /// Refuse to create the entry when the rewrite fails.
    pub abort_on_rewrite_failure: bool,
    #[facet(default = "entries.json".to_string())]
    /// Where the CLI keeps created entries between runs.
    pub registry_path: String,
}

impl Config {
    #[must_use]
    /// Load configuration from confsplice.toml if present.
    pub fn load() -> Self {
        fs::read_to_string(CONFIG_FILE)
            .ok()
            .and_then(|contents| Self::parse(&contents))
            .unwrap_or_default()
    }

    #[must_use]
    /// Parse configuration text, `None` if it is not valid for this schema.
    pub fn parse(contents: &str) -> Option<Self> {
        match facet_toml::from_str::<Self>(contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("Ignoring invalid {CONFIG_FILE}: {e}");
                None
            }
        }
    }

    #[must_use]
    /// Payload built from the configured anchor and token.
    pub fn payload(&self) -> AuthHeader {
        AuthHeader::with_anchor(&*self.anchor, &*self.target_token)
    }

    #[must_use]
    /// Rewrite options derived from these preferences.
    pub fn rewrite_options(&self) -> RewriteOptions {
        RewriteOptions {
            replace_prior_payload: self.replace_prior_payload,
        }
    }

    #[must_use]
    /// Document path as a `PathBuf`.
    pub fn document(&self) -> PathBuf {
        PathBuf::from(&self.config_path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: "configuration.yaml".to_string(),
            anchor: AUTH_HEADER_ANCHOR.to_string(),
            target_token: DEFAULT_TARGET_TOKEN.to_string(),
            replace_prior_payload: true,
            abort_on_rewrite_failure: false,
            registry_path: "entries.json".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
