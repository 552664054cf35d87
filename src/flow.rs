//! The single-step selection form that picks the guest user and triggers the rewrite.
//!
//! Showing the form lists the eligible users. Submitting a choice rewrites the document on
//! a blocking worker, so the async runtime is never stalled by file I/O, and then yields
//! the entry to create. A failed rewrite is logged and the entry is still created unless
//! the flow is configured to abort.

use crate::apply::{apply_to_file, Applied};
use crate::config::Config;
use crate::directory::Directory;
use crate::error::FlowError;
use crate::formats::yaml::YamlFormat;
use crate::payload::AuthHeader;
use crate::registry::Entry;
use crate::rewrite::RewriteOptions;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Form field holding the chosen user.
pub const FIELD_USER_ID: &str = "user_id";

#[derive(Debug, PartialEq, Eq)]
/// Next thing the host should do after a form step.
pub enum FormStep {
    /// Render the form with these choices and field errors.
    Form {
        /// Eligible users as `id -> display name`.
        choices: BTreeMap<String, String>,
        /// Field (or `base`) mapped to an error key.
        errors: BTreeMap<String, String>,
    },
    /// Create this entry and finish.
    CreateEntry(Entry),
}

/// Selection form bound to a directory and a target document.
pub struct SelectionForm<D> {
    directory: D,
    document: PathBuf,
    payload: AuthHeader,
    options: RewriteOptions,
    abort_on_rewrite_failure: bool,
}

impl<D: Directory> SelectionForm<D> {
    #[must_use]
    /// Form over `directory` that rewrites the document named in `config`.
    pub fn new(directory: D, config: &Config) -> Self {
        Self {
            directory,
            document: config.document(),
            payload: config.payload(),
            options: config.rewrite_options(),
            abort_on_rewrite_failure: config.abort_on_rewrite_failure,
        }
    }

    #[must_use]
    /// The form to render, with a `no_candidates` error when nobody is eligible.
    pub fn show(&self) -> FormStep {
        let choices = self.directory.list_candidates();
        let mut errors = BTreeMap::new();
        if choices.is_empty() {
            errors.insert(
                "base".to_string(),
                FlowError::NoCandidates.form_key().to_string(),
            );
        }
        FormStep::Form { choices, errors }
    }

    /// Runs one step: shows the form without input, otherwise submits the choice.
    ///
    /// Validation failures come back as a form with the error attached.
    ///
    /// # Errors
    ///
    /// Returns an error only when the rewrite fails with abort enabled or the worker dies.
    pub async fn step(&self, user_id: Option<&str>) -> Result<FormStep, FlowError> {
        let Some(user_id) = user_id else {
            return Ok(self.show());
        };
        match self.submit(user_id).await {
            Ok(entry) => Ok(FormStep::CreateEntry(entry)),
            Err(e @ (FlowError::NoCandidates | FlowError::UnknownCandidate(_))) => {
                let field = if matches!(e, FlowError::NoCandidates) {
                    "base"
                } else {
                    FIELD_USER_ID
                };
                Ok(FormStep::Form {
                    choices: self.directory.list_candidates(),
                    errors: BTreeMap::from([(field.to_string(), e.form_key().to_string())]),
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Validates the choice, rewrites the document off the async runtime and builds the entry.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::NoCandidates`] or [`FlowError::UnknownCandidate`] for a bad
    /// choice, [`FlowError::Rewrite`] when the rewrite fails and the flow aborts on failure,
    /// and [`FlowError::Join`] if the blocking worker panicked.
    pub async fn submit(&self, user_id: &str) -> Result<Entry, FlowError> {
        let candidates = self.directory.list_candidates();
        if candidates.is_empty() {
            return Err(FlowError::NoCandidates);
        }
        if !candidates.contains_key(user_id) {
            return Err(FlowError::UnknownCandidate(user_id.to_string()));
        }

        let document = self.document.clone();
        let payload = self.payload.clone();
        let options = self.options;
        let identifier = user_id.to_string();
        let outcome = tokio::task::spawn_blocking(move || {
            apply_to_file(&document, &YamlFormat, &payload, &identifier, options)
        })
        .await?;

        match outcome {
            Ok(Applied::Unchanged) => tracing::warn!(
                "{} has no section to rewrite; creating the entry anyway",
                self.document.display()
            ),
            Ok(Applied::Rewritten { .. }) => {}
            Err(e) if self.abort_on_rewrite_failure => return Err(e.into()),
            Err(e) => tracing::warn!("Creating the entry despite the failed rewrite: {e}"),
        }

        Ok(Entry::for_user(user_id))
    }
}

#[cfg(test)]
#[path = "tests/flow.rs"]
mod tests;
