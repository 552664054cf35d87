//! Error types for rewriting, the selection flow and the entry registry.

use std::io;
use std::path::PathBuf;

/// Failures while rewriting a document on disk.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    /// The document could not be read (missing, unreadable, not UTF-8).
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Document path.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: io::Error,
    },

    /// The backup copy could not be created.
    #[error("failed to back up to {}: {source}", path.display())]
    Backup {
        /// Backup path that could not be written.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: io::Error,
    },

    /// The rewritten document could not be persisted.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Document path.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: io::Error,
    },
}

/// Failures surfaced by the selection flow.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// The directory returned no eligible users.
    #[error("no candidate users to choose from")]
    NoCandidates,

    /// The submitted identifier is not one of the offered candidates.
    #[error("unknown candidate: {0}")]
    UnknownCandidate(String),

    /// The rewrite failed and the flow is configured to abort on failure.
    #[error(transparent)]
    Rewrite(#[from] RewriteError),

    /// The blocking rewrite worker did not finish.
    #[error("rewrite worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl FlowError {
    #[must_use]
    /// Form error key shown next to the field, as the host form expects.
    pub fn form_key(&self) -> &'static str {
        match self {
            Self::NoCandidates => "no_candidates",
            Self::UnknownCandidate(_) => "unknown_candidate",
            Self::Rewrite(_) | Self::Join(_) => "rewrite_failed",
        }
    }
}

/// Failures loading or saving the entry registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// I/O error on the registry file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The registry file is not valid JSON for a registry.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
