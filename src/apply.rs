//! Applying a rewrite to a file on disk, with a backup taken first.
//!
//! The document is read once and rewritten in memory. Only when the rewrite changed
//! something is the original copied to `<path>.backup` and the new text persisted,
//! through a temporary file in the same directory that replaces the original in one
//! rename. A document without the anchor is left alone and no backup is made.
//!
//! All of this is blocking I/O. Async callers must move it onto a blocking worker
//! (see [`crate::flow`]). Concurrent calls against the same path are not coordinated.

use crate::error::RewriteError;
use crate::formats::Format;
use crate::payload::Payload;
use crate::rewrite::{rewrite, RewriteOptions};
use crate::section::Section;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Suffix appended to the document path to name its backup.
pub const BACKUP_SUFFIX: &str = ".backup";

#[derive(Debug, PartialEq, Eq)]
/// What happened to the file.
pub enum Applied {
    /// No anchor section was found; nothing was written.
    Unchanged,
    /// The file was backed up and rewritten.
    Rewritten {
        /// Where the original bytes were saved.
        backup: PathBuf,
        /// Sections that received the payload.
        sections: Vec<Section>,
    },
}

#[must_use]
/// Backup location for a document: the same path with `.backup` appended.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Rewrites the anchor section of the file at `path`, backing the original up first.
///
/// # Errors
///
/// Returns [`RewriteError::Read`] if the file cannot be read as UTF-8 text,
/// [`RewriteError::Backup`] if the backup copy fails (the document is then untouched),
/// and [`RewriteError::Write`] if the new content cannot be persisted.
pub fn apply_to_file<F, P>(
    path: &Path,
    format: &F,
    payload: &P,
    identifier: &str,
    options: RewriteOptions,
) -> Result<Applied, RewriteError>
where
    F: Format + ?Sized,
    P: Payload + ?Sized,
{
    let result = try_apply(path, format, payload, identifier, options, persist);
    match &result {
        Ok(Applied::Unchanged) => {
            tracing::debug!(
                "No `{}` section in {}, leaving it alone",
                payload.anchor(),
                path.display()
            );
        }
        Ok(Applied::Rewritten { sections, .. }) => {
            tracing::info!(
                "Updated {} ({} section(s) rewritten)",
                path.display(),
                sections.len()
            );
        }
        Err(e) => tracing::error!("Failed to update {}: {e}", path.display()),
    }
    result
}

/// Read, rewrite, back up, then hand the new text to `write`.
fn try_apply<F, P, W>(
    path: &Path,
    format: &F,
    payload: &P,
    identifier: &str,
    options: RewriteOptions,
    write: W,
) -> Result<Applied, RewriteError>
where
    F: Format + ?Sized,
    P: Payload + ?Sized,
    W: FnOnce(&Path, &str) -> io::Result<()>,
{
    let original = fs::read_to_string(path).map_err(|source| RewriteError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let rewritten = rewrite(&original, format, payload, identifier, options);
    if !rewritten.changed {
        return Ok(Applied::Unchanged);
    }

    let backup = backup_path(path);
    fs::copy(path, &backup).map_err(|source| RewriteError::Backup {
        path: backup.clone(),
        source,
    })?;
    tracing::info!("Backup created at {}", backup.display());

    write(path, &rewritten.text()).map_err(|source| RewriteError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Applied::Rewritten {
        backup,
        sections: rewritten.sections,
    })
}

/// Replaces the file content in one rename so readers never see a partial write.
fn persist(path: &Path, content: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(content.as_bytes())?;
    file.as_file().sync_all()?;
    if let Ok(metadata) = fs::metadata(path) {
        file.as_file().set_permissions(metadata.permissions())?;
    }
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/apply.rs"]
mod tests;
