//! Section representation for line-scanned configuration documents.
//!
//! A section is the run of lines opened by a top-level anchor key and closed by the
//! next line at column zero (or by the end of the document). Sections track their
//! position as zero-based line indices into the original document so the outcome of
//! a rewrite can be reported without re-scanning.

#[derive(Clone, Debug, PartialEq, Eq)]
/// Located anchor section with line coordinates and a tally of what happened to its body.
pub struct Section {
    /// Anchor text that opened the section.
    pub anchor: String,
    /// Index of the anchor line in the original document.
    pub line_start: usize,
    /// Index of the boundary line that closed the section, or the document length.
    pub line_end: usize,
    /// Comment lines kept verbatim.
    pub comments_kept: usize,
    /// Body lines turned into comments.
    pub lines_commented: usize,
    /// Lines from an earlier payload that were dropped in favour of the new one.
    pub payload_replaced: usize,
    /// Whether the section ran to the end of the document.
    pub reached_eof: bool,
}

impl Section {
    #[must_use]
    /// Opens a section at the anchor line; the end is fixed once the boundary is seen.
    pub fn open(anchor: &str, line_start: usize) -> Self {
        Self {
            anchor: anchor.to_string(),
            line_start,
            line_end: line_start + 1,
            comments_kept: 0,
            lines_commented: 0,
            payload_replaced: 0,
            reached_eof: false,
        }
    }

    #[must_use]
    /// Number of original body lines between the anchor and the boundary.
    pub fn body_len(&self) -> usize {
        self.line_end - self.line_start - 1
    }
}
