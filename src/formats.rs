//! Format trait and implementations for different configuration dialects.
//!
//! This module defines the `Format` trait which abstracts over the line-level rules a
//! section rewrite depends on: what marks a comment, how indentation is measured and
//! how a body line is rendered once it has been commented out.

pub mod yaml;

/// Line-level syntax rules used while scanning a document.
pub trait Format {
    /// Marker that starts a comment once leading whitespace is trimmed.
    fn comment_marker(&self) -> &str;

    /// Whether the line is already a comment.
    fn is_comment(&self, line: &str) -> bool {
        line.trim().starts_with(self.comment_marker())
    }

    /// Count of leading whitespace characters.
    ///
    /// A whitespace-only line has no content to sit at column zero, so it reports its
    /// full length (terminator included) and is never taken for a boundary.
    fn indent(&self, line: &str) -> usize {
        line.chars().take_while(|c| c.is_whitespace()).count()
    }

    /// Whether the line sits at column zero and therefore closes any open section.
    fn is_top_level(&self, line: &str) -> bool {
        self.indent(line) == 0
    }

    /// Renders a line as a comment, keeping its indentation and content.
    fn comment_out(&self, line: &str) -> String;
}
