//! The rewriter splices a payload into an anchor section in one pass over the lines.
//!
//! Documents are never parsed into a tree. A two-state scanner (outside or inside the
//! anchor section) walks the lines once, keeps comments, comments out the stale body
//! and appends the payload just before the line that closes the section. Lines outside
//! the section are emitted exactly as read, terminators included.

use crate::formats::Format;
use crate::payload::Payload;
use crate::section::Section;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Knobs that change how a section body is treated.
pub struct RewriteOptions {
    /// Drop an earlier payload at the end of the section instead of commenting it out.
    ///
    /// Only a trailing run of lines shaped exactly like the payload (same indentation, same
    /// keys, same order) counts as an earlier payload; anything else is commented out. With
    /// this set a second rewrite reproduces the first one exactly; without it every run
    /// leaves the previous payload behind as comments.
    pub replace_prior_payload: bool,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            replace_prior_payload: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Rewritten document together with what the scan found.
pub struct Rewrite {
    /// Output lines, each carrying its own terminator.
    pub lines: Vec<String>,
    /// Whether any anchor section was closed and given a payload.
    pub changed: bool,
    /// Every anchor section seen, in document order.
    pub sections: Vec<Section>,
}

impl Rewrite {
    #[must_use]
    /// Joins the output lines back into a document.
    pub fn text(&self) -> String {
        self.lines.concat()
    }
}

/// Splits a document into lines without dropping their terminators.
#[must_use]
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Rewrites every section opened by the payload's anchor.
///
/// Within a section, comment lines are kept verbatim, every other body line is commented
/// out, and the payload rendered for `identifier` is appended before the next column-zero
/// line (or at the end of the document). Text without a matching anchor comes back
/// unchanged with `changed` unset.
#[must_use]
pub fn rewrite<F, P>(
    text: &str,
    format: &F,
    payload: &P,
    identifier: &str,
    options: RewriteOptions,
) -> Rewrite
where
    F: Format + ?Sized,
    P: Payload + ?Sized,
{
    let lines = split_lines(text);
    let anchor = payload.anchor();

    let mut output = Vec::with_capacity(lines.len() + 2);
    let mut body = Body::default();
    let mut open: Option<Section> = None;
    let mut sections = Vec::new();

    for (index, &line) in lines.iter().enumerate() {
        if open.is_none() {
            if line.starts_with(anchor) {
                open = Some(Section::open(anchor, index));
                body.start(line);
            } else {
                output.push(line.to_string());
            }
            continue;
        }
        let Some(section) = open.as_mut() else {
            continue;
        };

        if format.is_comment(line) {
            section.comments_kept += 1;
            body.keep(line);
        } else if format.is_top_level(line) {
            section.line_end = index;
            output.extend(body.close(section, payload, identifier, options));
            output.push(line.to_string());
            sections.extend(open.take());
        } else {
            section.lines_commented += 1;
            body.comment(line, format.comment_out(line));
        }
    }

    if let Some(mut section) = open.take() {
        section.line_end = lines.len();
        section.reached_eof = true;
        output.extend(body.close(&mut section, payload, identifier, options));
        sections.push(section);
    }

    Rewrite {
        lines: output,
        changed: !sections.is_empty(),
        sections,
    }
}

/// Lines of the open section, each paired with its original text when it was commented out.
#[derive(Default)]
struct Body<'a> {
    lines: Vec<String>,
    originals: Vec<Option<&'a str>>,
    terminator: &'static str,
}

impl<'a> Body<'a> {
    fn start(&mut self, anchor_line: &'a str) {
        self.terminator = if anchor_line.ends_with("\r\n") {
            "\r\n"
        } else {
            "\n"
        };
        self.keep(anchor_line);
    }

    fn keep(&mut self, line: &'a str) {
        self.lines.push(line.to_string());
        self.originals.push(None);
    }

    fn comment(&mut self, line: &'a str, commented: String) {
        self.lines.push(commented);
        self.originals.push(Some(line));
    }

    /// Drains the section, appending the payload with the anchor line's terminator.
    fn close<P: Payload + ?Sized>(
        &mut self,
        section: &mut Section,
        payload: &P,
        identifier: &str,
        options: RewriteOptions,
    ) -> Vec<String> {
        let fresh = payload.lines(identifier);
        if options.replace_prior_payload && self.ends_with_payload(&fresh) {
            self.lines.truncate(self.lines.len() - fresh.len());
            section.lines_commented -= fresh.len();
            section.payload_replaced += fresh.len();
        }
        self.originals.clear();

        // A last line without terminator would otherwise fuse with the first payload line
        if let Some(last) = self.lines.last_mut() {
            if !last.ends_with('\n') {
                last.push_str(self.terminator);
            }
        }
        let terminator = self.terminator;
        self.lines.extend(fresh.into_iter().map(|line| match line.strip_suffix('\n') {
            Some(content) => format!("{content}{terminator}"),
            None => line,
        }));
        std::mem::take(&mut self.lines)
    }

    /// Whether the body ends with lines shaped like `fresh`, values aside.
    fn ends_with_payload(&self, fresh: &[String]) -> bool {
        if fresh.is_empty() || self.originals.len() < fresh.len() {
            return false;
        }
        let tail = &self.originals[self.originals.len() - fresh.len()..];
        tail.iter()
            .zip(fresh)
            .all(|(&original, rendered)| original.is_some_and(|line| same_key(line, rendered)))
    }
}

/// Whether `line` has the indentation and key of the rendered payload line.
fn same_key(line: &str, rendered: &str) -> bool {
    let Some((prefix, _)) = rendered.split_once(':') else {
        return false;
    };
    line.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix(':'))
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

#[cfg(test)]
#[path = "tests/rewrite.rs"]
mod tests;
