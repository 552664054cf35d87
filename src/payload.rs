//! Payloads supply the anchor to look for and the lines to splice in beneath it.
//!
//! The rewriter is agnostic about what it injects; a `Payload` couples an anchor key
//! with a template that renders fresh body lines for a caller-chosen identifier.

/// Token written by default, kept so existing deployments keep matching.
pub const DEFAULT_TARGET_TOKEN: &str = "Cqibo6hvnPb5vwkL";

/// Anchor key of the section holding guest authentication settings.
pub const AUTH_HEADER_ANCHOR: &str = "auth_header:";

/// Anchor plus the body lines to append at the end of its section.
pub trait Payload {
    /// Literal prefix a top-level line must start with to open the section.
    fn anchor(&self) -> &str;

    /// Newline-terminated `key: value` lines to append for the given identifier.
    ///
    /// The indentation and key of each line, up to its first `:`, are how an earlier copy
    /// of the payload is recognised at the end of a section.
    fn lines(&self, identifier: &str) -> Vec<String>;
}

#[derive(Clone, Debug)]
/// The `auth_header:` payload naming the guest user and the shared target token.
pub struct AuthHeader {
    anchor: String,
    target_token: String,
}

impl AuthHeader {
    #[must_use]
    /// Payload for the `auth_header:` anchor with the given token.
    pub fn new(target_token: impl Into<String>) -> Self {
        Self::with_anchor(AUTH_HEADER_ANCHOR, target_token)
    }

    #[must_use]
    /// Payload for a custom anchor, for files that keep the block under another key.
    pub fn with_anchor(anchor: impl Into<String>, target_token: impl Into<String>) -> Self {
        Self {
            anchor: anchor.into(),
            target_token: target_token.into(),
        }
    }
}

impl Default for AuthHeader {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_TOKEN)
    }
}

impl Payload for AuthHeader {
    fn anchor(&self) -> &str {
        &self.anchor
    }

    fn lines(&self, identifier: &str) -> Vec<String> {
        vec![
            format!("  target_token: {}\n", self.target_token),
            format!("  target_guest_user_id: {identifier}\n"),
        ]
    }
}

#[cfg(test)]
#[path = "tests/payload.rs"]
mod tests;
