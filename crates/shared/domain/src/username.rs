//! Username value object.
//!
//! A guest's username is derived from the email address it was invited
//! with. The guests app and the harness must agree on the derivation byte
//! for byte, so both go through this type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical, lowercase username of a directory account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

/// Bytes stripped from both ends of a raw email: space, tab, newline,
/// carriage return, NUL and vertical tab. Other Unicode whitespace stays.
const TRIMMED: [char; 6] = [' ', '\t', '\n', '\r', '\0', '\x0B'];

impl Username {
    /// Username for an email exactly as the HTTP layer delivered it.
    ///
    /// This is the provisioning path: the query string has already been
    /// decoded once, so only the case is folded. Folding is ASCII-only.
    pub fn from_email(email: &str) -> Self {
        Self(email.to_ascii_lowercase())
    }

    /// Username a frontend predicts for a raw, possibly URL-encoded email.
    ///
    /// `lowercase(trim(urldecode(email)))`, with form decoding (`+` is a
    /// space). Malformed escapes are decoded lossily.
    pub fn derive(raw_email: &str) -> Self {
        let plus_decoded = raw_email.replace('+', " ");
        let decoded = urlencoding::decode_binary(plus_decoded.as_bytes());
        let decoded = String::from_utf8_lossy(&decoded);
        Self::from_email(decoded.trim_matches(TRIMMED))
    }

    /// Wrap a username read back from storage.
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Username> for String {
    fn from(username: Username) -> Self {
        username.0
    }
}
