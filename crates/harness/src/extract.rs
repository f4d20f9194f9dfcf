//! Reset-link scraping from activation emails.
//!
//! The activation email carries the reset URL between two fixed pieces of
//! template text. Mail transports wrap long lines and add quoted-printable
//! soft breaks (`=` at line end), so the URL is cleaned before use.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{HarnessError, HarnessResult};

/// Platform name used in the activation template by default
pub const DEFAULT_PLATFORM_NAME: &str = "ownCloud";

/// Text that follows the URL in the activation template
const THEN_MARKER: &str = "Then view it";

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Extracts the reset URL from activation emails of one platform.
#[derive(Debug, Clone)]
pub struct ResetLinkExtractor {
    activate_marker: String,
}

impl ResetLinkExtractor {
    pub fn new(platform_name: &str) -> Self {
        Self {
            activate_marker: format!(
                "Activate your guest account at {} by setting a password: ",
                platform_name
            ),
        }
    }

    /// Cleaned reset URL embedded in `email_body`.
    ///
    /// Takes the text between the first activation marker and the next
    /// "Then view it", collapses whitespace runs to one space, then drops
    /// every `=` and every space.
    pub fn extract_reset_password_url(&self, email_body: &str) -> HarnessResult<String> {
        let start = email_body
            .find(&self.activate_marker)
            .map(|pos| pos + self.activate_marker.len())
            .ok_or_else(|| HarnessError::MarkerNotFound(self.activate_marker.clone()))?;

        let rest = &email_body[start..];
        let end = rest
            .find(THEN_MARKER)
            .ok_or_else(|| HarnessError::MarkerNotFound(THEN_MARKER.to_string()))?;

        let collapsed = WHITESPACE.replace_all(&rest[..end], " ");
        Ok(collapsed.replace('=', "").replace(' ', ""))
    }
}

impl Default for ResetLinkExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_PLATFORM_NAME)
    }
}

/// Turn a reset-form URL into the URL the new password is posted to.
///
/// The two `/`-separated segments at indices 5 and 6 become the single
/// segment `set`; everything else is kept.
pub fn get_set_password_url(reset_url: &str) -> HarnessResult<String> {
    let mut parts: Vec<&str> = reset_url.split('/').collect();
    if parts.len() < 7 {
        return Err(HarnessError::MalformedUrl(reset_url.to_string()));
    }

    parts.splice(5..7, ["set"]);
    Ok(parts.join("/"))
}
