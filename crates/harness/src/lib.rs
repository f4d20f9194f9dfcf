//! Guests Harness
//!
//! End-to-end tooling for the guests app: predicts guest usernames,
//! scrapes activation links out of captured emails and drives the
//! create / activate / delete flow over HTTP.

pub mod config;
pub mod context;
pub mod error;
pub mod extract;
pub mod mailbox;

pub use config::HarnessConfig;
pub use context::{GuestsContext, RecordedResponse};
pub use error::{HarnessError, HarnessResult};
pub use extract::{get_set_password_url, ResetLinkExtractor, DEFAULT_PLATFORM_NAME};
pub use mailbox::MailboxClient;
