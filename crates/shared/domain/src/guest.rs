//! Guest account request and the metadata recorded for new guests.

use serde::Serialize;
use validator::ValidateEmail;

use crate::constants::{
    APP_ID_CORE, APP_ID_GUESTS, IS_GUEST_VALUE, KEY_CREATED, KEY_IS_GUEST, KEY_REGISTER_TOKEN,
};
use crate::username::Username;

/// RFC-shaped mail-address syntax check. Empty input is never valid.
pub fn is_valid_mail_address(email: &str) -> bool {
    !email.is_empty() && email.validate_email()
}

/// Request to provision a guest account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestAccountRequest {
    /// Email address the guest is invited with
    pub email: String,
    /// Optional display name
    pub display_name: Option<String>,
}

impl GuestAccountRequest {
    pub fn new(email: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            email: email.into(),
            display_name,
        }
    }

    /// Username this request provisions.
    pub fn username(&self) -> Username {
        Username::from_email(&self.email)
    }

    pub fn has_valid_email(&self) -> bool {
        is_valid_mail_address(&self.email)
    }

    /// Display name, if one was given and it is non-empty.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref().filter(|name| !name.is_empty())
    }
}

/// A single per-user config value: `(app_id, key) = value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserValue {
    pub app_id: &'static str,
    pub key: &'static str,
    pub value: String,
}

/// Metadata stamped on every account created through the guest path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestMetadata {
    /// Random token for the activation flow
    pub register_token: String,
    /// Creation time, Unix seconds
    pub created: i64,
}

impl GuestMetadata {
    pub fn new(register_token: String, created: i64) -> Self {
        Self {
            register_token,
            created,
        }
    }

    /// Values to write, in write order. The guest flag belongs to the host
    /// platform namespace, the rest to the guests app.
    pub fn user_values(&self) -> [UserValue; 3] {
        [
            UserValue {
                app_id: APP_ID_GUESTS,
                key: KEY_REGISTER_TOKEN,
                value: self.register_token.clone(),
            },
            UserValue {
                app_id: APP_ID_GUESTS,
                key: KEY_CREATED,
                value: self.created.to_string(),
            },
            UserValue {
                app_id: APP_ID_CORE,
                key: KEY_IS_GUEST,
                value: IS_GUEST_VALUE.to_string(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mail_address_validation() {
        assert!(is_valid_mail_address("guest@example.com"));
        assert!(is_valid_mail_address("Guest.Name+tag@sub.example.org"));
        assert!(!is_valid_mail_address(""));
        assert!(!is_valid_mail_address("not-an-email"));
        assert!(!is_valid_mail_address("two@@example.com"));
    }

    #[test]
    fn empty_display_name_is_ignored() {
        let request = GuestAccountRequest::new("a@b.com", Some(String::new()));
        assert_eq!(request.display_name(), None);

        let request = GuestAccountRequest::new("a@b.com", Some("Jane".to_string()));
        assert_eq!(request.display_name(), Some("Jane"));
    }

    #[test]
    fn request_username_is_lowercased_email() {
        let request = GuestAccountRequest::new("Guest@Example.com", None);
        assert_eq!(request.username().as_str(), "guest@example.com");
    }

    #[test]
    fn metadata_values_are_namespaced() {
        let metadata = GuestMetadata::new("token".to_string(), 1_700_000_000);
        let values = metadata.user_values();

        assert_eq!(values[0].app_id, "guests");
        assert_eq!(values[0].key, "registerToken");
        assert_eq!(values[0].value, "token");
        assert_eq!(values[1].key, "created");
        assert_eq!(values[1].value, "1700000000");
        assert_eq!(values[2].app_id, "owncloud");
        assert_eq!(values[2].key, "isGuest");
        assert_eq!(values[2].value, "1");
    }
}
