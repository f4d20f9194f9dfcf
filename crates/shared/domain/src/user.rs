//! Directory user entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::username::Username;

/// User account as stored by the directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: Username,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new account without email or display name
    pub fn new(id: Uuid, username: Username, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            password_hash,
            email: None,
            display_name: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Display name, falling back to the username when none was set
    pub fn effective_display_name(&self) -> &str {
        self.display_name
            .as_deref()
            .unwrap_or_else(|| self.username.as_str())
    }

    /// Update the account's email address
    pub fn update_email(&mut self, email: String) {
        self.email = Some(email);
        self.updated_at = Utc::now();
    }

    /// Update the account's display name
    pub fn update_display_name(&mut self, display_name: String) {
        self.display_name = Some(display_name);
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_username() {
        let mut user = User::new(
            Uuid::new_v4(),
            Username::from_email("guest@example.com"),
            "hash".to_string(),
        );
        assert_eq!(user.effective_display_name(), "guest@example.com");

        user.update_display_name("Jane".to_string());
        assert_eq!(user.effective_display_name(), "Jane");
    }

    #[test]
    fn update_email_sets_address() {
        let mut user = User::new(
            Uuid::new_v4(),
            Username::from_email("guest@example.com"),
            "hash".to_string(),
        );
        user.update_email("Guest@Example.com".to_string());
        assert_eq!(user.email.as_deref(), Some("Guest@Example.com"));
        assert!(user.updated_at >= user.created_at);
    }
}
