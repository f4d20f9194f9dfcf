//! Guest provisioning - validates the request, creates the account and
//! stamps the guest metadata.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use common::AppResult;
use domain::{
    register_token_alphabet, GuestAccountRequest, GuestMetadata, Username, FIELD_EMAIL,
    GENERATED_PASSWORD_LENGTH, MSG_INVALID_MAIL_ADDRESS, MSG_USERNAME_EXISTS,
    REGISTER_TOKEN_LENGTH,
};

use super::ports::{ConfigStore, SecureRandom, UserDirectory};
use crate::response::ProvisioningResult;

/// Guest provisioning trait for dependency injection.
#[async_trait]
pub trait GuestService: Send + Sync {
    /// Provision a guest account.
    ///
    /// Validation failures are returned as `ProvisioningResult::Rejected`;
    /// only directory failures are errors. Nothing is rolled back if a write
    /// after account creation fails.
    async fn create(&self, request: GuestAccountRequest) -> AppResult<ProvisioningResult>;
}

/// Provisions guests against the user directory and config store.
pub struct GuestProvisioner {
    directory: Arc<dyn UserDirectory>,
    config: Arc<dyn ConfigStore>,
    random: Arc<dyn SecureRandom>,
}

impl GuestProvisioner {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        config: Arc<dyn ConfigStore>,
        random: Arc<dyn SecureRandom>,
    ) -> Self {
        Self {
            directory,
            config,
            random,
        }
    }

    /// Field errors for `request`. Both checks write the same key, the
    /// existence check last.
    async fn validate(
        &self,
        request: &GuestAccountRequest,
        username: &Username,
    ) -> AppResult<BTreeMap<String, String>> {
        let mut errors = BTreeMap::new();

        if !request.has_valid_email() {
            errors.insert(FIELD_EMAIL.to_string(), MSG_INVALID_MAIL_ADDRESS.to_string());
        }

        if self.directory.user_exists(username).await? {
            errors.insert(FIELD_EMAIL.to_string(), MSG_USERNAME_EXISTS.to_string());
        }

        Ok(errors)
    }

    fn username_taken() -> ProvisioningResult {
        let mut errors = BTreeMap::new();
        errors.insert(FIELD_EMAIL.to_string(), MSG_USERNAME_EXISTS.to_string());
        ProvisioningResult::rejected(errors)
    }
}

#[async_trait]
impl GuestService for GuestProvisioner {
    async fn create(&self, request: GuestAccountRequest) -> AppResult<ProvisioningResult> {
        let username = request.username();

        let errors = self.validate(&request, &username).await?;
        if !errors.is_empty() {
            debug!(username = %username, ?errors, "Guest request rejected");
            return Ok(ProvisioningResult::rejected(errors));
        }

        let password = self.random.generate(GENERATED_PASSWORD_LENGTH);
        match self.directory.create_user(&username, &password).await {
            Ok(()) => {}
            // Lost a race against a concurrent request for the same email
            Err(err) if err.is_conflict() => {
                debug!(username = %username, "Username taken during creation");
                return Ok(Self::username_taken());
            }
            Err(err) => return Err(err),
        }

        self.directory.set_email(&username, &request.email).await?;

        if let Some(display_name) = request.display_name() {
            self.directory
                .set_display_name(&username, display_name)
                .await?;
        }

        let token = self
            .random
            .generate_medium(REGISTER_TOKEN_LENGTH, &register_token_alphabet());
        let metadata = GuestMetadata::new(token, chrono::Utc::now().timestamp());

        for value in metadata.user_values() {
            self.config
                .set_user_value(&username, value.app_id, value.key, &value.value)
                .await?;
        }

        info!(username = %username, "Guest account created");
        Ok(ProvisioningResult::created())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::ports::{MockConfigStore, MockSecureRandom, MockUserDirectory};
    use common::AppError;
    use mockall::predicate::*;
    use mockall::Sequence;

    const TOKEN: &str = "abcDEF0123456789xyzAB";
    const PASSWORD: &str = "q7T+w/2bLx0aZ9mN4pR1";

    fn random() -> MockSecureRandom {
        let mut random = MockSecureRandom::new();
        random
            .expect_generate()
            .with(eq(GENERATED_PASSWORD_LENGTH))
            .returning(|_| PASSWORD.to_string());
        random
            .expect_generate_medium()
            .withf(|length, alphabet| {
                *length == REGISTER_TOKEN_LENGTH && alphabet == register_token_alphabet()
            })
            .returning(|_, _| TOKEN.to_string());
        random
    }

    fn provisioner(
        directory: MockUserDirectory,
        config: MockConfigStore,
        random: MockSecureRandom,
    ) -> GuestProvisioner {
        GuestProvisioner::new(Arc::new(directory), Arc::new(config), Arc::new(random))
    }

    fn no_writes(directory: &mut MockUserDirectory, config: &mut MockConfigStore) {
        directory.expect_create_user().never();
        directory.expect_set_email().never();
        directory.expect_set_display_name().never();
        config.expect_set_user_value().never();
    }

    fn rejected_with(message: &str) -> ProvisioningResult {
        let mut errors = BTreeMap::new();
        errors.insert("email".to_string(), message.to_string());
        ProvisioningResult::rejected(errors)
    }

    #[tokio::test]
    async fn test_create_guest_success() {
        let mut seq = Sequence::new();
        let mut directory = MockUserDirectory::new();
        let mut config = MockConfigStore::new();

        directory
            .expect_user_exists()
            .withf(|u| u.as_str() == "guest@example.com")
            .returning(|_| Ok(false));
        directory
            .expect_create_user()
            .withf(|u, p| u.as_str() == "guest@example.com" && p == PASSWORD)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        directory
            .expect_set_email()
            .withf(|u, e| u.as_str() == "guest@example.com" && e == "Guest@Example.com")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        directory
            .expect_set_display_name()
            .withf(|_, name| name == "Jane")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        config
            .expect_set_user_value()
            .withf(|_, app, key, value| app == "guests" && key == "registerToken" && value == TOKEN)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _, _| Ok(()));
        config
            .expect_set_user_value()
            .withf(|_, app, key, value| {
                app == "guests" && key == "created" && value.parse::<i64>().is_ok()
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _, _| Ok(()));
        config
            .expect_set_user_value()
            .withf(|u, app, key, value| {
                u.as_str() == "guest@example.com"
                    && app == "owncloud"
                    && key == "isGuest"
                    && value == "1"
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _, _| Ok(()));

        let service = provisioner(directory, config, random());
        let result = service
            .create(GuestAccountRequest::new(
                "Guest@Example.com",
                Some("Jane".to_string()),
            ))
            .await
            .unwrap();

        assert_eq!(result, ProvisioningResult::created());
    }

    #[tokio::test]
    async fn test_create_guest_without_display_name() {
        let mut directory = MockUserDirectory::new();
        let mut config = MockConfigStore::new();

        directory.expect_user_exists().returning(|_| Ok(false));
        directory.expect_create_user().returning(|_, _| Ok(()));
        directory.expect_set_email().returning(|_, _| Ok(()));
        directory.expect_set_display_name().never();
        config
            .expect_set_user_value()
            .times(3)
            .returning(|_, _, _, _| Ok(()));

        let service = provisioner(directory, config, random());
        let result = service
            .create(GuestAccountRequest::new("guest@example.com", Some(String::new())))
            .await
            .unwrap();

        assert!(result.is_created());
    }

    #[tokio::test]
    async fn test_invalid_email_is_rejected() {
        let mut directory = MockUserDirectory::new();
        let mut config = MockConfigStore::new();
        directory.expect_user_exists().returning(|_| Ok(false));
        no_writes(&mut directory, &mut config);

        let service = provisioner(directory, config, MockSecureRandom::new());
        let result = service
            .create(GuestAccountRequest::new("not-an-email", None))
            .await
            .unwrap();

        assert_eq!(result, rejected_with("Invalid mail address"));
    }

    #[tokio::test]
    async fn test_existing_username_is_rejected() {
        let mut directory = MockUserDirectory::new();
        let mut config = MockConfigStore::new();
        directory
            .expect_user_exists()
            .withf(|u| u.as_str() == "taken@example.com")
            .returning(|_| Ok(true));
        no_writes(&mut directory, &mut config);

        let service = provisioner(directory, config, MockSecureRandom::new());
        let result = service
            .create(GuestAccountRequest::new("Taken@Example.com", None))
            .await
            .unwrap();

        assert_eq!(result, rejected_with("A username with that email already exists."));
    }

    #[tokio::test]
    async fn test_existence_message_overwrites_syntax_message() {
        let mut directory = MockUserDirectory::new();
        let mut config = MockConfigStore::new();
        directory.expect_user_exists().returning(|_| Ok(true));
        no_writes(&mut directory, &mut config);

        let service = provisioner(directory, config, MockSecureRandom::new());
        let result = service
            .create(GuestAccountRequest::new("not-an-email", None))
            .await
            .unwrap();

        assert_eq!(result, rejected_with("A username with that email already exists."));
    }

    #[tokio::test]
    async fn test_conflict_on_create_is_reported_as_existing() {
        let mut directory = MockUserDirectory::new();
        let mut config = MockConfigStore::new();
        directory.expect_user_exists().returning(|_| Ok(false));
        directory
            .expect_create_user()
            .returning(|_, _| Err(AppError::conflict("Username")));
        directory.expect_set_email().never();
        config.expect_set_user_value().never();

        let service = provisioner(directory, config, random());
        let result = service
            .create(GuestAccountRequest::new("racer@example.com", None))
            .await
            .unwrap();

        assert_eq!(result, rejected_with("A username with that email already exists."));
    }

    #[tokio::test]
    async fn test_directory_failure_propagates() {
        let mut directory = MockUserDirectory::new();
        directory
            .expect_user_exists()
            .returning(|_| Err(AppError::service_unavailable("directory")));

        let service = provisioner(directory, MockConfigStore::new(), MockSecureRandom::new());
        let result = service
            .create(GuestAccountRequest::new("guest@example.com", None))
            .await;

        assert!(matches!(result, Err(AppError::ServiceUnavailable(_))));
    }

    #[tokio::test]
    async fn test_metadata_failure_is_not_compensated() {
        let mut directory = MockUserDirectory::new();
        let mut config = MockConfigStore::new();
        directory.expect_user_exists().returning(|_| Ok(false));
        directory.expect_create_user().times(1).returning(|_, _| Ok(()));
        directory.expect_set_email().returning(|_, _| Ok(()));
        config
            .expect_set_user_value()
            .times(1)
            .returning(|_, _, _, _| Err(AppError::internal("store down")));

        let service = provisioner(directory, config, random());
        let result = service
            .create(GuestAccountRequest::new("guest@example.com", None))
            .await;

        let err = tokio_test::assert_err!(result);
        assert!(matches!(err, AppError::Internal(_)));
    }
}
