//! End-to-end driver for guest scenarios.
//!
//! Replays what the web frontend does: create a guest over HTTP, pick the
//! activation link out of the captured email, set the guest's password and
//! delete the guest afterwards. Every response is recorded whatever its
//! status, so scenarios can assert on 4xx/5xx outcomes too.

use std::collections::BTreeMap;

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use domain::Username;

use crate::config::HarnessConfig;
use crate::error::{HarnessError, HarnessResult};
use crate::extract::{get_set_password_url, ResetLinkExtractor};
use crate::mailbox::MailboxClient;

/// Status and body of the last request a context sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RecordedResponse {
    async fn read(response: reqwest::Response) -> HarnessResult<Self> {
        let status = response.status();
        let body = response.text().await?;
        Ok(Self { status, body })
    }
}

pub struct GuestsContext {
    http: reqwest::Client,
    config: HarnessConfig,
    mailbox: MailboxClient,
    extractor: ResetLinkExtractor,
    /// Display name to the email the guest was created with
    created_guests: BTreeMap<String, String>,
    response: Option<RecordedResponse>,
}

impl GuestsContext {
    pub fn new(config: HarnessConfig) -> Self {
        let http = reqwest::Client::new();
        Self {
            mailbox: MailboxClient::with_client(http.clone(), &config.mailhog_url),
            extractor: ResetLinkExtractor::new(&config.platform_name),
            http,
            config,
            created_guests: BTreeMap::new(),
            response: None,
        }
    }

    /// Username the frontend predicts for `email`.
    pub fn prepare_username_as_frontend(email: &str) -> Username {
        Username::derive(email)
    }

    /// Last recorded response.
    pub fn response(&self) -> Option<&RecordedResponse> {
        self.response.as_ref()
    }

    pub fn created_guests(&self) -> &BTreeMap<String, String> {
        &self.created_guests
    }

    /// Track a guest created outside this context so later steps find it.
    pub fn remember_guest(&mut self, display_name: &str, email: &str) {
        self.created_guests
            .insert(display_name.to_string(), email.to_string());
    }

    fn guest_email(&self, display_name: &str) -> HarnessResult<&str> {
        self.created_guests
            .get(display_name)
            .map(String::as_str)
            .ok_or_else(|| HarnessError::UnknownGuest(display_name.to_string()))
    }

    fn record(&mut self, response: RecordedResponse) -> &RecordedResponse {
        self.response.insert(response)
    }

    /// `user` creates guest `display_name` with `email`.
    ///
    /// Query values are concatenated as given, the way the frontend builds
    /// the URL. The admin authenticates with the admin password, everyone
    /// else with the regular user password.
    pub async fn user_creates_guest_user(
        &mut self,
        user: &str,
        display_name: &str,
        email: &str,
    ) -> HarnessResult<&RecordedResponse> {
        let username = Self::prepare_username_as_frontend(email);
        let url = format!(
            "{}/index.php/apps/guests/users?displayName={}&email={}&username={}",
            self.config.server_root(),
            display_name,
            email,
            username
        );

        let password = if user == self.config.admin_user {
            &self.config.admin_password
        } else {
            &self.config.regular_user_password
        };

        let response = self
            .http
            .put(&url)
            .basic_auth(user, Some(password))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .send()
            .await?;
        let recorded = RecordedResponse::read(response).await?;

        info!(%username, status = %recorded.status, "Guest creation requested");
        self.remember_guest(display_name, email);
        Ok(self.record(recorded))
    }

    /// Guest `display_name` follows the activation link of the newest email
    /// and sets its password.
    pub async fn guest_user_sets_its_password(
        &mut self,
        display_name: &str,
    ) -> HarnessResult<&RecordedResponse> {
        self.guest_email(display_name)?;

        let body = self.mailbox.latest_body().await?;
        let reset_url = self.extractor.extract_reset_password_url(&body)?;
        let set_url = get_set_password_url(&reset_url)?;
        debug!(%reset_url, %set_url, "Activation link found");

        let response = self
            .http
            .post(&set_url)
            .form(&[
                ("password", self.config.regular_user_password.as_str()),
                ("proceed", "false"),
            ])
            .send()
            .await?;
        let recorded = RecordedResponse::read(response).await?;

        info!(display_name = %display_name, status = %recorded.status, "Guest password submitted");
        Ok(self.record(recorded))
    }

    /// Delete guest `display_name` through the provisioning API.
    pub async fn delete_guest_user(&mut self, display_name: &str) -> HarnessResult<&RecordedResponse> {
        let username = Self::prepare_username_as_frontend(self.guest_email(display_name)?);
        let recorded = self.delete_user(&username).await?;
        Ok(self.record(recorded))
    }

    /// Delete every guest created in this context and forget them.
    ///
    /// All deletions are attempted; the first failure is returned.
    pub async fn cleanup_guests(&mut self) -> HarnessResult<()> {
        let guests = std::mem::take(&mut self.created_guests);
        let mut first_error = None;

        for (display_name, email) in guests {
            let username = Self::prepare_username_as_frontend(&email);
            match self.delete_user(&username).await {
                Ok(recorded) => {
                    self.record(recorded);
                }
                Err(err) => {
                    warn!(display_name = %display_name, error = %err, "Failed to delete guest");
                    first_error.get_or_insert(err);
                }
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    async fn delete_user(&self, username: &Username) -> HarnessResult<RecordedResponse> {
        let url = format!(
            "{}/ocs/v2.php/cloud/users/{}",
            self.config.server_root(),
            username
        );

        let response = self
            .http
            .delete(&url)
            .basic_auth(&self.config.admin_user, Some(&self.config.admin_password))
            .header("OCS-APIREQUEST", "true")
            .send()
            .await?;
        let recorded = RecordedResponse::read(response).await?;

        info!(%username, status = %recorded.status, "Guest deletion requested");
        Ok(recorded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{basic_auth, body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (MockServer, GuestsContext) {
        let server = MockServer::start().await;
        let config = HarnessConfig {
            server_url: format!("{}/", server.uri()),
            mailhog_url: server.uri(),
            ..HarnessConfig::default()
        };
        (server, GuestsContext::new(config))
    }

    async fn mount_create(server: &MockServer, status: u16, body: serde_json::Value) {
        Mock::given(method("PUT"))
            .and(path("/index.php/apps/guests/users"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(server)
            .await;
    }

    #[test]
    fn frontend_username_is_decoded_and_lowercased() {
        assert_eq!(
            GuestsContext::prepare_username_as_frontend("  Guest%40Example.com ").as_str(),
            "guest@example.com"
        );
    }

    #[tokio::test]
    async fn admin_creates_guest() {
        let (server, mut context) = setup().await;

        Mock::given(method("PUT"))
            .and(path("/index.php/apps/guests/users"))
            .and(query_param("displayName", "Jane"))
            .and(query_param("email", "Guest@Example.com"))
            .and(query_param("username", "guest@example.com"))
            .and(basic_auth("admin", "admin"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({ "message": "User successfully created" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let response = context
            .user_creates_guest_user("admin", "Jane", "Guest@Example.com")
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::CREATED);
        assert!(response.body.contains("User successfully created"));
        assert_eq!(
            context.created_guests().get("Jane").map(String::as_str),
            Some("Guest@Example.com")
        );
    }

    #[tokio::test]
    async fn regular_user_authenticates_with_regular_password() {
        let (server, mut context) = setup().await;

        Mock::given(method("PUT"))
            .and(path("/index.php/apps/guests/users"))
            .and(basic_auth("user0", "123456"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let response = context
            .user_creates_guest_user("user0", "Jane", "guest@example.com")
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn rejected_creation_is_recorded_not_raised() {
        let (server, mut context) = setup().await;
        mount_create(
            &server,
            422,
            serde_json::json!({ "errorMessages": { "email": "Invalid mail address" } }),
        )
        .await;

        let response = context
            .user_creates_guest_user("admin", "Bad", "not-an-email")
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(response.body.contains("Invalid mail address"));
        assert_eq!(
            context.response().map(|r| r.status),
            Some(StatusCode::UNPROCESSABLE_ENTITY)
        );
    }

    #[tokio::test]
    async fn guest_sets_password_from_activation_email() {
        let (server, mut context) = setup().await;
        mount_create(&server, 201, serde_json::json!({})).await;
        context
            .user_creates_guest_user("admin", "Jane", "guest@example.com")
            .await
            .unwrap();

        // Soft line break in the middle of the link
        let body = format!(
            "Activate your guest account at ownCloud by setting a password: {}/index.php/lost=\r\npassword/reset/form/TOK/guest@example.com\r\n\r\nThen view it: {}/f/1",
            server.uri(),
            server.uri()
        );
        Mock::given(method("GET"))
            .and(path("/api/v2/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total": 1,
                "items": [{ "Content": { "Body": body } }]
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/index.php/lostpassword/set/TOK/guest@example.com"))
            .and(body_string_contains("password=123456"))
            .and(body_string_contains("proceed=false"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let response = context.guest_user_sets_its_password("Jane").await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, "ok");
    }

    #[tokio::test]
    async fn unknown_guest_cannot_set_password() {
        let (_server, mut context) = setup().await;
        let result = context.guest_user_sets_its_password("Nobody").await;
        assert!(matches!(result, Err(HarnessError::UnknownGuest(name)) if name == "Nobody"));
    }

    #[tokio::test]
    async fn delete_guest_uses_provisioning_api() {
        let (server, mut context) = setup().await;
        context.remember_guest("Jane", "Guest@Example.com");

        Mock::given(method("DELETE"))
            .and(path("/ocs/v2.php/cloud/users/guest@example.com"))
            .and(basic_auth("admin", "admin"))
            .and(header("OCS-APIREQUEST", "true"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let response = context.delete_guest_user("Jane").await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn cleanup_deletes_every_guest_once() {
        let (server, mut context) = setup().await;
        context.remember_guest("Jane", "jane@example.com");
        context.remember_guest("John", "john@example.com");

        for username in ["jane@example.com", "john@example.com"] {
            Mock::given(method("DELETE"))
                .and(path(format!("/ocs/v2.php/cloud/users/{}", username)))
                .respond_with(ResponseTemplate::new(200))
                .expect(1)
                .mount(&server)
                .await;
        }

        context.cleanup_guests().await.unwrap();
        assert!(context.created_guests().is_empty());

        // Nothing left to delete
        context.cleanup_guests().await.unwrap();
    }
}
