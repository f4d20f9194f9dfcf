//! MailHog client for reading captured emails.

use serde::Deserialize;
use tracing::debug;

use crate::error::{HarnessError, HarnessResult};

/// Page of messages from the MailHog v2 API, newest first.
#[derive(Debug, Deserialize)]
pub struct MessagesPage {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub items: Vec<MailItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MailItem {
    pub content: MailContent,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MailContent {
    pub body: String,
}

/// HTTP client for a MailHog instance.
pub struct MailboxClient {
    http: reqwest::Client,
    base_url: String,
}

impl MailboxClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/api/v2/messages", self.base_url)
    }

    /// All captured messages, newest first.
    pub async fn messages(&self) -> HarnessResult<MessagesPage> {
        let page = self
            .http
            .get(self.messages_url())
            .send()
            .await?
            .error_for_status()?
            .json::<MessagesPage>()
            .await?;

        debug!(total = page.total, "Fetched mailbox");
        Ok(page)
    }

    /// Body of the most recent message.
    pub async fn latest_body(&self) -> HarnessResult<String> {
        self.messages()
            .await?
            .items
            .into_iter()
            .next()
            .map(|item| item.content.body)
            .ok_or(HarnessError::EmptyMailbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn latest_body_is_first_item() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total": 2,
                "count": 2,
                "start": 0,
                "items": [
                    { "ID": "2", "Content": { "Headers": {}, "Body": "newest" } },
                    { "ID": "1", "Content": { "Headers": {}, "Body": "older" } }
                ]
            })))
            .mount(&server)
            .await;

        let mailbox = MailboxClient::new(&format!("{}/", server.uri()));
        assert_eq!(mailbox.latest_body().await.unwrap(), "newest");
    }

    #[tokio::test]
    async fn empty_mailbox() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/messages"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "total": 0, "items": [] })),
            )
            .mount(&server)
            .await;

        let result = MailboxClient::new(&server.uri()).latest_body().await;
        assert!(matches!(result, Err(HarnessError::EmptyMailbox)));
    }

    #[tokio::test]
    async fn server_error_is_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/messages"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = MailboxClient::new(&server.uri()).messages().await;
        assert!(matches!(result, Err(HarnessError::Http(_))));
    }
}
