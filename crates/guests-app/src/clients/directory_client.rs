//! gRPC client for directory-service.
//!
//! Implements both `UserDirectory` and `ConfigStore`; the directory service
//! owns accounts and per-user values alike.

use std::time::Duration;

use async_trait::async_trait;
use tonic::transport::{Channel, Endpoint};
use tracing::debug;

use common::{AppError, AppResult, GrpcClientConfig};
use domain::Username;
use proto::directory::{
    CreateUserRequest, SetDisplayNameRequest, SetEmailRequest, SetUserValueRequest,
    UserExistsRequest,
};
use proto::UserDirectoryClient;

use crate::service::{ConfigStore, UserDirectory};

/// gRPC client wrapper for directory-service.
#[derive(Clone)]
pub struct DirectoryClient {
    client: UserDirectoryClient<Channel>,
}

impl DirectoryClient {
    /// Build a client for the configured endpoint.
    ///
    /// The channel connects on first use, so the app can start before the
    /// directory is reachable.
    pub fn connect_lazy(config: &GrpcClientConfig) -> Result<Self, tonic::transport::Error> {
        debug!("Connecting to directory-service at {}", config.endpoint);
        let channel = Endpoint::from_shared(config.endpoint.clone())?
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .connect_lazy();

        Ok(Self {
            client: UserDirectoryClient::new(channel),
        })
    }
}

#[async_trait]
impl UserDirectory for DirectoryClient {
    async fn user_exists(&self, username: &Username) -> AppResult<bool> {
        let request = tonic::Request::new(UserExistsRequest {
            username: username.to_string(),
        });

        let mut client = self.client.clone();
        let response = client.user_exists(request).await.map_err(AppError::from)?;
        Ok(response.into_inner().exists)
    }

    async fn create_user(&self, username: &Username, password: &str) -> AppResult<()> {
        let request = tonic::Request::new(CreateUserRequest {
            username: username.to_string(),
            password: password.to_string(),
        });

        let mut client = self.client.clone();
        client.create_user(request).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn set_email(&self, username: &Username, email: &str) -> AppResult<()> {
        let request = tonic::Request::new(SetEmailRequest {
            username: username.to_string(),
            email: email.to_string(),
        });

        let mut client = self.client.clone();
        client.set_email(request).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn set_display_name(&self, username: &Username, display_name: &str) -> AppResult<()> {
        let request = tonic::Request::new(SetDisplayNameRequest {
            username: username.to_string(),
            display_name: display_name.to_string(),
        });

        let mut client = self.client.clone();
        client
            .set_display_name(request)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}

#[async_trait]
impl ConfigStore for DirectoryClient {
    async fn set_user_value(
        &self,
        username: &Username,
        app_id: &str,
        key: &str,
        value: &str,
    ) -> AppResult<()> {
        let request = tonic::Request::new(SetUserValueRequest {
            username: username.to_string(),
            app_id: app_id.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        });

        let mut client = self.client.clone();
        client
            .set_user_value(request)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
