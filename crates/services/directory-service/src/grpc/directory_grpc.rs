//! gRPC implementation of the UserDirectory service.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::service::DirectoryService;
use domain::{User, Username};
use proto::directory::{
    user_directory_server::UserDirectory as UserDirectoryProto, AccountResponse,
    CreateUserRequest, SetDisplayNameRequest, SetEmailRequest, SetUserValueRequest,
    SetUserValueResponse, UserExistsRequest, UserExistsResponse,
};

/// gRPC service wrapper for DirectoryService.
pub struct DirectoryGrpcService {
    service: Arc<dyn DirectoryService>,
}

impl DirectoryGrpcService {
    pub fn new(service: Arc<dyn DirectoryService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl UserDirectoryProto for DirectoryGrpcService {
    async fn user_exists(
        &self,
        request: Request<UserExistsRequest>,
    ) -> Result<Response<UserExistsResponse>, Status> {
        let req = request.into_inner();
        let username = Username::from_stored(req.username);

        let exists = self
            .service
            .user_exists(&username)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(UserExistsResponse { exists }))
    }

    async fn create_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<AccountResponse>, Status> {
        let req = request.into_inner();

        let user = self
            .service
            .create_user(Username::from_stored(req.username), &req.password)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(account_to_proto(&user)))
    }

    async fn set_email(
        &self,
        request: Request<SetEmailRequest>,
    ) -> Result<Response<AccountResponse>, Status> {
        let req = request.into_inner();
        let username = Username::from_stored(req.username);

        let user = self
            .service
            .set_email(&username, req.email)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(account_to_proto(&user)))
    }

    async fn set_display_name(
        &self,
        request: Request<SetDisplayNameRequest>,
    ) -> Result<Response<AccountResponse>, Status> {
        let req = request.into_inner();
        let username = Username::from_stored(req.username);

        let user = self
            .service
            .set_display_name(&username, req.display_name)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(account_to_proto(&user)))
    }

    async fn set_user_value(
        &self,
        request: Request<SetUserValueRequest>,
    ) -> Result<Response<SetUserValueResponse>, Status> {
        let req = request.into_inner();
        let username = Username::from_stored(req.username);

        self.service
            .set_user_value(&username, &req.app_id, &req.key, req.value)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(SetUserValueResponse {}))
    }
}

/// Convert a domain User to the wire representation (no password hash).
fn account_to_proto(user: &User) -> AccountResponse {
    AccountResponse {
        username: user.username.to_string(),
        email: user.email.clone(),
        display_name: user.effective_display_name().to_string(),
        created_at: user.created_at.to_rfc3339(),
    }
}
