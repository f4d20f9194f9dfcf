//! Outcome of a provisioning request and its HTTP rendering.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use domain::MSG_USER_CREATED;

/// Result of `GuestService::create`.
///
/// Field errors are a regular outcome, not an `AppError`: they render as
/// 422 with the offending field names as keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisioningResult {
    Created { message: String },
    Rejected { errors: BTreeMap<String, String> },
}

impl ProvisioningResult {
    pub fn created() -> Self {
        ProvisioningResult::Created {
            message: MSG_USER_CREATED.to_string(),
        }
    }

    pub fn rejected(errors: BTreeMap<String, String>) -> Self {
        ProvisioningResult::Rejected { errors }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, ProvisioningResult::Created { .. })
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ProvisioningResult::Created { .. } => StatusCode::CREATED,
            ProvisioningResult::Rejected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

/// Body of a successful provisioning request.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedBody {
    #[schema(example = "User successfully created")]
    pub message: String,
}

/// Body of a rejected provisioning request.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RejectedBody {
    /// Field name to message
    pub error_messages: BTreeMap<String, String>,
}

impl IntoResponse for ProvisioningResult {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ProvisioningResult::Created { message } => {
                (status, Json(CreatedBody { message })).into_response()
            }
            ProvisioningResult::Rejected { errors } => (
                status,
                Json(RejectedBody {
                    error_messages: errors,
                }),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn created_renders_201_with_message() {
        let response = ProvisioningResult::created().into_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({ "message": "User successfully created" }));
    }

    #[tokio::test]
    async fn rejected_renders_422_with_error_messages() {
        let mut errors = BTreeMap::new();
        errors.insert("email".to_string(), "Invalid mail address".to_string());

        let response = ProvisioningResult::rejected(errors).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(
            body,
            serde_json::json!({ "errorMessages": { "email": "Invalid mail address" } })
        );
    }
}
