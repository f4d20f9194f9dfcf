//! Guest provisioning handler.

use axum::{
    extract::{Query, State},
    routing::put,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use common::AppResult;
use domain::GuestAccountRequest;

use crate::response::{CreatedBody, ProvisioningResult, RejectedBody};
use crate::state::AppState;

/// Query parameters of the create request.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CreateGuestParams {
    /// Email address to invite
    #[serde(default)]
    #[param(example = "guest@example.com")]
    pub email: String,
    /// Optional display name
    #[param(example = "Jane")]
    pub display_name: Option<String>,
    /// Username predicted by the frontend; ignored
    pub username: Option<String>,
}

/// Create guest routes
pub fn guest_routes() -> Router<AppState> {
    Router::new().route("/users", put(create_guest))
}

/// Create a guest account
#[utoipa::path(
    put,
    path = "/index.php/apps/guests/users",
    tag = "Guests",
    params(CreateGuestParams),
    responses(
        (status = 201, description = "Guest account created", body = CreatedBody),
        (status = 422, description = "Invalid or already used email", body = RejectedBody),
        (status = 503, description = "User directory unavailable")
    )
)]
pub async fn create_guest(
    State(state): State<AppState>,
    Query(params): Query<CreateGuestParams>,
) -> AppResult<ProvisioningResult> {
    let request = GuestAccountRequest::new(params.email, params.display_name);
    state.guests.create(request).await
}
