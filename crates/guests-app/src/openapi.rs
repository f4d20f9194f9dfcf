//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::response::{CreatedBody, RejectedBody};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::guest_handler::create_guest),
    components(schemas(CreatedBody, RejectedBody)),
    tags(
        (name = "Guests", description = "Guest account provisioning"),
    )
)]
pub struct ApiDoc;
