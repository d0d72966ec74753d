use iredo_domain::constants::ROOMS_TAG;
use utoipa::OpenApi;

/// The OpenAPI document for the whole API surface.
///
/// Routes are collected at router-assembly time through `utoipa-axum`; this
/// type only pins the document identity (title/version) and tag metadata.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "iredo_v1", version = "v1"),
    tags(
        (name = ROOMS_TAG, description = "Rooms routes")
    )
)]
pub struct ApiDoc;
