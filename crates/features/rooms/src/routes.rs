use axum::response::IntoResponse;
use iredo_kernel::domain::constants::ROOMS_TAG;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Fixed rooms payload.
const ROOMS: &str = "okay room, hello world";

#[utoipa::path(
    get,
    path = "/api/rooms",
    responses((status = OK, description = "Rooms listing", body = str, content_type = "text/plain")),
    tag = ROOMS_TAG,
)]
async fn get_rooms() -> impl IntoResponse {
    // Served as `text/plain; charset=utf-8`, axum's encoding for a plain str.
    ROOMS
}

/// Routes owned by the rooms slice.
pub fn router<S>() -> OpenApiRouter<S>
where
    S: Send + Sync + Clone + 'static,
{
    OpenApiRouter::<S>::new().routes(routes!(get_rooms))
}
