use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use iredo::domain::constants::{CORS_POLICY_NAME, SWAGGER_JSON_PATH, SWAGGER_UI_PATH};
use iredo::kernel::prelude::{ApiDoc, ApiState};
use iredo::kernel::server::fault;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

/// Assembles the request pipeline. Stage order is significant:
/// CORS outermost, then the fault layer (verbose in development), then
/// tracing, then the no-op authorization stage, then route dispatch.
#[allow(unreachable_pub)]
pub fn init(state: ApiState) -> Router {
    let development = state.development();

    // Separate the OpenAPI routes and the API documentation object
    let (api_routes, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(iredo::server::router::api_router())
        .layer(middleware::from_fn(authorization))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .split_for_parts();

    let mut app = Router::new().merge(api_routes);

    if development {
        // Documentation endpoints exist only in development; elsewhere both
        // paths fall through to the router's 404.
        let doc_for_json = api_doc.clone();
        app = app
            .route(SWAGGER_JSON_PATH, get(move || async move { Json(doc_for_json) }))
            .merge(Scalar::with_url(SWAGGER_UI_PATH, api_doc))
            .layer(CatchPanicLayer::custom(fault::development_panic_response));
    } else {
        app = app.layer(CatchPanicLayer::custom(fault::production_panic_response));
    }

    tracing::info!(policy = CORS_POLICY_NAME, development, "Request pipeline assembled");

    // CORS last so it sits outermost and preflight requests short-circuit
    // before any other stage.
    app.layer(allow_all_cors())
}

/// The process-wide permissive CORS policy: any origin, any method, any header.
pub(crate) fn allow_all_cors() -> CorsLayer {
    CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
}

/// Authorization stage. No schemes or policies are configured, so every
/// request passes; the stage is kept explicit so a real policy has an obvious
/// seat in the pipeline.
async fn authorization(request: Request, next: Next) -> Response {
    next.run(request).await
}
