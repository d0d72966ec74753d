use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use iredo::domain::config::{ApiConfig, Environment};
use iredo_server::Server;
use tower::ServiceExt;

fn app(environment: Environment) -> axum::Router {
    let mut cfg = ApiConfig::default();
    cfg.server.environment = environment;
    Server::builder().config(cfg).build().expect("server build").router()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response.into_body().collect().await.expect("body").to_bytes().to_vec()
}

#[tokio::test]
async fn rooms_route_returns_fixed_payload() {
    let response = app(Environment::Production)
        .oneshot(Request::get("/api/rooms").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("text/plain; charset=utf-8")
    );
    assert_eq!(body_bytes(response).await, b"okay room, hello world");
}

#[tokio::test]
async fn rooms_route_is_idempotent() {
    let app = app(Environment::Production);
    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(Request::get("/api/rooms").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"okay room, hello world");
    }
}

#[tokio::test]
async fn responses_carry_permissive_cors_headers() {
    let response = app(Environment::Production)
        .oneshot(
            Request::get("/api/rooms")
                .header(header::ORIGIN, "https://example.com")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn preflight_is_answered_before_route_dispatch() {
    let response = app(Environment::Production)
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/rooms")
                .header(header::ORIGIN, "https://example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-custom")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    assert!(response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
    assert!(response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_HEADERS));
}

#[tokio::test]
async fn development_serves_the_openapi_document() {
    let response = app(Environment::Development)
        .oneshot(Request::get("/swagger/v1/swagger.json").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_bytes(response).await;
    let doc: serde_json::Value = serde_json::from_slice(&body).expect("valid JSON document");
    assert_eq!(doc["info"]["title"], "iredo_v1");
    assert_eq!(doc["info"]["version"], "v1");
    assert!(doc["paths"]["/api/rooms"]["get"].is_object());
}

#[tokio::test]
async fn development_serves_the_documentation_ui() {
    let response = app(Environment::Development)
        .oneshot(Request::get("/swagger").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn production_withholds_documentation() {
    for path in ["/swagger/v1/swagger.json", "/swagger"] {
        let response = app(Environment::Production)
            .oneshot(Request::get(path).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{path} should be absent");
    }
}

#[tokio::test]
async fn plaintext_requests_are_redirected_to_tls() {
    let response = iredo_server::redirect_app(8443)
        .oneshot(
            Request::get("/api/rooms?page=2")
                .header(header::HOST, "localhost:8080")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
        Some("https://localhost:8443/api/rooms?page=2")
    );
}

#[tokio::test]
async fn plaintext_redirect_covers_every_path() {
    for path in ["/", "/swagger", "/api/missing"] {
        let response = iredo_server::redirect_app(443)
            .oneshot(
                Request::get(path)
                    .header(header::HOST, "example.com")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "{path} should redirect");
        assert_eq!(
            response.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
            Some(format!("https://example.com{path}").as_str())
        );
    }
}

#[tokio::test]
async fn plaintext_request_without_host_is_rejected() {
    let response = iredo_server::redirect_app(8443)
        .oneshot(Request::get("/api/rooms").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn plaintext_request_with_malformed_host_is_rejected() {
    let response = iredo_server::redirect_app(8443)
        .oneshot(
            Request::get("/api/rooms")
                .header(header::HOST, "not a host")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn plaintext_redirects_carry_permissive_cors_headers() {
    let response = iredo_server::redirect_app(8443)
        .oneshot(
            Request::get("/api/rooms")
                .header(header::HOST, "localhost:8080")
                .header(header::ORIGIN, "https://example.com")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let response = app(Environment::Production)
        .oneshot(Request::get("/api/missing").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
