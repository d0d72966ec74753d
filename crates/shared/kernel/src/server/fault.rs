use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::any::Any;

/// Fault response for development: surfaces the panic payload in the body so
/// the failure is diagnosable from the client side.
pub fn development_panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic_detail(err.as_ref());
    tracing::error!(%detail, "request handler panicked");
    (StatusCode::INTERNAL_SERVER_ERROR, format!("Unhandled fault: {detail}")).into_response()
}

/// Fault response for everything else: a generic 500 with no internal detail.
pub fn production_panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!(detail = %panic_detail(err.as_ref()), "request handler panicked");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

fn panic_detail(err: &(dyn Any + Send)) -> String {
    if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_owned()
    } else {
        "non-string panic payload".to_owned()
    }
}
