use std::any::Any;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info_span;

use crate::auth::require_basic_auth;
use crate::error::AppError;
use crate::handlers::{create_url_handler, delete_url_handler, health_handler, redirect_handler};
use crate::state::AppState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub struct App {}

impl App {
    pub fn router(state: AppState, request_timeout: Duration) -> Router {
        let admin = Router::new()
            .route("/url", post(create_url_handler))
            .route("/url/", post(create_url_handler))
            .route("/url/{alias}", delete(delete_url_handler))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_basic_auth,
            ));

        Router::new()
            .route("/health", get(health_handler))
            .route("/{alias}", get(redirect_handler))
            .merge(admin)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                        let request_id = request
                            .headers()
                            .get(REQUEST_ID_HEADER)
                            .and_then(|value| value.to_str().ok())
                            .unwrap_or_default();
                        info_span!(
                            "request",
                            method = %request.method(),
                            path = %request.uri().path(),
                            request_id = %request_id,
                        )
                    }))
                    .layer(CatchPanicLayer::custom(panic_response))
                    .layer(TimeoutLayer::with_status_code(
                        StatusCode::REQUEST_TIMEOUT,
                        request_timeout,
                    )),
            )
            .with_state(state)
    }
}

fn panic_response(_: Box<dyn Any + Send + 'static>) -> Response {
    AppError::Internal("handler panicked".to_string()).into_response()
}
