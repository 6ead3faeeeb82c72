use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use shortcut_core::{Alias, RegistryError, Remover, Resolver, Shortener, StorageError};
use shortcut_gateway::{App, AppState, Credentials};
use shortcut_generator::{GeneratorSettings, RandomGenerator};
use shortcut_registry::AliasRegistry;
use shortcut_storage::InMemoryRepository;
use tower::ServiceExt;

const USER: &str = "admin";
const PASSWORD: &str = "s3cret";

fn router() -> Router {
    let generator = RandomGenerator::new(GeneratorSettings::default()).unwrap();
    let registry = AliasRegistry::new(InMemoryRepository::new(), generator);
    let state = AppState::new(registry, Credentials::new(USER, PASSWORD));
    App::router(state, Duration::from_secs(4))
}

fn auth_header(user: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{password}")))
}

fn create_request(body: Value, auth: Option<String>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/url")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete_request(uri: &str, auth: Option<String>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::DELETE).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn full_crud_flow() {
    let app = router();
    let auth = Some(auth_header(USER, PASSWORD));

    let response = app
        .clone()
        .oneshot(create_request(json!({"url": "https://example.com/test"}), auth.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "OK");
    let alias = body["alias"].as_str().unwrap().to_string();
    assert!(!alias.is_empty());

    let response = app.clone().oneshot(get_request(&format!("/{alias}"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://example.com/test"
    );

    let response = app
        .clone()
        .oneshot(delete_request(&format!("/url/{alias}"), auth))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"status": "OK"}));

    let response = app.oneshot(get_request(&format!("/{alias}"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await,
        json!({"status": "Error", "error": "not found"})
    );
}

#[tokio::test]
async fn create_requires_credentials() {
    let app = router();

    let response = app
        .clone()
        .oneshot(create_request(json!({"url": "https://example.com"}), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));

    let response = app
        .oneshot(create_request(
            json!({"url": "https://example.com"}),
            Some(auth_header(USER, "wrong")),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn delete_requires_credentials() {
    let response = router()
        .oneshot(delete_request("/url/abc", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn requested_alias_and_conflict() {
    let app = router();
    let auth = Some(auth_header(USER, PASSWORD));

    let response = app
        .clone()
        .oneshot(create_request(
            json!({"url": "https://first.example", "alias": "promo"}),
            auth.clone(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["alias"], "promo");

    let response = app
        .clone()
        .oneshot(create_request(
            json!({"url": "https://second.example", "alias": "promo"}),
            auth,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        json_body(response).await,
        json!({"status": "Error", "error": "alias already exists"})
    );

    let response = app.oneshot(get_request("/promo")).await.unwrap();
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://first.example"
    );
}

#[tokio::test]
async fn create_validates_body() {
    let app = router();
    let auth = Some(auth_header(USER, PASSWORD));

    let response = app
        .clone()
        .oneshot(create_request(json!({"url": "not a url"}), auth.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["status"], "Error");

    let response = app
        .clone()
        .oneshot(create_request(
            json!({"url": "https://example.com", "alias": "bad-alias"}),
            auth.clone(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "invalid alias");

    let response = app
        .oneshot(create_request(json!({"link": "https://example.com"}), auth))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unredirectable_urls_are_never_stored() {
    let app = router();
    let auth = Some(auth_header(USER, PASSWORD));

    for url in ["https://example.com/a\nb", "https://exa mple.com"] {
        let response = app
            .clone()
            .oneshot(create_request(
                json!({"url": url, "alias": "broken"}),
                auth.clone(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{url:?}");
    }

    let response = app.oneshot(get_request("/broken")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_missing_alias_is_not_found() {
    let response = router()
        .oneshot(delete_request(
            "/url/missing",
            Some(auth_header(USER, PASSWORD)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_carries_request_id() {
    let response = router().oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(json_body(response).await, json!({"status": "ok"}));
}

/// Registry whose store is down.
struct Unavailable;

#[async_trait]
impl Shortener for Unavailable {
    async fn shorten(&self, _: String, _: Option<Alias>) -> Result<Alias, RegistryError> {
        Err(RegistryError::OutOfAttempts { attempts: 8 })
    }
}

#[async_trait]
impl Resolver for Unavailable {
    async fn resolve(&self, _: &Alias) -> Result<String, RegistryError> {
        Err(RegistryError::Store(StorageError::Unavailable(
            "connection refused".to_string(),
        )))
    }
}

#[async_trait]
impl Remover for Unavailable {
    async fn remove(&self, _: &Alias) -> Result<(), RegistryError> {
        Err(RegistryError::Store(StorageError::Timeout("slow".to_string())))
    }
}

#[tokio::test]
async fn failures_render_as_internal_errors() {
    let unavailable = Arc::new(Unavailable);
    let state = AppState::from_parts(
        unavailable.clone(),
        unavailable.clone(),
        unavailable,
        Credentials::new(USER, PASSWORD),
    );
    let app = App::router(state, Duration::from_secs(4));
    let auth = Some(auth_header(USER, PASSWORD));

    let response = app.clone().oneshot(get_request("/abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({"status": "Error", "error": "internal error"})
    );

    let response = app
        .clone()
        .oneshot(create_request(json!({"url": "https://example.com"}), auth.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await["error"],
        "failed to generate alias"
    );

    let response = app
        .oneshot(delete_request("/url/abc", auth))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

/// Resolver that never answers within the request deadline.
struct Stalled;

#[async_trait]
impl Resolver for Stalled {
    async fn resolve(&self, _: &Alias) -> Result<String, RegistryError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok("https://late.example".to_string())
    }
}

/// Resolver that panics mid-request.
struct Exploding;

#[async_trait]
impl Resolver for Exploding {
    async fn resolve(&self, _: &Alias) -> Result<String, RegistryError> {
        panic!("resolver blew up")
    }
}

fn router_with_resolver(resolver: Arc<dyn Resolver>, timeout: Duration) -> Router {
    let unavailable = Arc::new(Unavailable);
    let state = AppState::from_parts(
        unavailable.clone(),
        resolver,
        unavailable,
        Credentials::new(USER, PASSWORD),
    );
    App::router(state, timeout)
}

#[tokio::test]
async fn request_timeout_keeps_request_id() {
    let app = router_with_resolver(Arc::new(Stalled), Duration::from_millis(50));

    let response = app.oneshot(get_request("/abc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn handler_panic_renders_internal_error() {
    let app = router_with_resolver(Arc::new(Exploding), Duration::from_secs(4));

    let response = app.oneshot(get_request("/abc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(
        json_body(response).await,
        json!({"status": "Error", "error": "internal error"})
    );
}
