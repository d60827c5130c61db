//! Composition checks: the router only comes into existence when the
//! declared surface and the handler bindings agree exactly.
//!
//! Run with: cargo test --test compose_test

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use status_api::api::{Api, Endpoint, Group};
use status_api::registry::{compose, Bindings, ComposeError};
use status_api::routes;

fn demo_api() -> Api {
    Api::new("demo").group(
        Group::new("health").endpoint(Endpoint::new(Method::GET, "/healthz", "check")),
    )
}

fn demo_bindings() -> Bindings {
    Bindings::new().bind_group("health", |group| {
        group.handle("check", || async { Ok(Value::String("ok".into())) })
    })
}

#[test]
fn complete_surface_composes() {
    assert!(compose(&demo_api(), demo_bindings()).is_ok());
}

#[test]
fn service_surface_composes() {
    // The real API and bindings shipped by this service must always agree.
    assert!(compose(&routes::api(), routes::bindings()).is_ok());
    assert!(routes::build_router().is_ok());
}

#[test]
fn missing_handler_is_rejected() {
    let err = compose(&demo_api(), Bindings::new()).unwrap_err();
    assert!(matches!(
        err,
        ComposeError::MissingHandler {
            group: "health",
            endpoint: "check"
        }
    ));
}

#[test]
fn unknown_binding_is_rejected() {
    let bindings = demo_bindings().bind_group("health", |group| {
        group.handle("extra", || async { Ok(Value::Null) })
    });
    let err = compose(&demo_api(), bindings).unwrap_err();
    assert!(matches!(
        err,
        ComposeError::UnknownEndpoint {
            group: "health",
            endpoint: "extra"
        }
    ));
}

#[test]
fn double_binding_is_rejected() {
    let bindings = demo_bindings().bind_group("health", |group| {
        group.handle("check", || async { Ok(Value::Null) })
    });
    let err = compose(&demo_api(), bindings).unwrap_err();
    assert!(matches!(err, ComposeError::DuplicateBinding { .. }));
}

#[test]
fn duplicate_group_is_rejected() {
    let api = Api::new("demo")
        .group(Group::new("health").endpoint(Endpoint::new(Method::GET, "/a", "a")))
        .group(Group::new("health").endpoint(Endpoint::new(Method::GET, "/b", "b")));
    let err = compose(&api, demo_bindings()).unwrap_err();
    assert!(matches!(err, ComposeError::DuplicateGroup { .. }));
}

#[test]
fn duplicate_endpoint_name_is_rejected() {
    let api = Api::new("demo").group(
        Group::new("health")
            .endpoint(Endpoint::new(Method::GET, "/a", "check"))
            .endpoint(Endpoint::new(Method::GET, "/b", "check")),
    );
    let err = compose(&api, demo_bindings()).unwrap_err();
    assert!(matches!(err, ComposeError::DuplicateEndpoint { .. }));
}

#[test]
fn duplicate_route_is_rejected() {
    let api = Api::new("demo").group(
        Group::new("health")
            .endpoint(Endpoint::new(Method::GET, "/healthz", "check"))
            .endpoint(Endpoint::new(Method::GET, "/healthz", "other")),
    );
    let err = compose(&api, demo_bindings()).unwrap_err();
    assert!(matches!(err, ComposeError::DuplicateRoute { .. }));
}

#[tokio::test]
async fn composed_router_serves_bound_handler() {
    let router = compose(&demo_api(), demo_bindings()).unwrap();

    let response = router
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
    assert_eq!(&body[..], b"\"ok\"");
}

#[tokio::test]
async fn composed_router_rejects_wrong_method() {
    let router = compose(&demo_api(), demo_bindings()).unwrap();

    let response = router
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
