pub mod health;

use axum::http::Method;
use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::api::{Api, Endpoint, Group};
use crate::registry::{compose, Bindings, ComposeError};

#[derive(OpenApi)]
#[openapi(
    paths(health::check),
    tags(
        (name = "health", description = "Health check endpoints"),
    ),
    info(
        title = "Status API",
        description = "Minimal health-check API built on a declarative endpoint specification",
        version = "0.1.0"
    )
)]
struct ApiDoc;

/// The complete declared surface of this service: one API, one group, one
/// endpoint. Append-only at startup; nothing registers routes after this.
#[must_use]
pub fn api() -> Api {
    Api::new("status").group(
        Group::new("health").endpoint(Endpoint::new(Method::GET, "/healthz", "check")),
    )
}

/// Handler bindings for every endpoint declared in [`api`].
#[must_use]
pub fn bindings() -> Bindings {
    Bindings::new().bind_group("health", |group| group.handle("check", health::check))
}

/// Compose the declared API with its bindings and attach middleware.
///
/// # Errors
///
/// Returns a [`ComposeError`] if the surface and the bindings disagree.
pub fn build_router() -> Result<Router, ComposeError> {
    let api_routes = compose(&api(), bindings())?;

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    Ok(Router::new()
        .merge(api_routes)
        .merge(docs_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http()))
}
