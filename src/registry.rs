//! Handler registry and API composition.
//!
//! Descriptors declare the surface; the registry supplies the computation for
//! each declared endpoint. [`compose`] merges the two into an [`axum::Router`],
//! rejecting any mismatch before the server is allowed to bind: a declared
//! endpoint without a handler, a handler naming no declared endpoint, or a
//! duplicate name/route anywhere in the descriptor.

use std::collections::HashMap;
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::http::Method;
use axum::response::IntoResponse;
use axum::routing::MethodFilter;
use axum::{Json, Router};
use serde_json::Value;

use crate::api::Api;
use crate::error::AppError;

type HandlerFuture = Pin<Box<dyn Future<Output = Result<Value, AppError>> + Send>>;

/// A zero-argument computation producing an endpoint's declared success value.
pub type Handler = Arc<dyn Fn() -> HandlerFuture + Send + Sync>;

/// Accumulated handler bindings, keyed by (group name, endpoint name).
#[derive(Default)]
pub struct Bindings {
    handlers: HashMap<(&'static str, &'static str), Handler>,
    duplicates: Vec<(&'static str, &'static str)>,
}

impl Bindings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register handlers for one group. The closure receives a binder scoped
    /// to `group` and calls [`GroupBinder::handle`] once per endpoint name.
    #[must_use]
    pub fn bind_group(
        mut self,
        group: &'static str,
        register: impl FnOnce(GroupBinder) -> GroupBinder,
    ) -> Self {
        let GroupBinder { group, handlers } = register(GroupBinder {
            group,
            handlers: Vec::new(),
        });
        for (name, handler) in handlers {
            if self.handlers.insert((group, name), handler).is_some() {
                self.duplicates.push((group, name));
            }
        }
        self
    }
}

/// Binder scoped to a single group, passed to the `bind_group` closure.
pub struct GroupBinder {
    group: &'static str,
    handlers: Vec<(&'static str, Handler)>,
}

impl GroupBinder {
    #[must_use]
    pub fn handle<F, Fut>(mut self, name: &'static str, computation: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, AppError>> + Send + 'static,
    {
        let handler: Handler = Arc::new(move || Box::pin(computation()));
        self.handlers.push((name, handler));
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("duplicate group '{group}' in API '{api}'")]
    DuplicateGroup { api: &'static str, group: &'static str },

    #[error("duplicate endpoint '{endpoint}' in group '{group}'")]
    DuplicateEndpoint {
        group: &'static str,
        endpoint: &'static str,
    },

    #[error("duplicate route {method} {path}")]
    DuplicateRoute { method: Method, path: &'static str },

    #[error("endpoint '{group}/{endpoint}' has no handler binding")]
    MissingHandler {
        group: &'static str,
        endpoint: &'static str,
    },

    #[error("handler bound for undeclared endpoint '{group}/{endpoint}'")]
    UnknownEndpoint {
        group: &'static str,
        endpoint: &'static str,
    },

    #[error("handler bound twice for endpoint '{group}/{endpoint}'")]
    DuplicateBinding {
        group: &'static str,
        endpoint: &'static str,
    },

    #[error("unsupported HTTP method {method} on {path}")]
    UnsupportedMethod { method: Method, path: &'static str },
}

/// Merge an API descriptor with its handler bindings into a router.
///
/// # Errors
///
/// Returns a [`ComposeError`] if the descriptor contains duplicate names or
/// routes, if any declared endpoint lacks a binding, or if any binding does
/// not correspond to a declared endpoint. All of these are startup-time
/// configuration errors; a router is only returned when the surface is
/// completely and unambiguously wired.
pub fn compose(api: &Api, mut bindings: Bindings) -> Result<Router, ComposeError> {
    validate(api)?;

    if let Some(&(group, endpoint)) = bindings.duplicates.first() {
        return Err(ComposeError::DuplicateBinding { group, endpoint });
    }

    let mut router = Router::new();
    for (group, endpoint) in api.endpoints() {
        let handler = bindings
            .handlers
            .remove(&(group, endpoint.name))
            .ok_or(ComposeError::MissingHandler {
                group,
                endpoint: endpoint.name,
            })?;
        let filter = method_filter(&endpoint.method, endpoint.path)?;
        let route = axum::routing::on(filter, move || {
            let handler = handler.clone();
            async move {
                match handler().await {
                    Ok(value) => Json(value).into_response(),
                    Err(err) => err.into_response(),
                }
            }
        });
        router = router.route(endpoint.path, route);
    }

    // Anything left over was bound against a name the descriptor never declared.
    if let Some(&(group, endpoint)) = bindings.handlers.keys().next() {
        return Err(ComposeError::UnknownEndpoint { group, endpoint });
    }

    Ok(router)
}

fn validate(api: &Api) -> Result<(), ComposeError> {
    let mut group_names = HashSet::new();
    let mut routes = HashSet::new();
    for group in &api.groups {
        if !group_names.insert(group.name) {
            return Err(ComposeError::DuplicateGroup {
                api: api.name,
                group: group.name,
            });
        }
        let mut endpoint_names = HashSet::new();
        for endpoint in &group.endpoints {
            if !endpoint_names.insert(endpoint.name) {
                return Err(ComposeError::DuplicateEndpoint {
                    group: group.name,
                    endpoint: endpoint.name,
                });
            }
            if !routes.insert((endpoint.method.clone(), endpoint.path)) {
                return Err(ComposeError::DuplicateRoute {
                    method: endpoint.method.clone(),
                    path: endpoint.path,
                });
            }
        }
    }
    Ok(())
}

fn method_filter(method: &Method, path: &'static str) -> Result<MethodFilter, ComposeError> {
    let filter = match method.as_str() {
        "GET" => MethodFilter::GET,
        "POST" => MethodFilter::POST,
        "PUT" => MethodFilter::PUT,
        "DELETE" => MethodFilter::DELETE,
        "PATCH" => MethodFilter::PATCH,
        "HEAD" => MethodFilter::HEAD,
        "OPTIONS" => MethodFilter::OPTIONS,
        "TRACE" => MethodFilter::TRACE,
        _ => {
            return Err(ComposeError::UnsupportedMethod {
                method: method.clone(),
                path,
            });
        }
    };
    Ok(filter)
}
