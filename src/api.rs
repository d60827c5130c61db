//! Declarative API descriptors.
//!
//! An [`Api`] is pure data: a named set of groups, each a named set of
//! endpoints. Descriptors are built once at startup from literals, are
//! immutable afterwards, and carry no behavior. Handlers are attached
//! separately via the registry and checked for completeness at compose time.

use axum::http::Method;

/// A single declared route: HTTP verb, literal path, and a logical name
/// used to bind a handler within its group.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub method: Method,
    pub path: &'static str,
    pub name: &'static str,
}

impl Endpoint {
    #[must_use]
    pub fn new(method: Method, path: &'static str, name: &'static str) -> Self {
        Self { method, path, name }
    }
}

/// A named collection of endpoints, used for handler-registration namespacing.
#[derive(Debug, Clone)]
pub struct Group {
    pub name: &'static str,
    pub endpoints: Vec<Endpoint>,
}

impl Group {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            endpoints: Vec::new(),
        }
    }

    #[must_use]
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoints.push(endpoint);
        self
    }
}

/// The top-level named collection of groups describing the entire surface.
#[derive(Debug, Clone)]
pub struct Api {
    pub name: &'static str,
    pub groups: Vec<Group>,
}

impl Api {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            groups: Vec::new(),
        }
    }

    #[must_use]
    pub fn group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    /// Iterate every declared endpoint together with its owning group name.
    pub fn endpoints(&self) -> impl Iterator<Item = (&'static str, &Endpoint)> {
        self.groups
            .iter()
            .flat_map(|g| g.endpoints.iter().map(|e| (g.name, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_iterates_in_declaration_order() {
        let api = Api::new("demo")
            .group(
                Group::new("a")
                    .endpoint(Endpoint::new(Method::GET, "/one", "one"))
                    .endpoint(Endpoint::new(Method::POST, "/two", "two")),
            )
            .group(Group::new("b").endpoint(Endpoint::new(Method::GET, "/three", "three")));

        let names: Vec<_> = api.endpoints().map(|(g, e)| (g, e.name)).collect();
        assert_eq!(
            names,
            vec![("a", "one"), ("a", "two"), ("b", "three")]
        );
    }
}
