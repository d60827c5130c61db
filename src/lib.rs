//! Status API - minimal health-check service on a declarative endpoint spec
//!
//! This library exposes the core modules for testing and reuse.

pub mod api;
pub mod config;
pub mod error;
pub mod registry;
pub mod routes;
pub mod server;
