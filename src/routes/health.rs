use serde_json::Value;

use crate::error::AppError;

/// Body returned by the health check, JSON-encoded as a bare string.
pub const HEALTH_MESSAGE: &str = "Server is running successfully";

/// Health check computation
///
/// Always succeeds with a fixed message. This endpoint is stateless and
/// suitable for Kubernetes probes.
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Service is healthy", body = String),
    ),
    tag = "health"
)]
pub async fn check() -> Result<Value, AppError> {
    Ok(Value::String(HEALTH_MESSAGE.to_string()))
}
