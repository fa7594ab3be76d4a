use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Health {
    status: &'static str,
}

/// Liveness probe, always `{"status":"UP"}`
pub async fn health_handler() -> Json<Health> {
    Json(Health { status: "UP" })
}
