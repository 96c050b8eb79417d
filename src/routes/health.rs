//! Health check and API info routes

use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET / - Basic API information
pub async fn api_info() -> Json<Value> {
    Json(json!({
        "title": "Jotter API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "users": "/users",
            "posts": "/posts",
            "todos": "/todos"
        }
    }))
}
