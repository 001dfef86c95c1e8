//! Property query routes
//!
//! Read-only endpoints over the in-memory portfolio store:
//! - GET /properties (optional ANDed filters)
//! - GET /properties/:id
//! - GET /stats
//! - GET /health
//!
//! No write endpoint exists; the store is populated once before serving.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::portfolio::{PortfolioStore, Property, PropertyFilter};

/// State shared across property handlers
pub struct PropertyState {
    /// The read-only store, loaded at startup
    pub store: Arc<PortfolioStore>,
}

impl PropertyState {
    /// Wrap a loaded store for sharing
    pub fn new(store: Arc<PortfolioStore>) -> Self {
        Self { store }
    }
}

/// Error body for 404 responses
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub detail: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
    pub properties_loaded: usize,
}

/// Create property routes bound to the given state
pub fn property_routes(state: Arc<PropertyState>) -> Router {
    Router::new()
        .route("/properties", get(list_properties_handler))
        .route("/properties/:id", get(get_property_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// List properties, optionally filtered
async fn list_properties_handler(
    State(state): State<Arc<PropertyState>>,
    Query(filter): Query<PropertyFilter>,
) -> impl IntoResponse {
    let matched: Vec<Property> = state
        .store
        .filter(&filter)
        .into_iter()
        .cloned()
        .collect();

    (StatusCode::OK, Json(matched))
}

/// Fetch one property by id, 404 when absent
async fn get_property_handler(
    State(state): State<Arc<PropertyState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.store.get(&id) {
        Some(property) => (StatusCode::OK, Json(property.clone())).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ApiError {
                detail: format!("Property {} not found", id),
            }),
        )
            .into_response(),
    }
}

/// Aggregate portfolio statistics
async fn stats_handler(State(state): State<Arc<PropertyState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.store.stats()))
}

/// Health check
async fn health_handler(State(state): State<Arc<PropertyState>>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        properties_loaded: state.store.len(),
    };

    (StatusCode::OK, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: "2025-01-01T00:00:00Z".to_string(),
            properties_loaded: 2,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["properties_loaded"], 2);
    }

    #[test]
    fn test_filter_deserializes_from_query_shape() {
        let filter: PropertyFilter =
            serde_json::from_str(r#"{"tipo": "Comercial", "min_valor": 100000.0}"#).unwrap();
        assert_eq!(filter.tipo.as_deref(), Some("Comercial"));
        assert_eq!(filter.min_valor, Some(100_000.0));
        assert!(filter.estado.is_none());
    }
}
