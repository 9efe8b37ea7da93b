use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::handlers::ask::AppState;

/// Health check endpoint
/// Returns 200 OK if the service is running
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({
        "status": "healthy",
        "service": "phone-finder",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

/// Readiness check endpoint
///
/// Always 200: an empty inventory still answers queries, so it is reported
/// as `empty` rather than failing the probe.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let inventory = state.inventory.load();
    let status = if inventory.table.is_empty() { "empty" } else { "ready" };

    (StatusCode::OK, Json(json!({
        "status": status,
        "service": "phone-finder",
        "listings": inventory.table.len(),
        "source": inventory.source.display().to_string(),
        "loaded_at": inventory.loaded_at.to_rfc3339(),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::inventory::{Inventory, Table};
    use std::path::Path;

    #[tokio::test]
    async fn test_health_check_returns_ok() {
        let response = health_check().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness_check_returns_ok_for_empty_inventory() {
        let state = AppState::new(
            Config::default(),
            Inventory::from_table(Path::new("missing.xlsx"), Table::empty()),
        );
        let response = readiness_check(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
