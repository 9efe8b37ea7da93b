//! JSON search API over the loaded listings

use axum::extract::{Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::handlers::ask::AppState;
use crate::inventory::{query, Intent, Row, Table};

/// Query parameters for listing search
#[derive(Debug, Deserialize)]
pub struct ListingsParams {
    /// Free-text query, same language as the chat endpoint
    pub q: Option<String>,

    /// Override for the ranking limit
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ListingsResponse {
    pub query: String,
    pub intent: Intent,
    pub total: usize,
    pub rows: Vec<ListingView>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ListingView {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub rating: Option<f64>,
    pub link: Option<String>,
}

impl From<Row<'_>> for ListingView {
    fn from(row: Row<'_>) -> Self {
        Self {
            name: row.name(),
            price: row.price(),
            rating: row.rating(),
            link: row.link(),
        }
    }
}

/// GET /api/listings - Resolve a query and return the matching rows
///
/// Example: GET /api/listings?q=cheap+samsung&limit=3
pub async fn search_listings(
    State(state): State<AppState>,
    Query(params): Query<ListingsParams>,
) -> Result<Json<ListingsResponse>, AppError> {
    let q = params
        .q
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| AppError::InvalidRequest("query parameter 'q' is required".to_string()))?;

    if params.limit == Some(0) {
        return Err(AppError::InvalidRequest(
            "limit must be at least 1".to_string(),
        ));
    }

    let limit = params
        .limit
        .unwrap_or_else(|| state.config.load().inventory.result_limit);

    let inventory = state.inventory.load();
    let intent = query::classify(&q);
    let results = if inventory.table.is_empty() {
        Table::empty()
    } else {
        query::apply(&inventory.table, &intent, limit)
    };

    crate::metrics::record_query(intent.label(), results.len());

    Ok(Json(ListingsResponse {
        query: q,
        intent,
        total: results.len(),
        rows: results.rows().map(ListingView::from).collect(),
    }))
}
