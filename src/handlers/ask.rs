use arc_swap::ArcSwap;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, info_span};

use crate::{
    config::Config,
    inventory::{query, Inventory, Table},
    metrics, render,
};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ArcSwap<Config>>,
    pub inventory: Arc<ArcSwap<Inventory>>,
}

impl AppState {
    pub fn new(config: Config, inventory: Inventory) -> Self {
        Self {
            config: Arc::new(ArcSwap::from_pointee(config)),
            inventory: Arc::new(ArcSwap::from_pointee(inventory)),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub reply: String,
}

/// Handle POST /ask
///
/// Always answers with a reply string; malformed bodies count as an empty message.
pub async fn handle_ask(
    State(state): State<AppState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Json<AskResponse> {
    let message = match payload {
        Ok(Json(request)) => request.message.unwrap_or_default(),
        Err(rejection) => {
            debug!("Unreadable ask payload: {}", rejection);
            String::new()
        }
    };

    let request_id = uuid::Uuid::new_v4();
    let reply = info_span!("ask", request_id = %request_id).in_scope(|| {
        let inventory = state.inventory.load();
        let limit = state.config.load().inventory.result_limit;
        reply_for(&inventory.table, &message, limit)
    });

    Json(AskResponse { reply })
}

/// Build the reply text for a chat message
pub fn reply_for(table: &Table, message: &str, limit: usize) -> String {
    if message.is_empty() {
        return render::EMPTY_MESSAGE_REPLY.to_string();
    }

    let intent = query::classify(message);
    let results = if table.is_empty() {
        Table::empty()
    } else {
        query::apply(table, &intent, limit)
    };

    info!(
        intent = intent.label(),
        results = results.len(),
        "Resolved query"
    );
    metrics::record_query(intent.label(), results.len());

    render::results_reply(&results)
}
