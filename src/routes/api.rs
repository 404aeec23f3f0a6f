use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::NOT_READY_MESSAGE;
use crate::lookup::{activity_lines, display_name, find, NOT_FOUND_MESSAGE};
use crate::roster::RosterState;
use crate::state::AppState;

pub async fn roster_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let roster = state.roster.read().await;
    let body = match &*roster {
        RosterState::Uninitialized => serde_json::json!({
            "status": roster.label(),
        }),
        RosterState::Ready(records) => serde_json::json!({
            "status": roster.label(),
            "participants": records.len(),
        }),
        RosterState::Failed(message) => serde_json::json!({
            "status": roster.label(),
            "message": message,
        }),
    };
    Json(body)
}

#[derive(Deserialize)]
pub struct LookupQuery {
    email: String,
}

pub async fn lookup_participant(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LookupQuery>,
) -> impl IntoResponse {
    let Some(roster) = state.roster.read().await.roster().cloned() else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({
                "status": "not_ready",
                "message": NOT_READY_MESSAGE
            })),
        );
    };

    let records = find(&roster, &query.email);
    if records.is_empty() {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "status": "not_found",
                "message": NOT_FOUND_MESSAGE
            })),
        );
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "found",
            "name": display_name(&records),
            "activities": activity_lines(&records),
        })),
    )
}
