use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{AppState, VERSION};

pub async fn healthcheck(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "available",
        "environment": state.environment,
        "version": VERSION,
    }))
}
