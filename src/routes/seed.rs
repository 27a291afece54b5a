use axum::extract::State;
use axum::Json;
use serde_json::json;

use crate::error::AppError;
use crate::state::SharedState;

/// Populate all four collections from fixture data. Plain inserts with
/// no transaction across groups: a failure partway leaves the groups
/// already written in place.
pub async fn seed(State(state): State<SharedState>) -> Result<Json<serde_json::Value>, AppError> {
    match crate::seed::run(&state.store).await {
        Ok(()) => Ok(Json(json!({ "message": "Database seeded successfully" }))),
        Err(e) => {
            tracing::error!("Seeding failed: {e}");
            Err(AppError::Internal(format!("Seeding failed: {e}")))
        }
    }
}
