use std::sync::Arc;

use axum::extract::{Json, State, rejection::JsonRejection};
use log::{error, info};
use nightowl_core::schedule::{
    dto::{ErrorBody, ScheduleRequest, ScheduleResponse},
    error::GenerationError,
    handler,
};
use serde_json::Value;

use crate::{error::ErrorServer, state::ServerState};

/// Logs a failed generation and returns the logged line. Malformed output is
/// recorded with the model's raw text.
pub fn log_failure(err: &GenerationError) -> String {
    let line = match err.raw_generation() {
        Some(raw) => format!("Malformed generation ({}). Raw text: {}", err, raw),
        None => format!("Schedule generation failed: {}", err),
    };

    error!("{}", line);

    line
}

#[utoipa::path(
    post,
    path = "/api/generate-schedule",
    request_body = ScheduleRequest,
    description = "Generate a nightly schedule from a task list and a sleep time",
    responses(
        (status = 200, description = "Success", body = ScheduleResponse),
        (status = 400, description = "Blank task list or unreadable body", body = ErrorBody),
        (status = 422, description = "Body does not match the request shape", body = ErrorBody),
        (status = 500, description = "Service not configured or generation failed", body = ErrorBody),
    )
)]
pub async fn generate_schedule(
    State(server_state): State<Arc<ServerState>>,
    payload: Result<Json<ScheduleRequest>, JsonRejection>,
) -> Result<Json<Value>, ErrorServer> {
    let Json(request) = payload.map_err(|rejection| {
        let err = ErrorServer::from(rejection);
        error!("Rejected request body: {}", err);
        err
    })?;

    info!(
        "Incoming Data: sleep_time={:?} tasks={:?}",
        request.sleep_time, request.tasks
    );

    let model = server_state
        .gemini_settings()
        .client(server_state.http())
        .map_err(|e| {
            let err = GenerationError::from(e);
            log_failure(&err);
            ErrorServer::from(err)
        })?;

    info!("Requesting schedule from {}", model.model());

    let schedule = handler::generate_schedule(&model, &request)
        .await
        .map_err(|err| {
            log_failure(&err);
            ErrorServer::from(err)
        })?;

    Ok(Json(schedule))
}
