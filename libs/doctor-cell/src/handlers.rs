use std::sync::Arc;

use axum::{
    extract::State,
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::DoctorError;
use crate::services::DoctorRoster;

#[axum::debug_handler]
pub async fn list_doctors(
    State(roster): State<Arc<DoctorRoster>>,
) -> Result<Json<Value>, AppError> {
    let doctors = roster.list_doctors()
        .map_err(|e| match e {
            DoctorError::NoDoctorsAvailable => AppError::NotFound(e.to_string()),
        })?;

    Ok(Json(json!(doctors)))
}
