// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{AddAppointmentRequest, AppointmentError};
use crate::services::AppointmentStore;

fn to_app_error(e: AppointmentError) -> AppError {
    match e {
        AppointmentError::NotFound
        | AppointmentError::NoAppointmentsFound => AppError::NotFound(e.to_string()),
        AppointmentError::MissingFields
        | AppointmentError::InvalidKind
        | AppointmentError::InvalidDateFormat
        | AppointmentError::InvalidDateTimeFormat
        | AppointmentError::InvalidInterval
        | AppointmentError::SlotFull => AppError::BadRequest(e.to_string()),
    }
}

#[axum::debug_handler]
pub async fn find_appointments(
    State(store): State<Arc<AppointmentStore>>,
    Path((doctor_id, date)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let appointments = store.find_appointments(&doctor_id, &date).await
        .map_err(to_app_error)?;

    Ok(Json(json!(appointments)))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(store): State<Arc<AppointmentStore>>,
    Path(appointment_id): Path<String>,
) -> Result<StatusCode, AppError> {
    store.delete_appointment(&appointment_id).await
        .map_err(to_app_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn add_appointment(
    State(store): State<Arc<AppointmentStore>>,
    payload: Result<Json<AddAppointmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(request) = payload
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let appointment = store.add_appointment(request).await
        .map_err(to_app_error)?;

    Ok((StatusCode::CREATED, Json(json!({
        "message": "Appointment added successfully",
        "appointment": appointment
    }))))
}
