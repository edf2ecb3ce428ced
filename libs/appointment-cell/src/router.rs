// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::handlers;
use crate::services::AppointmentStore;

pub fn appointment_routes(store: Arc<AppointmentStore>) -> Router {
    Router::new()
        .route("/", post(handlers::add_appointment))
        .route("/{appointment_id}", delete(handlers::delete_appointment))
        .route("/{doctor_id}/{date}", get(handlers::find_appointments))
        .with_state(store)
}
