use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::router::appointment_routes;
use appointment_cell::AppointmentStore;
use doctor_cell::router::doctor_routes;

pub fn create_router(store: Arc<AppointmentStore>) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic scheduling API is running!" }))
        .nest("/doctors", doctor_routes(store.doctors()))
        .nest("/appointments", appointment_routes(store))
}
