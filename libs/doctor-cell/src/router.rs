use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use crate::handlers;
use crate::services::DoctorRoster;

pub fn doctor_routes(roster: Arc<DoctorRoster>) -> Router {
    Router::new()
        .route("/", get(handlers::list_doctors))
        .with_state(roster)
}
