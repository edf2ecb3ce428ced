use axum::{
    body::Body,
    http::{header, Request, Response},
};
use serde_json::{json, Value};

use shared_config::AppConfig;

pub const TEST_DATETIME: &str = "2024-04-23 08:00";
pub const TEST_DATE: &str = "2024-04-23";

pub struct TestConfig {
    pub server_host: String,
    pub server_port: u16,
    pub seed_demo_data: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
            seed_demo_data: true,
        }
    }
}

impl TestConfig {
    pub fn unseeded() -> Self {
        Self {
            seed_demo_data: false,
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            server_host: self.server_host.clone(),
            server_port: self.server_port,
            seed_demo_data: self.seed_demo_data,
        }
    }
}

/// Builder for `POST /appointments` bodies.
pub struct AppointmentPayload {
    pub doctor_id: String,
    pub patient_first_name: String,
    pub patient_last_name: String,
    pub datetime: String,
    pub kind: String,
}

impl AppointmentPayload {
    pub fn new(doctor_id: &str) -> Self {
        Self {
            doctor_id: doctor_id.to_string(),
            patient_first_name: "June".to_string(),
            patient_last_name: "Lane".to_string(),
            datetime: TEST_DATETIME.to_string(),
            kind: "New Patient".to_string(),
        }
    }

    pub fn patient(mut self, first_name: &str, last_name: &str) -> Self {
        self.patient_first_name = first_name.to_string();
        self.patient_last_name = last_name.to_string();
        self
    }

    pub fn at(mut self, datetime: &str) -> Self {
        self.datetime = datetime.to_string();
        self
    }

    pub fn kind(mut self, kind: &str) -> Self {
        self.kind = kind.to_string();
        self
    }

    pub fn to_json(&self) -> Value {
        json!({
            "doctor_id": self.doctor_id,
            "patient_first_name": self.patient_first_name,
            "patient_last_name": self.patient_last_name,
            "datetime": self.datetime,
            "kind": self.kind
        })
    }
}

pub struct TestRequests;

impl TestRequests {
    pub fn json(method: &str, uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub fn empty(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }
}

/// Collect a response body, returning `Value::Null` for an empty body.
pub async fn read_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if body.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&body).unwrap()
}
