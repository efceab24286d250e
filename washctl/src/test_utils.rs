//! Test utilities for handler tests.

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::json;

use crate::api::models::appointments::AppointmentResponse;
use crate::api::models::payments::PaymentResponse;
use crate::config::Config;
use crate::store::Store;
use crate::types::AppointmentId;
use crate::{AppState, router};

/// Fresh application state with a temporary uploads directory.
pub fn test_state() -> AppState {
    let uploads = tempfile::tempdir().expect("create temp uploads dir").into_path();

    let config = Config {
        uploads_dir: uploads,
        ..Config::default()
    };

    AppState {
        config: Arc::new(config),
        store: Arc::new(Store::new()),
    }
}

/// A `TestServer` over the full router, plus the state behind it.
pub fn test_server() -> (TestServer, AppState) {
    let state = test_state();
    let server = TestServer::new(router(state.clone())).expect("create test server");
    (server, state)
}

pub async fn book_appointment(server: &TestServer) -> AppointmentResponse {
    server
        .post("/api/appointments")
        .json(&json!({
            "user_id": 1,
            "vehicle_id": 1,
            "service_type": "Full Wash",
            "appointment_date": "2025-06-01T10:00:00Z",
        }))
        .await
        .json()
}

pub async fn record_payment(server: &TestServer, appointment_id: AppointmentId) -> PaymentResponse {
    server
        .post("/api/payments")
        .json(&json!({
            "appointment_id": appointment_id,
            "amount": 75.0,
            "payment_method": "Card",
            "transaction_date": "2025-06-01T10:30:00Z",
        }))
        .await
        .json()
}
