//! End-to-end tests: the upload client against a live server instance.

use std::io::Write;
use std::net::SocketAddr;

use chrono::Utc;
use url::Url;

use crate::api::models::payments::PaymentResponse;
use crate::client::ReceiptUploader;
use crate::store::{Appointment, Payment};
use crate::test_utils::test_state;
use crate::types::{AppointmentId, PaymentId};
use crate::{AppState, router};

/// Spin up the full router on an ephemeral port.
async fn start_server(state: AppState) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.expect("serve test app");
    });
    addr
}

fn seed_payment(state: &AppState) -> PaymentId {
    let now = Utc::now();
    let appointment = state.store.appointments.insert_with_id(|id| Appointment {
        id,
        user_id: 1,
        vehicle_id: 1,
        service_type: "Full Wash".to_string(),
        appointment_date: now,
        status: "Pending".to_string(),
        payment_status: "Unpaid".to_string(),
        created_at: now,
        updated_at: now,
    });
    seed_payment_for(state, appointment.id)
}

fn seed_payment_for(state: &AppState, appointment_id: AppointmentId) -> PaymentId {
    let now = Utc::now();
    state
        .store
        .payments
        .insert_with_id(|id| Payment {
            id,
            appointment_id,
            amount: 75.0,
            payment_method: "Card".to_string(),
            payment_status: "Pending".to_string(),
            transaction_date: now,
            receipt_filename: None,
            created_at: now,
            updated_at: now,
        })
        .id
}

#[tokio::test]
async fn upload_round_trip_links_and_serves_the_receipt() {
    let state = test_state();
    let payment_id = seed_payment(&state);
    let addr = start_server(state.clone()).await;

    let mut receipt = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
    receipt.write_all(b"fake image bytes").unwrap();

    let uploader = ReceiptUploader::new(Url::parse(&format!("http://{addr}")).unwrap());
    let body = uploader.upload(payment_id, Some(receipt.path())).await.expect("upload succeeds");

    let payment: PaymentResponse = serde_json::from_value(body).expect("payment response body");
    let receipt_url = payment.receipt_url.expect("receipt url set");

    // Fetch the stored receipt back through the serving route
    let served = reqwest::get(format!("http://{addr}{receipt_url}")).await.expect("fetch receipt");
    assert_eq!(served.status(), 200);
    assert_eq!(served.bytes().await.unwrap().as_ref(), b"fake image bytes");

    // The stored record carries the filename too
    let stored = state.store.payments.get(payment_id).expect("payment exists");
    assert!(stored.receipt_filename.is_some());
}

#[tokio::test]
async fn upload_for_unknown_payment_settles_with_the_error_body() {
    let state = test_state();
    let addr = start_server(state).await;

    let mut receipt = tempfile::NamedTempFile::new().unwrap();
    receipt.write_all(b"bytes").unwrap();

    // The client does not check status codes, so the 404 JSON body comes
    // back as the settled result rather than as an error.
    let uploader = ReceiptUploader::new(Url::parse(&format!("http://{addr}")).unwrap());
    let body = uploader.upload(12345, Some(receipt.path())).await.expect("JSON body settles");
    assert_eq!(body["error"], "Payment with ID 12345 not found");
}
