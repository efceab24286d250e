//! HTTP handlers for payment records and receipt uploads.

use anyhow::Context;
use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::AppState;
use crate::api::models::payments::{PaymentCreate, PaymentResponse, PaymentUpdate};
use crate::errors::{Error, Result};
use crate::store::Payment;
use crate::types::PaymentId;

#[utoipa::path(
    get,
    path = "/api/payments",
    tag = "payments",
    summary = "List payments",
    responses(
        (status = 200, description = "List of payments", body = Vec<PaymentResponse>),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_payments(State(state): State<AppState>) -> Result<Json<Vec<PaymentResponse>>> {
    let payments = state.store.payments.list().into_iter().map(PaymentResponse::from).collect();
    Ok(Json(payments))
}

#[utoipa::path(
    post,
    path = "/api/payments",
    tag = "payments",
    summary = "Record payment",
    request_body = PaymentCreate,
    responses(
        (status = 201, description = "Payment recorded", body = PaymentResponse),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_payment(
    State(state): State<AppState>,
    Json(create): Json<PaymentCreate>,
) -> Result<(StatusCode, Json<PaymentResponse>)> {
    if !state.store.appointments.contains(create.appointment_id) {
        return Err(Error::BadRequest {
            message: format!("Unknown appointment {}", create.appointment_id),
        });
    }

    let now = Utc::now();
    let payment = state.store.payments.insert_with_id(|id| Payment {
        id,
        appointment_id: create.appointment_id,
        amount: create.amount,
        payment_method: create.payment_method.clone(),
        payment_status: "Pending".to_string(),
        transaction_date: create.transaction_date,
        receipt_filename: None,
        created_at: now,
        updated_at: now,
    });

    tracing::info!(payment_id = payment.id, appointment_id = payment.appointment_id, "Recorded payment");
    Ok((StatusCode::CREATED, Json(PaymentResponse::from(payment))))
}

#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    tag = "payments",
    summary = "Get payment",
    params(("id" = i64, Path, description = "Payment id")),
    responses(
        (status = 200, description = "The payment", body = PaymentResponse),
        (status = 404, description = "Payment not found")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_payment(State(state): State<AppState>, Path(id): Path<PaymentId>) -> Result<Json<PaymentResponse>> {
    let payment = state.store.payments.get(id).ok_or(Error::NotFound {
        resource: "Payment",
        id: id.to_string(),
    })?;
    Ok(Json(PaymentResponse::from(payment)))
}

#[utoipa::path(
    put,
    path = "/api/payments/{id}",
    tag = "payments",
    summary = "Update payment",
    params(("id" = i64, Path, description = "Payment id")),
    request_body = PaymentUpdate,
    responses(
        (status = 200, description = "Updated payment", body = PaymentResponse),
        (status = 404, description = "Payment not found")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<PaymentId>,
    Json(update): Json<PaymentUpdate>,
) -> Result<Json<PaymentResponse>> {
    let payment = state
        .store
        .payments
        .update(id, |payment| {
            if let Some(amount) = update.amount {
                payment.amount = amount;
            }
            if let Some(payment_method) = update.payment_method {
                payment.payment_method = payment_method;
            }
            if let Some(payment_status) = update.payment_status {
                payment.payment_status = payment_status;
            }
            if let Some(transaction_date) = update.transaction_date {
                payment.transaction_date = transaction_date;
            }
            payment.updated_at = Utc::now();
        })
        .ok_or(Error::NotFound {
            resource: "Payment",
            id: id.to_string(),
        })?;

    Ok(Json(PaymentResponse::from(payment)))
}

#[utoipa::path(
    delete,
    path = "/api/payments/{id}",
    tag = "payments",
    summary = "Delete payment",
    params(("id" = i64, Path, description = "Payment id")),
    responses(
        (status = 200, description = "Payment deleted"),
        (status = 404, description = "Payment not found")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_payment(State(state): State<AppState>, Path(id): Path<PaymentId>) -> Result<Json<serde_json::Value>> {
    state.store.payments.remove(id).ok_or(Error::NotFound {
        resource: "Payment",
        id: id.to_string(),
    })?;

    Ok(Json(json!({ "message": "Payment deleted successfully" })))
}

/// Keep only the final path component and drop characters that could
/// escape the uploads directory.
fn sanitize_filename(raw: &str) -> String {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect()
}

#[utoipa::path(
    post,
    path = "/payments/{payment_id}/upload_receipt",
    tag = "payments",
    summary = "Upload payment receipt",
    description = "Attach a receipt image to a payment. The file is expected as the multipart field `receipt`.",
    params(("payment_id" = i64, Path, description = "Payment the receipt belongs to")),
    request_body(content_type = "multipart/form-data", description = "Receipt file under the `receipt` field"),
    responses(
        (status = 200, description = "Receipt stored", body = PaymentResponse),
        (status = 400, description = "Invalid multipart payload"),
        (status = 404, description = "Payment not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn upload_receipt(
    State(state): State<AppState>,
    Path(payment_id): Path<PaymentId>,
    mut multipart: Multipart,
) -> Result<Json<PaymentResponse>> {
    // Reject unknown payments before reading the body
    if !state.store.payments.contains(payment_id) {
        return Err(Error::NotFound {
            resource: "Payment",
            id: payment_id.to_string(),
        });
    }

    let mut stored: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| Error::BadRequest {
        message: format!("Failed to parse multipart data: {e}"),
    })? {
        if field.name() != Some("receipt") {
            continue;
        }

        // An empty part with no filename is still accepted: a form submitted
        // without a selected file serializes exactly like that.
        let filename = field
            .file_name()
            .map(sanitize_filename)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "receipt".to_string());

        let data = field.bytes().await.map_err(|e| Error::BadRequest {
            message: format!("Failed to read receipt field: {e}"),
        })?;

        let stored_name = format!("{}-{}", Uuid::new_v4(), filename);

        tokio::fs::create_dir_all(&state.config.uploads_dir)
            .await
            .context("creating uploads directory")?;
        tokio::fs::write(state.config.uploads_dir.join(&stored_name), &data)
            .await
            .context("writing receipt file")?;

        tracing::info!(payment_id, filename = %stored_name, bytes = data.len(), "Stored payment receipt");
        stored = Some(stored_name);
    }

    let Some(stored_name) = stored else {
        return Err(Error::BadRequest {
            message: "Multipart field 'receipt' is required".to_string(),
        });
    };

    let payment = state
        .store
        .payments
        .update(payment_id, |payment| {
            payment.receipt_filename = Some(stored_name.clone());
            payment.updated_at = Utc::now();
        })
        .ok_or(Error::NotFound {
            resource: "Payment",
            id: payment_id.to_string(),
        })?;

    Ok(Json(PaymentResponse::from(payment)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{book_appointment, record_payment, test_server};
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use serde_json::json;

    #[tokio::test]
    async fn create_rejects_unknown_appointment() {
        let (server, _state) = test_server();

        let response = server
            .post("/api/payments")
            .json(&json!({
                "appointment_id": 42,
                "amount": 75.0,
                "payment_method": "Card",
                "transaction_date": "2025-06-01T10:30:00Z",
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Unknown appointment 42");
    }

    #[tokio::test]
    async fn create_starts_without_receipt() {
        let (server, _state) = test_server();
        let appointment = book_appointment(&server).await;

        let payment = record_payment(&server, appointment.id).await;
        assert_eq!(payment.payment_status, "Pending");
        assert_eq!(payment.receipt_filename, None);
        assert_eq!(payment.receipt_url, None);
    }

    #[tokio::test]
    async fn upload_receipt_stores_file_and_links_payment() {
        let (server, state) = test_server();
        let appointment = book_appointment(&server).await;
        let payment = record_payment(&server, appointment.id).await;

        let part = Part::bytes(b"fake image bytes".to_vec()).file_name("receipt.jpg");
        let response = server
            .post(&format!("/payments/{}/upload_receipt", payment.id))
            .multipart(MultipartForm::new().add_part("receipt", part))
            .await;

        response.assert_status(StatusCode::OK);
        let updated: PaymentResponse = response.json();

        let filename = updated.receipt_filename.expect("receipt filename recorded");
        assert!(filename.ends_with("-receipt.jpg"));
        assert_eq!(updated.receipt_url.as_deref(), Some(format!("/uploads/receipts/{filename}").as_str()));

        let contents = std::fs::read(state.config.uploads_dir.join(&filename)).expect("receipt file on disk");
        assert_eq!(contents, b"fake image bytes");
    }

    #[tokio::test]
    async fn upload_receipt_for_unknown_payment_is_404() {
        let (server, _state) = test_server();

        let part = Part::bytes(b"bytes".to_vec()).file_name("receipt.jpg");
        let response = server
            .post("/payments/99/upload_receipt")
            .multipart(MultipartForm::new().add_part("receipt", part))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Payment with ID 99 not found");
    }

    #[tokio::test]
    async fn upload_without_receipt_field_is_rejected() {
        let (server, _state) = test_server();
        let appointment = book_appointment(&server).await;
        let payment = record_payment(&server, appointment.id).await;

        let response = server
            .post(&format!("/payments/{}/upload_receipt", payment.id))
            .multipart(MultipartForm::new().add_text("note", "no file here"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_receipt_part_is_stored_as_empty_file() {
        let (server, state) = test_server();
        let appointment = book_appointment(&server).await;
        let payment = record_payment(&server, appointment.id).await;

        // No filename and no bytes: what a form submits when no file was selected
        let response = server
            .post(&format!("/payments/{}/upload_receipt", payment.id))
            .multipart(MultipartForm::new().add_part("receipt", Part::bytes(Vec::new())))
            .await;

        response.assert_status(StatusCode::OK);
        let updated: PaymentResponse = response.json();

        let filename = updated.receipt_filename.expect("receipt filename recorded");
        assert!(filename.ends_with("-receipt"));

        let contents = std::fs::read(state.config.uploads_dir.join(&filename)).expect("receipt file on disk");
        assert!(contents.is_empty());
    }

    #[tokio::test]
    async fn uploaded_filenames_are_sanitized() {
        let (server, _state) = test_server();
        let appointment = book_appointment(&server).await;
        let payment = record_payment(&server, appointment.id).await;

        let part = Part::bytes(b"bytes".to_vec()).file_name("../../etc/passwd");
        let response = server
            .post(&format!("/payments/{}/upload_receipt", payment.id))
            .multipart(MultipartForm::new().add_part("receipt", part))
            .await;

        response.assert_status(StatusCode::OK);
        let updated: PaymentResponse = response.json();
        let filename = updated.receipt_filename.expect("receipt filename recorded");
        assert!(!filename.contains(".."));
        assert!(!filename.contains('/'));
        assert!(filename.ends_with("-passwd"));
    }

    #[test]
    fn sanitize_strips_paths_and_odd_characters() {
        assert_eq!(sanitize_filename("receipt.jpg"), "receipt.jpg");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("dir\\evil .exe"), "evil.exe");
        assert_eq!(sanitize_filename("..."), "...");
    }
}
