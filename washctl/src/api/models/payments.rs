use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::Payment;
use crate::types::{AppointmentId, PaymentId};

/// Request body for recording a payment.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentCreate {
    pub appointment_id: AppointmentId,
    pub amount: f64,
    pub payment_method: String,
    pub transaction_date: DateTime<Utc>,
}

/// Partial update for a payment.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentUpdate {
    pub amount: Option<f64>,
    pub payment_method: Option<String>,
    pub payment_status: Option<String>,
    pub transaction_date: Option<DateTime<Utc>>,
}

/// Payment as returned by the API.
///
/// `receipt_url` is derived from `receipt_filename` and points at the
/// receipt serving route; both are null until a receipt has been uploaded.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse {
    pub id: PaymentId,
    pub appointment_id: AppointmentId,
    pub amount: f64,
    pub payment_method: String,
    pub payment_status: String,
    pub transaction_date: DateTime<Utc>,
    pub receipt_filename: Option<String>,
    pub receipt_url: Option<String>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        let receipt_url = payment
            .receipt_filename
            .as_ref()
            .map(|name| format!("/uploads/receipts/{name}"));

        Self {
            id: payment.id,
            appointment_id: payment.appointment_id,
            amount: payment.amount,
            payment_method: payment.payment_method,
            payment_status: payment.payment_status,
            transaction_date: payment.transaction_date,
            receipt_filename: payment.receipt_filename,
            receipt_url,
        }
    }
}
