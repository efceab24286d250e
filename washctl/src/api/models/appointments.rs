use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::Appointment;
use crate::types::AppointmentId;

/// Request body for booking an appointment.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AppointmentCreate {
    pub user_id: i64,
    pub vehicle_id: i64,
    pub service_type: String,
    pub appointment_date: DateTime<Utc>,
}

/// Partial update for an appointment.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AppointmentUpdate {
    pub service_type: Option<String>,
    pub appointment_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub payment_status: Option<String>,
}

/// Appointment as returned by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AppointmentResponse {
    pub id: AppointmentId,
    pub user_id: i64,
    pub vehicle_id: i64,
    pub service_type: String,
    pub appointment_date: DateTime<Utc>,
    pub status: String,
    pub payment_status: String,
}

impl From<Appointment> for AppointmentResponse {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id,
            user_id: appointment.user_id,
            vehicle_id: appointment.vehicle_id,
            service_type: appointment.service_type,
            appointment_date: appointment.appointment_date,
            status: appointment.status,
            payment_status: appointment.payment_status,
        }
    }
}
