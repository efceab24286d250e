//! HTTP handlers for appointment management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde_json::json;

use crate::AppState;
use crate::api::models::appointments::{AppointmentCreate, AppointmentResponse, AppointmentUpdate};
use crate::errors::{Error, Result};
use crate::store::Appointment;
use crate::types::AppointmentId;

#[utoipa::path(
    get,
    path = "/api/appointments",
    tag = "appointments",
    summary = "List appointments",
    responses(
        (status = 200, description = "List of appointments", body = Vec<AppointmentResponse>),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_appointments(State(state): State<AppState>) -> Result<Json<Vec<AppointmentResponse>>> {
    let appointments = state.store.appointments.list().into_iter().map(AppointmentResponse::from).collect();
    Ok(Json(appointments))
}

#[utoipa::path(
    post,
    path = "/api/appointments",
    tag = "appointments",
    summary = "Book appointment",
    request_body = AppointmentCreate,
    responses(
        (status = 201, description = "Appointment created successfully", body = AppointmentResponse),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_appointment(
    State(state): State<AppState>,
    Json(create): Json<AppointmentCreate>,
) -> Result<(StatusCode, Json<AppointmentResponse>)> {
    let now = Utc::now();
    let appointment = state.store.appointments.insert_with_id(|id| Appointment {
        id,
        user_id: create.user_id,
        vehicle_id: create.vehicle_id,
        service_type: create.service_type.clone(),
        appointment_date: create.appointment_date,
        status: "Pending".to_string(),
        payment_status: "Unpaid".to_string(),
        created_at: now,
        updated_at: now,
    });

    tracing::info!(appointment_id = appointment.id, "Booked appointment");
    Ok((StatusCode::CREATED, Json(AppointmentResponse::from(appointment))))
}

#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    tag = "appointments",
    summary = "Get appointment",
    params(("id" = i64, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "The appointment", body = AppointmentResponse),
        (status = 404, description = "Appointment not found")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_appointment(State(state): State<AppState>, Path(id): Path<AppointmentId>) -> Result<Json<AppointmentResponse>> {
    let appointment = state.store.appointments.get(id).ok_or(Error::NotFound {
        resource: "Appointment",
        id: id.to_string(),
    })?;
    Ok(Json(AppointmentResponse::from(appointment)))
}

#[utoipa::path(
    put,
    path = "/api/appointments/{id}",
    tag = "appointments",
    summary = "Update appointment",
    params(("id" = i64, Path, description = "Appointment id")),
    request_body = AppointmentUpdate,
    responses(
        (status = 200, description = "Updated appointment", body = AppointmentResponse),
        (status = 404, description = "Appointment not found")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_appointment(
    State(state): State<AppState>,
    Path(id): Path<AppointmentId>,
    Json(update): Json<AppointmentUpdate>,
) -> Result<Json<AppointmentResponse>> {
    let appointment = state
        .store
        .appointments
        .update(id, |appointment| {
            if let Some(service_type) = update.service_type {
                appointment.service_type = service_type;
            }
            if let Some(appointment_date) = update.appointment_date {
                appointment.appointment_date = appointment_date;
            }
            if let Some(status) = update.status {
                appointment.status = status;
            }
            if let Some(payment_status) = update.payment_status {
                appointment.payment_status = payment_status;
            }
            appointment.updated_at = Utc::now();
        })
        .ok_or(Error::NotFound {
            resource: "Appointment",
            id: id.to_string(),
        })?;

    Ok(Json(AppointmentResponse::from(appointment)))
}

#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    tag = "appointments",
    summary = "Delete appointment",
    params(("id" = i64, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Appointment deleted"),
        (status = 404, description = "Appointment not found")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_appointment(State(state): State<AppState>, Path(id): Path<AppointmentId>) -> Result<Json<serde_json::Value>> {
    state.store.appointments.remove(id).ok_or(Error::NotFound {
        resource: "Appointment",
        id: id.to_string(),
    })?;

    Ok(Json(json!({ "message": "Appointment deleted successfully" })))
}
