//! OpenAPI documentation for the washctl API.

use utoipa::OpenApi;

use crate::api::{handlers, models};

#[derive(OpenApi)]
#[openapi(
    info(title = "washctl", description = "Carwash payment service"),
    paths(
        handlers::appointments::list_appointments,
        handlers::appointments::create_appointment,
        handlers::appointments::get_appointment,
        handlers::appointments::update_appointment,
        handlers::appointments::delete_appointment,
        handlers::payments::list_payments,
        handlers::payments::create_payment,
        handlers::payments::get_payment,
        handlers::payments::update_payment,
        handlers::payments::delete_payment,
        handlers::payments::upload_receipt,
    ),
    components(schemas(
        models::appointments::AppointmentCreate,
        models::appointments::AppointmentUpdate,
        models::appointments::AppointmentResponse,
        models::payments::PaymentCreate,
        models::payments::PaymentUpdate,
        models::payments::PaymentResponse,
    )),
    tags(
        (name = "appointments", description = "Carwash appointment management"),
        (name = "payments", description = "Payment records and receipt uploads")
    )
)]
pub struct ApiDoc;
