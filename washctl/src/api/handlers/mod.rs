//! Axum route handlers.

pub mod appointments;
pub mod payments;
pub mod receipts;
