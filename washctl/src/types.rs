//! Shared identifier aliases.
//!
//! Record ids are plain integers handed out by the store, matching the
//! autoincrement keys of the upstream schema.

/// Identifier for an appointment record.
pub type AppointmentId = i64;

/// Identifier for a payment record.
pub type PaymentId = i64;
