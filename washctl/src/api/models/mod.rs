//! Request/response data structures for the API.

pub mod appointments;
pub mod payments;
