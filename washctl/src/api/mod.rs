//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! The REST surface follows the upstream resource pattern: `POST/GET` on
//! `/api/{resource}` and `GET/PUT/DELETE` on `/api/{resource}/{id}`, plus
//! the receipt upload endpoint at `/payments/{payment_id}/upload_receipt`
//! and receipt serving under `/uploads/receipts/{filename}`.
//!
//! All JSON endpoints are documented with OpenAPI annotations via `utoipa`;
//! the rendered documentation is served at `/docs`.

pub mod handlers;
pub mod models;
