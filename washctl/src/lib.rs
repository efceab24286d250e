//! # washctl: carwash payment service
//!
//! `washctl` is a small control service for a carwash booking system. It keeps
//! appointment and payment records, accepts payment receipt images as
//! multipart uploads, and serves the stored receipts back. The same binary
//! doubles as the upload client: the `upload-receipt` subcommand packages a
//! file into a multipart form under the `receipt` field, POSTs it to
//! `/payments/{payment_id}/upload_receipt`, and logs the JSON response (or
//! the network error) before exiting.
//!
//! ## Surfaces
//!
//! - **REST API**: `POST/GET /api/{resource}` and `GET/PUT/DELETE
//!   /api/{resource}/{id}` for appointments and payments, plus the receipt
//!   upload and serving routes. OpenAPI documentation is rendered at `/docs`.
//! - **CLI**: `washctl serve` runs the server; `washctl upload-receipt`
//!   performs a single upload. The upload makes exactly one attempt and
//!   treats any JSON body that comes back as its result, whatever the HTTP
//!   status - see [`client`] for the details of that contract.
//!
//! Records live in memory for the lifetime of the process; uploaded receipt
//! files are the only thing written to disk.

pub mod api;
pub mod client;
pub mod config;
pub mod errors;
mod openapi;
pub mod store;
pub mod telemetry;
pub mod types;

#[cfg(test)]
pub mod test_utils;
#[cfg(test)]
mod test;

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::api::handlers::{appointments, payments, receipts};
use crate::config::Config;
use crate::store::Store;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<Store>,
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/appointments",
            get(appointments::list_appointments).post(appointments::create_appointment),
        )
        .route(
            "/api/appointments/{id}",
            get(appointments::get_appointment)
                .put(appointments::update_appointment)
                .delete(appointments::delete_appointment),
        )
        .route("/api/payments", get(payments::list_payments).post(payments::create_payment))
        .route(
            "/api/payments/{id}",
            get(payments::get_payment).put(payments::update_payment).delete(payments::delete_payment),
        )
        .route("/payments/{payment_id}/upload_receipt", post(payments::upload_receipt))
        .route("/uploads/receipts/{filename}", get(receipts::get_receipt))
        .with_state(state)
        .merge(Scalar::with_url("/docs", openapi::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// The HTTP server, bound and ready to serve.
pub struct Application {
    router: Router,
    listener: tokio::net::TcpListener,
}

impl Application {
    /// Bind the configured address and assemble the router.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let addr = format!("{}:{}", config.host, config.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("binding {addr}"))?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        let state = AppState {
            config: Arc::new(config),
            store: Arc::new(Store::new()),
        };

        Ok(Self {
            router: router(state),
            listener,
        })
    }

    /// Serve until the shutdown future resolves.
    pub async fn serve(self, shutdown: impl Future<Output = ()> + Send + 'static) -> anyhow::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .context("serving HTTP")?;
        Ok(())
    }
}
