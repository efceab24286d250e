//! Receipt upload client.
//!
//! This is the service's client-side counterpart of the receipt upload
//! endpoint: one multipart POST of the selected file under the `receipt`
//! field, with the parsed JSON response logged on settlement. Two
//! behaviours are deliberate and covered by tests:
//!
//! - the response body is parsed as JSON **regardless of HTTP status**, so
//!   a non-2xx JSON body still counts as the success value;
//! - there is exactly one attempt, no retry and no timeout handling beyond
//!   what the transport gives us.

use std::path::Path;

use anyhow::Context;
use reqwest::multipart::{Form, Part};
use url::Url;

use crate::types::PaymentId;

/// Path template for the receipt upload endpoint.
pub const RECEIPT_UPLOAD_PATH: &str = "/payments/{payment_id}/upload_receipt";

/// Render the upload path for a concrete payment.
pub fn receipt_upload_path(payment_id: PaymentId) -> String {
    RECEIPT_UPLOAD_PATH.replace("{payment_id}", &payment_id.to_string())
}

/// Client for posting payment receipts to a washctl server.
pub struct ReceiptUploader {
    client: reqwest::Client,
    base_url: Url,
}

impl ReceiptUploader {
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Upload a receipt for `payment_id` and return the parsed JSON body.
    ///
    /// When `file` is `None` the `receipt` field is still appended, empty
    /// and without a filename, matching a form submission where no file
    /// was selected.
    pub async fn upload(&self, payment_id: PaymentId, file: Option<&Path>) -> anyhow::Result<serde_json::Value> {
        let part = match file {
            Some(path) => {
                let bytes = tokio::fs::read(path)
                    .await
                    .with_context(|| format!("reading receipt file {}", path.display()))?;
                let filename = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "receipt".to_string());
                Part::bytes(bytes).file_name(filename)
            }
            None => Part::bytes(Vec::new()),
        };
        let form = Form::new().part("receipt", part);

        let url = self
            .base_url
            .join(&receipt_upload_path(payment_id))
            .context("building receipt upload url")?;

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .context("sending receipt upload request")?;

        // No status check: whatever JSON came back is the result.
        let body = response
            .json::<serde_json::Value>()
            .await
            .context("parsing upload response as JSON")?;

        Ok(body)
    }

    /// Fire the upload and log the outcome, swallowing failure.
    ///
    /// Success and error both end at the log; nothing is propagated to the
    /// caller and nothing is retried.
    pub async fn upload_and_log(&self, payment_id: PaymentId, file: Option<&Path>) {
        match self.upload(payment_id, file).await {
            Ok(body) => {
                tracing::info!(payment_id, response = %body, "Receipt upload succeeded");
            }
            Err(error) => {
                tracing::error!(payment_id, error = format!("{error:#}"), "Receipt upload failed");
            }
        }
    }
}
