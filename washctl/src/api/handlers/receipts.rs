//! Serving of stored receipt files.

use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::Response,
};

use crate::AppState;
use crate::errors::{Error, Result};

/// Serve a stored receipt with a guessed content type.
#[tracing::instrument(skip(state))]
pub async fn get_receipt(State(state): State<AppState>, Path(filename): Path<String>) -> Result<Response> {
    // Stored names are single path components; anything else is a traversal attempt
    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(Error::BadRequest {
            message: "Invalid receipt filename".to_string(),
        });
    }

    let path = state.config.uploads_dir.join(&filename);
    let data = match tokio::fs::read(&path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::NotFound {
                resource: "Receipt",
                id: filename,
            });
        }
        Err(e) => {
            return Err(Error::Other(anyhow::Error::new(e).context("reading receipt file")));
        }
    };

    let mime = mime_guess::from_path(&filename).first_or_octet_stream();

    Ok(Response::builder()
        .header(header::CONTENT_TYPE, mime.as_ref())
        .body(Body::from(data))
        .unwrap())
}
