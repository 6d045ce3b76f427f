//! Custom Axum extractors

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;

use super::error::ApiError;
use super::server::AppState;
use crate::models::{BookDraft, BookPayload};

/// Extract and parse a book id from path
pub struct BookId(pub i64);

impl<S> FromRequestParts<S> for BookId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::InvalidId)?;

        raw.parse::<i64>().map(Self).map_err(|_| ApiError::InvalidId)
    }
}

/// Decode the body as JSON, then validate it against the configured
/// quantity policy. Decoding failures and rule failures are reported
/// separately.
///
/// The `Content-Type` header is not consulted; any body that parses as a
/// book payload is accepted.
pub struct ValidBook(pub BookDraft);

impl FromRequest<Arc<AppState>> for ValidBook {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(%rejection, "Unreadable book payload");
            ApiError::MalformedBody
        })?;

        let payload: BookPayload = serde_json::from_slice(&body).map_err(|e| {
            tracing::debug!(error = %e, "Rejected book payload");
            ApiError::MalformedBody
        })?;

        let draft = payload.validate(state.quantity_policy)?;
        Ok(Self(draft))
    }
}
