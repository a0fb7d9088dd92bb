//! Request extractors.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use telemetry::metrics;
use tracing::warn;

use crate::response::ApiError;

/// Activity key taken from the `{key}` path segment.
///
/// Empty keys are rejected here so the registry never sees one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityKey(pub String);

impl ActivityKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ActivityKey
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let key = match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(key)) => key,
            Err(rejection) => {
                warn!(error = %rejection, "Missing activity key");
                metrics().rejected_requests.inc();
                return Err(ApiError::empty_key());
            }
        };

        if key.is_empty() {
            warn!("Empty activity key");
            metrics().rejected_requests.inc();
            return Err(ApiError::empty_key());
        }

        Ok(ActivityKey(key))
    }
}
