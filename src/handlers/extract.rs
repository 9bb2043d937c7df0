//! Request extractors
//!
//! Rejections from these extractors use the API error body instead of
//! axum's plain-text defaults.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use crate::models::event::EventQuery;
use crate::utils::errors::EventHubError;
use crate::validation::parse_event_id;

pub const INVALID_BODY_MESSAGE: &str = "request body must be a JSON object";
pub const INVALID_QUERY_MESSAGE: &str = "query string could not be decoded";

/// JSON object body
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = EventHubError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(rejection = %rejection, "Rejected request body");
                EventHubError::invalid(INVALID_BODY_MESSAGE)
            })?;

        if !value.is_object() {
            return Err(EventHubError::invalid(INVALID_BODY_MESSAGE));
        }

        serde_json::from_value(value)
            .map(JsonBody)
            .map_err(|_| EventHubError::invalid(INVALID_BODY_MESSAGE))
    }
}

/// Integer `:id` path segment
#[derive(Debug, Clone, Copy)]
pub struct EventId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for EventId
where
    S: Send + Sync,
{
    type Rejection = EventHubError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| EventHubError::InvalidEventId)?;

        parse_event_id(&raw).map(EventId)
    }
}

/// List filters from the query string
///
/// Unknown keys are ignored and a repeated key keeps its first value.
#[derive(Debug, Clone, Default)]
pub struct EventQueryParams(pub EventQuery);

#[async_trait]
impl<S> FromRequestParts<S> for EventQueryParams
where
    S: Send + Sync,
{
    type Rejection = EventHubError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(rejection = %rejection, "Rejected query string");
                EventHubError::invalid(INVALID_QUERY_MESSAGE)
            })?;

        Ok(EventQueryParams(EventQuery::from_pairs(pairs)))
    }
}
