//! HTTP request handlers

use std::sync::Arc;
use axum::{
    extract::{RawQuery, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use crate::cache::StatusCache;
use super::badge::{self, BadgeStore};

pub const CONTEXT_NOT_KNOWN: &str = "Context not known";

/// Shared state for the HTTP server
#[derive(Clone)]
pub struct AppState {
    cache: Arc<StatusCache>,
    badges: BadgeStore,
}

impl AppState {
    pub fn new(cache: Arc<StatusCache>, badges: BadgeStore) -> Self {
        Self { cache, badges }
    }
}

/// First non-empty `context` value of a query string. Repeated keys are
/// not an error; later values are ignored.
fn context_param(query: Option<&str>) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(key, value)| key == "context" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

/// Badge endpoint handler: `GET /?context=<name>`
pub async fn badge(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Response {
    let context = match context_param(query.as_deref()) {
        Some(context) => context,
        None => {
            tracing::warn!("Url param 'context' is missing");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    // never waits on the refresher beyond a snapshot clone
    let record = match state.cache.get(&context).await {
        Some(record) => record,
        None => return (StatusCode::NOT_FOUND, CONTEXT_NOT_KNOWN).into_response(),
    };

    match state.badges.load(&record.state).await {
        Ok(image) => (
            [
                (header::CONTENT_TYPE, badge::CONTENT_TYPE),
                (header::CACHE_CONTROL, "no-cache"),
            ],
            image,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(
                "Failed to read badge {}: {}",
                state.badges.path_for(&record.state).display(),
                e
            );
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
