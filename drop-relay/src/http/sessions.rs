//! Session creation and describe handlers.

use crate::error::ShareError;
use crate::http::error::{ApiError, ApiResult};
use crate::server::ShareRelay;
use axum::{extract::Path, Extension, Json};
use drop_types::{CreateSessionRequest, SessionCode, SessionCreated, SessionInfo};
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// `GET /api/session` — create a session with a relay-minted code.
pub async fn create_auto(
    Extension(relay): Extension<Arc<ShareRelay>>,
) -> ApiResult<Json<SessionCreated>> {
    let code = relay.registry().create(None).map_err(|e| {
        relay.metrics().errors_total.fetch_add(1, Ordering::Relaxed);
        ApiError::from(e)
    })?;

    relay
        .metrics()
        .sessions_created
        .fetch_add(1, Ordering::Relaxed);

    Ok(Json(SessionCreated { session_id: code }))
}

/// `POST /api/session` — create a session with a caller-chosen code.
pub async fn create_with_code(
    Extension(relay): Extension<Arc<ShareRelay>>,
    Json(request): Json<CreateSessionRequest>,
) -> ApiResult<Json<SessionCreated>> {
    let code = relay
        .registry()
        .create(Some(request.session_id))
        .map_err(|e| {
            relay.metrics().errors_total.fetch_add(1, Ordering::Relaxed);
            ApiError::from(e)
        })?;

    relay
        .metrics()
        .sessions_created
        .fetch_add(1, Ordering::Relaxed);

    Ok(Json(SessionCreated { session_id: code }))
}

/// `GET /api/session/:code` — describe a session and list its files.
///
/// This is the polling endpoint: every participating device hits it on a
/// fixed cadence, so it is covered by the global rate limit.
pub async fn describe(
    Extension(relay): Extension<Arc<ShareRelay>>,
    Path(code): Path<String>,
) -> ApiResult<Json<SessionInfo>> {
    if let Err(e) = relay.rate_limits().check_global() {
        relay
            .metrics()
            .rate_limit_hits
            .fetch_add(1, Ordering::Relaxed);
        return Err(ShareError::RateLimited {
            reason: e.to_string(),
        }
        .into());
    }

    let code = SessionCode::new(&code);
    let info = relay.store().list(&code).map_err(|e| {
        relay.metrics().errors_total.fetch_add(1, Ordering::Relaxed);
        ApiError::from(e)
    })?;

    relay
        .metrics()
        .describes_total
        .fetch_add(1, Ordering::Relaxed);

    tracing::debug!(
        "Described session {}: {} files",
        info.session_id,
        info.file_count
    );
    Ok(Json(info))
}
