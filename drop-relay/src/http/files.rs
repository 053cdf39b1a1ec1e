//! File upload and download handlers.

use crate::error::ShareError;
use crate::http::error::{ApiError, ApiResult};
use crate::server::ShareRelay;
use axum::{
    body::Body,
    extract::Path,
    http::{header, Response, StatusCode},
    Extension, Json,
};
use drop_types::{FileId, SessionCode, UploadRequest, UploadResponse};
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// `POST /api/session/:code/upload` — upload a file into a session.
pub async fn upload(
    Extension(relay): Extension<Arc<ShareRelay>>,
    Path(code): Path<String>,
    Json(request): Json<UploadRequest>,
) -> ApiResult<Json<UploadResponse>> {
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
    if let Err(e) = relay.rate_limits().check_upload(request.client_id.as_str()) {
        tracing::warn!("Upload rate limited for client {}: {}", request.client_id, e);
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
    let meta = relay.store().append(&code, request).map_err(|e| {
        relay.metrics().errors_total.fetch_add(1, Ordering::Relaxed);
        ApiError::from(e)
    })?;

    relay
        .metrics()
        .uploads_total
        .fetch_add(1, Ordering::Relaxed);
    relay
        .metrics()
        .bytes_received
        .fetch_add(meta.size, Ordering::Relaxed);

    Ok(Json(UploadResponse {
        success: true,
        file: meta,
    }))
}

/// `GET /api/session/:code/file/:file_id` — download a file.
///
/// Serves the decoded bytes with the stored mime type and
/// `Content-Disposition: attachment` keyed to the stored file name.
pub async fn fetch(
    Extension(relay): Extension<Arc<ShareRelay>>,
    Path((code, file_id)): Path<(String, String)>,
) -> ApiResult<Response<Body>> {
    let code = SessionCode::new(&code);

    // An unparseable id can't match any stored file.
    let file_id = FileId::parse(&file_id).ok_or_else(|| {
        relay.metrics().errors_total.fetch_add(1, Ordering::Relaxed);
        ApiError {
            status: StatusCode::NOT_FOUND,
            message: format!("file not found: {file_id}"),
        }
    })?;

    let fetched = relay.store().fetch(&code, file_id).map_err(|e| {
        relay.metrics().errors_total.fetch_add(1, Ordering::Relaxed);
        ApiError::from(e)
    })?;

    relay
        .metrics()
        .fetches_total
        .fetch_add(1, Ordering::Relaxed);
    relay
        .metrics()
        .bytes_sent
        .fetch_add(fetched.bytes.len() as u64, Ordering::Relaxed);

    let content_type = if fetched.mime_type.is_empty() {
        "application/octet-stream".to_string()
    } else {
        fetched.mime_type
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", sanitize_filename(&fetched.name)),
        )
        .header(header::CONTENT_LENGTH, fetched.bytes.len())
        .body(Body::from(fetched.bytes))
        .map_err(|e| ApiError::internal(format!("failed to build response: {e}")))
}

/// Strip characters that would break the Content-Disposition header value.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_control() && *c != '"' && *c != '\\')
        .collect()
}
