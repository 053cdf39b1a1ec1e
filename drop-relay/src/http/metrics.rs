//! Prometheus metrics endpoint.

use crate::server::ShareRelay;
use axum::{http::header::CONTENT_TYPE, response::IntoResponse, Extension};
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Prometheus metrics handler.
///
/// Returns metrics in Prometheus text format.
/// Includes both gauges (current state) and counters (monotonic since startup).
pub async fn metrics_handler(Extension(relay): Extension<Arc<ShareRelay>>) -> impl IntoResponse {
    let m = relay.metrics();

    // Gauges — current state
    let sessions = relay.registry().session_count();
    let files = relay.registry().file_count();
    let stored_bytes = relay.registry().stored_bytes();

    // Counters — monotonic since startup
    let sessions_created = m.sessions_created.load(Ordering::Relaxed);
    let uploads = m.uploads_total.load(Ordering::Relaxed);
    let fetches = m.fetches_total.load(Ordering::Relaxed);
    let describes = m.describes_total.load(Ordering::Relaxed);
    let bytes_rx = m.bytes_received.load(Ordering::Relaxed);
    let bytes_tx = m.bytes_sent.load(Ordering::Relaxed);
    let rate_limits = m.rate_limit_hits.load(Ordering::Relaxed);
    let errors = m.errors_total.load(Ordering::Relaxed);

    let body = format!(
        r#"# HELP drop_relay_sessions_active Number of live sessions
# TYPE drop_relay_sessions_active gauge
drop_relay_sessions_active {sessions}

# HELP drop_relay_files_stored Number of files currently stored
# TYPE drop_relay_files_stored gauge
drop_relay_files_stored {files}

# HELP drop_relay_storage_bytes Total payload bytes currently stored
# TYPE drop_relay_storage_bytes gauge
drop_relay_storage_bytes {stored_bytes}

# HELP drop_relay_info Server information
# TYPE drop_relay_info gauge
drop_relay_info{{version="{version}"}} 1

# HELP drop_relay_sessions_created_total Total sessions created
# TYPE drop_relay_sessions_created_total counter
drop_relay_sessions_created_total {sessions_created}

# HELP drop_relay_uploads_total Total file uploads accepted
# TYPE drop_relay_uploads_total counter
drop_relay_uploads_total {uploads}

# HELP drop_relay_fetches_total Total file downloads served
# TYPE drop_relay_fetches_total counter
drop_relay_fetches_total {fetches}

# HELP drop_relay_describes_total Total session describe requests served
# TYPE drop_relay_describes_total counter
drop_relay_describes_total {describes}

# HELP drop_relay_bytes_received_total Total payload bytes accepted
# TYPE drop_relay_bytes_received_total counter
drop_relay_bytes_received_total {bytes_rx}

# HELP drop_relay_bytes_sent_total Total payload bytes served
# TYPE drop_relay_bytes_sent_total counter
drop_relay_bytes_sent_total {bytes_tx}

# HELP drop_relay_rate_limit_hits_total Total rate limit rejections
# TYPE drop_relay_rate_limit_hits_total counter
drop_relay_rate_limit_hits_total {rate_limits}

# HELP drop_relay_errors_total Total failed requests
# TYPE drop_relay_errors_total counter
drop_relay_errors_total {errors}
"#,
        version = env!("CARGO_PKG_VERSION"),
    );

    (
        [(CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
}

#[cfg(test)]
mod tests {
    #[test]
    fn prometheus_format_is_valid() {
        // Verify the format strings are valid
        let sample = format!(
            "# TYPE drop_relay_sessions_active gauge\ndrop_relay_sessions_active {}",
            42
        );
        assert!(sample.contains("gauge"));
        assert!(sample.contains("42"));
    }
}
