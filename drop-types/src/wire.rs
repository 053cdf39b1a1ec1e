//! HTTP/JSON wire types for the relay API.
//!
//! Field names are camelCase on the wire (`fileName`, `uploadedAt`) to match
//! what browser and CLI clients exchange with the relay.

use serde::{Deserialize, Serialize};

use crate::{ClientId, FileId, SessionCode};

/// Request body for creating a session with a caller-chosen code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    /// The code the caller wants to claim.
    pub session_id: SessionCode,
}

/// Response body for a created session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreated {
    /// The session's code (minted or claimed).
    pub session_id: SessionCode,
}

/// Metadata for one uploaded file. Never carries the payload, so session
/// listings stay small no matter how large the files are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMeta {
    /// Unique-within-session file id.
    pub id: FileId,
    /// File name as declared by the uploader.
    pub name: String,
    /// Mime type as declared by the uploader (untrusted).
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Declared size in bytes.
    pub size: u64,
    /// Opaque identifier of the uploading client.
    pub uploaded_by: ClientId,
    /// Upload time, unix milliseconds.
    pub uploaded_at: u64,
}

/// Response body describing a session and its files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    /// The session's code.
    pub session_id: SessionCode,
    /// Number of files in the session.
    pub file_count: usize,
    /// File metadata in upload order.
    pub files: Vec<FileMeta>,
}

/// Request body for uploading a file into a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// File name.
    pub file_name: String,
    /// Declared mime type.
    pub file_type: String,
    /// Declared size in bytes. Checked against the relay's limit before the
    /// payload is decoded.
    pub file_size: u64,
    /// File content: a base64 data URL or a raw string.
    pub file_data: String,
    /// Opaque identifier of the uploading client.
    pub client_id: ClientId,
}

/// Response body for a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Metadata of the stored file.
    pub file: FileMeta,
}

/// Error body returned by every failing API call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Short human-readable message.
    pub error: String,
}
