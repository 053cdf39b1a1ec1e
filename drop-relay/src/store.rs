//! Per-session file storage.
//!
//! The store owns admission (size limit), payload decoding, id assignment,
//! and retrieval. All operations go through the registry's per-session locks,
//! so concurrent uploads to one session serialize instead of losing appends.

use crate::config::StoreConfig;
use crate::error::{ShareError, ShareResult};
use crate::registry::{current_millis, SessionRegistry, SharedSession};
use drop_types::{ClientId, FileId, FileMeta, Payload, SessionCode, SessionInfo, UploadRequest};
use std::sync::Arc;

/// One uploaded file: metadata plus the decoded payload bytes.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Unique-within-session id, assigned at upload time.
    pub id: FileId,
    /// File name as declared by the uploader.
    pub name: String,
    /// Stored mime type: the data URL's embedded tag when present, the
    /// declared `fileType` otherwise.
    pub mime_type: String,
    /// Declared size in bytes.
    pub size: u64,
    /// Decoded content bytes, owned exclusively by this record.
    pub payload: Vec<u8>,
    /// Opaque uploader identifier.
    pub uploaded_by: ClientId,
    /// Unix milliseconds at creation. Immutable.
    pub uploaded_at: u64,
}

impl FileRecord {
    /// Metadata view of this record. Never exposes the payload.
    pub fn meta(&self) -> FileMeta {
        FileMeta {
            id: self.id,
            name: self.name.clone(),
            mime_type: self.mime_type.clone(),
            size: self.size,
            uploaded_by: self.uploaded_by.clone(),
            uploaded_at: self.uploaded_at,
        }
    }

    #[cfg(test)]
    pub(crate) fn test_record(name: &str) -> Self {
        Self {
            id: FileId::new(),
            name: name.to_string(),
            mime_type: "text/plain".to_string(),
            size: 5,
            payload: b"hello".to_vec(),
            uploaded_by: ClientId::new("test-client"),
            uploaded_at: current_millis(),
        }
    }
}

/// A fetched file, ready to be streamed back to a client.
#[derive(Debug, Clone)]
pub struct FetchedFile {
    /// Stored file name, used for the attachment filename.
    pub name: String,
    /// Stored mime type, served as Content-Type.
    pub mime_type: String,
    /// Decoded content bytes.
    pub bytes: Vec<u8>,
}

/// File operations scoped to sessions in a [`SessionRegistry`].
pub struct FileStore {
    registry: Arc<SessionRegistry>,
    max_file_size: u64,
    implicit_sessions: bool,
}

impl FileStore {
    /// Create a store over the given registry.
    pub fn new(registry: Arc<SessionRegistry>, config: &StoreConfig) -> Self {
        Self {
            registry,
            max_file_size: config.max_file_size,
            implicit_sessions: config.implicit_sessions,
        }
    }

    /// The configured admission limit in bytes.
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Validate, decode, and append an uploaded file to a session.
    ///
    /// Returns metadata only, so upload responses stay small. The session is
    /// created implicitly for unknown codes when the policy flag allows it.
    ///
    /// # Errors
    ///
    /// [`ShareError::TooLarge`] when the declared or decoded size exceeds the
    /// limit (nothing is mutated), [`ShareError::Decode`] for a corrupt
    /// payload, [`ShareError::SessionNotFound`] for unknown codes with
    /// implicit creation disabled.
    pub fn append(&self, code: &SessionCode, request: UploadRequest) -> ShareResult<FileMeta> {
        if request.file_size > self.max_file_size {
            return Err(ShareError::TooLarge {
                size: request.file_size,
                limit: self.max_file_size,
            });
        }

        let payload = Payload::parse(&request.file_data)?;

        // The declared size is the admission check; the decoded length is
        // re-checked so an understated declaration cannot smuggle an
        // oversized payload past it.
        if payload.len() as u64 > self.max_file_size {
            return Err(ShareError::TooLarge {
                size: payload.len() as u64,
                limit: self.max_file_size,
            });
        }

        let session = self.lookup(code, self.implicit_sessions)?;

        let mime_type = payload
            .embedded_mime_type()
            .unwrap_or(&request.file_type)
            .to_string();

        let now = current_millis();
        let record = FileRecord {
            id: FileId::new(),
            name: request.file_name,
            mime_type,
            size: request.file_size,
            payload: payload.into_bytes(),
            uploaded_by: request.client_id,
            uploaded_at: now,
        };
        let meta = record.meta();

        {
            let mut guard = session.write();
            guard.files.push(record);
            guard.touch(now);
        }

        tracing::info!("File uploaded to session {}: {}", code, meta.name);
        Ok(meta)
    }

    /// List a session's files, metadata only, in upload order.
    ///
    /// # Errors
    ///
    /// [`ShareError::SessionNotFound`] if the code is unknown.
    pub fn list(&self, code: &SessionCode) -> ShareResult<SessionInfo> {
        let session = self.lookup(code, false)?;

        let mut guard = session.write();
        guard.touch(current_millis());
        let files: Vec<FileMeta> = guard.files.iter().map(FileRecord::meta).collect();

        Ok(SessionInfo {
            session_id: code.clone(),
            file_count: files.len(),
            files,
        })
    }

    /// Fetch one file's full content for download.
    ///
    /// # Errors
    ///
    /// [`ShareError::SessionNotFound`] or [`ShareError::FileNotFound`].
    pub fn fetch(&self, code: &SessionCode, file_id: FileId) -> ShareResult<FetchedFile> {
        let session = self.lookup(code, false)?;

        let mut guard = session.write();
        guard.touch(current_millis());
        let record = guard
            .files
            .iter()
            .find(|f| f.id == file_id)
            .ok_or(ShareError::FileNotFound { file_id })?;

        Ok(FetchedFile {
            name: record.name.clone(),
            mime_type: record.mime_type.clone(),
            bytes: record.payload.clone(),
        })
    }

    fn lookup(&self, code: &SessionCode, create_missing: bool) -> ShareResult<SharedSession> {
        if create_missing {
            Ok(self.registry.get_or_create(code))
        } else {
            self.registry.get(code)
        }
    }
}
