//! # drop-types
//!
//! Wire format types for the codedrop file relay.
//!
//! This crate provides the foundational types shared by the relay server and
//! its clients:
//! - [`SessionCode`], [`FileId`], [`ClientId`] - Identity types
//! - [`CodePolicy`] - Session code format rules
//! - [`Payload`] - Uploaded file content, decoded once at ingestion
//! - [`FileMeta`], [`SessionInfo`], [`UploadRequest`] - HTTP/JSON wire types
//! - [`TypeError`] - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod ids;
mod payload;
mod policy;
mod wire;

pub use error::TypeError;
pub use ids::{ClientId, FileId, SessionCode};
pub use payload::Payload;
pub use policy::CodePolicy;
pub use wire::{
    CreateSessionRequest, ErrorBody, FileMeta, SessionCreated, SessionInfo, UploadRequest,
    UploadResponse,
};
