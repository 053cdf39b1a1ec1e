//! # drop-relay
//!
//! Code-addressed file relay server for codedrop.
//!
//! This crate implements a relay server that:
//! - Mints short session codes and tracks sessions in memory
//! - Accepts small file uploads from any participant who knows the code
//! - Serves files back to every other participant over HTTP/JSON polling
//! - Sweeps sessions that have been inactive for longer than the TTL
//!
//! ## Architecture
//!
//! ```text
//! Device A ──┐                    ┌── Device B
//!            │    HTTP/JSON       │
//!            ├───────────────────►│
//!            │   (poll + upload)  │
//!        ┌───┴────────────────────┴───┐
//!        │        drop-relay          │
//!        │  ┌─────────────────────┐   │
//!        │  │ in-memory sessions  │   │
//!        │  │  code → files[]     │   │
//!        │  └─────────────────────┘   │
//!        └────────────────────────────┘
//! ```
//!
//! ## API
//!
//! The relay exposes five operations:
//! - `GET /api/session` — create a session with a minted code
//! - `POST /api/session` — create a session with a caller-chosen code
//! - `GET /api/session/:code` — describe a session and list its files
//! - `POST /api/session/:code/upload` — upload a file
//! - `GET /api/session/:code/file/:file_id` — download a file

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cleanup;
pub mod codegen;
pub mod config;
pub mod error;
pub mod http;
pub mod limits;
pub mod registry;
pub mod server;
pub mod store;
