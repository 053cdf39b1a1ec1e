//! Identity types for codedrop.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A session code: the short shared string that addresses a session.
///
/// Codes are stored uppercase. Whether a code satisfies a format rule is the
/// job of [`CodePolicy`](crate::CodePolicy) — the registry accepts arbitrary
/// codes so that implicitly created sessions work with any spelling a sender
/// typed.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionCode(String);

impl SessionCode {
    /// Create a session code from client input, trimming and uppercasing.
    pub fn new(input: &str) -> Self {
        Self(input.trim().to_uppercase())
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for SessionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionCode({})", self.0)
    }
}

impl From<&str> for SessionCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A unique identifier for an uploaded file.
///
/// Unique within its session, not globally. UUID v4 format.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(uuid::Uuid);

impl FileId {
    /// Create a new random FileId.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Parse a FileId from its string form.
    pub fn parse(input: &str) -> Option<Self> {
        uuid::Uuid::parse_str(input).ok().map(Self)
    }
}

impl Default for FileId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({})", self.0)
    }
}

/// An opaque, client-supplied identifier for an uploading device.
///
/// Not authenticated — the relay records it verbatim so participants can
/// tell their own uploads apart from everyone else's.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// Wrap a client-supplied identifier.
    pub fn new(input: impl Into<String>) -> Self {
        Self(input.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClientId({})", self.0)
    }
}
