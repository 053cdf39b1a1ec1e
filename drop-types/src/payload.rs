//! Uploaded file payloads.
//!
//! Browsers hand files to the relay as self-describing data URLs
//! (`data:image/png;base64,...`). Other clients may send plain text. Either
//! way the payload is decoded exactly once, at ingestion, into a canonical
//! byte buffer — fetch never re-parses.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::TypeError;

/// File content as received from an uploader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    /// A base64 data URL carrying its own mime type tag.
    Encoded {
        /// The mime type embedded in the data URL.
        mime_type: String,
        /// Decoded content bytes.
        bytes: Vec<u8>,
    },
    /// Anything that was not a data URL, stored as received.
    Raw {
        /// Content bytes (the UTF-8 bytes of the uploaded string).
        bytes: Vec<u8>,
    },
}

impl Payload {
    /// Parse client-supplied `fileData` into a decoded payload.
    ///
    /// Strings of the form `data:<mime>;base64,<data>` are decoded and carry
    /// their embedded mime type; everything else is stored raw.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::PayloadDecode`] when a string claims base64
    /// encoding but does not decode.
    pub fn parse(file_data: &str) -> Result<Self, TypeError> {
        if let Some(rest) = file_data.strip_prefix("data:") {
            if let Some((mime_type, encoded)) = rest.split_once(";base64,") {
                let bytes = STANDARD
                    .decode(encoded)
                    .map_err(TypeError::PayloadDecode)?;
                return Ok(Self::Encoded {
                    mime_type: mime_type.to_string(),
                    bytes,
                });
            }
        }
        Ok(Self::Raw {
            bytes: file_data.as_bytes().to_vec(),
        })
    }

    /// The decoded content bytes.
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Encoded { bytes, .. } | Self::Raw { bytes } => bytes,
        }
    }

    /// Decoded content length in bytes.
    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    /// Whether the decoded content is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes().is_empty()
    }

    /// The mime type embedded in the payload, if it carried one.
    pub fn embedded_mime_type(&self) -> Option<&str> {
        match self {
            Self::Encoded { mime_type, .. } => Some(mime_type),
            Self::Raw { .. } => None,
        }
    }

    /// Consume the payload, returning the decoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Encoded { bytes, .. } | Self::Raw { bytes } => bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_decodes_with_embedded_mime() {
        // "hello" base64-encoded is aGVsbG8=
        let payload = Payload::parse("data:text/plain;base64,aGVsbG8=").unwrap();
        assert_eq!(payload.bytes(), b"hello");
        assert_eq!(payload.embedded_mime_type(), Some("text/plain"));
    }

    #[test]
    fn plain_string_is_stored_raw() {
        let payload = Payload::parse("hello").unwrap();
        assert_eq!(payload.bytes(), b"hello");
        assert_eq!(payload.embedded_mime_type(), None);
    }

    #[test]
    fn non_base64_data_url_falls_back_to_raw() {
        // URL-encoded data URLs are not base64-tagged; stored verbatim.
        let input = "data:text/plain,hello";
        let payload = Payload::parse(input).unwrap();
        assert_eq!(payload.bytes(), input.as_bytes());
    }

    #[test]
    fn corrupt_base64_is_rejected() {
        let result = Payload::parse("data:image/png;base64,!!!not-base64!!!");
        assert!(matches!(result, Err(TypeError::PayloadDecode(_))));
    }

    #[test]
    fn mime_types_with_parameters_survive() {
        let payload = Payload::parse("data:text/plain charset=utf-8;base64,aGVsbG8=").unwrap();
        assert_eq!(
            payload.embedded_mime_type(),
            Some("text/plain charset=utf-8")
        );
    }

    #[test]
    fn binary_roundtrip_through_base64() {
        let original: Vec<u8> = (0u8..=255).collect();
        let encoded = format!(
            "data:application/octet-stream;base64,{}",
            STANDARD.encode(&original)
        );
        let payload = Payload::parse(&encoded).unwrap();
        assert_eq!(payload.bytes(), original.as_slice());
    }

    #[test]
    fn empty_payload_is_empty() {
        let payload = Payload::parse("").unwrap();
        assert!(payload.is_empty());
        assert_eq!(payload.len(), 0);
    }
}
