//! Session code format policies.
//!
//! A policy decides what a session code looks like. Two formats exist:
//!
//! - [`CodePolicy::Alphanumeric`]: uppercase letters and digits, the format
//!   the relay mints for auto-created sessions.
//! - [`CodePolicy::RepeatedDigit`]: one digit repeated (e.g. `4444`), easy to
//!   say out loud across a room. The code space is tiny (10 codes at length
//!   4), so callers generating under this policy must expect collisions.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Characters used for alphanumeric codes: uppercase base36.
pub const CODE_CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A session code format rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CodePolicy {
    /// Uppercase letters and digits of a fixed length.
    Alphanumeric {
        /// Number of characters in the code.
        length: usize,
    },
    /// A single digit repeated a fixed number of times.
    RepeatedDigit {
        /// Number of repetitions.
        length: usize,
    },
}

impl CodePolicy {
    /// The default policy for relay-minted codes.
    pub fn alphanumeric() -> Self {
        Self::Alphanumeric { length: 6 }
    }

    /// The default policy for caller-chosen codes.
    pub fn repeated_digit() -> Self {
        Self::RepeatedDigit { length: 4 }
    }

    /// Check whether a code satisfies this policy.
    pub fn matches(&self, code: &crate::SessionCode) -> bool {
        let code = code.as_str();
        match self {
            Self::Alphanumeric { length } => {
                code.len() == *length
                    && code.bytes().all(|b| CODE_CHARSET.contains(&b))
            }
            Self::RepeatedDigit { length } => {
                let mut bytes = code.bytes();
                match bytes.next() {
                    Some(first) if first.is_ascii_digit() => {
                        code.len() == *length && bytes.all(|b| b == first)
                    }
                    _ => false,
                }
            }
        }
    }

    /// Produce a random candidate code under this policy.
    ///
    /// Pure aside from the supplied randomness: uniqueness against a registry
    /// is the caller's problem.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> crate::SessionCode {
        let code: String = match self {
            Self::Alphanumeric { length } => (0..*length)
                .map(|_| {
                    let idx = rng.gen_range(0..CODE_CHARSET.len());
                    CODE_CHARSET[idx] as char
                })
                .collect(),
            Self::RepeatedDigit { length } => {
                let digit = char::from(b'0' + rng.gen_range(0..10u8));
                std::iter::repeat(digit).take(*length).collect()
            }
        };
        crate::SessionCode::new(&code)
    }

    /// Human-readable description of the expected format, for error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Alphanumeric { length } => {
                format!("{length} letters or digits")
            }
            Self::RepeatedDigit { length } => {
                format!("{length} repeated digits (e.g. 4444)")
            }
        }
    }
}
