// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — SRP Password-Authenticated Key Exchange
// Licensed under the MIT License

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of a registration salt in bytes.
pub const SALT_LENGTH: usize = 16;
/// Length of a SHA-256 digest in bytes; session keys and signatures share it.
pub const DIGEST_LENGTH: usize = 32;
/// PBKDF2-HMAC-SHA-256 iteration count for stretching passwords.
pub const KDF_ITERATIONS: u32 = 100_000;
/// Bit length of the group modulus.
pub const MODULUS_BITS: u64 = 2048;
/// Plaintext carried by the mutual key-confirmation messages.
pub const CONFIRMATION_MESSAGE: &str = "Hello!";

const _: () = assert!(SALT_LENGTH >= 16);
const _: () = assert!(DIGEST_LENGTH == 32);
const _: () = assert!(KDF_ITERATIONS >= 100_000);

/// Domain-separation labels for transcript hashing.
///
/// Each hashing context uses a distinct label so that the session-key
/// digest and the two confirmation signatures can never collide, whatever
/// the field values.
pub mod labels {
    /// Label for compressing the shared secret into a session key.
    pub const SESSION_KEY: &[u8] = b"ECLIPTIX-SRP-v1/SessionKey";
    /// Label for the agent's confirmation signature.
    pub const AGENT_CONFIRM: &[u8] = b"ECLIPTIX-SRP-v1/AgentConfirm";
    /// Label for the responder's confirmation signature.
    pub const RESPONDER_CONFIRM: &[u8] = b"ECLIPTIX-SRP-v1/ResponderConfirm";
    /// Label for hashing a username into the agent confirmation context.
    pub const USERNAME: &[u8] = b"ECLIPTIX-SRP-v1/Username";
}

/// Enumerates all error conditions that can arise during protocol operations.
///
/// A confirmation-signature mismatch is deliberately NOT represented here:
/// it is a protocol-level boolean outcome of `verify`, not an API error.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SrpError {
    /// An input parameter has an invalid value (e.g., an empty password).
    #[error("invalid input parameter")]
    InvalidInput,
    /// The username has no stored verifier, or no live session.
    #[error("unknown username or missing session")]
    NotFound,
    /// An operation was invoked before its prerequisite protocol step.
    #[error("protocol step invoked out of sequence")]
    SequenceError,
    /// Signing or verifying was attempted before a session key exists.
    #[error("no session key has been derived")]
    StateError,
}

/// Convenience alias for `Result<T, SrpError>`.
pub type SrpResult<T> = Result<T, SrpError>;

/// A derived session key, zeroized on drop.
///
/// Both sides compute it independently as the labelled digest of the shared
/// secret; equal inputs yield bit-identical keys. The `Debug` implementation
/// redacts the contents.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SessionKey([u8; DIGEST_LENGTH]);

impl SessionKey {
    pub(crate) fn from_digest(digest: [u8; DIGEST_LENGTH]) -> Self {
        Self(digest)
    }

    /// Returns the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LENGTH] {
        &self.0
    }
}

impl AsRef<[u8]> for SessionKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionKey([REDACTED; {}])", DIGEST_LENGTH)
    }
}

/// A confirmation signature: the labelled digest of a signing context.
///
/// Signatures travel over the channel, so they are not secret, but
/// comparison still goes through [`constant_time_eq`] because the values
/// they commit to are.
#[derive(Clone)]
pub struct Signature([u8; DIGEST_LENGTH]);

impl Signature {
    /// Reconstructs a signature from raw bytes (e.g., off the channel).
    pub fn from_bytes(bytes: [u8; DIGEST_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Returns the raw signature bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LENGTH] {
        &self.0
    }

    /// Compares two signatures in constant time.
    pub fn ct_eq(&self, other: &Signature) -> bool {
        constant_time_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signature(")?;
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        write!(f, ")")
    }
}

/// Compares two byte slices in constant time.
///
/// Returns `true` if the slices are equal. Differing lengths return `false`
/// immediately (length itself is not secret).
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    use subtle::ConstantTimeEq;
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
