// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — SRP Password-Authenticated Key Exchange
// Licensed under the MIT License

use num_bigint::BigUint;
use sha2::{Digest, Sha256};

use crate::types::DIGEST_LENGTH;

/// Order-sensitive hash over a sequence of heterogeneous values.
///
/// Every append is framed with a big-endian `u64` length before the bytes,
/// so adjacent fields cannot be reinterpreted across their boundary, and a
/// domain label separates each hashing context from every other. Signer and
/// verifier build the identical transcript, which is what makes the
/// confirmation-signature contract hold.
pub struct Transcript {
    hasher: Sha256,
}

impl Transcript {
    /// Starts a transcript under the given domain label.
    pub fn new(label: &[u8]) -> Self {
        let mut transcript = Self {
            hasher: Sha256::new(),
        };
        transcript.append(label);
        transcript
    }

    /// Appends an integer, big-endian.
    pub fn integer(mut self, value: &BigUint) -> Self {
        self.append(&value.to_bytes_be());
        self
    }

    /// Appends a byte string.
    pub fn bytes(mut self, data: &[u8]) -> Self {
        self.append(data);
        self
    }

    /// Appends UTF-8 text.
    pub fn text(mut self, value: &str) -> Self {
        self.append(value.as_bytes());
        self
    }

    fn append(&mut self, data: &[u8]) {
        self.hasher.update((data.len() as u64).to_be_bytes());
        self.hasher.update(data);
    }

    /// Finalizes the transcript into a digest.
    pub fn finish(self) -> [u8; DIGEST_LENGTH] {
        self.hasher.finalize().into()
    }
}
