// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — SRP Relay (Responder)
// Licensed under the MIT License

use srp_core::protocol::RegistrationUpload;

use crate::state::Relay;
use crate::store::{VerifierRecord, VerifierStore};

impl<S: VerifierStore> Relay<S> {
    /// Stores a registration payload for a new username.
    ///
    /// Registration is write-once: if the username already has a verifier
    /// the call is an idempotent no-op that logs a warning. It never
    /// errors; a distinct failure path for existing usernames would leak
    /// account existence through the error channel.
    pub fn store_verifier(&self, upload: RegistrationUpload) {
        let record = VerifierRecord {
            username: upload.username,
            verifier: upload.verifier,
            salt: upload.salt,
        };
        let username = record.username.clone();
        if self.store_write().put(record) {
            log::debug!("responder: stored verifier for '{username}'");
        } else {
            log::warn!("responder: verifier for '{username}' already stored, ignoring re-registration");
        }
    }

    /// Removes a username's verifier and tears down any live session.
    ///
    /// Returns `true` if a verifier record existed. This is the only path
    /// that destroys a verifier.
    pub fn delete_account(&self, username: &str) -> bool {
        self.end_session(username);
        self.store_write().delete(username)
    }
}
