// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — SRP Relay (Responder)
// Licensed under the MIT License

use std::collections::HashMap;

use num_bigint::BigUint;
use srp_core::types::SALT_LENGTH;

/// A stored password verifier: the username it belongs to, the salt it was
/// derived under, and `V = g^x mod p`.
///
/// Written once at registration and never updated; destroyed only with the
/// account. The password cannot feasibly be recovered from it.
#[derive(Clone, Debug)]
pub struct VerifierRecord {
    pub username: String,
    pub verifier: BigUint,
    pub salt: [u8; SALT_LENGTH],
}

/// Capability interface over verifier storage.
///
/// The relay's protocol logic goes through this trait only, so a durable
/// backing store can replace the in-memory one without touching the state
/// machine.
pub trait VerifierStore {
    /// Fetches the record for a username, if one exists.
    fn get(&self, username: &str) -> Option<VerifierRecord>;

    /// Stores a record for a not-yet-registered username.
    ///
    /// Returns `false` and leaves the existing record untouched if the
    /// username is already present; registration is not an update path.
    fn put(&mut self, record: VerifierRecord) -> bool;

    /// Removes a username's record. Returns `true` if one was present.
    fn delete(&mut self, username: &str) -> bool;
}

/// In-memory verifier table.
#[derive(Default)]
pub struct MemoryVerifierStore {
    records: HashMap<String, VerifierRecord>,
}

impl MemoryVerifierStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VerifierStore for MemoryVerifierStore {
    fn get(&self, username: &str) -> Option<VerifierRecord> {
        self.records.get(username).cloned()
    }

    fn put(&mut self, record: VerifierRecord) -> bool {
        use std::collections::hash_map::Entry;
        match self.records.entry(record.username.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        }
    }

    fn delete(&mut self, username: &str) -> bool {
        self.records.remove(username).is_some()
    }
}
