// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — SRP Relay (Responder)
// Licensed under the MIT License

//! Relay (server / responder) side of the Ecliptix SRP protocol.
//!
//! A [`Relay`] owns the verifier table, behind the [`VerifierStore`]
//! capability trait so durable storage can be swapped in, and a session
//! table with one mutex per username. It issues challenges against stored
//! verifiers, derives the session key from its own ephemeral, and exchanges
//! signed confirmation messages with the agent. It never sees a password,
//! only `{verifier, salt}` records.

/// Authenticated key exchange flow for the responder.
mod authentication;
/// Verifier registration flow for the responder.
mod registration;
/// Session phases, the session table, and lifecycle management.
mod state;
/// Verifier storage capability and the in-memory table.
mod store;

pub use state::Relay;
pub use store::{MemoryVerifierStore, VerifierRecord, VerifierStore};
