// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — SRP Agent (Initiator)
// Licensed under the MIT License

//! Agent (client / initiator) side of the Ecliptix SRP protocol.
//!
//! An [`AgentSession`] walks the phases of one authentication attempt:
//! commit an ephemeral public value, derive the session key from the
//! responder's challenge, then exchange signed confirmation messages.
//! Registration is a pure operation on the side: it turns a password into a
//! `{verifier, salt}` payload for the responder to store and never touches
//! the session phase.

mod authentication;
mod registration;
mod state;

pub use state::AgentSession;
