// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — SRP Password-Authenticated Key Exchange
// Licensed under the MIT License

use num_bigint::BigUint;
use rand_core::{CryptoRng, RngCore};

use srp_core::crypto;
use srp_core::group::GroupParameters;
use srp_core::protocol::{
    agent_confirmation_signature, responder_confirmation_signature, session_key_from_shared_secret,
    Challenge, SignedMessage,
};
use srp_core::types::{SrpError, SrpResult, CONFIRMATION_MESSAGE};

use crate::state::{AgentPhase, AgentSession};

impl AgentSession {
    /// Opens a fresh exchange: draws the ephemeral secret `a ∈ [0, q)` and
    /// returns the commitment `A = g^a mod p`.
    ///
    /// Calling this again discards any exchange in flight and regenerates a
    /// fresh `(a, A)` pair; ephemerals are never reused across attempts.
    pub fn commit<R>(&mut self, rng: &mut R) -> BigUint
    where
        R: RngCore + CryptoRng,
    {
        let group = GroupParameters::rfc3526_2048();
        let secret = crypto::random_scalar(rng, group.order());
        let public = crypto::mod_pow(group.generator(), &secret, group.modulus());

        log::debug!("agent '{}': commitment generated", self.username());

        self.phase = AgentPhase::Committed {
            secret,
            public: public.clone(),
        };
        public
    }

    /// Derives the session key from the responder's challenge.
    ///
    /// Recomputes `x = KDF(password, salt)` and the shared group element
    /// `S = (B - k·g^x)^(a + x) mod p`. The subtraction is performed in
    /// `[0, p)`: `B` is reduced first and the difference wrapped by `p`, so
    /// the negative intermediate of the textbook formula never appears.
    /// Stores `B` and `K = H(S)` in the session.
    ///
    /// # Errors
    ///
    /// Returns [`SrpError::SequenceError`] unless a commitment is pending.
    pub fn derive_session_key(
        &mut self,
        password: &str,
        challenge: &Challenge,
    ) -> SrpResult<()> {
        match std::mem::replace(&mut self.phase, AgentPhase::Idle) {
            AgentPhase::Committed { secret, public } => {
                let group = GroupParameters::rfc3526_2048();
                let p = group.modulus();

                let x = crypto::derive_private_key(password.as_bytes(), &challenge.salt);
                let gx = crypto::mod_pow(group.generator(), &x, p);
                let masked = (group.multiplier() * &gx) % p;

                let responder_public = &challenge.public_value % p;
                let base = if responder_public > masked {
                    (&responder_public - &masked) % p
                } else {
                    (p + &responder_public - &masked) % p
                };

                let shared_secret = crypto::mod_pow(&base, &(&secret + &x), p);
                let session_key = session_key_from_shared_secret(&shared_secret);

                log::debug!("agent '{}': session key derived", self.username());

                self.phase = AgentPhase::KeyDerived {
                    public,
                    responder_public: challenge.public_value.clone(),
                    session_key,
                };
                Ok(())
            }
            other => {
                self.phase = other;
                Err(SrpError::SequenceError)
            }
        }
    }

    /// Signs the standard confirmation greeting.
    ///
    /// # Errors
    ///
    /// Returns [`SrpError::StateError`] if no session key has been derived.
    pub fn hello(&self) -> SrpResult<SignedMessage> {
        self.sign(CONFIRMATION_MESSAGE)
    }

    /// Signs an arbitrary message, binding it to `{H(username), B, K}`.
    ///
    /// # Errors
    ///
    /// Returns [`SrpError::StateError`] if no session key has been derived.
    pub fn sign(&self, message: &str) -> SrpResult<SignedMessage> {
        let (responder_public, session_key) = match &self.phase {
            AgentPhase::KeyDerived {
                responder_public,
                session_key,
                ..
            }
            | AgentPhase::Verified {
                responder_public,
                session_key,
                ..
            } => (responder_public, session_key),
            _ => return Err(SrpError::StateError),
        };

        let signature =
            agent_confirmation_signature(self.username(), responder_public, session_key, message);
        Ok(SignedMessage {
            message: message.to_owned(),
            signature,
        })
    }

    /// Checks the responder's confirmation message against `{A, K, message}`.
    ///
    /// A mismatch is a protocol outcome, not an error: the result is `false`
    /// and the session moves to the terminal failure state. On `true` the
    /// session is verified.
    ///
    /// # Errors
    ///
    /// Returns [`SrpError::StateError`] if no session key has been derived.
    pub fn verify(&mut self, payload: &SignedMessage) -> SrpResult<bool> {
        match std::mem::replace(&mut self.phase, AgentPhase::Failed) {
            AgentPhase::KeyDerived {
                public,
                responder_public,
                session_key,
            }
            | AgentPhase::Verified {
                public,
                responder_public,
                session_key,
            } => {
                let expected =
                    responder_confirmation_signature(&public, &session_key, &payload.message);
                let matched = expected.ct_eq(&payload.signature);
                if matched {
                    self.phase = AgentPhase::Verified {
                        public,
                        responder_public,
                        session_key,
                    };
                } else {
                    log::debug!("agent '{}': responder confirmation rejected", self.username());
                }
                Ok(matched)
            }
            other => {
                self.phase = other;
                Err(SrpError::StateError)
            }
        }
    }
}
