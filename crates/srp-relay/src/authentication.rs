// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — SRP Relay (Responder)
// Licensed under the MIT License

use std::sync::PoisonError;
use std::time::Instant;

use num_bigint::BigUint;
use rand_core::{CryptoRng, RngCore};

use srp_core::crypto;
use srp_core::group::GroupParameters;
use srp_core::protocol::{
    agent_confirmation_signature, responder_confirmation_signature, session_key_from_shared_secret,
    Challenge, SignedMessage,
};
use srp_core::types::{SrpError, SrpResult, CONFIRMATION_MESSAGE};

use crate::state::{Relay, ResponderPhase};
use crate::store::VerifierStore;

impl<S: VerifierStore> Relay<S> {
    /// Answers an agent commitment with a challenge.
    ///
    /// Draws the ephemeral secret `b ∈ [0, q)` and computes
    /// `B = (k·V + g^b) mod p`; the sum is reduced immediately so the
    /// transmitted `B` is canonical in `[0, p)`. Stores `{A, b, B}` in the
    /// username's session and returns `{salt, B}`. Issuing a new challenge
    /// restarts any exchange already in flight for that username.
    ///
    /// # Errors
    ///
    /// Returns [`SrpError::NotFound`] if the username has no stored
    /// verifier.
    pub fn challenge<R>(
        &self,
        username: &str,
        agent_public: &BigUint,
        rng: &mut R,
    ) -> SrpResult<Challenge>
    where
        R: RngCore + CryptoRng,
    {
        let record = self.store_read().get(username).ok_or(SrpError::NotFound)?;

        let group = GroupParameters::rfc3526_2048();
        let p = group.modulus();
        let secret = crypto::random_scalar(rng, group.order());
        let public = (group.multiplier() * &record.verifier
            + crypto::mod_pow(group.generator(), &secret, p))
            % p;

        log::debug!("responder: challenge issued for '{username}'");

        let handle = self.session_handle_or_create(username);
        let mut entry = handle.lock().unwrap_or_else(PoisonError::into_inner);
        entry.phase = ResponderPhase::Challenged {
            agent_public: agent_public.clone(),
            secret,
            public: public.clone(),
        };
        entry.touched = Instant::now();

        Ok(Challenge {
            salt: record.salt,
            public_value: public,
        })
    }

    /// Derives the session key for a challenged username.
    ///
    /// Computes the shared group element `S = (A·V)^b mod p` and stores
    /// `K = H(S)` in the session.
    ///
    /// # Errors
    ///
    /// Returns [`SrpError::NotFound`] without a live session (or if the
    /// account was deleted mid-exchange) and [`SrpError::SequenceError`]
    /// if the session is not in the challenged phase.
    pub fn derive_session_key(&self, username: &str) -> SrpResult<()> {
        let record = self.store_read().get(username).ok_or(SrpError::NotFound)?;
        let handle = self.session_handle(username).ok_or(SrpError::NotFound)?;
        let mut entry = handle.lock().unwrap_or_else(PoisonError::into_inner);

        match std::mem::replace(&mut entry.phase, ResponderPhase::Failed) {
            ResponderPhase::Challenged {
                agent_public,
                secret,
                public,
            } => {
                let group = GroupParameters::rfc3526_2048();
                let p = group.modulus();

                let base = (&agent_public * &record.verifier) % p;
                let shared_secret = crypto::mod_pow(&base, &secret, p);
                let session_key = session_key_from_shared_secret(&shared_secret);

                log::debug!("responder: session key derived for '{username}'");

                entry.phase = ResponderPhase::KeyDerived {
                    agent_public,
                    public,
                    session_key,
                };
                entry.touched = Instant::now();
                Ok(())
            }
            other => {
                entry.phase = other;
                Err(SrpError::SequenceError)
            }
        }
    }

    /// Signs the standard confirmation greeting for a username's session.
    ///
    /// # Errors
    ///
    /// Returns [`SrpError::NotFound`] without a session and
    /// [`SrpError::StateError`] before key derivation.
    pub fn hello(&self, username: &str) -> SrpResult<SignedMessage> {
        self.sign(username, CONFIRMATION_MESSAGE)
    }

    /// Signs an arbitrary message, binding it to `{A, K}`.
    ///
    /// # Errors
    ///
    /// Returns [`SrpError::NotFound`] without a session and
    /// [`SrpError::StateError`] before key derivation.
    pub fn sign(&self, username: &str, message: &str) -> SrpResult<SignedMessage> {
        let handle = self.session_handle(username).ok_or(SrpError::NotFound)?;
        let mut entry = handle.lock().unwrap_or_else(PoisonError::into_inner);

        let signature = match &entry.phase {
            ResponderPhase::KeyDerived {
                agent_public,
                session_key,
                ..
            }
            | ResponderPhase::Verified {
                agent_public,
                session_key,
                ..
            } => responder_confirmation_signature(agent_public, session_key, message),
            _ => return Err(SrpError::StateError),
        };
        entry.touched = Instant::now();

        Ok(SignedMessage {
            message: message.to_owned(),
            signature,
        })
    }

    /// Checks the agent's confirmation message against
    /// `{H(username), B, K, message}`.
    ///
    /// A mismatch is a protocol outcome, not an error: the result is
    /// `false` and the session moves to the terminal failure state. On
    /// `true` the session is verified.
    ///
    /// # Errors
    ///
    /// Returns [`SrpError::NotFound`] without a session and
    /// [`SrpError::StateError`] before key derivation.
    pub fn verify(&self, username: &str, payload: &SignedMessage) -> SrpResult<bool> {
        let handle = self.session_handle(username).ok_or(SrpError::NotFound)?;
        let mut entry = handle.lock().unwrap_or_else(PoisonError::into_inner);

        match std::mem::replace(&mut entry.phase, ResponderPhase::Failed) {
            ResponderPhase::KeyDerived {
                agent_public,
                public,
                session_key,
            }
            | ResponderPhase::Verified {
                agent_public,
                public,
                session_key,
            } => {
                let expected =
                    agent_confirmation_signature(username, &public, &session_key, &payload.message);
                let matched = expected.ct_eq(&payload.signature);
                if matched {
                    entry.phase = ResponderPhase::Verified {
                        agent_public,
                        public,
                        session_key,
                    };
                } else {
                    log::debug!("responder: agent confirmation rejected for '{username}'");
                }
                entry.touched = Instant::now();
                Ok(matched)
            }
            other => {
                entry.phase = other;
                Err(SrpError::StateError)
            }
        }
    }
}
