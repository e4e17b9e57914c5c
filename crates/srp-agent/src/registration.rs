// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — SRP Password-Authenticated Key Exchange
// Licensed under the MIT License

use rand_core::{CryptoRng, RngCore};

use srp_core::crypto;
use srp_core::group::GroupParameters;
use srp_core::protocol::RegistrationUpload;
use srp_core::types::{SrpError, SrpResult};

use crate::state::AgentSession;

impl AgentSession {
    /// Produces the registration payload for this session's username.
    ///
    /// Generates a fresh salt, stretches the password into the secret
    /// exponent `x`, and computes the verifier `V = g^x mod p`. Pure with
    /// respect to session state; the caller transmits the result to the
    /// responder, which stores it once per username.
    ///
    /// # Errors
    ///
    /// Returns [`SrpError::InvalidInput`] if `password` is empty.
    pub fn register<R>(&self, password: &str, rng: &mut R) -> SrpResult<RegistrationUpload>
    where
        R: RngCore + CryptoRng,
    {
        if password.is_empty() {
            return Err(SrpError::InvalidInput);
        }

        let group = GroupParameters::rfc3526_2048();
        let salt = crypto::generate_salt(rng);
        let x = crypto::derive_private_key(password.as_bytes(), &salt);
        let verifier = crypto::mod_pow(group.generator(), &x, group.modulus());

        log::debug!("agent '{}': registration payload derived", self.username());

        Ok(RegistrationUpload {
            username: self.username().to_owned(),
            verifier,
            salt,
        })
    }
}
