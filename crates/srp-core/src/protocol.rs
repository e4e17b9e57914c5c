// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — SRP Password-Authenticated Key Exchange
// Licensed under the MIT License

use num_bigint::BigUint;

use crate::transcript::Transcript;
use crate::types::{labels, SessionKey, Signature, DIGEST_LENGTH, SALT_LENGTH};

/// Registration payload the agent sends once per account: the username, the
/// password verifier `V = g^x mod p`, and the salt the verifier was derived
/// under. The password itself never appears on the channel.
#[derive(Clone, Debug)]
pub struct RegistrationUpload {
    pub username: String,
    pub verifier: BigUint,
    pub salt: [u8; SALT_LENGTH],
}

/// The responder's reply to a commitment: the stored salt and the responder
/// public value `B`.
#[derive(Clone, Debug)]
pub struct Challenge {
    pub salt: [u8; SALT_LENGTH],
    pub public_value: BigUint,
}

/// A key-confirmation message: plaintext plus the signature binding it to
/// the session. Constructed and consumed immediately; carries no lifecycle
/// of its own.
#[derive(Clone, Debug)]
pub struct SignedMessage {
    pub message: String,
    pub signature: Signature,
}

/// Hashes a username for use in the agent confirmation context.
pub fn hash_username(username: &str) -> [u8; DIGEST_LENGTH] {
    Transcript::new(labels::USERNAME).text(username).finish()
}

/// Compresses the shared group element `S` into the session key `K`.
///
/// Both sides call this on their independently computed `S`; consistent
/// protocol inputs make the two keys bit-identical.
pub fn session_key_from_shared_secret(shared_secret: &BigUint) -> SessionKey {
    let digest = Transcript::new(labels::SESSION_KEY)
        .integer(shared_secret)
        .finish();
    SessionKey::from_digest(digest)
}

/// Signature the agent sends with its confirmation message:
/// `H(H(username), B, K, message)`.
///
/// The agent signs with this and the responder verifies against it; the
/// field order is part of the protocol contract.
pub fn agent_confirmation_signature(
    username: &str,
    responder_public: &BigUint,
    key: &SessionKey,
    message: &str,
) -> Signature {
    let digest = Transcript::new(labels::AGENT_CONFIRM)
        .bytes(&hash_username(username))
        .integer(responder_public)
        .bytes(key.as_bytes())
        .text(message)
        .finish();
    Signature::from_bytes(digest)
}

/// Signature the responder sends with its confirmation message:
/// `H(A, K, message)`.
///
/// The responder signs with this and the agent verifies against it.
pub fn responder_confirmation_signature(
    agent_public: &BigUint,
    key: &SessionKey,
    message: &str,
) -> Signature {
    let digest = Transcript::new(labels::RESPONDER_CONFIRM)
        .integer(agent_public)
        .bytes(key.as_bytes())
        .text(message)
        .finish();
    Signature::from_bytes(digest)
}
