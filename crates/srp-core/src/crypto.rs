// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — SRP Password-Authenticated Key Exchange
// Licensed under the MIT License

use num_bigint::BigUint;
use pbkdf2::pbkdf2_hmac;
use rand_core::{CryptoRng, RngCore};
use sha2::Sha256;
use zeroize::Zeroize;

use crate::types::{DIGEST_LENGTH, KDF_ITERATIONS, SALT_LENGTH};

/// Generates a fresh random registration salt.
pub fn generate_salt<R>(rng: &mut R) -> [u8; SALT_LENGTH]
where
    R: RngCore + CryptoRng,
{
    let mut salt = [0u8; SALT_LENGTH];
    rng.fill_bytes(&mut salt);
    salt
}

/// Stretches a password into the long-term secret exponent `x`.
///
/// PBKDF2-HMAC-SHA-256 over `(password, salt)` at [`KDF_ITERATIONS`]
/// iterations, interpreted as a big-endian integer. Deterministic: the same
/// `(password, salt)` pair always yields the same exponent, so the agent can
/// recompute at key-derivation time what it computed at registration.
/// The intermediate buffer is scrubbed after conversion.
pub fn derive_private_key(password: &[u8], salt: &[u8]) -> BigUint {
    let mut stretched = [0u8; DIGEST_LENGTH];
    pbkdf2_hmac::<Sha256>(password, salt, KDF_ITERATIONS, &mut stretched);
    let x = BigUint::from_bytes_be(&stretched);
    stretched.zeroize();
    x
}

/// Modular exponentiation: `base^exponent mod modulus`.
///
/// A zero exponent yields 1 and a modulus of 1 yields 0, so callers never
/// special-case either.
pub fn mod_pow(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    if *modulus == BigUint::from(1u32) {
        return BigUint::from(0u32);
    }
    base.modpow(exponent, modulus)
}

/// Draws a uniformly random integer in `[0, upper)`.
///
/// Samples `upper.bits()` rounded up to whole bytes and resamples any
/// candidate `>= upper`. Rejection keeps the distribution uniform; reducing
/// an oversized candidate modulo `upper` would bias the low range.
pub fn random_scalar<R>(rng: &mut R, upper: &BigUint) -> BigUint
where
    R: RngCore + CryptoRng,
{
    let byte_length = ((upper.bits() + 7) / 8) as usize;
    let mut buf = vec![0u8; byte_length];
    loop {
        rng.fill_bytes(&mut buf);
        let candidate = BigUint::from_bytes_be(&buf);
        if &candidate < upper {
            buf.zeroize();
            return candidate;
        }
    }
}
