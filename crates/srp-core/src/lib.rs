// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — SRP Password-Authenticated Key Exchange
// Licensed under the MIT License

//! Core library for the Ecliptix SRP password-authenticated key exchange.
//!
//! Implements the primitives and shared message contract of an augmented
//! PAKE over the RFC 3526 2048-bit MODP group: the agent holds a password,
//! the responder holds only a salted verifier `V = g^x mod p`, and a run of
//! the protocol leaves both with the same session key `K` without the
//! password ever crossing the channel. Mutual possession of `K` is then
//! confirmed with signed challenge messages.
//!
//! The exchange, with all arithmetic mod `p`:
//!
//! |       Responder                  |  Data transfer   |       Agent                     |
//! |----------------------------------|------------------|---------------------------------|
//! |                                  | <- user, `V`, salt | `x = KDF(pw, salt)`, `V = g^x`|
//! | store `{V, salt}` once           |                  |                                 |
//! |                                  | <- `A`           | `a = $[0,q)`, `A = g^a`         |
//! | `b = $[0,q)`, `B = kV + g^b`     | salt, `B` ->     |                                 |
//! | `S = (A·V)^b`                    |                  | `S = (B - k·g^x)^(a+x)`         |
//! | `K = H(S)`                       |                  | `K = H(S)`                      |
//! | verify                           | <- msg, sig      | sig over `H(user), B, K, msg`   |
//! | sig over `A, K, msg`             | msg, sig ->      | verify                          |
//!
//! Protocol version notes: the multiplier `k` is the fixed scalar 3 (not
//! `H(p ‖ g)`), and the exponent on the agent side is `a + x` with no
//! scrambling parameter `u = H(A, B)`. Neither choice is interoperable with
//! SRP-6a; see the crate documentation of [`group`] for the parameter
//! contract.

/// Low-level primitives: salt generation, password stretching, modular
/// exponentiation, rejection-sampled random scalars.
pub mod crypto;
/// The shared safe-prime group parameters.
pub mod group;
/// Message records and the confirmation-signature contract.
pub mod protocol;
/// Order-sensitive, length-framed transcript hashing.
pub mod transcript;
/// Shared constants, error types, and key/signature containers.
pub mod types;
