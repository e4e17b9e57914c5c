use std::time::Duration;

use num_bigint::BigUint;
use rand::rngs::OsRng;
use srp_core::crypto;
use srp_core::group::GroupParameters;
use srp_core::protocol::{
    agent_confirmation_signature, responder_confirmation_signature, session_key_from_shared_secret,
    RegistrationUpload, SignedMessage,
};
use srp_core::types::{SessionKey, SrpError, CONFIRMATION_MESSAGE};
use srp_relay::{MemoryVerifierStore, Relay, VerifierRecord, VerifierStore};

const USERNAME: &str = "alice@example.com";
const PASSWORD: &str = "correct horse battery staple";

fn new_relay() -> Relay<MemoryVerifierStore> {
    Relay::new(MemoryVerifierStore::new())
}

fn registration_upload(username: &str, password: &str) -> RegistrationUpload {
    let group = GroupParameters::rfc3526_2048();
    let salt = crypto::generate_salt(&mut OsRng);
    let x = crypto::derive_private_key(password.as_bytes(), &salt);
    let verifier = crypto::mod_pow(group.generator(), &x, group.modulus());
    RegistrationUpload {
        username: username.to_owned(),
        verifier,
        salt,
    }
}

/// Drives the agent side of the exchange by hand with the core primitives,
/// independently of the agent crate, and returns the relay's confirmation
/// verdict together with the agent-side session key.
fn exchange_with_handrolled_agent(
    relay: &Relay<MemoryVerifierStore>,
    username: &str,
    password: &str,
) -> (bool, SessionKey) {
    let group = GroupParameters::rfc3526_2048();
    let p = group.modulus();

    let a = crypto::random_scalar(&mut OsRng, group.order());
    let a_pub = crypto::mod_pow(group.generator(), &a, p);
    let challenge = relay.challenge(username, &a_pub, &mut OsRng).unwrap();

    let x = crypto::derive_private_key(password.as_bytes(), &challenge.salt);
    let gx = crypto::mod_pow(group.generator(), &x, p);
    let masked = (group.multiplier() * &gx) % p;
    let b_red = &challenge.public_value % p;
    let base = if b_red > masked {
        (&b_red - &masked) % p
    } else {
        (p + &b_red - &masked) % p
    };
    let shared = crypto::mod_pow(&base, &(&a + &x), p);
    let key = session_key_from_shared_secret(&shared);

    relay.derive_session_key(username).unwrap();

    let hello = SignedMessage {
        message: CONFIRMATION_MESSAGE.to_owned(),
        signature: agent_confirmation_signature(
            username,
            &challenge.public_value,
            &key,
            CONFIRMATION_MESSAGE,
        ),
    };
    let accepted = relay.verify(username, &hello).unwrap();

    if accepted {
        let responder_hello = relay.hello(username).unwrap();
        let expected = responder_confirmation_signature(&a_pub, &key, &responder_hello.message);
        assert!(
            responder_hello.signature.ct_eq(&expected),
            "responder hello must verify against the agent-side key"
        );
    }
    (accepted, key)
}

#[test]
fn memory_store_is_write_once() {
    let mut store = MemoryVerifierStore::new();
    let first = VerifierRecord {
        username: USERNAME.to_owned(),
        verifier: BigUint::from(11u32),
        salt: [1u8; 16],
    };
    let second = VerifierRecord {
        username: USERNAME.to_owned(),
        verifier: BigUint::from(22u32),
        salt: [2u8; 16],
    };

    assert!(store.put(first));
    assert!(!store.put(second));
    assert_eq!(store.get(USERNAME).unwrap().verifier, BigUint::from(11u32));

    assert!(store.delete(USERNAME));
    assert!(!store.delete(USERNAME));
    assert!(store.get(USERNAME).is_none());
}

#[test]
fn duplicate_registration_is_an_idempotent_noop() {
    let relay = new_relay();
    relay.store_verifier(registration_upload(USERNAME, PASSWORD));
    relay.store_verifier(registration_upload(USERNAME, "another password"));

    let (accepted, _) = exchange_with_handrolled_agent(&relay, USERNAME, PASSWORD);
    assert!(accepted, "the first registration must still be in effect");
}

#[test]
fn challenge_for_unknown_username_is_not_found() {
    let relay = new_relay();
    assert_eq!(
        relay
            .challenge("nobody", &BigUint::from(5u32), &mut OsRng)
            .unwrap_err(),
        SrpError::NotFound
    );
}

#[test]
fn operations_without_a_session_are_not_found() {
    let relay = new_relay();
    relay.store_verifier(registration_upload(USERNAME, PASSWORD));

    assert_eq!(relay.derive_session_key(USERNAME).unwrap_err(), SrpError::NotFound);
    assert_eq!(relay.hello(USERNAME).unwrap_err(), SrpError::NotFound);
    assert_eq!(relay.session_key(USERNAME).unwrap_err(), SrpError::NotFound);

    let payload = SignedMessage {
        message: CONFIRMATION_MESSAGE.to_owned(),
        signature: agent_confirmation_signature(
            USERNAME,
            &BigUint::from(5u32),
            &session_key_from_shared_secret(&BigUint::from(5u32)),
            CONFIRMATION_MESSAGE,
        ),
    };
    assert_eq!(relay.verify(USERNAME, &payload).unwrap_err(), SrpError::NotFound);
}

#[test]
fn signing_before_key_derivation_is_a_state_error() {
    let relay = new_relay();
    relay.store_verifier(registration_upload(USERNAME, PASSWORD));
    relay
        .challenge(USERNAME, &BigUint::from(5u32), &mut OsRng)
        .unwrap();

    assert_eq!(relay.hello(USERNAME).unwrap_err(), SrpError::StateError);
    assert_eq!(relay.session_key(USERNAME).unwrap_err(), SrpError::StateError);
}

#[test]
fn deriving_twice_is_a_sequence_error() {
    let relay = new_relay();
    relay.store_verifier(registration_upload(USERNAME, PASSWORD));
    relay
        .challenge(USERNAME, &BigUint::from(5u32), &mut OsRng)
        .unwrap();

    relay.derive_session_key(USERNAME).unwrap();
    assert_eq!(
        relay.derive_session_key(USERNAME).unwrap_err(),
        SrpError::SequenceError
    );
}

#[test]
fn a_new_challenge_restarts_the_exchange() {
    let relay = new_relay();
    relay.store_verifier(registration_upload(USERNAME, PASSWORD));

    relay
        .challenge(USERNAME, &BigUint::from(5u32), &mut OsRng)
        .unwrap();
    relay.derive_session_key(USERNAME).unwrap();

    // Issuing a fresh challenge resets the phase; the whole exchange runs
    // again from the top.
    let (accepted, _) = exchange_with_handrolled_agent(&relay, USERNAME, PASSWORD);
    assert!(accepted);
}

#[test]
fn full_exchange_against_a_handrolled_agent() {
    let relay = new_relay();
    relay.store_verifier(registration_upload(USERNAME, PASSWORD));

    let (accepted, agent_key) = exchange_with_handrolled_agent(&relay, USERNAME, PASSWORD);
    assert!(accepted);
    assert!(relay.is_session_verified(USERNAME));
    assert_eq!(
        relay.session_key(USERNAME).unwrap().as_bytes(),
        agent_key.as_bytes(),
    );
}

#[test]
fn wrong_password_is_rejected_and_terminal() {
    let relay = new_relay();
    relay.store_verifier(registration_upload(USERNAME, PASSWORD));

    let (accepted, _) = exchange_with_handrolled_agent(&relay, USERNAME, "wrong password");
    assert!(!accepted);
    assert!(!relay.is_session_verified(USERNAME));
    // Failure dropped the session key material.
    assert_eq!(relay.session_key(USERNAME).unwrap_err(), SrpError::StateError);
}

#[test]
fn end_session_tears_down_state() {
    let relay = new_relay();
    relay.store_verifier(registration_upload(USERNAME, PASSWORD));

    let (accepted, _) = exchange_with_handrolled_agent(&relay, USERNAME, PASSWORD);
    assert!(accepted);

    assert!(relay.end_session(USERNAME));
    assert!(!relay.has_session(USERNAME));
    assert_eq!(relay.session_key(USERNAME).unwrap_err(), SrpError::NotFound);
    assert!(!relay.end_session(USERNAME));
}

#[test]
fn idle_sessions_expire() {
    let relay = new_relay();
    relay.store_verifier(registration_upload(USERNAME, PASSWORD));
    relay
        .challenge(USERNAME, &BigUint::from(5u32), &mut OsRng)
        .unwrap();

    assert_eq!(relay.expire_idle(Duration::from_secs(3600)), 0);
    assert!(relay.has_session(USERNAME));

    std::thread::sleep(Duration::from_millis(5));
    assert_eq!(relay.expire_idle(Duration::ZERO), 1);
    assert!(!relay.has_session(USERNAME));
}

#[test]
fn delete_account_removes_verifier_and_session() {
    let relay = new_relay();
    relay.store_verifier(registration_upload(USERNAME, PASSWORD));
    relay
        .challenge(USERNAME, &BigUint::from(5u32), &mut OsRng)
        .unwrap();

    assert!(relay.delete_account(USERNAME));
    assert!(!relay.has_session(USERNAME));
    assert_eq!(
        relay
            .challenge(USERNAME, &BigUint::from(5u32), &mut OsRng)
            .unwrap_err(),
        SrpError::NotFound
    );
}

#[test]
fn concurrent_users_authenticate_independently() {
    let relay = new_relay();
    let users = ["alice", "bob", "carol", "dave"];
    for user in users {
        relay.store_verifier(registration_upload(user, PASSWORD));
    }

    std::thread::scope(|scope| {
        for user in users {
            let relay = &relay;
            scope.spawn(move || {
                let (accepted, _) = exchange_with_handrolled_agent(relay, user, PASSWORD);
                assert!(accepted, "exchange for '{user}' must succeed");
            });
        }
    });

    for user in users {
        assert!(relay.is_session_verified(user));
    }
}

#[test]
fn racing_challenges_for_one_user_leave_a_usable_session() {
    let relay = new_relay();
    relay.store_verifier(registration_upload(USERNAME, PASSWORD));

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let relay = &relay;
            scope.spawn(move || {
                relay
                    .challenge(USERNAME, &BigUint::from(5u32), &mut OsRng)
                    .unwrap();
            });
        }
    });

    assert!(relay.has_session(USERNAME));
    // The racing challenges each replaced the session whole; a fresh
    // exchange still runs cleanly from the top.
    let (accepted, _) = exchange_with_handrolled_agent(&relay, USERNAME, PASSWORD);
    assert!(accepted);
}
