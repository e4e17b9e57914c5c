// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — SRP Relay (Responder)
// Licensed under the MIT License

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use num_bigint::BigUint;
use srp_core::types::{SessionKey, SrpError, SrpResult};

use crate::store::VerifierStore;

/// Protocol phase of one responder-side session, tagging exactly the values
/// valid in that phase. Terminal semantics match the agent's: `Failed`
/// drops the session values, `Verified` retains them for key extraction
/// and further signing.
pub(crate) enum ResponderPhase {
    /// A challenge has been issued; holds the agent's `A`, the ephemeral
    /// secret `b`, and the public value `B` sent back.
    Challenged {
        agent_public: BigUint,
        secret: BigUint,
        public: BigUint,
    },
    /// Session key derived; confirmation messages can be signed and checked.
    KeyDerived {
        agent_public: BigUint,
        public: BigUint,
        session_key: SessionKey,
    },
    /// The agent proved possession of the same key.
    Verified {
        agent_public: BigUint,
        public: BigUint,
        session_key: SessionKey,
    },
    /// The agent's confirmation signature did not check out.
    Failed,
}

/// A live session plus the instant it was last touched, for idle expiry.
pub(crate) struct SessionEntry {
    pub(crate) phase: ResponderPhase,
    pub(crate) touched: Instant,
}

/// Responder side of the protocol: the verifier table plus the per-username
/// session table.
///
/// The verifier store is read-mostly and sits behind a `RwLock`; sessions
/// take one mutex per username, so concurrent authentications for different
/// usernames never contend, while concurrent steps for the same username
/// serialize instead of clobbering each other's ephemerals. The outer map
/// lock is held only long enough to fetch a handle.
pub struct Relay<S: VerifierStore> {
    store: RwLock<S>,
    sessions: Mutex<HashMap<String, Arc<Mutex<SessionEntry>>>>,
}

impl<S: VerifierStore> Relay<S> {
    /// Creates a relay over the given verifier store.
    pub fn new(store: S) -> Self {
        Self {
            store: RwLock::new(store),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn store_read(&self) -> RwLockReadGuard<'_, S> {
        // A poisoned lock only means a panic elsewhere; the table itself
        // is still coherent, so recover the guard.
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn store_write(&self) -> RwLockWriteGuard<'_, S> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn sessions_lock(&self) -> MutexGuard<'_, HashMap<String, Arc<Mutex<SessionEntry>>>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetches the per-username session handle, if a session exists.
    pub(crate) fn session_handle(&self, username: &str) -> Option<Arc<Mutex<SessionEntry>>> {
        self.sessions_lock().get(username).cloned()
    }

    /// Fetches or creates the per-username session handle.
    pub(crate) fn session_handle_or_create(&self, username: &str) -> Arc<Mutex<SessionEntry>> {
        self.sessions_lock()
            .entry(username.to_owned())
            .or_insert_with(|| {
                Arc::new(Mutex::new(SessionEntry {
                    phase: ResponderPhase::Failed,
                    touched: Instant::now(),
                }))
            })
            .clone()
    }

    /// Whether a session (in any phase) exists for the username.
    pub fn has_session(&self, username: &str) -> bool {
        self.sessions_lock().contains_key(username)
    }

    /// The derived session key for a username's session.
    ///
    /// # Errors
    ///
    /// Returns [`SrpError::NotFound`] without a session and
    /// [`SrpError::StateError`] before key derivation.
    pub fn session_key(&self, username: &str) -> SrpResult<SessionKey> {
        let handle = self.session_handle(username).ok_or(SrpError::NotFound)?;
        let entry = handle.lock().unwrap_or_else(PoisonError::into_inner);
        match &entry.phase {
            ResponderPhase::KeyDerived { session_key, .. }
            | ResponderPhase::Verified { session_key, .. } => Ok(session_key.clone()),
            _ => Err(SrpError::StateError),
        }
    }

    /// Whether the username's session reached the terminal success state.
    pub fn is_session_verified(&self, username: &str) -> bool {
        self.session_handle(username).is_some_and(|handle| {
            let entry = handle.lock().unwrap_or_else(PoisonError::into_inner);
            matches!(entry.phase, ResponderPhase::Verified { .. })
        })
    }

    /// Tears down a username's session explicitly. Returns `true` if one
    /// existed.
    pub fn end_session(&self, username: &str) -> bool {
        self.sessions_lock().remove(username).is_some()
    }

    /// Drops every session idle longer than `max_idle` and returns how many
    /// were removed.
    ///
    /// Abandoned sessions would otherwise accumulate without bound. The
    /// caller drives expiry at whatever cadence suits it; there is no
    /// background reaper. Sessions whose lock is currently held are in
    /// use and are left alone.
    pub fn expire_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions_lock();
        let before = sessions.len();
        sessions.retain(|_, handle| match handle.try_lock() {
            Ok(entry) => entry.touched.elapsed() <= max_idle,
            Err(_) => true,
        });
        let removed = before - sessions.len();
        if removed > 0 {
            log::debug!("responder: expired {removed} idle session(s)");
        }
        removed
    }
}
