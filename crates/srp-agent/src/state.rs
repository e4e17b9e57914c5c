// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — SRP Password-Authenticated Key Exchange
// Licensed under the MIT License

use num_bigint::BigUint;
use srp_core::types::SessionKey;

/// Protocol phase of an agent session, tagging exactly the values that are
/// valid in that phase.
///
/// `Verified` and `Failed` are terminal: `Failed` drops every session value,
/// while `Verified` retains the key material so the caller can extract the
/// session key and re-sign if the orchestrator asks for it.
pub(crate) enum AgentPhase {
    /// No authentication attempt in flight.
    Idle,
    /// `commit` has produced an ephemeral pair; waiting for the challenge.
    Committed { secret: BigUint, public: BigUint },
    /// Session key derived; confirmation messages can be signed and checked.
    KeyDerived {
        public: BigUint,
        responder_public: BigUint,
        session_key: SessionKey,
    },
    /// The responder proved possession of the same key.
    Verified {
        public: BigUint,
        responder_public: BigUint,
        session_key: SessionKey,
    },
    /// The responder's confirmation signature did not check out.
    Failed,
}

/// One agent-side authentication session.
///
/// Created per attempt; [`commit`](AgentSession::commit) always starts a
/// fresh exchange, regenerating the ephemeral pair. Registration is a pure
/// operation and never touches the phase.
pub struct AgentSession {
    username: String,
    pub(crate) phase: AgentPhase,
}

impl AgentSession {
    /// Creates an idle session for the given username.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            phase: AgentPhase::Idle,
        }
    }

    /// The username this session authenticates.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The derived session key, once key derivation has completed.
    pub fn session_key(&self) -> Option<&SessionKey> {
        match &self.phase {
            AgentPhase::KeyDerived { session_key, .. }
            | AgentPhase::Verified { session_key, .. } => Some(session_key),
            _ => None,
        }
    }

    /// Whether the session reached the terminal success state.
    pub fn is_verified(&self) -> bool {
        matches!(self.phase, AgentPhase::Verified { .. })
    }

    /// Whether the session reached the terminal failure state.
    pub fn is_failed(&self) -> bool {
        matches!(self.phase, AgentPhase::Failed)
    }
}

impl std::fmt::Debug for AgentSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let phase = match self.phase {
            AgentPhase::Idle => "Idle",
            AgentPhase::Committed { .. } => "Committed",
            AgentPhase::KeyDerived { .. } => "KeyDerived",
            AgentPhase::Verified { .. } => "Verified",
            AgentPhase::Failed => "Failed",
        };
        f.debug_struct("AgentSession")
            .field("username", &self.username)
            .field("phase", &phase)
            .finish()
    }
}
