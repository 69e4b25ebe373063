use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::Clock;
use crate::config::SessionConfig;
use crate::session::StudySession;

/// Opaque key identifying one user session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey(String);

impl SessionKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One `StudySession` per key, created on first access.
///
/// Sessions are fully independent; callers serialize access per key.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    clock: Clock,
    config: SessionConfig,
    sessions: HashMap<SessionKey, StudySession>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new(clock: Clock, config: SessionConfig) -> Self {
        Self {
            clock,
            config,
            sessions: HashMap::new(),
        }
    }

    /// Returns the session for `key`, creating it if needed.
    pub fn session(&mut self, key: &SessionKey) -> &mut StudySession {
        let clock = self.clock;
        let config = &self.config;
        self.sessions.entry(key.clone()).or_insert_with(|| {
            debug!(session = %key, "session created");
            StudySession::new(clock, config.clone())
        })
    }

    #[must_use]
    pub fn get(&self, key: &SessionKey) -> Option<&StudySession> {
        self.sessions.get(key)
    }

    /// Drops the session and all of its state. Returns whether it existed.
    pub fn end_session(&mut self, key: &SessionKey) -> bool {
        let existed = self.sessions.remove(key).is_some();
        if existed {
            debug!(session = %key, "session ended");
        }
        existed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
