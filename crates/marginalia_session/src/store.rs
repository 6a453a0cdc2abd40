//! Session store implementation.

use marginalia_core::{CorrelationToken, UserId};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Configuration for the session store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_getters::Getters)]
pub struct SessionStoreConfig {
    /// How long an untouched session stays resumable.
    ttl: Duration,
}

impl SessionStoreConfig {
    /// Set the session TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for SessionStoreConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(3600),
        }
    }
}

/// One in-flight workflow instance.
///
/// Generic over the workflow state so the store stays agnostic of the
/// dialogue layer's step machinery.
#[derive(Debug, Clone)]
pub struct Session<S> {
    /// The user that opened the workflow.
    pub user: UserId,
    /// Text of the prompt last rendered for this workflow, used to append
    /// the status suffix on confirmation.
    pub prompt: String,
    /// Current step plus accumulated draft.
    pub state: S,
}

struct Entry<S> {
    session: Session<S>,
    expires_at: Instant,
}

/// Sessions keyed by correlation token, with TTL eviction.
pub struct SessionStore<S> {
    config: SessionStoreConfig,
    entries: HashMap<CorrelationToken, Entry<S>>,
}

impl<S> SessionStore<S> {
    /// Create a store with the given configuration.
    pub fn new(config: SessionStoreConfig) -> Self {
        Self {
            config,
            entries: HashMap::new(),
        }
    }

    /// Open or replace the session for a token.
    ///
    /// A command re-using the token of an open workflow replaces it; the
    /// old draft is unreachable anyway since its prompt was superseded.
    pub fn insert(&mut self, token: CorrelationToken, session: Session<S>) {
        self.purge_expired();
        let expires_at = Instant::now() + *self.config.ttl();
        if self
            .entries
            .insert(token, Entry { session, expires_at })
            .is_some()
        {
            tracing::debug!(%token, "replaced open session");
        }
    }

    /// Look up the live session for a token.
    pub fn get(&mut self, token: CorrelationToken) -> Option<&Session<S>> {
        self.purge_expired();
        self.entries.get(&token).map(|entry| &entry.session)
    }

    /// Remove and return the live session for a token.
    pub fn take(&mut self, token: CorrelationToken) -> Option<Session<S>> {
        self.purge_expired();
        self.entries.remove(&token).map(|entry| entry.session)
    }

    /// Drop the session for a token, if any.
    pub fn remove(&mut self, token: CorrelationToken) {
        self.entries.remove(&token);
    }

    /// Drop every session belonging to a user.
    ///
    /// Backs the global cancel command, which force-ends the user's active
    /// workflow regardless of step.
    pub fn clear_user(&mut self, user: UserId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.session.user != user);
        before - self.entries.len()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn purge_expired(&mut self) {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        let dropped = before - self.entries.len();
        if dropped > 0 {
            tracing::debug!(dropped, "evicted expired sessions");
        }
    }
}

impl<S> Default for SessionStore<S> {
    fn default() -> Self {
        Self::new(SessionStoreConfig::default())
    }
}
