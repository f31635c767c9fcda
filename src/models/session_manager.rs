use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use log::info;
use crate::config::SESSION_TTL_SECS;
use crate::models::session_state::SessionState;

type Sessions = HashMap<String, (SessionState, Instant)>;

/// Holds one `SessionState` per session id.
///
/// Entries not touched for `ttl` are dropped, so a session that is simply abandoned
/// ends the same way a cleared one does.
#[derive(Clone)]
pub struct SessionManager {
    sessions: Arc<Mutex<Sessions>>,
    ttl: Duration,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManager {
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(SESSION_TTL_SECS))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        SessionManager {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Sessions> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn prune(&self, sessions: &mut Sessions) {
        let now = Instant::now();
        let before = sessions.len();
        sessions.retain(|_, (_, last_seen)| now.duration_since(*last_seen) < self.ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!("Evicted {} expired session(s)", evicted);
        }
    }

    /// Inserts or updates a session
    pub fn insert(&self, session_id: String, state: SessionState) {
        let mut sessions = self.lock();
        self.prune(&mut sessions);
        sessions.insert(session_id, (state, Instant::now()));
    }

    /// Returns the session's state, `Idle` if the session is unknown or expired.
    pub fn get(&self, session_id: &str) -> SessionState {
        let mut sessions = self.lock();
        self.prune(&mut sessions);
        match sessions.get_mut(session_id) {
            Some((state, last_seen)) => {
                *last_seen = Instant::now();
                state.clone()
            }
            None => SessionState::Idle,
        }
    }

    pub fn remove(&self, session_id: &str) {
        self.lock().remove(session_id);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processed(email: &str) -> SessionState {
        let mut state = SessionState::default();
        state.submit(email).unwrap();
        state
    }

    #[test]
    fn test_unknown_session_is_idle() {
        let manager = SessionManager::new();
        assert_eq!(manager.get("missing"), SessionState::Idle);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let manager = SessionManager::new();
        manager.insert("a".to_string(), processed("email for a"));

        assert_eq!(manager.get("a").raw_email(), Some("email for a"));
        assert_eq!(manager.get("b"), SessionState::Idle);

        manager.remove("a");
        assert!(manager.is_empty());
    }

    #[test]
    fn test_stale_session_is_evicted() {
        let manager = SessionManager::with_ttl(Duration::ZERO);
        manager.insert("abandoned".to_string(), processed("left behind"));

        assert_eq!(manager.get("abandoned"), SessionState::Idle);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_insert_prunes_other_stale_sessions() {
        let manager = SessionManager::with_ttl(Duration::ZERO);
        manager.insert("old".to_string(), processed("old email"));
        manager.insert("new".to_string(), processed("new email"));

        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_active_session_survives() {
        let manager = SessionManager::with_ttl(Duration::from_secs(3600));
        manager.insert("active".to_string(), processed("still here"));

        assert_eq!(manager.get("active").raw_email(), Some("still here"));
        assert_eq!(manager.len(), 1);
    }
}
